use thiserror::Error;

/// Failures surfaced by a single fetch-and-export run. All of them are
/// terminal; the next scheduled run is the only retry.
#[derive(Debug, Error)]
pub enum Error {
    /// The feed request could not complete, timed out, or came back with a
    /// non-success status.
    #[error("fixture feed request failed: {0}")]
    Network(String),

    /// The feed responded, but the body was not a fixture document or a
    /// record was missing a required field.
    #[error("unexpected fixture feed response: {0}")]
    Parse(String),

    /// The output file could not be created or replaced.
    #[error("failed to write fixture csv: {0}")]
    Io(#[from] std::io::Error),

    /// Startup configuration was invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

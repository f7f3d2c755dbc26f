use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info, warn};

use gmsfeed_fixture_export::config::Config;
use gmsfeed_fixture_export::error::Error;
use gmsfeed_fixture_export::export;
use gmsfeed_fixture_export::gmsfeed::GmsFeed;

fn main() -> ExitCode {
    // Structured logging to stdout; RUST_LOG overrides the default level.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Fixture export failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let latest_path = config.latest_path();
    info!(club_id = %config.club_id, output = %latest_path.display(), "Starting fixture export");

    let feed = GmsFeed::new(&config);
    let fixtures = feed.fetch_fixtures(config.club_id)?;

    export::export_to_csv(&fixtures, &latest_path)?;

    // Dated snapshot alongside the canonical file, so each run leaves a
    // historical record while latest_fixtures.csv stays fully replaced.
    let snapshot_path = config.snapshot_path(chrono::Utc::now().naive_utc());
    export::export_to_csv(&fixtures, &snapshot_path)?;

    if let Err(e) = write_actions_outputs(&latest_path, fixtures.len()) {
        // The csv already landed; a missing step-output file should not fail the run.
        warn!(error = %e, "Failed to write GitHub Actions step outputs");
    }

    info!(count = fixtures.len(), "Fixture export complete");
    Ok(())
}

/// When running under GitHub Actions, expose the artifact path and record
/// count as step outputs for downstream workflow steps.
fn write_actions_outputs(latest_path: &Path, record_count: usize) -> std::io::Result<()> {
    if std::env::var_os("GITHUB_ACTIONS").is_none() {
        return Ok(());
    }
    let Some(output_file) = std::env::var_os("GITHUB_OUTPUT") else {
        return Ok(());
    };
    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(output_file)?;
    writeln!(file, "csv_file={}", latest_path.display())?;
    writeln!(file, "record_count={record_count}")?;
    Ok(())
}

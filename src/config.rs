use std::env;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use uuid::{Uuid, uuid};

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://gmsfeed.co.uk/api/";
pub const DEFAULT_CLUB_ID: Uuid = uuid!("e9ba26d3-7e18-4772-abb0-584e887c9d38");
const DEFAULT_OUTPUT_DIR: &str = "data";
const LATEST_FILE_NAME: &str = "latest_fixtures.csv";

/// Run configuration: in-code defaults, overridable from the environment.
/// Immutable for the life of a run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Which club's fixtures to request (UUID per the feed's contract).
    pub club_id: Uuid,
    pub base_url: String,
    /// Directory receiving the canonical csv and dated snapshots.
    pub output_dir: PathBuf,
    /// Optional feed API key, sent as both Bearer token and X-API-Key.
    pub api_key: Option<String>,
    /// Server-side sort key for the fixtures query.
    pub sort_by: String,
    /// Which fixture set to request (e.g. "results").
    pub show: String,
    /// Zone used to render kick-off times taken from absolute timestamps.
    pub timezone: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            club_id: DEFAULT_CLUB_ID,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_key: None,
            sort_by: "fixtureTime".to_string(),
            show: "results".to_string(),
            timezone: chrono_tz::Europe::London,
        }
    }
}

impl Config {
    /// Load configuration, overriding defaults with environment variables
    /// where present.
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();

        if let Ok(club_id) = env::var("CLUB_ID") {
            config.club_id = club_id
                .parse()
                .map_err(|_| Error::Config(format!("CLUB_ID is not a valid UUID: {club_id}")))?;
        }
        if let Ok(base_url) = env::var("GMSFEED_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(output_dir) = env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(output_dir);
        }
        config.api_key = env::var("SPORTS_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());
        if let Ok(sort_by) = env::var("GMSFEED_SORT_BY") {
            config.sort_by = sort_by;
        }
        if let Ok(show) = env::var("GMSFEED_SHOW") {
            config.show = show;
        }
        if let Ok(timezone) = env::var("FIXTURE_TZ") {
            config.timezone = timezone
                .parse()
                .map_err(|_| Error::Config(format!("FIXTURE_TZ is not a known zone: {timezone}")))?;
        }

        Ok(config)
    }

    /// Canonical output file, fully replaced on every successful run.
    pub fn latest_path(&self) -> PathBuf {
        self.output_dir.join(LATEST_FILE_NAME)
    }

    /// Dated snapshot written alongside the canonical file.
    pub fn snapshot_path(&self, now: NaiveDateTime) -> PathBuf {
        self.output_dir
            .join(format!("fixture_data_{}.csv", now.format("%Y%m%d_%H%M%S")))
    }
}

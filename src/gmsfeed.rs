use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use tracing::{error, info, info_span, instrument};
use ureq::Agent;
use uuid::Uuid;

use crate::config::Config;
use crate::error::Error;
use crate::model::feed::{FeedDocument, FeedFixture};
use crate::model::fixture::Fixture;

const USER_AGENT: &str = concat!("gmsfeed-fixture-export/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the gmsfeed.co.uk fixtures endpoint.
#[derive(Debug)]
pub struct GmsFeed {
    agent: Agent,
    base_url: String,
    api_key: Option<String>,
    sort_by: String,
    show: String,
    timezone: Tz,
}

impl GmsFeed {
    pub fn new(config: &Config) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .into();
        Self {
            agent,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            sort_by: config.sort_by.clone(),
            show: config.show.clone(),
            timezone: config.timezone,
        }
    }

    /// Fetch the configured club's fixtures: one GET, no retries. The next
    /// scheduled run is the only retry cadence.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_fixtures(&self, club_id: Uuid) -> Result<Vec<Fixture>, Error> {
        let url = format!(
            "{}fixtures?club_id={}&sort_by={}&show={}",
            self.base_url, club_id, self.sort_by, self.show
        );

        let response_result = {
            let _span = info_span!("gmsfeed_fetch", url = %url).entered();
            let mut request = self
                .agent
                .get(&url)
                .header("User-Agent", USER_AGENT)
                .header("Accept", "application/json");
            if let Some(key) = &self.api_key {
                request = request
                    .header("Authorization", format!("Bearer {key}"))
                    .header("X-API-Key", key.as_str());
            }
            request.call()
        };

        let response = response_result.map_err(|e| {
            error!(error = %e, url = %url, "Fixture request failed");
            Error::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), url = %url, "Fixture endpoint returned non-success status");
            return Err(Error::Network(format!("unexpected status {status}")));
        }

        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, url = %url, "Failed to read response body");
            Error::Network(format!("failed to read response body: {e}"))
        })?;

        self.parse_feed(&body)
    }

    /// Parse a raw response body into normalized fixtures (no network).
    /// Rows come back sorted by kick-off so the export is stable regardless
    /// of upstream ordering.
    pub fn parse_feed(&self, body: &str) -> Result<Vec<Fixture>, Error> {
        let document: FeedDocument = serde_json::from_str(body).map_err(|e| {
            error!(error = %e, "Failed to deserialize fixture feed");
            Error::Parse(format!("not a fixture document: {e}"))
        })?;

        let raw = document
            .into_fixtures()
            .ok_or_else(|| Error::Parse("no fixture collection in response".to_string()))?;

        let mut fixtures = raw
            .into_iter()
            .map(|record| normalize(record, self.timezone))
            .collect::<Result<Vec<_>, _>>()?;
        fixtures.sort_by(|a, b| {
            a.kickoff
                .cmp(&b.kickoff)
                .then_with(|| a.home_team.cmp(&b.home_team))
        });

        info!(count = fixtures.len(), "Parsed fixture feed");
        Ok(fixtures)
    }
}

/// Turn one raw feed record into a normalized fixture, rejecting records
/// that are missing required fields rather than inventing values for them.
fn normalize(raw: FeedFixture, timezone: Tz) -> Result<Fixture, Error> {
    let kickoff = match raw.fixture_time.as_deref() {
        Some(s) => parse_kickoff(s, timezone)
            .ok_or_else(|| Error::Parse(format!("unparseable fixture time: {s}")))?,
        None => {
            let date = raw
                .date
                .as_deref()
                .ok_or_else(|| Error::Parse("fixture is missing a date".to_string()))?;
            let time = raw
                .time
                .as_deref()
                .ok_or_else(|| Error::Parse("fixture is missing a kick-off time".to_string()))?;
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| Error::Parse(format!("unparseable fixture date {date}: {e}")))?;
            let time = NaiveTime::parse_from_str(time, "%H:%M")
                .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
                .map_err(|e| Error::Parse(format!("unparseable kick-off time {time}: {e}")))?;
            date.and_time(time)
        }
    };

    let home_team = required_name(raw.home_team, "home team")?;
    let away_team = required_name(raw.away_team, "away team")?;

    let score = match (raw.home_score, raw.away_score) {
        (Some(home), Some(away)) => Some((home, away)),
        (None, None) => None,
        _ => {
            return Err(Error::Parse(format!(
                "fixture {home_team} v {away_team} has a score for only one side"
            )));
        }
    };

    Ok(Fixture {
        kickoff,
        home_team,
        away_team,
        score,
        competition: raw.competition.unwrap_or_default(),
        venue: raw.venue.unwrap_or_default(),
    })
}

/// Parse a combined kick-off timestamp. Absolute timestamps are rendered in
/// the configured zone; naive ones are taken verbatim as feed-local time.
fn parse_kickoff(s: &str, timezone: Tz) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&timezone).naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok()
}

fn required_name(value: Option<String>, what: &str) -> Result<String, Error> {
    match value {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(Error::Parse(format!("fixture is missing a {what} name"))),
    }
}

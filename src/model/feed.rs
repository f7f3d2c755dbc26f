use serde::Deserialize;

/// Raw feed response. The endpoint serves either a bare array of fixtures
/// or an envelope object carrying the array under one of several keys.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedDocument {
    Fixtures(Vec<FeedFixture>),
    Envelope(FeedEnvelope),
}

#[derive(Debug, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub fixtures: Option<Vec<FeedFixture>>,
    #[serde(default)]
    pub results: Option<Vec<FeedFixture>>,
    #[serde(default)]
    pub matches: Option<Vec<FeedFixture>>,
    #[serde(default)]
    pub data: Option<Vec<FeedFixture>>,
    #[serde(default)]
    pub items: Option<Vec<FeedFixture>>,
    #[serde(default)]
    pub games: Option<Vec<FeedFixture>>,
}

impl FeedDocument {
    /// Pull the fixture list out of whichever shape the endpoint used.
    /// Returns None for an envelope with no recognized collection key.
    pub fn into_fixtures(self) -> Option<Vec<FeedFixture>> {
        match self {
            FeedDocument::Fixtures(fixtures) => Some(fixtures),
            FeedDocument::Envelope(envelope) => envelope
                .fixtures
                .or(envelope.results)
                .or(envelope.matches)
                .or(envelope.data)
                .or(envelope.items)
                .or(envelope.games),
        }
    }
}

/// One fixture as the feed serves it. Every field is optional here; required
/// fields are enforced during normalization so a malformed record reports
/// which field it is missing instead of a generic deserialize error.
#[derive(Debug, Deserialize)]
pub struct FeedFixture {
    /// Combined kick-off timestamp. The feed's own sort key is `fixtureTime`.
    #[serde(default, alias = "fixtureTime", alias = "kickoff")]
    pub fixture_time: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, alias = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(default, alias = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(default, alias = "homeScore")]
    pub home_score: Option<u32>,
    #[serde(default, alias = "awayScore")]
    pub away_score: Option<u32>,
    #[serde(default)]
    pub competition: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
}

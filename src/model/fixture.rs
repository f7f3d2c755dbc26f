use chrono::NaiveDateTime;

/// One scheduled or completed match, normalized from the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// Kick-off in the feed's local time.
    pub kickoff: NaiveDateTime,
    pub home_team: String,
    pub away_team: String,
    /// Final score as (home, away), present only once the match has been played.
    pub score: Option<(u32, u32)>,
    pub competition: String,
    pub venue: String,
}

impl Fixture {
    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }
}

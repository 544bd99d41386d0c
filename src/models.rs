//! Canonical match records shared by every data path.
//!
//! A [`Fixture`] is what the normalizer or the synthetic roster produces.
//! A [`Match`] is a fixture with its decorative odds attached, and is the
//! only record type handed to callers.

use serde::Serialize;

/// Status used when nothing better is known.
pub const STATUS_SCHEDULED: &str = "Scheduled";

/// Statuses that count as "in play". Matched by exact string equality.
pub const LIVE_STATUSES: [&str; 4] = ["1st half", "2nd half", "Halftime", "Live"];

/// Kickoff placeholder when no start time is available.
pub const UNKNOWN_KICKOFF: &str = "--:--";

pub const UNKNOWN_LEAGUE: &str = "Unknown League";
pub const UNKNOWN_TEAM: &str = "Unknown";

pub fn is_live_status(status: &str) -> bool {
    LIVE_STATUSES.contains(&status)
}

/// A normalized fixture before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    pub league: Option<String>,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// "HH:MM" 24h clock, or [`UNKNOWN_KICKOFF`].
    pub kickoff_time: String,
    status: String,
    is_live: bool,
}

impl Fixture {
    pub fn new(
        league: Option<String>,
        home_team: &str,
        away_team: &str,
        kickoff_time: String,
        status: impl Into<String>,
    ) -> Self {
        let status = status.into();
        Self {
            league,
            home_team: team_name(home_team),
            away_team: team_name(away_team),
            home_score: None,
            away_score: None,
            kickoff_time,
            is_live: is_live_status(&status),
            status,
        }
    }

    pub fn with_scores(mut self, home: Option<u32>, away: Option<u32>) -> Self {
        self.home_score = home;
        self.away_score = away;
        self
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }

    /// Replace the status, keeping `is_live` in step with it.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.is_live = is_live_status(&self.status);
    }
}

fn team_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_TEAM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Decorative prediction and odds fields. Carries no relation to the real score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    /// "A-B".
    pub predicted_score: String,
    pub handicap_line: f64,
    pub over_under_line: f64,
    pub possession_home: Option<u8>,
    pub possession_away: Option<u8>,
    pub key_home: Option<f64>,
    pub key_away: Option<f64>,
}

/// A fully enriched match record, serialized flat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    #[serde(flatten)]
    pub fixture: Fixture,
    #[serde(flatten)]
    pub enrichment: Enrichment,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.fixture.is_live()
    }

    pub fn status(&self) -> &str {
        self.fixture.status()
    }
}

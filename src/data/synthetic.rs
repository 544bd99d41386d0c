//! Synthetic fixture roster.
//!
//! Stands in for the upstream feed when it is down or returns nothing usable.
//! Values are random but the shape is fixed: one fixture per catalog pairing,
//! with the same fields the normalizer produces.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Fixture, LIVE_STATUSES, STATUS_SCHEDULED};

/// Default chance that a synthetic fixture is in play.
pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.2;

/// Team pairings spanning several leagues and confederations.
pub const TEAM_PAIRS: [(&str, &str); 20] = [
    ("Arsenal", "Liverpool"),
    ("Real Madrid", "Atletico Madrid"),
    ("Barcelona", "Sevilla"),
    ("Man City", "Chelsea"),
    ("Inter Milan", "Juventus"),
    ("Bayern Munich", "Dortmund"),
    ("PSG", "Lyon"),
    ("Napoli", "Lazio"),
    ("Leeds United", "Man United"),
    ("Tottenham", "Sunderland"),
    ("Ajax", "PSV"),
    ("Porto", "Benfica"),
    ("Celtic", "Rangers"),
    ("Fenerbahce", "Galatasaray"),
    ("Boca Juniors", "River Plate"),
    ("Flamengo", "Palmeiras"),
    ("Milan", "Roma"),
    ("Leverkusen", "Leipzig"),
    ("Al Nassr", "Al Hilal"),
    ("Inter Miami", "LA Galaxy"),
];

pub const LEAGUES: [&str; 5] = [
    "Premier League",
    "La Liga",
    "Serie A",
    "Champions League",
    "International",
];

/// Generator for the fallback roster.
#[derive(Debug, Clone)]
pub struct SyntheticRoster {
    pairs: Vec<(String, String)>,
    live_probability: f64,
}

impl Default for SyntheticRoster {
    fn default() -> Self {
        Self::new(DEFAULT_LIVE_PROBABILITY)
    }
}

impl SyntheticRoster {
    /// Roster over the built-in [`TEAM_PAIRS`] catalog.
    pub fn new(live_probability: f64) -> Self {
        let pairs = TEAM_PAIRS
            .iter()
            .map(|(home, away)| (home.to_string(), away.to_string()))
            .collect();
        Self::with_catalog(pairs, live_probability)
    }

    pub fn with_catalog(pairs: Vec<(String, String)>, live_probability: f64) -> Self {
        Self {
            pairs,
            live_probability: live_probability.clamp(0.0, 1.0),
        }
    }

    /// Number of fixtures every call to [`generate`](Self::generate) returns.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Fixture> {
        self.pairs
            .iter()
            .map(|(home, away)| self.fixture(home, away, rng))
            .collect()
    }

    fn fixture<R: Rng + ?Sized>(&self, home: &str, away: &str, rng: &mut R) -> Fixture {
        let kickoff = format!("{:02}:{:02}", rng.gen_range(0..24), rng.gen_range(0..6) * 10);
        let league = LEAGUES.choose(rng).map(|l| l.to_string());

        if rng.gen_bool(self.live_probability) {
            let status = LIVE_STATUSES.choose(rng).copied().unwrap_or("Live");
            Fixture::new(league, home, away, kickoff, status)
                .with_scores(Some(rng.gen_range(0..=2)), Some(rng.gen_range(0..=1)))
        } else {
            Fixture::new(league, home, away, kickoff, STATUS_SCHEDULED)
        }
    }
}

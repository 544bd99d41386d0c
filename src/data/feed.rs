//! Match acquisition with guaranteed fallback.
//!
//! One `acquire` call makes a single bounded attempt against the upstream
//! source. Whatever happens, the caller gets a non-empty list of enriched
//! matches: normalized upstream fixtures when there are any, the synthetic
//! roster otherwise. No retries; calling again is the recovery path.

use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::data::enrichment::enrich;
use crate::data::normalize::normalize;
use crate::data::sofascore::SofascoreSource;
use crate::data::synthetic::SyntheticRoster;
use crate::data::{EventSource, FetchError};
use crate::models::Match;

/// Faults that escape `acquire`. Unreachable with the built-in catalog.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("synthetic roster is empty, no matches to serve")]
    EmptyRoster,
}

/// Where the served matches came from. Never exposed over the API.
#[derive(Debug)]
pub enum Origin {
    Upstream,
    Fallback(FallbackReason),
}

#[derive(Debug)]
pub enum FallbackReason {
    Fetch(FetchError),
    /// Upstream answered with events, but none survived normalization.
    NothingUsable { skipped: usize },
}

/// Result of one acquisition, with diagnostics.
#[derive(Debug)]
pub struct Acquisition {
    pub matches: Vec<Match>,
    pub origin: Origin,
    /// Upstream events dropped by the normalizer.
    pub skipped: usize,
}

impl Acquisition {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, Origin::Fallback(_))
    }
}

pub struct MatchFeed {
    source: Box<dyn EventSource>,
    roster: SyntheticRoster,
    timeout: Duration,
    max_events: Option<usize>,
}

impl MatchFeed {
    pub fn new(source: Box<dyn EventSource>, roster: SyntheticRoster, timeout: Duration) -> Self {
        Self {
            source,
            roster,
            timeout,
            max_events: None,
        }
    }

    /// Cap on raw events passed to the normalizer. `None` means unlimited.
    pub fn with_max_events(mut self, max_events: Option<usize>) -> Self {
        self.max_events = max_events;
        self
    }

    /// Feed backed by the SofaScore source described in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = SofascoreSource::new(&config.upstream)?;
        let roster = SyntheticRoster::new(config.fallback.live_probability);
        Ok(Self::new(
            Box::new(source),
            roster,
            Duration::from_secs(config.upstream.timeout_seconds),
        )
        .with_max_events(config.upstream.max_events))
    }

    /// Non-empty list of enriched matches.
    pub async fn acquire(&self) -> Result<Vec<Match>, FeedError> {
        Ok(self.acquire_report().await?.matches)
    }

    pub async fn acquire_report(&self) -> Result<Acquisition, FeedError> {
        let date = Local::now().date_naive();
        let fetched = match tokio::time::timeout(self.timeout, self.source.fetch_events(date)).await
        {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        };

        let mut rng = StdRng::from_entropy();
        self.resolve(fetched, &mut rng)
    }

    /// Pick upstream or synthetic fixtures for a fetch outcome and enrich them.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        fetched: Result<Vec<serde_json::Value>, FetchError>,
        rng: &mut R,
    ) -> Result<Acquisition, FeedError> {
        let (fixtures, origin, skipped) = match fetched {
            Ok(mut events) => {
                if let Some(max) = self.max_events {
                    events.truncate(max);
                }
                let report = normalize(&events);
                let skipped = report.skipped.len();

                if report.fixtures.is_empty() {
                    warn!(
                        source = self.source.name(),
                        events = events.len(),
                        skipped,
                        "No usable upstream events, serving synthetic roster"
                    );
                    let reason = FallbackReason::NothingUsable { skipped };
                    (self.roster.generate(rng), Origin::Fallback(reason), skipped)
                } else {
                    info!(
                        source = self.source.name(),
                        count = report.fixtures.len(),
                        skipped,
                        "Upstream events normalized"
                    );
                    (report.fixtures, Origin::Upstream, skipped)
                }
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    class = e.class(),
                    error = %e,
                    "Upstream unusable, serving synthetic roster"
                );
                (self.roster.generate(rng), Origin::Fallback(FallbackReason::Fetch(e)), 0)
            }
        };

        if fixtures.is_empty() {
            return Err(FeedError::EmptyRoster);
        }

        let matches = fixtures.into_iter().map(|f| enrich(f, rng)).collect();
        Ok(Acquisition {
            matches,
            origin,
            skipped,
        })
    }
}

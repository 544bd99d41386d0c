pub mod enrichment;
pub mod feed;
pub mod normalize;
pub mod sofascore;
pub mod synthetic;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Why an upstream fetch produced nothing usable.
///
/// None of these reach the caller of [`feed::MatchFeed::acquire`]; they only
/// decide that the synthetic roster is served instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("upstream returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("upstream body is not a valid events document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("upstream returned no events")]
    Empty,
}

impl FetchError {
    /// Coarse outcome class used in logs.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Transport(_) | Self::Timeout(_) | Self::Status(_) => "transport",
            Self::Parse(_) => "parse",
            Self::Empty => "empty",
        }
    }
}

/// A provider of raw scheduled-event records for a given day.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the raw events. An empty batch is reported as [`FetchError::Empty`].
    async fn fetch_events(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>, FetchError>;

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

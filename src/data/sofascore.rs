//! SofaScore scheduled-events source.
//!
//! Fetches the day's football fixtures from the public
//! `/api/v1/sport/football/scheduled-events/{date}` endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::config::UpstreamConfig;
use crate::data::{EventSource, FetchError};

pub struct SofascoreSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SofascoreSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);
        let client = reqwest::Client::builder()
            // Default client identifiers get rejected upstream
            .user_agent(&config.user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn events_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/api/v1/sport/football/scheduled-events/{}",
            self.base_url,
            date.format("%Y-%m-%d")
        )
    }
}

#[async_trait]
impl EventSource for SofascoreSource {
    async fn fetch_events(&self, date: NaiveDate) -> Result<Vec<serde_json::Value>, FetchError> {
        let url = self.events_url(date);
        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Transport(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let document: ScheduledEvents = serde_json::from_str(&body)?;

        if document.events.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(document.events)
    }

    fn name(&self) -> &str {
        "sofascore"
    }
}

// --- SofaScore API Response Types ---

/// Only the envelope is typed; events stay opaque for the normalizer.
#[derive(Debug, Deserialize)]
struct ScheduledEvents {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

//! Upstream event normalization.
//!
//! Maps the loosely shaped JSON events of the scheduled-events feed onto
//! [`Fixture`]. Missing fields fall back to defaults; a field that is present
//! but has the wrong structure causes that one event to be skipped.

use chrono::{Local, TimeZone};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Fixture, STATUS_SCHEDULED, UNKNOWN_KICKOFF, UNKNOWN_LEAGUE, UNKNOWN_TEAM};

/// Placeholder the upstream uses for "no score yet".
pub const SCORE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("event is not a JSON object")]
    NotAnObject,
    #[error("field `{0}` is present but not an object")]
    MalformedField(&'static str),
}

/// Outcome of extracting a single raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Parsed(Fixture),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEvent {
    /// Position of the event in the raw batch.
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub fixtures: Vec<Fixture>,
    pub skipped: Vec<SkippedEvent>,
}

/// Normalize a batch. Never fails as a whole; bad events land in `skipped`.
pub fn normalize(raw_events: &[Value]) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    for (index, event) in raw_events.iter().enumerate() {
        match extract(event) {
            Extraction::Parsed(fixture) => report.fixtures.push(fixture),
            Extraction::Skipped(reason) => {
                tracing::debug!(index, reason = %reason, "Skipping upstream event");
                report.skipped.push(SkippedEvent { index, reason });
            }
        }
    }

    report
}

pub fn extract(event: &Value) -> Extraction {
    match try_extract(event) {
        Ok(fixture) => Extraction::Parsed(fixture),
        Err(reason) => Extraction::Skipped(reason),
    }
}

fn try_extract(event: &Value) -> Result<Fixture, SkipReason> {
    let event = event.as_object().ok_or(SkipReason::NotAnObject)?;

    let tournament = nested(event, "tournament")?;
    let home_team = nested(event, "homeTeam")?;
    let away_team = nested(event, "awayTeam")?;
    let home_score = nested(event, "homeScore")?;
    let away_score = nested(event, "awayScore")?;
    let status = nested(event, "status")?;

    let league = string_field(tournament, "name").unwrap_or(UNKNOWN_LEAGUE);
    let status = string_field(status, "description").unwrap_or(STATUS_SCHEDULED);
    let kickoff = event
        .get("startTimestamp")
        .and_then(Value::as_i64)
        .map(kickoff_time)
        .unwrap_or_else(|| UNKNOWN_KICKOFF.to_string());

    let fixture = Fixture::new(
        Some(league.to_string()),
        string_field(home_team, "name").unwrap_or(UNKNOWN_TEAM),
        string_field(away_team, "name").unwrap_or(UNKNOWN_TEAM),
        kickoff,
        status,
    )
    .with_scores(score(home_score), score(away_score));

    Ok(fixture)
}

/// Look up a nested object. Absent means `None`; any other non-object is malformed.
fn nested<'a>(
    event: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a Map<String, Value>>, SkipReason> {
    match event.get(key) {
        None => Ok(None),
        Some(Value::Object(obj)) => Ok(Some(obj)),
        Some(_) => Err(SkipReason::MalformedField(key)),
    }
}

fn string_field<'a>(obj: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a str> {
    obj?.get(key)?.as_str()
}

/// `current` score: integers pass through, the placeholder and anything else are "not present".
fn score(obj: Option<&Map<String, Value>>) -> Option<u32> {
    match obj?.get("current")? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) if s == SCORE_PLACEHOLDER => None,
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Unix seconds to local "HH:MM". Zero is the upstream's "no start time".
pub fn kickoff_time(timestamp: i64) -> String {
    if timestamp == 0 {
        return UNKNOWN_KICKOFF.to_string();
    }
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => UNKNOWN_KICKOFF.to_string(),
    }
}

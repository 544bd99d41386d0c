//! Decorative prediction and odds fields.
//!
//! Applied identically to upstream and synthetic fixtures, so callers can
//! never tell the two apart by shape.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Enrichment, Fixture, Match};

/// Asian handicap ladder, -2.5..=2.5 in quarter steps.
pub const HANDICAP_LADDER: [f64; 21] = [
    -2.5, -2.25, -2.0, -1.75, -1.5, -1.25, -1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0,
    1.25, 1.5, 1.75, 2.0, 2.25, 2.5,
];

/// Over/under goal lines, 1.5..=4.5 in quarter steps.
pub const OVER_UNDER_LADDER: [f64; 13] = [
    1.5, 1.75, 2.0, 2.25, 2.5, 2.75, 3.0, 3.25, 3.5, 3.75, 4.0, 4.25, 4.5,
];

pub const PREDICTED_HOME_GOALS: RangeInclusive<u32> = 0..=3;
pub const PREDICTED_AWAY_GOALS: RangeInclusive<u32> = 0..=2;

/// Home possession share in percent; away takes the remainder.
pub const POSSESSION_HOME: RangeInclusive<u8> = 30..=70;

/// Magnitude of the signed "key" odds values.
pub const KEY_MAGNITUDE: RangeInclusive<f64> = 0.85..=1.05;

/// Attach decorative fields to a fixture.
pub fn enrich<R: Rng + ?Sized>(fixture: Fixture, rng: &mut R) -> Match {
    Match {
        fixture,
        enrichment: draw(rng),
    }
}

/// Redraw the decorative fields of an already enriched match.
pub fn reenrich<R: Rng + ?Sized>(m: Match, rng: &mut R) -> Match {
    enrich(m.fixture, rng)
}

fn draw<R: Rng + ?Sized>(rng: &mut R) -> Enrichment {
    let pred_home = rng.gen_range(PREDICTED_HOME_GOALS);
    let pred_away = rng.gen_range(PREDICTED_AWAY_GOALS);
    let possession_home = rng.gen_range(POSSESSION_HOME);

    Enrichment {
        predicted_score: format!("{pred_home}-{pred_away}"),
        // Ladders are non-empty constants
        handicap_line: HANDICAP_LADDER.choose(rng).copied().unwrap_or(0.0),
        over_under_line: OVER_UNDER_LADDER.choose(rng).copied().unwrap_or(2.5),
        possession_home: Some(possession_home),
        possession_away: Some(100 - possession_home),
        key_home: Some(signed_key(rng)),
        key_away: Some(signed_key(rng)),
    }
}

fn signed_key<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let magnitude = (rng.gen_range(KEY_MAGNITUDE) * 100.0).round() / 100.0;
    if rng.gen_bool(0.5) {
        magnitude
    } else {
        -magnitude
    }
}

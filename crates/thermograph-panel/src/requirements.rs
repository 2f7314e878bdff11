// File: crates/thermograph-panel/src/requirements.rs
// Summary: New York City heat season minimum indoor temperatures.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Required minimum during the day (06:00 to 21:59).
pub const DAY_MINIMUM: f64 = 68.0;
/// Required minimum overnight (22:00 to 05:59).
pub const NIGHT_MINIMUM: f64 = 62.0;

/// Heat season runs October through May.
pub fn in_heat_season(t: &NaiveDateTime) -> bool {
    !(6..=9).contains(&t.month())
}

/// Minimum indoor temperature the landlord must provide at local time `t`,
/// or `None` outside heat season.
pub fn minimum_required(t: &NaiveDateTime) -> Option<f64> {
    if !in_heat_season(t) {
        return None;
    }
    if t.hour() < 6 || t.hour() > 21 {
        Some(NIGHT_MINIMUM)
    } else {
        Some(DAY_MINIMUM)
    }
}

/// Requirement series aligned with `timestamps`. `None` unless every
/// timestamp falls inside heat season, so a window that crosses May 31 or
/// September 30 gets no requirement line at all rather than a partial one.
/// Use [`minimum_required`] per sample to get the in-season part.
pub fn requirement_series(timestamps: &[NaiveDateTime]) -> Option<Vec<f64>> {
    timestamps.iter().map(minimum_required).collect()
}

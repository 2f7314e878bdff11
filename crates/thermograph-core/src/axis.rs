// File: crates/thermograph-core/src/axis.rs
// Summary: Axis model with labels, ranges and time formatting.

use chrono::{DateTime, NaiveDateTime};

/// Tooltip format for time axes: local clock time, e.g. `8:05 PM`.
pub const LOCAL_TIME_FORMAT: &str = "%-I:%M %p";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    /// Values are seconds since the epoch of a naive local timestamp.
    Time,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
    /// Draw `label` next to the axis.
    pub show_label: bool,
    /// strftime pattern used for tooltips on time axes.
    pub tooltip_format: Option<String>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            kind: ScaleKind::Linear,
            show_label: true,
            tooltip_format: None,
        }
    }

    /// Time axis spanning `[min, max]`; the label is hidden.
    pub fn time(min: NaiveDateTime, max: NaiveDateTime) -> Self {
        Self {
            label: String::new(),
            min: time_value(min),
            max: time_value(max),
            kind: ScaleKind::Time,
            show_label: false,
            tooltip_format: Some(LOCAL_TIME_FORMAT.to_string()),
        }
    }

    pub fn span(&self) -> f64 { self.max - self.min }

    /// Text for a tick at `value`.
    pub fn format_tick(&self, value: f64) -> String {
        match self.kind {
            ScaleKind::Linear => format_number(value),
            ScaleKind::Time => {
                let Some(t) = time_from_value(value) else { return String::new() };
                if self.span() <= 36.0 * 3600.0 {
                    t.format("%-I %p").to_string()
                } else {
                    t.format("%b %-d").to_string()
                }
            }
        }
    }

    /// Text shown in a tooltip title for `value`.
    pub fn format_tooltip(&self, value: f64) -> String {
        match (self.kind, self.tooltip_format.as_deref()) {
            (ScaleKind::Time, Some(fmt)) => time_from_value(value)
                .map(|t| t.format(fmt).to_string())
                .unwrap_or_default(),
            _ => format_number(value),
        }
    }
}

/// Map a naive timestamp onto the axis value domain.
pub fn time_value(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

/// Inverse of [`time_value`], truncated to whole seconds.
pub fn time_from_value(v: f64) -> Option<NaiveDateTime> {
    if !v.is_finite() { return None; }
    DateTime::from_timestamp(v.floor() as i64, 0).map(|dt| dt.naive_utc())
}

/// Shortest decimal form: `65`, `65.5`.
pub fn format_number(v: f64) -> String {
    format!("{v}")
}

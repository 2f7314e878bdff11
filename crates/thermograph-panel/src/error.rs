// File: crates/thermograph-panel/src/error.rs
// Summary: Error type surfaced by panel rendering and export.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("no drawable region named '{0}' on this page")]
    RegionNotFound(String),

    #[error("{series} has {actual} values but the time series has {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("chart has not finished painting; image export is not available yet")]
    NotPainted,

    #[error("chart was replaced or its region removed")]
    Disposed,

    #[error("chart failed to paint: {0}")]
    PaintFailed(String),

    #[error("render failed: {0}")]
    Render(#[from] anyhow::Error),

    #[error("failed to build data export: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, PanelError>;

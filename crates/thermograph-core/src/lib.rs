// File: crates/thermograph-core/src/lib.rs
// Summary: Core library entry point; chart model, scales and headless Skia rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod theme;
pub mod text;
pub mod tooltip;
pub mod png;

pub use chart::{Chart, RenderOptions};
pub use series::{LineStyle, Series};
pub use axis::{Axis, ScaleKind};
pub use scale::{banded_bounds, LinearScale};
pub use theme::Theme;
pub use text::TextShaper;
pub use tooltip::Tooltip;

// File: crates/thermograph-core/src/series.rs
// Summary: Line series model and its stroke style.

use skia_safe as skia;

/// How a line series is stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: skia::Color,
    pub width: f32,
    /// On/off dash intervals in pixels; `None` for a solid line.
    pub dash: Option<Vec<f32>>,
    /// Fill the area between the line and the bottom of the plot with this color.
    pub fill: Option<skia::Color>,
    /// Radius of the marker drawn at each sample; 0 draws no markers.
    pub point_radius: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: skia::Color::from_argb(255, 64, 160, 255),
            width: 2.0,
            dash: None,
            fill: None,
            point_radius: 0.0,
        }
    }
}

impl LineStyle {
    pub fn solid(color: skia::Color, width: f32) -> Self {
        Self { color, width, ..Self::default() }
    }

    pub fn with_dash(mut self, intervals: &[f32]) -> Self {
        self.dash = Some(intervals.to_vec());
        self
    }

    pub fn with_fill(mut self, color: skia::Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn is_filled(&self) -> bool { self.fill.is_some() }

    pub fn is_dashed(&self) -> bool {
        self.dash.as_ref().is_some_and(|d| !d.is_empty())
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub label: String,
    /// (x, y) pairs in data units; x is ascending.
    pub data_xy: Vec<(f64, f64)>,
    pub style: LineStyle,
}

impl Series {
    pub fn with_data(label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { label: label.into(), data_xy: data, style: LineStyle::default() }
    }

    /// Pair `xs` with `ys` index by index. Extra values on either side are dropped.
    pub fn from_columns(label: impl Into<String>, xs: &[f64], ys: &[f64]) -> Self {
        let data = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self::with_data(label, data)
    }

    pub fn styled(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Index of the sample whose x is closest to `x`.
    pub fn nearest_index(&self, x: f64) -> Option<usize> {
        if self.data_xy.is_empty() || !x.is_finite() { return None; }
        let i = self.data_xy.partition_point(|&(px, _)| px < x);
        if i == 0 { return Some(0); }
        if i >= self.data_xy.len() { return Some(self.data_xy.len() - 1); }
        let before = x - self.data_xy[i - 1].0;
        let after = self.data_xy[i].0 - x;
        Some(if after < before { i } else { i - 1 })
    }
}

// File: crates/thermograph-core/src/scale.rs
// Summary: Linear value-to-pixel transforms and axis bound computation.

/// Maps a data range onto a pixel span. `lo_px` corresponds to `vmin`;
/// vertical scales pass the bottom edge as `lo_px` so values grow upwards.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub lo_px: f32,
    pub hi_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl LinearScale {
    pub fn new(lo_px: f32, hi_px: f32, vmin: f64, mut vmax: f64) -> Self {
        if (vmax - vmin).abs() < 1e-12 { vmax = vmin + 1.0; }
        Self { lo_px, hi_px, vmin, vmax }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let t = (v - self.vmin) / (self.vmax - self.vmin);
        self.lo_px + t as f32 * (self.hi_px - self.lo_px)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> f64 {
        let span = self.hi_px - self.lo_px;
        if span.abs() < f32::EPSILON { return self.vmin; }
        let t = ((px - self.lo_px) / span) as f64;
        self.vmin + t * (self.vmax - self.vmin)
    }
}

/// Min and max over the finite values of `values`.
pub fn finite_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Integer axis bounds that always cover `[floor, ceiling]` and widen to fit
/// `values` scaled by `lower_factor` / `upper_factor`:
///
/// `max = ceil(max(ceiling, max(values) * upper_factor))`
/// `min = floor(min(floor, min(values) * lower_factor))`
///
/// Non-finite values are ignored; with no finite values the band itself is returned.
pub fn banded_bounds(
    values: &[f64],
    floor: f64,
    ceiling: f64,
    lower_factor: f64,
    upper_factor: f64,
) -> (f64, f64) {
    let (lo, hi) = match finite_range(values.iter().copied()) {
        Some((lo, hi)) => (floor.min(lo * lower_factor), ceiling.max(hi * upper_factor)),
        None => (floor, ceiling),
    };
    (lo.floor(), hi.ceil())
}

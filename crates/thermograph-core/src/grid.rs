// File: crates/thermograph-core/src/grid.rs
// Summary: Grid/tick layout helpers.

/// Round-number ticks (1/2/5 x 10^n steps) inside `[min, max]`, aiming for
/// roughly `target` of them.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw = (max - min) / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * mag);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Ticks for a time axis, aligned to whole hours when the span allows it.
pub fn time_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    const HOUR: f64 = 3600.0;
    if !min.is_finite() || !max.is_finite() || max <= min || target == 0 {
        return Vec::new();
    }
    let raw = (max - min) / target as f64;
    let Some(step) = [1.0, 2.0, 3.0, 6.0, 12.0, 24.0, 48.0, 168.0]
        .iter()
        .map(|h| h * HOUR)
        .find(|s| *s >= raw)
    else {
        return nice_ticks(min, max, target);
    };
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_cover_comfort_band() {
        assert_eq!(nice_ticks(60.0, 73.0, 6), vec![60.0, 65.0, 70.0]);
    }

    #[test]
    fn nice_ticks_reject_empty_range() {
        assert!(nice_ticks(5.0, 5.0, 4).is_empty());
        assert!(nice_ticks(0.0, f64::NAN, 4).is_empty());
    }

    #[test]
    fn nice_ticks_wide_range() {
        assert_eq!(nice_ticks(52.0, 95.0, 6), vec![60.0, 70.0, 80.0, 90.0]);
    }

    #[test]
    fn time_ticks_fall_on_hours() {
        let day = 24.0 * 3600.0;
        let ticks = time_ticks(0.0, day, 8);
        assert_eq!(ticks.len(), 9);
        assert!(ticks.iter().all(|t| t % (3.0 * 3600.0) == 0.0));
    }
}

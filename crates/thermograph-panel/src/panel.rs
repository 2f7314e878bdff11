// File: crates/thermograph-panel/src/panel.rs
// Summary: ChartPanel builds the temperature chart configuration and binds it to a region.

use chrono::NaiveDateTime;
use skia_safe as skia;
use thermograph_core::axis::time_value;
use thermograph_core::{banded_bounds, Axis, Chart, LineStyle, RenderOptions, Series};
use tracing::debug;

use crate::error::{PanelError, Result};
use crate::handle::{ChartHandle, ChartState, Samples};
use crate::page::Page;

pub const TEMPERATURE_LABEL: &str = "Degrees Fahrenheit";
pub const REQUIREMENT_LABEL: &str = "Minimum Required Temperature";
pub const IMAGE_FILENAME: &str = "chart.png";
pub const DATA_FILENAME: &str = "chart.csv";

/// Temperatures the vertical axis always shows, plus the headroom applied to
/// readings outside it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComfortBand {
    pub floor: f64,
    pub ceiling: f64,
    pub lower_factor: f64,
    pub upper_factor: f64,
}

impl Default for ComfortBand {
    fn default() -> Self {
        Self { floor: 60.0, ceiling: 73.0, lower_factor: 0.95, upper_factor: 1.05 }
    }
}

impl ComfortBand {
    /// `(min, max)` of the vertical axis for `temperatures`.
    pub fn bounds(&self, temperatures: &[f64]) -> (f64, f64) {
        banded_bounds(temperatures, self.floor, self.ceiling, self.lower_factor, self.upper_factor)
    }
}

#[derive(Clone, Debug)]
pub struct PanelOptions {
    /// Width and height are replaced by the target region's size.
    pub render: RenderOptions,
    pub band: ComfortBand,
    pub image_filename: String,
    pub data_filename: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            band: ComfortBand::default(),
            image_filename: IMAGE_FILENAME.to_string(),
            data_filename: DATA_FILENAME.to_string(),
        }
    }
}

fn temperature_style() -> LineStyle {
    LineStyle {
        color: skia::Color::from_argb(255, 0xc4, 0x58, 0x50),
        width: 3.0,
        dash: None,
        fill: Some(skia::Color::from_argb(26, 0, 0, 0)),
        point_radius: 0.0,
    }
}

fn requirement_style() -> LineStyle {
    LineStyle {
        color: skia::Color::from_argb(26, 0, 0, 0),
        width: 3.0,
        dash: Some(vec![10.0, 5.0]),
        fill: None,
        point_radius: 0.0,
    }
}

fn check_lengths(timestamps: &[NaiveDateTime], temperatures: &[f64], requirements: Option<&[f64]>) -> Result<()> {
    let expected = timestamps.len();
    if temperatures.len() != expected {
        return Err(PanelError::LengthMismatch { series: "temperatures", expected, actual: temperatures.len() });
    }
    if let Some(reqs) = requirements {
        if reqs.len() != expected {
            return Err(PanelError::LengthMismatch { series: "requirements", expected, actual: reqs.len() });
        }
    }
    Ok(())
}

/// Renders temperature time series into page regions.
#[derive(Clone, Debug, Default)]
pub struct ChartPanel {
    options: PanelOptions,
}

impl ChartPanel {
    pub fn new(options: PanelOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PanelOptions { &self.options }

    /// Chart configuration for the series: the temperature line, the dashed
    /// requirement line when given, a time x axis and a banded y axis.
    pub fn build_chart(
        &self,
        timestamps: &[NaiveDateTime],
        temperatures: &[f64],
        requirements: Option<&[f64]>,
    ) -> Result<Chart> {
        check_lengths(timestamps, temperatures, requirements)?;

        let xs: Vec<f64> = timestamps.iter().copied().map(time_value).collect();
        let mut chart = Chart::new();
        chart.legend = false;
        chart.tooltips = true;

        chart.add_series(Series::from_columns(TEMPERATURE_LABEL, &xs, temperatures).styled(temperature_style()));
        if let Some(reqs) = requirements {
            chart.add_series(Series::from_columns(REQUIREMENT_LABEL, &xs, reqs).styled(requirement_style()));
        }

        chart.x_axis = match (timestamps.iter().min(), timestamps.iter().max()) {
            (Some(&lo), Some(&hi)) if hi > lo => Axis::time(lo, hi),
            (Some(&lo), _) => Axis::time(lo, lo + chrono::Duration::hours(1)),
            _ => Axis::time(NaiveDateTime::default(), NaiveDateTime::default() + chrono::Duration::hours(1)),
        };

        let (y_min, y_max) = self.options.band.bounds(temperatures);
        chart.y_axis = Axis::new(TEMPERATURE_LABEL, y_min, y_max);
        Ok(chart)
    }

    /// Build the chart for the series and bind it to `region_id`, replacing any
    /// chart already there. Painting happens on the next [`Page::run_until_idle`].
    pub fn render(
        &self,
        page: &mut Page,
        region_id: &str,
        timestamps: &[NaiveDateTime],
        temperatures: &[f64],
        requirements: Option<&[f64]>,
    ) -> Result<ChartHandle> {
        let (width, height) = page
            .region_size(region_id)
            .ok_or_else(|| PanelError::RegionNotFound(region_id.to_string()))?;
        let chart = self.build_chart(timestamps, temperatures, requirements)?;

        let render = RenderOptions {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            ..self.options.render.clone()
        };
        let samples = Samples {
            timestamps: timestamps.to_vec(),
            temperatures: temperatures.to_vec(),
            requirements: requirements.map(<[f64]>::to_vec),
        };
        debug!(
            "rendering {} samples into region '{}' (y {}..{}, requirements: {})",
            samples.timestamps.len(),
            region_id,
            chart.y_axis.min,
            chart.y_axis.max,
            samples.requirements.is_some()
        );

        let handle = ChartHandle::new(ChartState::new(
            region_id,
            chart,
            render,
            samples,
            &self.options.image_filename,
            &self.options.data_filename,
        ));
        page.bind(region_id, handle.clone());
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap().and_hms_opt(0, 0, 0).unwrap();
        (0..n).map(|i| start + chrono::Duration::minutes(10 * i as i64)).collect()
    }

    #[test]
    fn one_series_without_requirements() {
        let chart = ChartPanel::default().build_chart(&ts(3), &[65.0, 66.0, 67.0], None).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, TEMPERATURE_LABEL);
        assert!(!chart.legend);
        assert!(chart.tooltips);
        assert_eq!(chart.series[0].style.point_radius, 0.0);
    }

    #[test]
    fn requirement_series_is_dashed_and_unfilled() {
        let chart = ChartPanel::default()
            .build_chart(&ts(2), &[65.0, 70.0], Some(&[62.0, 62.0][..]))
            .unwrap();
        assert_eq!(chart.series.len(), 2);
        let req = &chart.series[1];
        assert_eq!(req.label, REQUIREMENT_LABEL);
        assert!(req.style.is_dashed());
        assert!(!req.style.is_filled());
        assert_eq!(req.data_xy.iter().map(|p| p.0).collect::<Vec<_>>(),
                   chart.series[0].data_xy.iter().map(|p| p.0).collect::<Vec<_>>());
    }

    #[test]
    fn axes_follow_band_and_time_range() {
        let stamps = ts(4);
        let chart = ChartPanel::default().build_chart(&stamps, &[55.0, 65.0, 66.0, 90.0], None).unwrap();
        assert_eq!((chart.y_axis.min, chart.y_axis.max), (52.0, 95.0));
        assert_eq!(chart.y_axis.label, TEMPERATURE_LABEL);
        assert_eq!(chart.x_axis.min, time_value(stamps[0]));
        assert_eq!(chart.x_axis.max, time_value(stamps[3]));
    }

    #[test]
    fn single_sample_gets_an_hour_wide_axis() {
        let chart = ChartPanel::default().build_chart(&ts(1), &[65.0], None).unwrap();
        assert_eq!(chart.x_axis.span(), 3600.0);
    }

    #[test]
    fn temperature_length_is_checked() {
        let err = ChartPanel::default().build_chart(&ts(2), &[65.0], None).unwrap_err();
        assert!(matches!(err, PanelError::LengthMismatch { series: "temperatures", expected: 2, actual: 1 }));
    }
}

// File: crates/thermograph-panel/tests/render.rs
// Purpose: Rendering contract: region lookup, length checks, series layout, axis bounds.

use chrono::{NaiveDate, NaiveDateTime};
use thermograph_panel::{ChartPanel, Page, PanelError, Phase};

fn stamps(n: usize) -> Vec<NaiveDateTime> {
    let start = NaiveDate::from_ymd_opt(2019, 1, 6).unwrap().and_hms_opt(6, 0, 0).unwrap();
    (0..n).map(|i| start + chrono::Duration::minutes(15 * i as i64)).collect()
}

fn page() -> Page {
    let mut page = Page::new();
    page.add_region("today", 640, 320);
    page
}

#[test]
fn unknown_region_is_rejected() {
    let mut page = page();
    let err = ChartPanel::default()
        .render(&mut page, "missing", &stamps(2), &[65.0, 70.0], None)
        .unwrap_err();
    assert!(matches!(err, PanelError::RegionNotFound(ref id) if id == "missing"));
    assert_eq!(page.pending_paints(), 0);
    assert!(page.chart_in("today").is_none());
}

#[test]
fn mismatched_requirements_render_nothing() {
    let mut page = page();
    let err = ChartPanel::default()
        .render(&mut page, "today", &stamps(3), &[65.0, 66.0, 70.0], Some(&[62.0, 62.0][..]))
        .unwrap_err();
    assert!(matches!(err, PanelError::LengthMismatch { series: "requirements", expected: 3, actual: 2 }));
    assert_eq!(page.pending_paints(), 0);
    assert!(page.chart_in("today").is_none());
}

#[test]
fn mismatch_keeps_previous_chart_alive() {
    let mut page = page();
    let panel = ChartPanel::default();
    let first = panel.render(&mut page, "today", &stamps(2), &[65.0, 70.0], None).unwrap();
    assert!(panel.render(&mut page, "today", &stamps(2), &[65.0], None).is_err());
    assert_eq!(first.phase(), Phase::Rendering);
    assert_eq!(page.pending_paints(), 1);
}

#[test]
fn series_count_follows_requirements() {
    let mut page = page();
    let panel = ChartPanel::default();

    let plain = panel.render(&mut page, "today", &stamps(2), &[65.0, 70.0], None).unwrap();
    assert_eq!(plain.series_count(), 1);

    let with_reqs = panel
        .render(&mut page, "today", &stamps(2), &[65.0, 70.0], Some(&[62.0, 62.0][..]))
        .unwrap();
    assert_eq!(with_reqs.series_count(), 2);
    let chart = with_reqs.chart();
    assert!(chart.series[1].style.is_dashed());
    assert!(!chart.series[1].style.is_filled());
}

#[test]
fn comfort_band_bounds() {
    let mut page = page();
    let panel = ChartPanel::default();
    let calm = panel.render(&mut page, "today", &stamps(3), &[64.0, 66.0, 69.0], None).unwrap();
    assert_eq!(calm.y_bounds(), (60.0, 73.0));

    let hot = panel.render(&mut page, "today", &stamps(2), &[66.0, 84.0], None).unwrap();
    assert_eq!(hot.y_bounds(), (60.0, (84.0f64 * 1.05).ceil()));

    let cold = panel.render(&mut page, "today", &stamps(2), &[48.0, 66.0], None).unwrap();
    assert_eq!(cold.y_bounds(), ((48.0f64 * 0.95).floor(), 73.0));
}

#[test]
fn empty_series_renders_band() {
    let mut page = page();
    let handle = ChartPanel::default().render(&mut page, "today", &[], &[], None).unwrap();
    assert_eq!(handle.y_bounds(), (60.0, 73.0));
    assert_eq!(page.run_until_idle().unwrap(), 1);
    assert!(handle.is_painted());
}

#[test]
fn tooltips_show_local_time_and_every_series() {
    let mut page = page();
    let handle = ChartPanel::default()
        .render(&mut page, "today", &stamps(3), &[65.0, 66.5, 70.0], Some(&[68.0, 68.0, 68.0][..]))
        .unwrap();

    let tip = handle.tooltip_at(1).unwrap();
    assert_eq!(tip.title, "6:15 AM");
    assert_eq!(
        tip.lines(),
        vec!["Degrees Fahrenheit: 66.5".to_string(), "Minimum Required Temperature: 68".to_string()]
    );
    assert!(handle.tooltip_at(3).is_none());

    // Region is 640 wide; the right edge of the plot lands on the last sample.
    let last = handle.tooltip_at_pixel(639.0).unwrap();
    assert_eq!(last.index, 2);
}

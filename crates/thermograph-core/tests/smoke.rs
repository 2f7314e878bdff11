// File: crates/thermograph-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use thermograph_core::{Axis, Chart, LineStyle, RenderOptions, Series};

fn temperature_chart() -> Chart {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("Hour", 0.0, 4.0);
    chart.y_axis = Axis::new("Degrees Fahrenheit", 60.0, 73.0);
    chart.add_series(Series::with_data(
        "Degrees Fahrenheit",
        vec![(0.0, 64.0), (1.0, 66.5), (2.0, 69.0), (3.0, 67.5), (4.0, 65.0)],
    ));
    chart.add_series(
        Series::with_data("Minimum", vec![(0.0, 62.0), (4.0, 62.0)])
            .styled(LineStyle::default().with_dash(&[10.0, 5.0])),
    );
    chart
}

#[test]
fn render_smoke_png() {
    let chart = temperature_chart();
    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn render_empty_chart() {
    let chart = Chart::new();
    let bytes = chart.render_to_png_bytes(&RenderOptions::default()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}

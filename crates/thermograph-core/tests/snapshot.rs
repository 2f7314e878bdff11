// File: crates/thermograph-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic small charts to PNG bytes (labels off).
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use skia_safe as skia;
use thermograph_core::{Axis, Chart, LineStyle, RenderOptions, Series};

fn bless_mode() -> bool {
    std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn write_or_compare(name: &str, bytes: &[u8]) {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__").join(name);
    if bless_mode() {
        if let Some(parent) = path.parent() { std::fs::create_dir_all(parent).ok(); }
        std::fs::write(&path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", path.display(), bytes.len());
        return;
    }
    if path.exists() {
        let want = std::fs::read(&path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "Pixels differ: {}", path.display());
    } else {
        eprintln!("[snapshot] Missing {}; set UPDATE_SNAPSHOTS=1 to bless.", path.display());
    }
}

fn render_bytes(build: impl FnOnce(&mut Chart)) -> Vec<u8> {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 57.0, 77.0);
    build(&mut chart);

    let opts = RenderOptions { width: 320, height: 200, draw_labels: false, ..RenderOptions::default() };
    chart.render_to_png_bytes(&opts).expect("render bytes")
}

#[test]
fn golden_temperature_line() {
    let bytes = render_bytes(|c| {
        c.add_series(
            Series::with_data("t", vec![(0.0, 64.0), (1.0, 66.0), (2.0, 71.0), (3.0, 69.5), (4.0, 65.0)])
                .styled(LineStyle::solid(skia::Color::from_argb(255, 0xc4, 0x58, 0x50), 3.0)),
        );
    });
    write_or_compare("temperature_line.png", &bytes);
}

#[test]
fn golden_dashed_requirement() {
    let bytes = render_bytes(|c| {
        c.add_series(
            Series::with_data("r", vec![(0.0, 62.0), (1.9, 62.0), (2.0, 68.0), (4.0, 68.0)])
                .styled(LineStyle::solid(skia::Color::from_argb(255, 0, 0, 0), 2.0).with_dash(&[10.0, 5.0])),
        );
    });
    write_or_compare("dashed_requirement.png", &bytes);
}

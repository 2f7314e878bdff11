// File: crates/thermograph-core/src/chart.rs
// Summary: Chart struct and headless rendering pipeline using Skia CPU raster surfaces.

use anyhow::{anyhow, Result};
use skia_safe as skia;

use crate::axis::{Axis, ScaleKind};
use crate::geometry::RectI32;
use crate::grid::{nice_ticks, time_ticks};
use crate::scale::LinearScale;
use crate::series::Series;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::tooltip::{Tooltip, TooltipEntry};
use crate::types::{Insets, HEIGHT, WIDTH};

const TICK_FONT: f32 = 12.0;
const LABEL_FONT: f32 = 12.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Tick values, axis labels and legend text. Off gives font-independent output.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            draw_labels: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: bool,
    pub tooltips: bool,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::new("X", 0.0, 1.0),
            y_axis: Axis::new("Y", 0.0, 1.0),
            legend: true,
            tooltips: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    pub fn plot_rect(&self, opts: &RenderOptions) -> RectI32 {
        RectI32::inset(opts.width, opts.height, &opts.insets)
    }

    fn scales(&self, rect: &RectI32) -> (LinearScale, LinearScale) {
        let xs = LinearScale::new(rect.left as f32, rect.right as f32, self.x_axis.min, self.x_axis.max);
        let ys = LinearScale::new(rect.bottom as f32, rect.top as f32, self.y_axis.min, self.y_axis.max);
        (xs, ys)
    }

    /// Tooltip for sample `index` of the first series, with one entry per series
    /// that has a sample there. `None` when tooltips are off or out of range.
    pub fn tooltip_at(&self, index: usize) -> Option<Tooltip> {
        if !self.tooltips { return None; }
        let &(x, _) = self.series.first()?.data_xy.get(index)?;
        let entries = self
            .series
            .iter()
            .filter_map(|s| {
                s.data_xy.get(index).map(|&(_, y)| TooltipEntry { label: s.label.clone(), value: y })
            })
            .collect();
        Some(Tooltip { index, title: self.x_axis.format_tooltip(x), entries })
    }

    /// Sample index of the first series nearest to pixel column `px`.
    pub fn index_at_pixel(&self, px: f32, opts: &RenderOptions) -> Option<usize> {
        let (xs, _) = self.scales(&self.plot_rect(opts));
        self.series.first()?.nearest_index(xs.from_px(px))
    }

    /// Render into an unpremultiplied RGBA8 buffer.
    /// Returns `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (opts.width.max(1), opts.height.max(1));
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;

        self.paint(surface.canvas(), opts);

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("failed to read back {w}x{h} surface"));
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, w, h, _) = self.render_to_rgba8(opts)?;
        crate::png::encode_rgba8(&pixels, w, h)
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    fn paint(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        canvas.clear(opts.theme.background);

        let rect = self.plot_rect(opts);
        let (xs, ys) = self.scales(&rect);
        let x_ticks = match self.x_axis.kind {
            ScaleKind::Time => time_ticks(self.x_axis.min, self.x_axis.max, 8),
            ScaleKind::Linear => nice_ticks(self.x_axis.min, self.x_axis.max, 8),
        };
        let y_ticks = nice_ticks(self.y_axis.min, self.y_axis.max, 6);

        draw_grid(canvas, &rect, &xs, &ys, &x_ticks, &y_ticks, &opts.theme);
        draw_axes(canvas, &rect, &opts.theme);

        canvas.save();
        canvas.clip_rect(to_skia_rect(&rect), skia::ClipOp::Intersect, true);
        for s in &self.series {
            draw_line_series(canvas, &rect, &xs, &ys, s);
        }
        canvas.restore();

        if opts.draw_labels {
            let shaper = TextShaper::new();
            draw_tick_labels(canvas, &shaper, &rect, self, &xs, &ys, &x_ticks, &y_ticks, &opts.theme);
            draw_axis_labels(canvas, &shaper, &rect, self, &opts.theme);
            if self.legend {
                draw_legend(canvas, &shaper, &rect, &self.series, &opts.theme);
            }
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia_rect(r: &RectI32) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn draw_grid(
    canvas: &skia::Canvas,
    rect: &RectI32,
    xs: &LinearScale,
    ys: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let (l, t, r, b) = (rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
    for &x in x_ticks {
        let px = xs.to_px(x);
        canvas.draw_line((px, t), (px, b), &paint);
    }
    for &y in y_ticks {
        let py = ys.to_px(y);
        canvas.draw_line((l, py), (r, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, rect: &RectI32, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.0);

    let (l, t, r, b) = (rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}

fn draw_line_series(
    canvas: &skia::Canvas,
    rect: &RectI32,
    xs: &LinearScale,
    ys: &LinearScale,
    series: &Series,
) {
    let points: Vec<(f32, f32)> = series
        .data_xy
        .iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|&(x, y)| (xs.to_px(x), ys.to_px(y)))
        .collect();
    let Some(&(x0, y0)) = points.first() else { return };
    let style = &series.style;

    if let (Some(fill), Some(&(xn, _))) = (style.fill, points.last()) {
        let mut area = skia::Path::new();
        area.move_to((x0, rect.bottom as f32));
        for &(x, y) in &points {
            area.line_to((x, y));
        }
        area.line_to((xn, rect.bottom as f32));
        area.close();

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(fill);
        canvas.draw_path(&area, &paint);
    }

    if points.len() >= 2 {
        let mut path = skia::Path::new();
        path.move_to((x0, y0));
        for &(x, y) in points.iter().skip(1) {
            path.line_to((x, y));
        }

        let mut stroke = skia::Paint::default();
        stroke.set_anti_alias(true);
        stroke.set_style(skia::paint::Style::Stroke);
        stroke.set_stroke_width(style.width);
        stroke.set_color(style.color);
        if let Some(intervals) = style.dash.as_deref().filter(|d| d.len() >= 2) {
            stroke.set_path_effect(skia::PathEffect::dash(intervals, 0.0));
        }
        canvas.draw_path(&path, &stroke);
    }

    if style.point_radius > 0.0 {
        let mut dot = skia::Paint::default();
        dot.set_anti_alias(true);
        dot.set_style(skia::paint::Style::Fill);
        dot.set_color(style.color);
        for &(x, y) in &points {
            canvas.draw_circle((x, y), style.point_radius, &dot);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    rect: &RectI32,
    chart: &Chart,
    xs: &LinearScale,
    ys: &LinearScale,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
) {
    for &x in x_ticks {
        let text = chart.x_axis.format_tick(x);
        shaper.draw_centered(canvas, &text, xs.to_px(x), rect.bottom as f32 + 16.0, TICK_FONT, theme.tick);
    }
    for &y in y_ticks {
        let text = chart.y_axis.format_tick(y);
        shaper.draw_right(canvas, &text, rect.left as f32 - 6.0, ys.to_px(y) + TICK_FONT * 0.4, TICK_FONT, theme.tick);
    }
}

fn draw_axis_labels(canvas: &skia::Canvas, shaper: &TextShaper, rect: &RectI32, chart: &Chart, theme: &Theme) {
    if chart.y_axis.show_label && !chart.y_axis.label.is_empty() {
        let cy = (rect.top + rect.bottom) as f32 * 0.5;
        let x = 14.0;
        canvas.save();
        canvas.rotate(-90.0, Some(skia::Point::new(x, cy)));
        shaper.draw_centered(canvas, &chart.y_axis.label, x, cy, LABEL_FONT, theme.axis_label);
        canvas.restore();
    }
    if chart.x_axis.show_label && !chart.x_axis.label.is_empty() {
        let cx = (rect.left + rect.right) as f32 * 0.5;
        shaper.draw_centered(canvas, &chart.x_axis.label, cx, rect.bottom as f32 + 34.0, LABEL_FONT, theme.axis_label);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, rect: &RectI32, series: &[Series], theme: &Theme) {
    let mut x = rect.left as f32 + 8.0;
    let y = rect.top as f32 + 14.0;
    let mut swatch = skia::Paint::default();
    swatch.set_anti_alias(true);
    for s in series {
        swatch.set_color(s.style.color);
        canvas.draw_rect(skia::Rect::from_xywh(x, y - 9.0, 24.0, 10.0), &swatch);
        x += 30.0;
        shaper.draw_left(canvas, &s.label, x, y, LABEL_FONT, theme.axis_label);
        x += shaper.measure_width(&s.label, LABEL_FONT) + 16.0;
    }
}

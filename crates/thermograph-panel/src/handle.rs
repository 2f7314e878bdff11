// File: crates/thermograph-panel/src/handle.rs
// Summary: ChartHandle, the live chart bound to a region, and its paint lifecycle.
// Notes:
// - A handle starts in `Phase::Rendering`. The page event loop paints it and moves it
//   to `Phase::Painted`, which is the only phase that can export an image.
// - Re-rendering the region or removing it moves the handle to `Phase::Disposed`.
// - A paint that cannot rasterise moves the handle to `Phase::Failed`; its callbacks are dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use chrono::NaiveDateTime;
use thermograph_core::{png, Chart, RenderOptions, Tooltip};
use tracing::{debug, info};

use crate::error::{PanelError, Result};
use crate::export::{data_document, Download, DownloadSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Bound to its region, paint not finished.
    Rendering,
    /// Frame painted; image export available.
    Painted,
    /// Replaced by a newer chart or its region was removed.
    Disposed,
    /// Rasterising the frame failed.
    Failed,
}

type PaintCallback = Box<dyn FnOnce(&ChartHandle)>;

/// The series a chart was built from, kept for data export.
#[derive(Clone, Debug, Default)]
pub(crate) struct Samples {
    pub timestamps: Vec<NaiveDateTime>,
    pub temperatures: Vec<f64>,
    pub requirements: Option<Vec<f64>>,
}

struct Frame {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

enum Stage {
    Rendering,
    Painted(Frame),
    Disposed,
    Failed(String),
}

pub(crate) struct ChartState {
    region_id: String,
    chart: Chart,
    render: RenderOptions,
    samples: Samples,
    image_filename: String,
    data_filename: String,
    stage: Stage,
    on_painted: Vec<PaintCallback>,
}

impl ChartState {
    pub(crate) fn new(
        region_id: &str,
        chart: Chart,
        render: RenderOptions,
        samples: Samples,
        image_filename: &str,
        data_filename: &str,
    ) -> Self {
        Self {
            region_id: region_id.to_string(),
            chart,
            render,
            samples,
            image_filename: image_filename.to_string(),
            data_filename: data_filename.to_string(),
            stage: Stage::Rendering,
            on_painted: Vec::new(),
        }
    }
}

/// A chart bound to a page region. Clones share the same chart.
#[derive(Clone)]
pub struct ChartHandle {
    inner: Rc<RefCell<ChartState>>,
}

impl std::fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.inner.borrow();
        f.debug_struct("ChartHandle")
            .field("region_id", &s.region_id)
            .field("phase", &phase_of(&s.stage))
            .field("series", &s.chart.series.len())
            .finish()
    }
}

fn phase_of(stage: &Stage) -> Phase {
    match stage {
        Stage::Rendering => Phase::Rendering,
        Stage::Painted(_) => Phase::Painted,
        Stage::Disposed => Phase::Disposed,
        Stage::Failed(_) => Phase::Failed,
    }
}

impl ChartHandle {
    pub(crate) fn new(state: ChartState) -> Self {
        Self { inner: Rc::new(RefCell::new(state)) }
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<ChartState>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<RefCell<ChartState>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn region_id(&self) -> String {
        self.inner.borrow().region_id.clone()
    }

    pub fn phase(&self) -> Phase {
        phase_of(&self.inner.borrow().stage)
    }

    pub fn is_painted(&self) -> bool {
        self.phase() == Phase::Painted
    }

    /// A copy of the chart configuration this handle renders.
    pub fn chart(&self) -> Chart {
        self.inner.borrow().chart.clone()
    }

    pub fn series_count(&self) -> usize {
        self.inner.borrow().chart.series.len()
    }

    /// Vertical axis `(min, max)`.
    pub fn y_bounds(&self) -> (f64, f64) {
        let s = self.inner.borrow();
        (s.chart.y_axis.min, s.chart.y_axis.max)
    }

    pub fn tooltip_at(&self, index: usize) -> Option<Tooltip> {
        self.inner.borrow().chart.tooltip_at(index)
    }

    /// Tooltip for the sample nearest to pixel column `x` of the region.
    pub fn tooltip_at_pixel(&self, x: f32) -> Option<Tooltip> {
        let s = self.inner.borrow();
        let index = s.chart.index_at_pixel(x, &s.render)?;
        s.chart.tooltip_at(index)
    }

    /// Run `callback` once the chart has painted. Runs immediately when it
    /// already has; dropped if the chart is disposed first.
    pub fn on_painted(&self, callback: impl FnOnce(&ChartHandle) + 'static) {
        let phase = self.phase();
        match phase {
            Phase::Painted => callback(self),
            Phase::Rendering => self.inner.borrow_mut().on_painted.push(Box::new(callback)),
            Phase::Disposed | Phase::Failed => debug!("dropping paint callback for {:?} chart", phase),
        }
    }

    /// PNG encoding of the painted frame.
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        let s = self.inner.borrow();
        match &s.stage {
            Stage::Painted(frame) => Ok(png::encode_rgba8(&frame.pixels, frame.width, frame.height)?),
            Stage::Rendering => Err(PanelError::NotPainted),
            Stage::Disposed => Err(PanelError::Disposed),
            Stage::Failed(reason) => Err(PanelError::PaintFailed(reason.clone())),
        }
    }

    /// Save the painted frame as PNG. Fails with `NotPainted` before the
    /// paint-complete signal.
    pub fn export_image(&self, sink: &mut dyn DownloadSink) -> Result<()> {
        let bytes = self.image_bytes()?;
        let filename = self.inner.borrow().image_filename.clone();
        info!("exporting {} ({} bytes)", filename, bytes.len());
        sink.save(Download::png(filename, bytes));
        Ok(())
    }

    /// Tab separated dump of the series this chart was built from.
    pub fn data_document(&self) -> Result<String> {
        let s = self.inner.borrow();
        let samples = &s.samples;
        data_document(&samples.timestamps, &samples.temperatures, samples.requirements.as_deref())
    }

    /// Save the data dump. Works in every phase; it needs no pixels.
    pub fn export_data(&self, sink: &mut dyn DownloadSink) -> Result<()> {
        let text = self.data_document()?;
        let filename = self.inner.borrow().data_filename.clone();
        info!("exporting {} ({} samples)", filename, self.inner.borrow().samples.timestamps.len());
        sink.save(Download::csv(filename, text));
        Ok(())
    }

    /// Rasterise if still rendering, then fire the paint callbacks.
    /// Returns whether a frame was painted. A failed rasterise leaves the
    /// handle in `Phase::Failed` with its callbacks dropped.
    pub(crate) fn paint(&self) -> Result<bool> {
        let callbacks = {
            let mut s = self.inner.borrow_mut();
            if !matches!(s.stage, Stage::Rendering) {
                return Ok(false);
            }
            let (pixels, width, height, _) = match s.chart.render_to_rgba8(&s.render) {
                Ok(frame) => frame,
                Err(e) => {
                    s.stage = Stage::Failed(format!("{e:#}"));
                    s.on_painted.clear();
                    return Err(PanelError::Render(e));
                }
            };
            s.stage = Stage::Painted(Frame { pixels, width, height });
            debug!("painted chart in region '{}' ({}x{})", s.region_id, width, height);
            std::mem::take(&mut s.on_painted)
        };
        for callback in callbacks {
            callback(self);
        }
        Ok(true)
    }

    pub(crate) fn dispose(&self) {
        let mut s = self.inner.borrow_mut();
        if !matches!(s.stage, Stage::Disposed) {
            debug!("disposing chart in region '{}'", s.region_id);
        }
        s.stage = Stage::Disposed;
        s.on_painted.clear();
    }

    pub(crate) fn same_chart(&self, other: &ChartHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

// File: crates/thermograph-panel/src/page.rs
// Summary: Page surface holding named drawable regions and the queue of pending paints.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Weak;

use tracing::{debug, warn};

use crate::error::Result;
use crate::handle::{ChartHandle, ChartState};

struct Region {
    width: u32,
    height: u32,
    bound: Option<ChartHandle>,
}

struct PaintJob {
    region_id: String,
    chart: Weak<RefCell<ChartState>>,
}

/// A page with named drawable regions. Charts bound to a region paint when
/// [`Page::run_until_idle`] runs, never inside `render`.
#[derive(Default)]
pub struct Page {
    regions: HashMap<String, Region>,
    queue: VecDeque<PaintJob>,
}

impl Page {
    pub fn new() -> Self { Self::default() }

    /// Add a `width` x `height` region. Replacing an existing region disposes
    /// whatever chart it held.
    pub fn add_region(&mut self, id: impl Into<String>, width: u32, height: u32) {
        let id = id.into();
        let region = Region { width: width.max(1), height: height.max(1), bound: None };
        if let Some(old) = self.regions.insert(id, region) {
            if let Some(chart) = old.bound { chart.dispose(); }
        }
    }

    /// Remove a region and dispose its chart. Returns whether it existed.
    pub fn remove_region(&mut self, id: &str) -> bool {
        match self.regions.remove(id) {
            Some(region) => {
                if let Some(chart) = region.bound { chart.dispose(); }
                debug!("removed region '{}'", id);
                true
            }
            None => false,
        }
    }

    pub fn has_region(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    /// `(width, height)` of a region in pixels.
    pub fn region_size(&self, id: &str) -> Option<(u32, u32)> {
        self.regions.get(id).map(|r| (r.width, r.height))
    }

    /// The chart currently bound to `id`.
    pub fn chart_in(&self, id: &str) -> Option<ChartHandle> {
        self.regions.get(id).and_then(|r| r.bound.clone())
    }

    pub fn pending_paints(&self) -> usize {
        self.queue.len()
    }

    /// Bind `chart` to region `id`, disposing the previous chart, and queue its paint.
    /// The region must exist.
    pub(crate) fn bind(&mut self, id: &str, chart: ChartHandle) {
        let Some(region) = self.regions.get_mut(id) else { return };
        if let Some(prev) = region.bound.replace(chart.clone()) {
            if !prev.same_chart(&chart) { prev.dispose(); }
        }
        self.queue.push_back(PaintJob { region_id: id.to_string(), chart: chart.downgrade() });
    }

    /// Paint every queued chart that is still live and fire its paint callbacks.
    /// Returns how many charts were painted. A chart that fails to paint does
    /// not stop the queue; the first failure is returned once it is drained.
    pub fn run_until_idle(&mut self) -> Result<usize> {
        let mut painted = 0;
        let mut first_error = None;
        while let Some(job) = self.queue.pop_front() {
            let Some(chart) = ChartHandle::upgrade(&job.chart) else {
                debug!("skipping paint for dropped chart in region '{}'", job.region_id);
                continue;
            };
            match chart.paint() {
                Ok(true) => painted += 1,
                Ok(false) => {
                    debug!("skipping paint for chart in region '{}' ({:?})", job.region_id, chart.phase())
                }
                Err(e) => {
                    warn!("paint failed in region '{}': {}", job.region_id, e);
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(painted),
        }
    }
}

// File: crates/thermograph-panel/src/lib.rs
// Summary: Temperature chart panel: render into page regions, export PNG snapshots and TSV data.

pub mod error;
pub mod export;
pub mod handle;
pub mod page;
pub mod panel;
pub mod requirements;

pub use thermograph_core;

pub use error::PanelError;
pub use export::{DirectorySink, Download, DownloadSink, MemorySink};
pub use handle::{ChartHandle, Phase};
pub use page::Page;
pub use panel::{ChartPanel, ComfortBand, PanelOptions};

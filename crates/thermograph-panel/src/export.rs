// File: crates/thermograph-panel/src/export.rs
// Summary: File downloads (PNG snapshot, tab separated data) and the sinks that save them.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thermograph_core::axis::format_number;
use tracing::{info, warn};

use crate::error::{PanelError, Result};

pub const PNG_MIME: &str = "image/png";
/// Labelled CSV although the body is tab separated.
pub const CSV_MIME: &str = "text/csv;charset=utf-8";
/// How sample timestamps are written in the data export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A file handed to the platform for saving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn png(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { filename: filename.into(), mime: PNG_MIME, bytes }
    }

    pub fn csv(filename: impl Into<String>, text: String) -> Self {
        Self { filename: filename.into(), mime: CSV_MIME, bytes: text.into_bytes() }
    }

    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Where exports go. Saving is fire and forget; a sink reports nothing back.
pub trait DownloadSink {
    fn save(&mut self, download: Download);
}

/// Keeps every download in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub saved: Vec<Download>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    pub fn last(&self) -> Option<&Download> { self.saved.last() }

    pub fn find(&self, filename: &str) -> Option<&Download> {
        self.saved.iter().rev().find(|d| d.filename == filename)
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, download: Download) {
        self.saved.push(download);
    }
}

/// Writes downloads into a directory, replacing files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, download: Download) {
        let path = self.path_for(&download.filename);
        let written = std::fs::create_dir_all(&self.dir).and_then(|_| std::fs::write(&path, &download.bytes));
        match written {
            Ok(()) => info!("saved {} ({}, {} bytes)", path.display(), download.mime, download.bytes.len()),
            Err(e) => warn!("could not save {}: {}", path.display(), e),
        }
    }
}

/// Tab separated dump of the series: a `datetime\tfahrenheit[\trequirement]`
/// header, then one row per sample. Rows are `\n` separated with no trailing newline.
pub fn data_document(
    timestamps: &[NaiveDateTime],
    temperatures: &[f64],
    requirements: Option<&[f64]>,
) -> Result<String> {
    let encode = |e: csv::Error| PanelError::Encode(e.to_string());

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    if requirements.is_some() {
        wtr.write_record(["datetime", "fahrenheit", "requirement"]).map_err(encode)?;
    } else {
        wtr.write_record(["datetime", "fahrenheit"]).map_err(encode)?;
    }

    for (i, (ts, temp)) in timestamps.iter().zip(temperatures).enumerate() {
        let mut row = vec![ts.format(TIMESTAMP_FORMAT).to_string(), format_number(*temp)];
        if let Some(reqs) = requirements {
            let req = reqs.get(i).ok_or_else(|| {
                PanelError::Encode(format!("no requirement for sample {i}"))
            })?;
            row.push(format_number(*req));
        }
        wtr.write_record(&row).map_err(encode)?;
    }

    let bytes = wtr.into_inner().map_err(|e| PanelError::Encode(e.to_string()))?;
    let mut doc = String::from_utf8(bytes).map_err(|e| PanelError::Encode(e.to_string()))?;
    if doc.ends_with('\n') {
        doc.pop();
    }
    Ok(doc)
}

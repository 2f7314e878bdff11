// File: crates/thermograph-core/src/tooltip.rs
// Summary: Point-wise tooltip content for a sample index.

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipEntry {
    pub label: String,
    pub value: f64,
}

/// What a hover over one sample shows: the formatted x value as the title and
/// one line per series that has a sample at that index.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub index: usize,
    pub title: String,
    pub entries: Vec<TooltipEntry>,
}

impl Tooltip {
    /// `Label: value` lines, title excluded.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.label, crate::axis::format_number(e.value)))
            .collect()
    }
}

//! The mounted section window.

use crate::model::SectionIndex;
use serde::Serialize;

/// Contiguous range of sections that should be mounted.
///
/// `start..=end` covers every section overlapping the viewport plus one
/// section of lookbehind and lookahead. `active` is the first section that
/// actually overlaps the viewport; it anchors scroll restoration.
///
/// # Invariants
/// - `start <= active <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleWindow {
    /// First mounted section.
    pub start: SectionIndex,
    /// First section overlapping the viewport.
    pub active: SectionIndex,
    /// Last mounted section, inclusive.
    pub end: SectionIndex,
}

impl VisibleWindow {
    /// Create new window.
    ///
    /// # Panics
    /// In debug builds, panics if `start <= active <= end` does not hold.
    pub fn new(start: SectionIndex, active: SectionIndex, end: SectionIndex) -> Self {
        debug_assert!(
            start <= active && active <= end,
            "window bounds out of order: {start} {active} {end}"
        );
        Self { start, active, end }
    }

    /// Number of sections in the window.
    pub fn len(&self) -> usize {
        self.end.get() - self.start.get() + 1
    }

    /// Whether `index` falls inside the window.
    pub fn contains(&self, index: SectionIndex) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterate over section indices in the window.
    pub fn indices(&self) -> impl Iterator<Item = SectionIndex> {
        (self.start.get()..=self.end.get()).map(SectionIndex::new)
    }
}

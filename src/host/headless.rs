//! In-memory host for driving the engine without a UI toolkit.
//!
//! Tracks scroll offset, box size, observed section frames and mounted
//! sections, and produces intersection batches the way a browser
//! intersection observer would: only sections whose state changed since the
//! previous batch are reported, and a freshly observed section is always
//! reported once.

use super::{Intersection, SectionFrame, Size, Viewport};
use crate::model::SectionIndex;
use std::collections::{BTreeMap, BTreeSet};

/// A [`Viewport`] backed by plain fields, for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct HeadlessViewport {
    size: Size,
    scroll_top: f64,
    content_height: f64,
    observed: BTreeMap<SectionIndex, SectionFrame>,
    /// Observed sections never reported yet.
    fresh: BTreeSet<SectionIndex>,
    intersecting: BTreeSet<SectionIndex>,
    attached: BTreeMap<SectionIndex, SectionFrame>,
}

impl HeadlessViewport {
    /// Unscrolled viewport with an empty content area.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Scroll as a user would; clamped to the scrollable range.
    pub fn scroll_to(&mut self, top: f64) {
        self.scroll_top = self.clamp_scroll(top);
    }

    /// Scroll by a delta; clamped to the scrollable range.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_top + delta);
    }

    /// Change the box size. The caller forwards it to the controller.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = Size::new(width, height);
        self.scroll_top = self.clamp_scroll(self.scroll_top);
    }

    /// Content height last set by the controller.
    pub fn content_height(&self) -> f64 {
        self.content_height
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll_top(&self) -> f64 {
        (self.content_height - self.size.height).max(0.0)
    }

    /// Sections currently mounted, in index order.
    pub fn attached(&self) -> Vec<SectionIndex> {
        self.attached.keys().copied().collect()
    }

    /// Frame a mounted section was last attached at.
    pub fn attached_frame(&self, index: SectionIndex) -> Option<SectionFrame> {
        self.attached.get(&index).copied()
    }

    /// Number of sections under visibility tracking.
    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// Compute the next visibility batch.
    ///
    /// Empty when nothing changed since the previous call.
    pub fn take_intersections(&mut self) -> Vec<Intersection> {
        let top = self.scroll_top;
        let bottom = top + self.size.height;
        let mut batch = Vec::new();

        for (index, frame) in &self.observed {
            let now = frame.overlaps(top, bottom);
            let was = self.intersecting.contains(index);
            if now != was || self.fresh.contains(index) {
                batch.push(Intersection {
                    section: *index,
                    is_intersecting: now,
                });
            }
        }

        self.fresh.clear();
        for entry in &batch {
            if entry.is_intersecting {
                self.intersecting.insert(entry.section);
            } else {
                self.intersecting.remove(&entry.section);
            }
        }

        batch
    }

    fn clamp_scroll(&self, top: f64) -> f64 {
        top.clamp(0.0, self.max_scroll_top())
    }
}

impl Viewport for HeadlessViewport {
    fn measure(&self) -> Size {
        self.size
    }

    fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    fn set_scroll_top(&mut self, top: f64) {
        self.scroll_to(top);
    }

    fn set_content_height(&mut self, height: f64) {
        self.content_height = height.max(0.0);
        self.scroll_top = self.clamp_scroll(self.scroll_top);
    }

    fn observe(&mut self, frame: SectionFrame) {
        if self.observed.insert(frame.index, frame).is_none() {
            self.fresh.insert(frame.index);
        }
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.fresh.clear();
        self.intersecting.clear();
    }

    fn attach_section(&mut self, frame: SectionFrame) {
        self.attached.insert(frame.index, frame);
    }

    fn detach_section(&mut self, index: SectionIndex) {
        self.attached.remove(&index);
    }
}

//! Work deferred to the next scheduling tick.
//!
//! Option updates, item refresh broadcasts and resizes only record intent
//! here. Redundant triggers within one turn of the host's event loop coalesce
//! into a single recomputation when the host calls `Controller::tick`.

use super::visibility::VisibilityUpdate;
use super::window::VisibleWindow;
use crate::delegate::{ItemUpdater, Teardown};
use crate::host::Size;
use crate::model::SectionIndex;

/// Recomputations requested since the last tick.
#[derive(Default)]
pub struct PendingWork {
    /// Full re-tile (row breaks or section grouping changed).
    pub retile: bool,
    /// Pixel relayout of existing sections (margin changed).
    pub relayout: bool,
    /// Latest host size reported since the previous tick.
    pub resize: Option<Size>,
    /// Latest item refresh hook; later calls replace earlier ones.
    pub refresh: Option<ItemUpdater>,
}

impl PendingWork {
    /// Whether a tick would have nothing to do.
    pub fn is_empty(&self) -> bool {
        !self.retile && !self.relayout && self.resize.is_none() && self.refresh.is_none()
    }

    /// Move the recorded work out, leaving nothing pending.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

impl std::fmt::Debug for PendingWork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingWork")
            .field("retile", &self.retile)
            .field("relayout", &self.relayout)
            .field("resize", &self.resize)
            .field("refresh", &self.refresh.is_some())
            .finish()
    }
}

/// What one `Controller::tick` did.
#[derive(Default)]
pub struct TickReport {
    /// Rows and sections were rebuilt from the item list.
    pub retiled: bool,
    /// Existing sections were laid out again after a margin change.
    pub relaid_out: bool,
    /// A host size change was applied.
    pub resized: bool,
    /// Number of item updater calls made for mounted sections.
    pub refreshed_items: usize,
    /// Window after the tick.
    pub window: Option<VisibleWindow>,
    /// Sections mounted during the tick.
    pub mounted: Vec<SectionIndex>,
    /// Sections unmounted during the tick.
    pub unmounted: Vec<SectionIndex>,
    /// Cleanup returned by the render delegate, for the host to run.
    pub teardowns: Vec<Teardown>,
    /// A page request was issued.
    pub requested_page: bool,
}

impl TickReport {
    /// Fold a window update into the report. Later updates win for the
    /// window; mount lists and teardowns accumulate.
    pub fn absorb(&mut self, update: VisibilityUpdate) {
        self.window = update.window;
        self.mounted.extend(update.mounted);
        self.unmounted.extend(update.unmounted);
        self.teardowns.extend(update.teardowns);
        self.requested_page |= update.requested_page;
    }

    /// Whether the tick had nothing to do.
    pub fn is_idle(&self) -> bool {
        !self.retiled && !self.relaid_out && !self.resized && self.refreshed_items == 0
    }
}

impl std::fmt::Debug for TickReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickReport")
            .field("retiled", &self.retiled)
            .field("relaid_out", &self.relaid_out)
            .field("resized", &self.resized)
            .field("refreshed_items", &self.refreshed_items)
            .field("window", &self.window)
            .field("mounted", &self.mounted)
            .field("unmounted", &self.unmounted)
            .field("teardowns", &self.teardowns.len())
            .field("requested_page", &self.requested_page)
            .finish()
    }
}

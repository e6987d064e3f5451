//! The virtualized grid controller.
//!
//! A [`Controller`] owns the grid state for one host surface. It reacts to
//! host callbacks (attach, visibility batches, resizes, clicks, page
//! responses) and drives the pager, the sections and the render delegate.
//!
//! # Event flow
//!
//! ```text
//! attach ──> get ──> Pager::request ···> receive ──> tile ──> sections
//!                                                              │ observe
//! host scroll ──> on_intersections ──> window ──> show / hide ◄┘
//!                         └── near the end ──> get
//! update_options / update_items / on_resize ──> pending ──> tick
//! ```
//!
//! Everything runs on the host's single event loop. The only suspension
//! point is between `Pager::request` and the matching `receive`.

pub mod pagination;
pub mod reflow;
pub mod schedule;
pub mod state;
pub mod visibility;
pub mod window;

pub use pagination::ReceiveOutcome;
pub use schedule::{PendingWork, TickReport};
pub use state::ControllerState;
pub use visibility::{compute_window, ScrollDirection, VisibilityUpdate};
pub use window::VisibleWindow;

use crate::config::{GridOptions, OptionsChange, OptionsPatch};
use crate::delegate::{ClickDelegate, ClickEvent, ItemUpdater, RenderDelegate, ResizeDelegate};
use crate::host::{HeadlessViewport, Size, Viewport};
use crate::model::{Epoch, GridError, ItemId, ItemOrdinals, PageCursor, SectionIndex};
use crate::pager::Pager;
use crate::section::Section;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Virtualized justified grid bound to one host viewport.
pub struct Controller<H: Viewport> {
    host: H,
    pager: Box<dyn Pager>,
    render: Box<dyn RenderDelegate>,
    click: Option<Box<dyn ClickDelegate>>,
    resize: Option<Box<dyn ResizeDelegate>>,
    options: GridOptions,
    initial_cursor: PageCursor,
    epoch: Epoch,
    attached: bool,
    state: ControllerState,
    pending: PendingWork,
}

impl<H: Viewport> Controller<H> {
    /// Create a detached controller. Nothing is fetched until [`attach`].
    ///
    /// Unusable option values fall back to their defaults
    /// (see [`GridOptions::sanitized`]).
    ///
    /// [`attach`]: Controller::attach
    pub fn new(
        host: H,
        pager: impl Pager + 'static,
        render: impl RenderDelegate + 'static,
        options: GridOptions,
        initial_cursor: PageCursor,
    ) -> Self {
        let state = ControllerState::new(initial_cursor.clone(), 0.0, 0.0);
        Self {
            host,
            pager: Box::new(pager),
            render: Box::new(render),
            click: None,
            resize: None,
            options: options.sanitized(),
            initial_cursor,
            epoch: Epoch::default(),
            attached: false,
            state,
            pending: PendingWork::default(),
        }
    }

    /// Route item clicks to `delegate`.
    pub fn with_click_delegate(mut self, delegate: impl ClickDelegate + 'static) -> Self {
        self.click = Some(Box::new(delegate));
        self
    }

    /// Report per-item dimension changes on reflow to `delegate`.
    pub fn with_resize_delegate(mut self, delegate: impl ResizeDelegate + 'static) -> Self {
        self.resize = Some(Box::new(delegate));
        self
    }

    /// Measure the host and issue the first page request.
    ///
    /// Fails with [`GridError::NotAttached`] when the host has no
    /// determinate width yet. Returns whether a page was requested.
    pub fn attach(&mut self) -> Result<bool, GridError> {
        let size = self.host.measure();
        if !(size.width.is_finite() && size.width > 0.0 && size.height.is_finite()) {
            warn!("Cannot attach to host with indeterminate size {:?}", size);
            return Err(GridError::NotAttached);
        }

        self.state.width = size.width;
        self.state.container_height = size.height.max(0.0);
        self.attached = true;
        info!("Attached grid at {}x{}", size.width, size.height);

        Ok(self.get())
    }

    /// Discard every section and restart pagination from the initial cursor.
    ///
    /// An outstanding request is not cancelled; its response will be stale.
    pub fn reset(&mut self) -> bool {
        for index in std::mem::take(&mut self.state.mounted) {
            if let Some(section) = self.state.sections.get_mut(index.get()) {
                section.hide(&mut self.host);
            }
        }
        self.host.disconnect();

        self.epoch = self.epoch.next();
        self.state = ControllerState::new(
            self.initial_cursor.clone(),
            self.state.width,
            self.state.container_height,
        );
        self.pending = PendingWork::default();
        self.host.set_content_height(0.0);
        self.host.set_scroll_top(0.0);
        info!("Grid reset (epoch {})", self.epoch.get());

        self.get()
    }

    /// Merge an options patch. Re-tiling or relayout happens on the next tick.
    pub fn update_options(&mut self, patch: OptionsPatch) -> OptionsChange {
        let change = self.options.merge(patch);
        match change {
            OptionsChange::Tiling => self.pending.retile = true,
            OptionsChange::Layout => self.pending.relayout = true,
            OptionsChange::None => {}
        }
        debug!("Options updated ({:?}): {:?}", change, self.options);
        change
    }

    /// Broadcast `updater` to every item of every mounted section on the
    /// next tick. Sections mounted later receive it on mount.
    pub fn update_items(&mut self, updater: impl FnMut(&ItemId) + 'static) {
        self.pending.refresh = Some(Box::new(updater));
    }

    /// Record a host size change. Reflow happens on the next tick.
    pub fn on_resize(&mut self, size: Size) {
        if !(size.width.is_finite() && size.width > 0.0 && size.height.is_finite()) {
            warn!("Ignoring resize to indeterminate size {:?}", size);
            return;
        }
        self.pending.resize = Some(size);
    }

    /// Whether the next [`tick`](Controller::tick) has anything to do.
    pub fn has_pending_work(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run all deferred work, coalesced: at most one re-tile (or relayout),
    /// one resize reflow and one item refresh.
    pub fn tick(&mut self) -> TickReport {
        let work = self.pending.take();
        let mut report = TickReport::default();
        if work.is_empty() {
            return report;
        }
        debug!("Tick: {:?}", work);

        if work.retile {
            report.requested_page = self.retile();
            report.absorb(self.refresh_window());
            report.retiled = true;
        } else if work.relayout {
            let margin = self.options.margin;
            for section in &mut self.state.sections {
                section.set_margin(margin);
            }
            if let Some(update) = self.relayout(self.state.width, true) {
                report.absorb(update);
            }
            report.relaid_out = true;
        }

        if let Some(size) = work.resize {
            self.state.container_height = size.height.max(0.0);
            let update = match self.relayout(size.width, false) {
                Some(update) => update,
                None => self.refresh_window(),
            };
            report.absorb(update);
            report.resized = true;
        }

        if let Some(updater) = work.refresh {
            report.refreshed_items = self.refresh_items(updater);
        }

        report
    }

    fn refresh_items(&mut self, mut updater: ItemUpdater) -> usize {
        let state = &mut self.state;
        state.clean.clear();

        let mut calls = 0;
        for index in &state.mounted {
            if let Some(section) = state.sections.get(index.get()) {
                for item in section.items() {
                    updater(item.id());
                    calls += 1;
                }
                state.clean.insert(*index);
            }
        }
        state.updater = Some(updater);
        debug!("Refreshed {} mounted items", calls);
        calls
    }

    /// Route a click at content coordinates to the item under it.
    ///
    /// Only mounted sections are hit. Returns the clicked item.
    pub fn click(&mut self, event: ClickEvent) -> Option<ItemId> {
        let sections = &self.state.sections;
        let index = sections.partition_point(|s| s.bottom() <= event.y);
        let section = sections.get(index).filter(|s| s.is_shown())?;
        let id = section.hit_test(event.x, event.y)?.clone();

        if let Some(delegate) = self.click.as_mut() {
            delegate.on_item_click(&event, &id, Rc::clone(&self.state.ordinals));
        }
        Some(id)
    }

    /// The attached host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to scroll a headless viewport.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Sections created so far, in index order.
    pub fn sections(&self) -> &[Section] {
        &self.state.sections
    }

    /// Currently mounted window.
    pub fn window(&self) -> Option<VisibleWindow> {
        self.state.window
    }

    /// Options in effect.
    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    /// Whether [`attach`](Controller::attach) has succeeded.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether a page request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Next cursor to fetch, `None` once exhausted.
    pub fn cursor(&self) -> Option<&PageCursor> {
        self.state.cursor.as_ref()
    }

    /// Snapshot of the item ordinal map.
    pub fn ordinals(&self) -> Rc<ItemOrdinals> {
        Rc::clone(&self.state.ordinals)
    }

    /// Total height of all sections.
    pub fn content_height(&self) -> f64 {
        self.state.content_height()
    }

    /// Current pagination sequence.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Mounted section indices, ascending.
    pub fn mounted(&self) -> Vec<SectionIndex> {
        self.state.mounted.iter().copied().collect()
    }

    /// Items received but not yet placed in a section.
    pub fn held_items(&self) -> usize {
        self.state.item_remainder.len()
            + self.state.row_remainder.iter().map(|r| r.len()).sum::<usize>()
    }

    /// Items placed in sections.
    pub fn tiled_items(&self) -> usize {
        self.state.tiled_items()
    }
}

impl Controller<HeadlessViewport> {
    /// Feed the headless host's pending intersection batch to the controller.
    pub fn pump_visibility(&mut self) -> VisibilityUpdate {
        let batch = self.host.take_intersections();
        if batch.is_empty() {
            return VisibilityUpdate {
                window: self.state.window,
                ..VisibilityUpdate::default()
            };
        }
        self.on_intersections(&batch)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

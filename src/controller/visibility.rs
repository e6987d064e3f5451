//! Visibility tracking: turning intersection batches into a mounted window.
//!
//! The host reports which observed sections changed their intersection with
//! the viewport. From that, the controller picks a seed section near the
//! leading edge of the scroll, sweeps outward while sections still overlap
//! the viewport, widens the result by one section on each side and mounts
//! exactly that contiguous range.

use super::window::VisibleWindow;
use super::Controller;
use crate::delegate::Teardown;
use crate::host::{Intersection, Viewport};
use crate::model::SectionIndex;
use crate::section::Section;
use std::collections::BTreeSet;
use tracing::debug;

/// Pagination kicks in when the window ends this close to the last section.
const NEAR_END_SECTIONS: usize = 2;

/// Which way the viewport moved since the previous batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Toward the end of the content.
    Forward,
    /// Toward the start of the content.
    Backward,
}

impl ScrollDirection {
    /// Direction of travel from `previous` to `current` scroll offset.
    /// Standing still counts as forward.
    pub fn between(previous: f64, current: f64) -> Self {
        if current >= previous {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        }
    }

    /// Intersecting section nearest the leading edge.
    pub fn seed(self, intersecting: &BTreeSet<SectionIndex>) -> Option<SectionIndex> {
        match self {
            ScrollDirection::Forward => intersecting.last().copied(),
            ScrollDirection::Backward => intersecting.first().copied(),
        }
    }
}

/// Result of one window update.
#[derive(Default)]
pub struct VisibilityUpdate {
    /// Window after the update; `None` while there are no sections.
    pub window: Option<VisibleWindow>,
    /// Sections mounted by this update, ascending.
    pub mounted: Vec<SectionIndex>,
    /// Sections unmounted by this update, ascending.
    pub unmounted: Vec<SectionIndex>,
    /// Cleanups returned by the render delegate for newly mounted items.
    pub teardowns: Vec<Teardown>,
    /// Whether the update issued a page request.
    pub requested_page: bool,
}

impl VisibilityUpdate {
    /// Whether the mounted set changed.
    pub fn changed(&self) -> bool {
        !self.mounted.is_empty() || !self.unmounted.is_empty()
    }
}

impl std::fmt::Debug for VisibilityUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityUpdate")
            .field("window", &self.window)
            .field("mounted", &self.mounted)
            .field("unmounted", &self.unmounted)
            .field("teardowns", &self.teardowns.len())
            .field("requested_page", &self.requested_page)
            .finish()
    }
}

/// Compute the window for a viewport band `[scroll_top, scroll_top + height)`.
///
/// `seed` is a hint for where the sweep starts; when it is missing or no
/// longer overlaps the band, the first section whose bottom lies below
/// `scroll_top` is used instead. Returns `None` only when there are no
/// sections.
pub fn compute_window(
    sections: &[Section],
    seed: Option<SectionIndex>,
    scroll_top: f64,
    height: f64,
) -> Option<VisibleWindow> {
    let last_index = sections.len().checked_sub(1)?;
    let bottom = scroll_top + height;
    let overlaps = |i: usize| sections[i].frame().overlaps(scroll_top, bottom);

    let seed = seed
        .map(|s| s.get())
        .filter(|&s| s <= last_index && overlaps(s))
        .unwrap_or_else(|| {
            sections
                .partition_point(|s| s.bottom() <= scroll_top)
                .min(last_index)
        });

    let mut first = seed;
    while first > 0 && overlaps(first - 1) {
        first -= 1;
    }
    let mut last = seed;
    while last < last_index && overlaps(last + 1) {
        last += 1;
    }

    Some(VisibleWindow::new(
        SectionIndex::new(first.saturating_sub(1)),
        SectionIndex::new(first),
        SectionIndex::new((last + 1).min(last_index)),
    ))
}

impl<H: Viewport> Controller<H> {
    /// Handle a batch of intersection changes reported by the host.
    pub fn on_intersections(&mut self, batch: &[Intersection]) -> VisibilityUpdate {
        if !self.attached {
            return VisibilityUpdate::default();
        }

        let len = self.state.sections.len();
        for entry in batch.iter().filter(|e| e.section.get() < len) {
            if entry.is_intersecting {
                self.state.intersecting.insert(entry.section);
            } else {
                self.state.intersecting.remove(&entry.section);
            }
        }

        let scroll_top = self.host.scroll_top();
        let direction = ScrollDirection::between(self.state.last_scroll_top, scroll_top);
        self.state.last_scroll_top = scroll_top;

        let window = compute_window(
            &self.state.sections,
            direction.seed(&self.state.intersecting),
            scroll_top,
            self.state.container_height,
        );
        self.update_window(window)
    }

    /// Recompute the window from section geometry alone.
    pub(super) fn refresh_window(&mut self) -> VisibilityUpdate {
        let scroll_top = self.host.scroll_top();
        self.state.last_scroll_top = scroll_top;
        let window = compute_window(
            &self.state.sections,
            None,
            scroll_top,
            self.state.container_height,
        );
        let mut update = self.update_window(window);
        if self.state.content_height() < self.state.container_height {
            update.requested_page = self.get() || update.requested_page;
        }
        update
    }

    fn update_window(&mut self, window: Option<VisibleWindow>) -> VisibilityUpdate {
        let mut update = self.apply_window(window);

        if self.state.window != window {
            debug!(
                "Visible window {:?} -> {:?} ({} sections, +{} -{})",
                self.state.window,
                window,
                window.map_or(0, |w| w.len()),
                update.mounted.len(),
                update.unmounted.len()
            );
        }
        self.state.window = window;

        if let Some(window) = window {
            let last_index = self.state.sections.len() - 1;
            if last_index - window.end.get() <= NEAR_END_SECTIONS {
                update.requested_page = self.get();
            }
        }
        update
    }

    /// Mount everything inside `window`, unmount everything outside it.
    fn apply_window(&mut self, window: Option<VisibleWindow>) -> VisibilityUpdate {
        let wanted: BTreeSet<SectionIndex> = window
            .map(|w| w.indices().collect())
            .unwrap_or_default();
        let mut update = VisibilityUpdate {
            window,
            ..VisibilityUpdate::default()
        };

        let state = &mut self.state;
        let outside: Vec<SectionIndex> = state
            .mounted
            .iter()
            .filter(|index| !window.is_some_and(|w| w.contains(**index)))
            .copied()
            .collect();
        for index in outside {
            if let Some(section) = state.sections.get_mut(index.get()) {
                section.hide(&mut self.host);
            }
            state.mounted.remove(&index);
            update.unmounted.push(index);
        }

        let inside: Vec<SectionIndex> = wanted.difference(&state.mounted).copied().collect();
        for index in inside {
            let Some(section) = state.sections.get_mut(index.get()) else {
                continue;
            };
            update
                .teardowns
                .extend(section.show(&mut self.host, self.render.as_mut()));

            if !state.clean.contains(&index) {
                if let Some(updater) = state.updater.as_mut() {
                    for item in section.items() {
                        updater(item.id());
                    }
                }
                state.clean.insert(index);
            }
            state.mounted.insert(index);
            update.mounted.push(index);
        }

        update
    }
}

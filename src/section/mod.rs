//! Sections: fixed-capacity chunks of rows, the unit of virtualization.
//!
//! A section owns its rows and the placeholder mount of every item in them.
//! Its lifecycle is a two-state machine with idempotent transitions:
//!
//! ```text
//! Unmounted --show()--> Mounted --hide()--> Unmounted --show()--> ...
//! ```
//!
//! Layout is recomputed only when `set` sees a new top or width, never on
//! mount/unmount.

pub mod layout;

use crate::delegate::{Dimensions, ItemMount, RenderDelegate, Teardown};
use crate::host::{SectionFrame, Viewport};
use crate::model::{ItemData, ItemId, RowData, SectionIndex};
use layout::SectionLayout;

/// A fixed run of rows placed at `top` and mounted or unmounted as one unit.
#[derive(Debug, Clone)]
pub struct Section {
    index: SectionIndex,
    rows: Vec<RowData>,
    margin: f64,
    top: f64,
    /// Width the current layout was computed for; `None` until first `set`.
    width: Option<f64>,
    layout: SectionLayout,
    mounted: bool,
}

impl Section {
    /// Create an unmounted section. Call [`Section::set`] before showing it.
    pub fn new(index: SectionIndex, rows: Vec<RowData>, margin: f64) -> Self {
        let layout = SectionLayout {
            mounts: layout::compute(index, &rows, 0.0, margin).mounts,
            ..SectionLayout::default()
        };
        Self {
            index,
            rows,
            margin,
            top: 0.0,
            width: None,
            layout,
            mounted: false,
        }
    }

    /// Position the section and lay it out for `width`.
    ///
    /// No-op when both values are unchanged. Returns whether anything changed.
    pub fn set(&mut self, top: f64, width: f64) -> bool {
        let width_changed = self.width != Some(width);
        if !width_changed && self.top == top {
            return false;
        }

        self.top = top;
        if width_changed {
            self.layout = layout::compute(self.index, &self.rows, width, self.margin);
            self.width = Some(width);
        }
        true
    }

    /// Change the gap size; the next `set` recomputes layout.
    pub fn set_margin(&mut self, margin: f64) {
        if self.margin != margin {
            self.margin = margin;
            self.width = None;
        }
    }

    /// Mount the section and render every item.
    ///
    /// Idempotent: returns no teardowns and renders nothing when already
    /// mounted. Teardowns from the delegate are returned to the caller.
    pub fn show(
        &mut self,
        host: &mut dyn Viewport,
        render: &mut dyn RenderDelegate,
    ) -> Vec<Teardown> {
        if self.mounted {
            return Vec::new();
        }

        host.attach_section(self.frame());
        self.mounted = true;

        self.layout
            .mounts
            .iter()
            .filter_map(|mount| render.render(&mount.item, mount, mount.dimensions()))
            .collect()
    }

    /// Unmount the section. Idempotent.
    pub fn hide(&mut self, host: &mut dyn Viewport) {
        if !self.mounted {
            return;
        }
        host.detach_section(self.index);
        self.mounted = false;
    }

    /// Report current item dimensions without remounting.
    pub fn resize_items(&self, resizer: &mut dyn FnMut(&ItemId, Dimensions)) {
        for mount in &self.layout.mounts {
            resizer(&mount.item, mount.dimensions());
        }
    }

    /// Item under a point given in content coordinates.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&ItemId> {
        let local_y = y - self.top;
        let row = self
            .layout
            .rows
            .partition_point(|r| r.bottom() <= local_y);
        let row_layout = self.layout.rows.get(row)?;
        if local_y < row_layout.top {
            return None;
        }

        let first = self.rows[..row].iter().map(RowData::len).sum::<usize>();
        let count = self.rows[row].len();
        self.layout.mounts[first..first + count]
            .iter()
            .find(|m| m.contains(x, local_y))
            .map(|m| &m.item)
    }

    /// Position in creation order.
    pub fn index(&self) -> SectionIndex {
        self.index
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> &[RowData] {
        &self.rows
    }

    /// Items in row-major order.
    pub fn items(&self) -> impl Iterator<Item = &ItemData> {
        self.rows.iter().flat_map(|r| r.items())
    }

    /// Number of items across all rows.
    pub fn item_count(&self) -> usize {
        self.layout.mounts.len()
    }

    /// Placeholder mounts, one per item in row-major order.
    pub fn mounts(&self) -> &[ItemMount] {
        &self.layout.mounts
    }

    /// Offset of the section from the top of the content.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Laid-out height, zero before the first `set`.
    pub fn height(&self) -> f64 {
        self.layout.height
    }

    /// `top + height`.
    pub fn bottom(&self) -> f64 {
        self.top + self.layout.height
    }

    /// Width of the current layout, if any.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Whether the section is mounted.
    pub fn is_shown(&self) -> bool {
        self.mounted
    }

    /// Geometry reported to the host.
    pub fn frame(&self) -> SectionFrame {
        SectionFrame {
            index: self.index,
            top: self.top,
            width: self.width.unwrap_or(0.0),
            height: self.layout.height,
        }
    }

    /// Give the rows back, e.g. for a full re-tile.
    pub fn into_rows(self) -> Vec<RowData> {
        self.rows
    }
}

#[cfg(test)]
#[path = "section_tests.rs"]
mod tests;

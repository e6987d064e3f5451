//! Per-instance controller state.

use super::window::VisibleWindow;
use crate::delegate::ItemUpdater;
use crate::model::{ItemData, ItemOrdinals, PageCursor, RowData, SectionIndex};
use crate::section::Section;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Everything a controller knows about its grid, owned exclusively by it.
///
/// Replaced wholesale on reset; mutated only from host callbacks.
///
/// # Invariants
/// - `sections[i].index() == i` and tops are non-decreasing
/// - `mounted` ⊆ section indices, and is contiguous after every window update
/// - `cursor == None` means the pager is exhausted
pub struct ControllerState {
    /// Width sections are laid out at.
    pub width: f64,
    /// Height of the host box; the viewport band is this tall.
    pub container_height: f64,
    /// Next page to request; `None` once exhausted.
    pub cursor: Option<PageCursor>,
    /// Items not yet forming a full row.
    pub item_remainder: Vec<ItemData>,
    /// Rows not yet forming a full section.
    pub row_remainder: Vec<RowData>,
    /// Sections in index order.
    pub sections: Vec<Section>,
    /// Sections currently shown.
    pub mounted: BTreeSet<SectionIndex>,
    /// Sections that already received the current item updater.
    pub clean: BTreeSet<SectionIndex>,
    /// Sections the host last reported as intersecting the viewport.
    pub intersecting: BTreeSet<SectionIndex>,
    /// Window applied by the last visibility update.
    pub window: Option<VisibleWindow>,
    /// Scroll offset seen by the last visibility update.
    pub last_scroll_top: f64,
    /// A page request is outstanding.
    pub loading: bool,
    /// Ordinals of every item that has been tiled.
    pub ordinals: Rc<ItemOrdinals>,
    /// Item refresh hook applied to sections as they mount.
    pub updater: Option<ItemUpdater>,
}

impl ControllerState {
    /// Empty state starting pagination at `cursor`.
    pub fn new(cursor: PageCursor, width: f64, container_height: f64) -> Self {
        Self {
            width,
            container_height,
            cursor: Some(cursor),
            item_remainder: Vec::new(),
            row_remainder: Vec::new(),
            sections: Vec::new(),
            mounted: BTreeSet::new(),
            clean: BTreeSet::new(),
            intersecting: BTreeSet::new(),
            window: None,
            last_scroll_top: 0.0,
            loading: false,
            ordinals: Rc::new(ItemOrdinals::new()),
            updater: None,
        }
    }

    /// Whether the pager has no further pages.
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Bottom of the last section, i.e. total scrollable height.
    pub fn content_height(&self) -> f64 {
        self.sections.last().map(Section::bottom).unwrap_or(0.0)
    }

    /// Section at `index`, if it exists.
    pub fn section(&self, index: SectionIndex) -> Option<&Section> {
        self.sections.get(index.get())
    }

    /// Index the next created section receives.
    pub fn next_index(&self) -> SectionIndex {
        SectionIndex::new(self.sections.len())
    }

    /// Number of items placed in sections.
    pub fn tiled_items(&self) -> usize {
        self.sections.iter().map(Section::item_count).sum()
    }

    /// Every item known to the controller, in order: sectioned, then held
    /// rows, then held items.
    pub fn drain_items(&mut self) -> Vec<ItemData> {
        let mut items = Vec::new();
        for section in std::mem::take(&mut self.sections) {
            items.extend(section.into_rows().into_iter().flat_map(RowData::into_items));
        }
        items.extend(
            std::mem::take(&mut self.row_remainder)
                .into_iter()
                .flat_map(RowData::into_items),
        );
        items.append(&mut self.item_remainder);
        items
    }
}

//! Injected callbacks: item rendering, clicks, resizes and refreshes.
//!
//! All delegates are plain traits with blanket impls for closures, so a host
//! can pass either a struct or an `FnMut`.

use crate::model::{ItemId, ItemOrdinals, SectionIndex};
use serde::Serialize;
use std::rc::Rc;

/// `[width, height]` of an item in pixels.
pub type Dimensions = [f64; 2];

/// Cleanup returned by a render delegate.
///
/// The engine hands teardowns back to its caller and never runs them itself.
pub type Teardown = Box<dyn FnOnce()>;

/// Per-item refresh hook installed with `Controller::update_items`.
pub type ItemUpdater = Box<dyn FnMut(&ItemId)>;

/// Dimension-tagged placeholder surface for one item.
///
/// Position is relative to the owning section's top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemMount {
    /// Section that owns the mount.
    pub section: SectionIndex,
    /// Item drawn into the mount.
    pub item: ItemId,
    /// Offset from the section's left edge.
    pub left: f64,
    /// Offset from the section's top edge.
    pub top: f64,
    /// Laid-out width.
    pub width: f64,
    /// Laid-out height (the row height).
    pub height: f64,
}

impl ItemMount {
    /// `[width, height]` as handed to delegates.
    pub fn dimensions(&self) -> Dimensions {
        [self.width, self.height]
    }

    /// Whether a point relative to the section falls on this item.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x < self.left + self.width && y >= self.top && y < self.top + self.height
    }
}

/// Draws an item into its mount.
///
/// Invoked exactly once per item per Unmounted → Mounted transition of the
/// owning section.
pub trait RenderDelegate {
    /// Render `id` into `mount`, optionally returning cleanup for unmount.
    fn render(&mut self, id: &ItemId, mount: &ItemMount, dimensions: Dimensions)
        -> Option<Teardown>;
}

impl<F> RenderDelegate for F
where
    F: FnMut(&ItemId, &ItemMount, Dimensions) -> Option<Teardown>,
{
    fn render(
        &mut self,
        id: &ItemId,
        mount: &ItemMount,
        dimensions: Dimensions,
    ) -> Option<Teardown> {
        self(id, mount, dimensions)
    }
}

/// Pointer event in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClickEvent {
    /// Horizontal position from the content's left edge.
    pub x: f64,
    /// Vertical position from the content's top.
    pub y: f64,
    /// Shift modifier held.
    pub shift: bool,
    /// Control modifier held.
    pub ctrl: bool,
}

impl ClickEvent {
    /// Unmodified click at `(x, y)`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }
}

/// Receives clicks on items together with a snapshot of item ordinals.
pub trait ClickDelegate {
    /// Called once per click that lands on an item.
    fn on_item_click(&mut self, event: &ClickEvent, id: &ItemId, ordinals: Rc<ItemOrdinals>);
}

impl<F> ClickDelegate for F
where
    F: FnMut(&ClickEvent, &ItemId, Rc<ItemOrdinals>),
{
    fn on_item_click(&mut self, event: &ClickEvent, id: &ItemId, ordinals: Rc<ItemOrdinals>) {
        self(event, id, ordinals)
    }
}

/// Layout-only dimension update for a mounted item.
pub trait ResizeDelegate {
    /// Called with the item's new `[width, height]`.
    fn on_item_resize(&mut self, id: &ItemId, dimensions: Dimensions);
}

impl<F> ResizeDelegate for F
where
    F: FnMut(&ItemId, Dimensions),
{
    fn on_item_resize(&mut self, id: &ItemId, dimensions: Dimensions) {
        self(id, dimensions)
    }
}

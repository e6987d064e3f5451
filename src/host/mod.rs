//! Host surface contract.
//!
//! The engine never touches a concrete UI toolkit. Everything it needs from
//! the scrollable container it is attached to goes through [`Viewport`]:
//! box measurement, scroll offset, content height, visibility observation,
//! and attaching/detaching section surfaces.
//!
//! Coordinates are in pixels, relative to the top-left of the scrollable
//! content (not the visible viewport).

pub mod headless;

pub use headless::HeadlessViewport;

use crate::model::SectionIndex;
use serde::Serialize;

/// Box size of the host container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Size of `width` by `height` pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement of a section surface within the scrollable content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionFrame {
    /// Section the frame belongs to.
    pub index: SectionIndex,
    /// Offset from the top of the content.
    pub top: f64,
    /// Surface width.
    pub width: f64,
    /// Surface height.
    pub height: f64,
}

impl SectionFrame {
    /// `top + height`.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether the frame overlaps the vertical band `[top, bottom)`.
    pub fn overlaps(&self, top: f64, bottom: f64) -> bool {
        self.top < bottom && self.bottom() > top
    }
}

/// One entry of a visibility batch: a section whose intersection with the
/// viewport changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Intersection {
    /// Section whose state changed.
    pub section: SectionIndex,
    /// Whether it now overlaps the viewport.
    pub is_intersecting: bool,
}

/// The scrollable container a controller is attached to.
///
/// Callbacks into the controller (visibility batches, resizes) are delivered
/// by the host's event loop, one at a time.
pub trait Viewport {
    /// Current box size. Must be determinate at attach time.
    fn measure(&self) -> Size;

    /// Current vertical scroll offset.
    fn scroll_top(&self) -> f64;

    /// Move the scroll offset. Hosts clamp to their scrollable range.
    fn set_scroll_top(&mut self, top: f64);

    /// Total height of the scrollable content.
    fn set_content_height(&mut self, height: f64);

    /// Start (or update) visibility tracking for a section surface.
    fn observe(&mut self, frame: SectionFrame);

    /// Stop tracking every observed section.
    fn disconnect(&mut self);

    /// Mount a section surface at `frame`, or move an already mounted one.
    fn attach_section(&mut self, frame: SectionFrame);

    /// Unmount a section surface. Unknown indices are ignored.
    fn detach_section(&mut self, index: SectionIndex);
}

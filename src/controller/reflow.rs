//! Reflow after width or margin changes.

use super::visibility::VisibilityUpdate;
use super::Controller;
use crate::delegate::Dimensions;
use crate::host::Viewport;
use crate::model::{GridError, ItemId};
use tracing::debug;

impl<H: Viewport> Controller<H> {
    /// Lay every section out again for `width`, keeping the active section
    /// at the top of the viewport.
    ///
    /// Returns `Ok(None)` when the width is unchanged.
    pub fn reposition(&mut self, width: f64) -> Result<Option<VisibilityUpdate>, GridError> {
        if !self.attached {
            return Err(GridError::NotAttached);
        }
        Ok(self.relayout(width, false))
    }

    /// Relayout at `width`. With `force`, runs even when the width is
    /// unchanged (margin updates invalidate layouts without touching width).
    pub(super) fn relayout(&mut self, width: f64, force: bool) -> Option<VisibilityUpdate> {
        if !force && width == self.state.width {
            return None;
        }

        let anchor = self.state.window.map(|w| w.active);
        self.state.width = width;

        let mut top = 0.0;
        for section in &mut self.state.sections {
            section.set(top, width);
            top = section.bottom();
            self.host.observe(section.frame());
            if section.is_shown() {
                self.host.attach_section(section.frame());
            }
        }

        if let Some(delegate) = self.resize.as_mut() {
            let mut resizer = |id: &ItemId, dimensions: Dimensions| {
                delegate.on_item_resize(id, dimensions);
            };
            for section in self.state.sections.iter().filter(|s| s.is_shown()) {
                section.resize_items(&mut resizer);
            }
        }

        self.host.set_content_height(top);
        if let Some(section) = anchor.and_then(|index| self.state.section(index)) {
            self.host.set_scroll_top(section.top());
        }

        debug!(
            "Relaid out {} sections at width {}, content height {}",
            self.state.sections.len(),
            width,
            top
        );

        Some(self.refresh_window())
    }
}

//! Pager contract: the external paged-fetch collaborator.
//!
//! Fetching is asynchronous from the controller's point of view. A
//! pagination step hands a [`PageRequest`] to the pager and returns; the
//! host later delivers the matching [`PageResponse`](crate::model::PageResponse)
//! through `Controller::receive`. The controller keeps at most one request
//! outstanding.

pub mod memory;

pub use memory::MemoryPager;

use crate::model::PageRequest;

/// Source of pages for a controller.
pub trait Pager {
    /// Start fetching the page at `request.cursor`.
    ///
    /// Must not call back into the controller synchronously.
    fn request(&mut self, request: PageRequest);
}

impl<F> Pager for F
where
    F: FnMut(PageRequest),
{
    fn request(&mut self, request: PageRequest) {
        self(request)
    }
}

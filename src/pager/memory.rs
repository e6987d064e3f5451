//! In-memory pager over a fixed item list.
//!
//! Requests are queued rather than answered; the driver decides when each
//! one resolves (or fails), which makes the suspension point explicit in
//! tests and in the demo binary. Clones share one queue.

use super::Pager;
use crate::model::{Page, PageCursor, PageRequest, PageResponse, PagerError, RawItem};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Inner {
    items: Vec<RawItem>,
    page_size: usize,
    pending: VecDeque<PageRequest>,
    issued: usize,
}

/// [`Pager`] serving a fixed list, resolved on demand by the driver.
#[derive(Debug, Clone, Default)]
pub struct MemoryPager {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryPager {
    /// Serve `items` in pages of `page_size` (at least 1).
    /// Cursors are page numbers; the first page is [`MemoryPager::first_cursor`].
    pub fn new(items: Vec<RawItem>, page_size: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                items,
                page_size: page_size.max(1),
                ..Inner::default()
            })),
        }
    }

    /// Cursor of the first page.
    pub fn first_cursor() -> PageCursor {
        PageCursor::from(0)
    }

    /// Requests received but not yet resolved.
    pub fn pending_len(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Total requests ever received.
    pub fn requests_issued(&self) -> usize {
        self.inner.borrow().issued
    }

    /// Cursors of pending requests, oldest first.
    pub fn pending_cursors(&self) -> Vec<PageCursor> {
        self.inner
            .borrow()
            .pending
            .iter()
            .map(|r| r.cursor.clone())
            .collect()
    }

    /// Answer the oldest pending request.
    pub fn resolve_next(&self) -> Option<PageResponse> {
        let mut inner = self.inner.borrow_mut();
        let request = inner.pending.pop_front()?;
        Some(inner.answer(&request))
    }

    /// Fail the oldest pending request with `message`.
    pub fn fail_next(&self, message: &str) -> Option<PageResponse> {
        let request = self.inner.borrow_mut().pending.pop_front()?;
        Some(PageResponse::err(&request, PagerError::new(message)))
    }
}

impl Inner {
    fn answer(&self, request: &PageRequest) -> PageResponse {
        let page: usize = match request.cursor.as_str().parse() {
            Ok(page) => page,
            Err(_) => {
                return PageResponse::err(
                    request,
                    PagerError::new(format!("unknown cursor {}", request.cursor)),
                )
            }
        };

        let start = (page * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        let next_cursor = (end < self.items.len()).then(|| PageCursor::from(page + 1));

        PageResponse::ok(request, Page::new(self.items[start..end].to_vec(), next_cursor))
    }
}

impl Pager for MemoryPager {
    fn request(&mut self, request: PageRequest) {
        let mut inner = self.inner.borrow_mut();
        inner.issued += 1;
        inner.pending.push_back(request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Epoch;

    fn items(n: usize) -> Vec<RawItem> {
        (0..n).map(|i| RawItem::new(format!("m{i}"), 1.0)).collect()
    }

    fn request(cursor: PageCursor) -> PageRequest {
        PageRequest {
            cursor,
            epoch: Epoch::default(),
        }
    }

    #[test]
    fn requests_are_queued_until_resolved() {
        let mut pager = MemoryPager::new(items(5), 2);
        pager.request(request(MemoryPager::first_cursor()));

        assert_eq!(pager.pending_len(), 1);
        assert_eq!(pager.requests_issued(), 1);

        let response = pager.resolve_next().expect("pending request");
        let page = response.result.expect("ok page");
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor, Some(PageCursor::from(1)));
        assert_eq!(pager.pending_len(), 0);
    }

    #[test]
    fn last_page_has_no_next_cursor() {
        let mut pager = MemoryPager::new(items(5), 2);
        pager.request(request(PageCursor::from(2)));

        let page = pager.resolve_next().expect("pending").result.expect("ok");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn empty_source_yields_single_empty_page() {
        let mut pager = MemoryPager::new(Vec::new(), 10);
        pager.request(request(MemoryPager::first_cursor()));

        let page = pager.resolve_next().expect("pending").result.expect("ok");
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn clones_share_the_queue() {
        let pager = MemoryPager::new(items(3), 1);
        let mut handle = pager.clone();
        handle.request(request(MemoryPager::first_cursor()));
        assert_eq!(pager.pending_len(), 1);
    }

    #[test]
    fn unknown_cursor_is_an_error() {
        let mut pager = MemoryPager::new(items(3), 1);
        pager.request(request(PageCursor::new("bogus")));
        let response = pager.resolve_next().expect("pending");
        assert!(response.result.is_err());
    }

    #[test]
    fn fail_next_produces_error_response() {
        let mut pager = MemoryPager::new(items(3), 1);
        pager.request(request(MemoryPager::first_cursor()));
        let response = pager.fail_next("offline").expect("pending");
        assert_eq!(response.result, Err(PagerError::new("offline")));
    }

    #[test]
    fn resolve_with_nothing_pending_is_none() {
        let pager = MemoryPager::new(items(3), 1);
        assert!(pager.resolve_next().is_none());
        assert!(pager.fail_next("x").is_none());
    }
}

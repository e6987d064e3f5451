//! Pagination wire types exchanged with the external pager.

use super::error::PagerError;
use super::item::RawItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque pagination continuation token.
///
/// The controller never inspects it; it only hands the last received token
/// back to the pager. Absence of a next cursor signals exhaustion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageCursor(String);

impl PageCursor {
    /// Wrap a pager-issued token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<usize> for PageCursor {
    fn from(page: usize) -> Self {
        Self(page.to_string())
    }
}

/// Pagination sequence identifier.
///
/// Bumped by every reset; responses tagged with an older epoch are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Epoch(u64);

impl Epoch {
    /// Epoch with the given counter value.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// The epoch that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// One page of items as returned by the pager.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    /// Items in collection order, not yet validated.
    pub items: Vec<RawItem>,
    /// Token for the following page; `None` once the collection is exhausted.
    #[serde(rename = "nextCursor", alias = "next_cursor", default)]
    pub next_cursor: Option<PageCursor>,
}

impl Page {
    /// Page with an explicit continuation.
    pub fn new(items: Vec<RawItem>, next_cursor: Option<PageCursor>) -> Self {
        Self { items, next_cursor }
    }

    /// Final page: no continuation.
    pub fn last(items: Vec<RawItem>) -> Self {
        Self::new(items, None)
    }
}

/// Request handed to the pager by a pagination step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Position to continue from.
    pub cursor: PageCursor,
    /// Pagination sequence the request belongs to.
    pub epoch: Epoch,
}

/// Eventual answer to a [`PageRequest`], delivered back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    /// Copied from the originating request.
    pub epoch: Epoch,
    /// The page, or why it could not be fetched.
    pub result: Result<Page, PagerError>,
}

impl PageResponse {
    /// Successful answer to `request`.
    pub fn ok(request: &PageRequest, page: Page) -> Self {
        Self {
            epoch: request.epoch,
            result: Ok(page),
        }
    }

    /// Failed answer to `request`.
    pub fn err(request: &PageRequest, error: PagerError) -> Self {
        Self {
            epoch: request.epoch,
            result: Err(error),
        }
    }
}

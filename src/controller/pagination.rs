//! Pagination: single-flight page requests and appending tiled sections.

use super::Controller;
use crate::host::Viewport;
use crate::model::{GridError, ItemData, PageRequest, PageResponse, RawItem, RowData};
use crate::section::Section;
use crate::tiling::{tile, Tiling};
use std::rc::Rc;
use tracing::{debug, error, warn};

/// What `Controller::receive` did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// The page was tiled and appended.
    Applied {
        /// Sections appended by this page.
        sections_created: usize,
    },
    /// The response belongs to a pagination sequence discarded by `reset`.
    Stale,
    /// No request was outstanding for the current sequence.
    Unsolicited,
}

impl<H: Viewport> Controller<H> {
    /// Ask the pager for the page at the current cursor.
    ///
    /// No-op (returns `false`) while detached, while a request is already
    /// outstanding, or once the cursor is exhausted.
    pub fn get(&mut self) -> bool {
        if !self.attached || self.state.loading {
            return false;
        }
        let Some(cursor) = self.state.cursor.clone() else {
            return false;
        };

        self.state.loading = true;
        debug!("Requesting page {} (epoch {})", cursor, self.epoch.get());
        self.pager.request(PageRequest {
            cursor,
            epoch: self.epoch,
        });
        true
    }

    /// Deliver the pager's answer to an earlier request.
    ///
    /// Responses from an older epoch are dropped. A failed fetch clears the
    /// loading flag, keeps the cursor and is returned as [`GridError::Fetch`].
    pub fn receive(&mut self, response: PageResponse) -> Result<ReceiveOutcome, GridError> {
        if response.epoch != self.epoch {
            warn!(
                "Dropping stale page response (epoch {}, current {})",
                response.epoch.get(),
                self.epoch.get()
            );
            return Ok(ReceiveOutcome::Stale);
        }
        if !self.state.loading {
            warn!("Dropping page response with no request outstanding");
            return Ok(ReceiveOutcome::Unsolicited);
        }
        self.state.loading = false;

        let page = match response.result {
            Ok(page) => page,
            Err(err) => {
                error!(
                    "Page fetch failed at cursor {:?}: {}",
                    self.state.cursor.as_ref().map(|c| c.as_str()),
                    err
                );
                return Err(GridError::Fetch(err));
            }
        };

        self.state.cursor = page.next_cursor;
        let items = self.accept_items(page.items);
        let received = items.len();
        let created = self.tile_and_append(items);
        self.host.set_content_height(self.state.content_height());

        debug!(
            "Page applied: {} items, {} new sections, {} total, exhausted={}",
            received,
            created,
            self.state.sections.len(),
            self.state.is_exhausted()
        );

        self.continue_if_short(created);
        Ok(ReceiveOutcome::Applied {
            sections_created: created,
        })
    }

    /// Validate raw items and assign their ordinals. Invalid items are skipped.
    fn accept_items(&mut self, raw: Vec<RawItem>) -> Vec<ItemData> {
        let ordinals = Rc::make_mut(&mut self.state.ordinals);
        raw.into_iter()
            .filter_map(|raw| match ItemData::try_from(raw) {
                Ok(item) => {
                    ordinals.assign(item.id());
                    Some(item)
                }
                Err(err) => {
                    warn!("Skipping invalid item: {}", err);
                    None
                }
            })
            .collect()
    }

    /// Tile `items` after the held item remainder and append full sections.
    ///
    /// Rows that do not fill a section are held back until the cursor is
    /// exhausted. Returns the number of sections created.
    pub(super) fn tile_and_append(&mut self, items: Vec<ItemData>) -> usize {
        let state = &mut self.state;
        let exhausted = state.is_exhausted();

        let mut combined = std::mem::take(&mut state.item_remainder);
        combined.extend(items);
        let Tiling { rows, remainder } =
            tile(combined, self.options.row_aspect_ratio_threshold, !exhausted);
        state.item_remainder = remainder;

        let mut pending: Vec<RowData> = std::mem::take(&mut state.row_remainder);
        pending.extend(rows);

        let capacity = self.options.section_capacity();
        let complete = if exhausted {
            pending.len()
        } else {
            pending.len() - pending.len() % capacity
        };
        state.row_remainder = pending.split_off(complete);

        let mut created = 0;
        let mut rows = pending.into_iter().peekable();
        while rows.peek().is_some() {
            let chunk: Vec<RowData> = rows.by_ref().take(capacity).collect();
            let mut section = Section::new(state.next_index(), chunk, self.options.margin);
            section.set(state.content_height(), state.width);
            self.host.observe(section.frame());
            state.sections.push(section);
            created += 1;
        }
        created
    }

    /// Rebuild every section from the flat item list under current options.
    ///
    /// Keeps the epoch and cursor: an outstanding request stays valid and its
    /// items are appended to the rebuilt remainder.
    pub(super) fn retile(&mut self) -> bool {
        let mounted = std::mem::take(&mut self.state.mounted);
        for index in mounted {
            if let Some(section) = self.state.sections.get_mut(index.get()) {
                section.hide(&mut self.host);
            }
        }

        let items = self.state.drain_items();
        let count = items.len();
        self.host.disconnect();
        self.state.clean.clear();
        self.state.intersecting.clear();
        self.state.window = None;

        let created = self.tile_and_append(items);
        self.host.set_content_height(self.state.content_height());
        debug!("Re-tiled {} items into {} sections", count, created);

        self.continue_if_short(created)
    }

    /// Request the next page when the content cannot yet fill the viewport.
    fn continue_if_short(&mut self, created: usize) -> bool {
        if self.state.is_exhausted() {
            return false;
        }

        let viewport_bottom = self.host.scroll_top() + self.state.container_height;
        let short = self.state.content_height() < self.state.container_height;
        let tail_visible = self
            .state
            .sections
            .last()
            .is_some_and(|s| s.top() < viewport_bottom);

        if short || created == 0 || tail_visible {
            self.get()
        } else {
            false
        }
    }
}

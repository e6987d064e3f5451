//! Shared driver for integration tests.
//!
//! Wires a [`Controller`] to a [`HeadlessViewport`] and a [`MemoryPager`],
//! and records every render call, so tests can act like a host event loop.

#![allow(dead_code)]

use flashlight::config::GridOptions;
use flashlight::controller::{Controller, VisibilityUpdate};
use flashlight::delegate::{Dimensions, ItemMount, Teardown};
use flashlight::host::{HeadlessViewport, Viewport};
use flashlight::model::{ItemId, RawItem, SectionIndex};
use flashlight::pager::MemoryPager;
use std::cell::RefCell;
use std::rc::Rc;

pub struct GridHarness {
    pub controller: Controller<HeadlessViewport>,
    pub pager: MemoryPager,
    pub renders: Rc<RefCell<Vec<String>>>,
}

/// Items `m0..mN` with the given aspect ratios.
pub fn items_with_ratios(ratios: &[f64]) -> Vec<RawItem> {
    ratios
        .iter()
        .enumerate()
        .map(|(i, ar)| RawItem::new(format!("m{i}"), *ar))
        .collect()
}

/// `n` square items.
pub fn square_items(n: usize) -> Vec<RawItem> {
    items_with_ratios(&vec![1.0; n])
}

impl GridHarness {
    pub fn new(
        items: Vec<RawItem>,
        page_size: usize,
        options: GridOptions,
        width: f64,
        height: f64,
    ) -> Self {
        let pager = MemoryPager::new(items, page_size);
        let renders = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&renders);
        let controller = Controller::new(
            HeadlessViewport::new(width, height),
            pager.clone(),
            move |id: &ItemId, _: &ItemMount, _: Dimensions| -> Option<Teardown> {
                log.borrow_mut().push(id.to_string());
                None
            },
            options,
            MemoryPager::first_cursor(),
        );
        Self {
            controller,
            pager,
            renders,
        }
    }

    /// Attach and settle.
    pub fn attached(mut self) -> Self {
        self.controller.attach().expect("host has a size");
        self.settle();
        self
    }

    /// Resolve pages and visibility batches until nothing changes.
    pub fn settle(&mut self) {
        loop {
            let mut progressed = false;
            while let Some(response) = self.pager.resolve_next() {
                self.controller.receive(response).expect("page applies");
                progressed = true;
            }
            let update = self.controller.pump_visibility();
            if !(progressed || update.changed() || update.requested_page) {
                return;
            }
        }
    }

    /// Fetch every remaining page.
    pub fn load_everything(&mut self) {
        loop {
            self.settle();
            if self.controller.cursor().is_none() {
                return;
            }
            self.controller.get();
        }
    }

    pub fn scroll_to(&mut self, top: f64) -> VisibilityUpdate {
        self.controller.host_mut().scroll_to(top);
        self.controller.pump_visibility()
    }

    pub fn scroll_top(&self) -> f64 {
        self.controller.host().scroll_top()
    }

    pub fn mounted(&self) -> Vec<usize> {
        self.controller.mounted().iter().map(SectionIndex::get).collect()
    }

    /// Indices of sections overlapping the viewport band.
    pub fn visible(&self) -> Vec<usize> {
        let top = self.scroll_top();
        let bottom = top + self.controller.host().measure().height;
        self.controller
            .sections()
            .iter()
            .filter(|s| s.frame().overlaps(top, bottom))
            .map(|s| s.index().get())
            .collect()
    }

    pub fn section_heights(&self) -> f64 {
        self.controller.sections().iter().map(|s| s.height()).sum()
    }
}

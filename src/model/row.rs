//! Justified rows produced by the tiling engine.

use super::item::ItemData;
use serde::Serialize;

/// Upper bound on the phantom gaps a short final row may carry.
///
/// A threshold far above the row's achieved sum would otherwise ask for an
/// unbounded number of gaps; past this many the row is already collapsed at
/// any realistic width.
pub const MAX_EXTRA_MARGINS: usize = 1 << 16;

/// A left-to-right run of items sharing one computed height.
///
/// `aspect_ratio` is the ratio the row is laid out at. For a closed row it is
/// the achieved sum of its items' ratios. A short final row is laid out at the
/// threshold instead, with `extra_margins` counting the phantom gaps that a
/// full row would have had.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowData {
    items: Vec<ItemData>,
    aspect_ratio: f64,
    extra_margins: usize,
}

impl RowData {
    /// Closed row: laid out at the sum of its items' ratios.
    pub fn closed(items: Vec<ItemData>) -> Self {
        let aspect_ratio = sum_aspect_ratios(&items);
        Self {
            items,
            aspect_ratio,
            extra_margins: 0,
        }
    }

    /// Final row that may fall short of `threshold`.
    ///
    /// A row that already meets the threshold is closed as usual. A short row
    /// is laid out as if it were full so its items keep the height of their
    /// neighbours above.
    pub fn tail(items: Vec<ItemData>, threshold: f64) -> Self {
        let achieved = sum_aspect_ratios(&items);
        if achieved >= threshold || items.is_empty() {
            return Self::closed(items);
        }

        let mean = achieved / items.len() as f64;
        // `as` saturates: NaN becomes 0, infinity becomes usize::MAX.
        let phantoms = ((threshold - achieved) / mean).floor() as usize;
        let extra_margins = phantoms.min(MAX_EXTRA_MARGINS);
        Self {
            items,
            aspect_ratio: threshold,
            extra_margins,
        }
    }

    /// Items in left-to-right order.
    pub fn items(&self) -> &[ItemData] {
        &self.items
    }

    /// Give the items back, e.g. to re-tile them.
    pub fn into_items(self) -> Vec<ItemData> {
        self.items
    }

    /// Number of items in the row.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the row holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ratio the row is laid out at.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Raw sum of the items' ratios.
    pub fn items_aspect_ratio(&self) -> f64 {
        sum_aspect_ratios(&self.items)
    }

    /// Phantom gaps reserved for items a short final row never received.
    pub fn extra_margins(&self) -> usize {
        self.extra_margins
    }

    /// Number of margin gaps consumed across the row width.
    pub fn margin_units(&self) -> usize {
        self.items.len().saturating_sub(1).saturating_add(self.extra_margins)
    }

    /// Whether the row was laid out short of its natural width.
    pub fn is_padded(&self) -> bool {
        self.extra_margins > 0 || self.aspect_ratio > self.items_aspect_ratio()
    }
}

fn sum_aspect_ratios(items: &[ItemData]) -> f64 {
    items.iter().map(ItemData::aspect_ratio).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn item(id: &str, ar: f64) -> ItemData {
        ItemData::new(ItemId::new(id).expect("id"), ar).expect("item")
    }

    #[test]
    fn closed_row_uses_achieved_sum() {
        let row = RowData::closed(vec![item("a", 2.0), item("b", 3.5)]);
        assert_eq!(row.aspect_ratio(), 5.5);
        assert_eq!(row.extra_margins(), 0);
        assert_eq!(row.margin_units(), 1);
        assert!(!row.is_padded());
    }

    #[test]
    fn tail_row_meeting_threshold_is_closed() {
        let row = RowData::tail(vec![item("a", 2.0), item("b", 2.0), item("c", 2.0)], 5.0);
        assert_eq!(row.aspect_ratio(), 6.0);
        assert_eq!(row.extra_margins(), 0);
    }

    #[test]
    fn short_tail_row_is_padded_to_threshold() {
        // mean 1.0, short by 3.0 => three phantom gaps
        let row = RowData::tail(vec![item("a", 1.0), item("b", 1.0)], 5.0);
        assert_eq!(row.aspect_ratio(), 5.0);
        assert_eq!(row.items_aspect_ratio(), 2.0);
        assert_eq!(row.extra_margins(), 3);
        assert_eq!(row.margin_units(), 4);
        assert!(row.is_padded());
    }

    #[test]
    fn short_tail_row_rounds_phantoms_down() {
        // mean 1.5, short by 2.0 => 1.33 phantoms => 1
        let row = RowData::tail(vec![item("a", 1.5), item("b", 1.5)], 5.0);
        assert_eq!(row.extra_margins(), 1);
    }

    #[test]
    fn huge_threshold_caps_phantom_gaps() {
        let row = RowData::tail(vec![item("a", 1.0), item("b", 1.0)], 1e20);
        assert_eq!(row.extra_margins(), MAX_EXTRA_MARGINS);
        assert_eq!(row.margin_units(), MAX_EXTRA_MARGINS + 1);
    }

    #[test]
    fn infinite_threshold_caps_phantom_gaps() {
        let row = RowData::tail(vec![item("a", 1.0)], f64::INFINITY);
        assert_eq!(row.extra_margins(), MAX_EXTRA_MARGINS);
    }
}

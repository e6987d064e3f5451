//! Pixel layout of a section's rows.

use crate::delegate::ItemMount;
use crate::model::{RowData, SectionIndex};

/// Vertical placement of one row inside its section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Offset from the section top.
    pub top: f64,
    /// Justified row height.
    pub height: f64,
}

impl RowLayout {
    /// Offset of the row's lower edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Computed layout for a run of rows at a given width.
///
/// # Invariants
/// - `mounts` has one entry per item, in row-major order
/// - Every row is followed by one `margin` gap, so stacked sections keep
///   uniform spacing
/// - `height == Σ (row.height + margin)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SectionLayout {
    /// One entry per row.
    pub rows: Vec<RowLayout>,
    /// One entry per item.
    pub mounts: Vec<ItemMount>,
    /// Total height including trailing gaps.
    pub height: f64,
}

/// Height of a row justified to `width`.
///
/// `(width - margin_units * margin) / aspect_ratio`, never negative.
pub fn row_height(row: &RowData, width: f64, margin: f64) -> f64 {
    let available = width - row.margin_units() as f64 * margin;
    (available / row.aspect_ratio()).max(0.0)
}

/// Lay out `rows` left-to-right, top-to-bottom.
pub fn compute(index: SectionIndex, rows: &[RowData], width: f64, margin: f64) -> SectionLayout {
    let mut layout = SectionLayout {
        rows: Vec::with_capacity(rows.len()),
        mounts: Vec::with_capacity(rows.iter().map(RowData::len).sum()),
        height: 0.0,
    };

    let mut top = 0.0;
    for row in rows {
        let height = row_height(row, width, margin);
        let mut left = 0.0;

        for item in row.items() {
            let item_width = height * item.aspect_ratio();
            layout.mounts.push(ItemMount {
                section: index,
                item: item.id().clone(),
                left,
                top,
                width: item_width,
                height,
            });
            left += item_width + margin;
        }

        layout.rows.push(RowLayout { top, height });
        top += height + margin;
    }

    layout.height = top;
    layout
}

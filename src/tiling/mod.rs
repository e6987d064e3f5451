//! Justified-row tiling.
//!
//! Converts an ordered item sequence into rows, in the manner of greedy line
//! breaking but driven by aspect ratio instead of text width: items are
//! accumulated until the running sum of their aspect ratios reaches the
//! threshold, at which point the row closes.
//!
//! Pure and deterministic: identical `(items, threshold, has_more)` always
//! yields an identical [`Tiling`].

use crate::model::{ItemData, RowData};

/// Default row fullness threshold (sum of item aspect ratios).
pub const DEFAULT_ROW_ASPECT_RATIO_THRESHOLD: f64 = 5.0;

/// Output of a tiling pass.
///
/// # Invariants
/// - Concatenating `rows` items then `remainder` reproduces the input order
/// - Every row except possibly the final one (when `has_more` was false)
///   has `items_aspect_ratio() >= threshold`
/// - `remainder` is empty whenever `has_more` was false
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tiling {
    /// Closed rows, plus the final partial row when input was exhausted.
    pub rows: Vec<RowData>,
    /// Items withheld for the next pass.
    pub remainder: Vec<ItemData>,
}

impl Tiling {
    /// Total number of items placed in rows.
    pub fn tiled_len(&self) -> usize {
        self.rows.iter().map(RowData::len).sum()
    }
}

/// Tile `items` into justified rows.
///
/// When the input runs out while the open row is still short of
/// `threshold`, the open row's items are either withheld as the remainder
/// (`has_more`, so they can prefix the next pass) or emitted as a final
/// partial row.
///
/// `threshold` is expected to be finite and positive; option handling
/// rejects anything else before it gets here.
pub fn tile(items: Vec<ItemData>, threshold: f64, has_more: bool) -> Tiling {
    let mut rows = Vec::new();
    let mut open: Vec<ItemData> = Vec::new();
    let mut sum = 0.0;

    for item in items {
        sum += item.aspect_ratio();
        open.push(item);

        if sum >= threshold {
            rows.push(RowData::closed(std::mem::take(&mut open)));
            sum = 0.0;
        }
    }

    if open.is_empty() {
        return Tiling {
            rows,
            remainder: Vec::new(),
        };
    }

    if has_more {
        Tiling {
            rows,
            remainder: open,
        }
    } else {
        rows.push(RowData::tail(open, threshold));
        Tiling {
            rows,
            remainder: Vec::new(),
        }
    }
}

//! Media items and their ordinal bookkeeping.

use super::error::InvalidItem;
use super::identifiers::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single media item as delivered by the pager.
///
/// # Invariants
/// - `aspect_ratio` is finite and strictly positive (width / height)
/// - Immutable once constructed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemData {
    id: ItemId,
    aspect_ratio: f64,
}

impl ItemData {
    /// Smart constructor: rejects non-finite and non-positive aspect ratios.
    pub fn new(id: ItemId, aspect_ratio: f64) -> Result<Self, InvalidItem> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(InvalidItem::AspectRatio {
                id: id.to_string(),
                aspect_ratio,
            });
        }
        Ok(Self { id, aspect_ratio })
    }

    /// Key of the item.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }
}

/// Unvalidated item as it arrives over the wire.
///
/// Converted into [`ItemData`] at the page boundary; failures are skipped
/// by the controller rather than tiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    /// Item key; must be non-empty to be accepted.
    pub id: String,
    /// Width divided by height; must be finite and positive.
    #[serde(rename = "aspectRatio", alias = "aspect_ratio")]
    pub aspect_ratio: f64,
}

impl RawItem {
    /// Build a raw item without validating it.
    pub fn new(id: impl Into<String>, aspect_ratio: f64) -> Self {
        Self {
            id: id.into(),
            aspect_ratio,
        }
    }
}

impl TryFrom<RawItem> for ItemData {
    type Error = InvalidItem;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let id = ItemId::new(raw.id)?;
        ItemData::new(id, raw.aspect_ratio)
    }
}

/// Monotonic item → ordinal assignment.
///
/// Ordinals are handed out in arrival order and never revised: assigning an
/// id that already has an ordinal is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemOrdinals {
    ordinals: HashMap<ItemId, usize>,
}

impl ItemOrdinals {
    /// Empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next ordinal to `id` unless it already has one.
    /// Returns the ordinal held by `id` after the call.
    pub fn assign(&mut self, id: &ItemId) -> usize {
        let next = self.ordinals.len();
        *self.ordinals.entry(id.clone()).or_insert(next)
    }

    /// Ordinal of `id`, if it has been assigned one.
    pub fn get(&self, id: &ItemId) -> Option<usize> {
        self.ordinals.get(id).copied()
    }

    /// Number of ids with an ordinal.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Whether no ordinal has been assigned yet.
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }
}

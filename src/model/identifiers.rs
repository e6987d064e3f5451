//! Core identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! Raw constructors are never exported - use smart constructors only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key of a media item, as produced by the pager.
/// NEVER export the constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Smart constructor: validates non-empty item key
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidItemId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidItemId::Empty);
        }
        Ok(Self(raw))
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ItemId {
    type Error = InvalidItemId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// Index of a section in creation order. 0-indexed, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct SectionIndex(usize);

impl SectionIndex {
    /// Create a new SectionIndex from a raw 0-based value.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw 0-based index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== Error Types =====

/// Reason an item key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItemId {
    /// The key was the empty string.
    #[error("Item ID cannot be empty")]
    Empty,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_accepts_valid_string() {
        let id = ItemId::new("6571b0f2c1a9e2a7d8e0c1f3");
        assert!(id.is_ok(), "Valid item id should be accepted");
    }

    #[test]
    fn item_id_rejects_empty_string() {
        let id = ItemId::new("");
        assert!(
            matches!(id, Err(InvalidItemId::Empty)),
            "Empty string should return InvalidItemId::Empty"
        );
    }

    #[test]
    fn item_id_as_str_returns_original() {
        let id = ItemId::new("sample-42").expect("Valid item id");
        assert_eq!(id.as_str(), "sample-42");
    }

    #[test]
    fn item_id_display_returns_inner_string() {
        let id = ItemId::new("sample-42").expect("Valid item id");
        assert_eq!(id.to_string(), "sample-42");
    }

    #[test]
    fn item_id_deserialize_rejects_empty() {
        let result: Result<ItemId, _> = serde_json::from_str(r#""""#);
        assert!(result.is_err(), "Empty id must not deserialize");
    }

    #[test]
    fn item_id_deserialize_round_trips_through_string() {
        let id: ItemId = serde_json::from_str(r#""abc""#).expect("valid id");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), r#""abc""#);
    }

    #[test]
    fn section_index_display_is_hash_prefixed() {
        assert_eq!(SectionIndex::new(7).to_string(), "#7");
    }
}

//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod item;
pub mod page;
pub mod row;

// Re-export for convenience
pub use error::{GridError, InvalidItem, PagerError};
pub use identifiers::{InvalidItemId, ItemId, SectionIndex};
pub use item::{ItemData, ItemOrdinals, RawItem};
pub use page::{Epoch, Page, PageCursor, PageRequest, PageResponse};
pub use row::RowData;

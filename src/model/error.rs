//! Error types for the flashlight grid engine.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose
//! via `?` and `From` conversions into the top-level [`GridError`].
//!
//! # Error Hierarchy
//!
//! - [`GridError`] - Top-level error returned from controller and binary entry points
//!   - [`PagerError`] - A page fetch reported failure
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failures
//! - [`InvalidItem`] - Rejected item data (never surfaces as `GridError`)
//!
//! # Recovery Strategy
//!
//! Malformed items are **non-fatal**: they are logged and skipped at the page
//! boundary, so one bad record never blanks the grid. A failed fetch clears the
//! single-flight flag and is reported to the caller; the cursor is kept, so the
//! next pagination trigger asks for the same page again. Nothing here retries.

use super::identifiers::InvalidItemId;
use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum GridError {
    /// The pager reported that a page could not be fetched.
    ///
    /// **Recovery**: The controller has already cleared its loading flag and
    /// kept its cursor. Callers may surface the message; a later scroll near
    /// the tail issues the same request again.
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] PagerError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// An operation that needs a measured host ran before `attach`.
    #[error("Controller is not attached to a host")]
    NotAttached,
}

/// Failure reported by the external pager.
///
/// The message is opaque to this layer; it is only logged and forwarded.
///
/// # Examples
///
/// ```
/// use flashlight::model::PagerError;
///
/// let err = PagerError::new("503 from media index");
/// assert!(err.to_string().contains("503"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PagerError {
    message: String,
}

impl PagerError {
    /// Wrap a pager-specific failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The description given by the pager.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Item data rejected at the page boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidItem {
    /// The item key was empty.
    #[error("Invalid item id: {0}")]
    Id(#[from] InvalidItemId),

    /// The aspect ratio was zero, negative, or not finite.
    ///
    /// Such an item would produce a degenerate (zero-width or infinite)
    /// layout, so it is never tiled.
    #[error("Item {id} has invalid aspect ratio {aspect_ratio}")]
    AspectRatio {
        /// Key of the rejected item.
        id: String,
        /// The offending ratio.
        aspect_ratio: f64,
    },
}

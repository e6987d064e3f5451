//! Flashlight
//!
//! Virtualized grid engine for large, lazily paged collections of
//! variable-aspect-ratio items. Items are tiled into justified rows, rows are
//! grouped into fixed-size sections, and only the sections near the viewport
//! are mounted.
//!
//! The engine is host-agnostic: a UI layer implements [`host::Viewport`] and
//! supplies a [`pager::Pager`] and a [`delegate::RenderDelegate`].

pub mod config;
pub mod controller;
pub mod delegate;
pub mod host;
pub mod logging;
pub mod model;
pub mod pager;
pub mod section;
pub mod tiling;

pub use controller::{Controller, ReceiveOutcome, TickReport, VisibilityUpdate, VisibleWindow};
pub use host::{HeadlessViewport, Viewport};
pub use model::GridError;

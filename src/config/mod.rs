//! Configuration module.
//!
//! [`GridOptions`] is the live option set a controller lays out with.
//! [`OptionsPatch`] is a partial update merged into it at runtime, and
//! `loader` resolves the startup values from file, env and CLI.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use crate::tiling::DEFAULT_ROW_ASPECT_RATIO_THRESHOLD;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default gap between items and rows, in pixels.
pub const DEFAULT_MARGIN: f64 = 3.0;

/// Default number of rows grouped into one section.
pub const DEFAULT_SECTION_ROWS: usize = 5;

/// Whether `margin` is usable as a gap: finite and not negative.
pub fn is_valid_margin(margin: f64) -> bool {
    margin.is_finite() && margin >= 0.0
}

/// Whether `threshold` can ever close a row: finite and positive.
pub fn is_valid_threshold(threshold: f64) -> bool {
    threshold.is_finite() && threshold > 0.0
}

/// Options that shape tiling and layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridOptions {
    /// Pixels between items in a row and between rows.
    pub margin: f64,
    /// Sum of item aspect ratios at which a row closes.
    pub row_aspect_ratio_threshold: f64,
    /// Maximum rows per section. Values below 1 are treated as 1.
    pub section_rows: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            row_aspect_ratio_threshold: DEFAULT_ROW_ASPECT_RATIO_THRESHOLD,
            section_rows: DEFAULT_SECTION_ROWS,
        }
    }
}

impl GridOptions {
    /// Effective section capacity (never zero).
    pub fn section_capacity(&self) -> usize {
        self.section_rows.max(1)
    }

    /// Replace unusable values with their defaults.
    ///
    /// A negative or non-finite margin, or a threshold that is not finite
    /// and positive, is logged and dropped.
    pub fn sanitized(mut self) -> Self {
        if !is_valid_margin(self.margin) {
            warn!("Invalid margin {}, using default {}", self.margin, DEFAULT_MARGIN);
            self.margin = DEFAULT_MARGIN;
        }
        if !is_valid_threshold(self.row_aspect_ratio_threshold) {
            warn!(
                "Invalid row aspect ratio threshold {}, using default {}",
                self.row_aspect_ratio_threshold, DEFAULT_ROW_ASPECT_RATIO_THRESHOLD
            );
            self.row_aspect_ratio_threshold = DEFAULT_ROW_ASPECT_RATIO_THRESHOLD;
        }
        self
    }

    /// Merge a partial update and report what kind of recomputation it needs.
    ///
    /// Invalid margin or threshold values are ignored with a warning.
    pub fn merge(&mut self, patch: OptionsPatch) -> OptionsChange {
        let before = *self;

        if let Some(margin) = patch.margin {
            if is_valid_margin(margin) {
                self.margin = margin;
            } else {
                warn!("Ignoring invalid margin {}", margin);
            }
        }
        if let Some(threshold) = patch.row_aspect_ratio_threshold {
            if is_valid_threshold(threshold) {
                self.row_aspect_ratio_threshold = threshold;
            } else {
                warn!("Ignoring invalid row aspect ratio threshold {}", threshold);
            }
        }
        if let Some(rows) = patch.section_rows {
            self.section_rows = rows;
        }

        if before.row_aspect_ratio_threshold != self.row_aspect_ratio_threshold
            || before.section_capacity() != self.section_capacity()
        {
            OptionsChange::Tiling
        } else if before.margin != self.margin {
            OptionsChange::Layout
        } else {
            OptionsChange::None
        }
    }
}

/// Partial option update. `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionsPatch {
    /// New gap in pixels.
    #[serde(default)]
    pub margin: Option<f64>,
    /// New row fullness threshold.
    #[serde(default)]
    pub row_aspect_ratio_threshold: Option<f64>,
    /// New rows-per-section count.
    #[serde(default)]
    pub section_rows: Option<usize>,
}

impl OptionsPatch {
    /// Patch that only sets the margin.
    pub fn margin(margin: f64) -> Self {
        Self {
            margin: Some(margin),
            ..Self::default()
        }
    }

    /// Patch that only sets the row aspect ratio threshold.
    pub fn threshold(threshold: f64) -> Self {
        Self {
            row_aspect_ratio_threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Patch that only sets rows per section.
    pub fn section_rows(rows: usize) -> Self {
        Self {
            section_rows: Some(rows),
            ..Self::default()
        }
    }
}

/// Recomputation required after merging an [`OptionsPatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsChange {
    /// Nothing changed.
    None,
    /// Only pixel layout changed; rows and sections stay as they are.
    Layout,
    /// Row breaks or section grouping changed; everything is re-tiled.
    Tiling,
}

//! Board configuration.
//!
//! Hosts configure the engine at startup with a `BoardConfig`:
//! - grid dimensions (fixed for the board's lifetime)
//! - how many item types (signs) exist
//! - how many level visuals exist, which bounds leveling
//! - cell geometry used for hit-testing drop points
//!
//! The engine never hardcodes a board size - the host picks it.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Cell geometry for hit-testing.
///
/// Cells are laid out centered on the origin with `gap` units between
/// neighbours. Units are whatever the input collaborator reports drop
/// points in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellLayout {
    pub cell_width: f32,
    pub cell_height: f32,
    pub gap: f32,
}

impl CellLayout {
    #[must_use]
    pub const fn new(cell_width: f32, cell_height: f32, gap: f32) -> Self {
        Self {
            cell_width,
            cell_height,
            gap,
        }
    }

    /// Check geometry is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_width.is_finite() && self.cell_width > 0.0) {
            return Err(ConfigError::InvalidCellSize {
                field: "cell_width",
                value: self.cell_width,
            });
        }
        if !(self.cell_height.is_finite() && self.cell_height > 0.0) {
            return Err(ConfigError::InvalidCellSize {
                field: "cell_height",
                value: self.cell_height,
            });
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(ConfigError::InvalidGap { value: self.gap });
        }
        Ok(())
    }
}

impl Default for CellLayout {
    fn default() -> Self {
        Self::new(100.0, 100.0, 1.0)
    }
}

/// Complete board configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Grid rows (> 0).
    pub rows: usize,

    /// Grid columns (> 0).
    pub columns: usize,

    /// Number of defined item types. Valid signs are `1..=sign_count`.
    pub sign_count: u16,

    /// Number of defined level visuals. Item levels saturate here.
    pub level_visuals: u32,

    /// Cell geometry for the default centered locator.
    #[serde(default)]
    pub layout: CellLayout,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 2,
            sign_count: 2,
            level_visuals: 4,
            layout: CellLayout::default(),
        }
    }
}

impl BoardConfig {
    /// Create a configuration for a `rows` x `columns` board.
    ///
    /// Other settings take their defaults.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Set the number of item types.
    #[must_use]
    pub fn with_sign_count(mut self, count: u16) -> Self {
        self.sign_count = count;
        self
    }

    /// Set the number of level visuals (the level cap).
    #[must_use]
    pub fn with_level_visuals(mut self, count: u32) -> Self {
        self.level_visuals = count;
        self
    }

    /// Set the cell geometry.
    #[must_use]
    pub fn with_layout(mut self, layout: CellLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Highest level an item can reach.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.level_visuals
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 {
            return Err(ConfigError::ZeroDimension { field: "rows" });
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroDimension { field: "columns" });
        }
        // Item ids are u32 and one is minted per cell
        let fits = self
            .rows
            .checked_mul(self.columns)
            .is_some_and(|count| u32::try_from(count).is_ok());
        if !fits {
            return Err(ConfigError::TooManyCells {
                rows: self.rows,
                columns: self.columns,
            });
        }
        if self.sign_count < 2 {
            return Err(ConfigError::TooFewSigns {
                count: self.sign_count,
            });
        }
        if self.level_visuals == 0 {
            return Err(ConfigError::NoLevelVisuals);
        }
        self.layout.validate()
    }
}

//! Item identity and item type.
//!
//! ## Usage
//!
//! ```
//! use merge_grid::core::{ItemId, Sign};
//!
//! let id = ItemId::new(3);
//! assert_eq!(id.raw(), 3);
//!
//! // Sign 0 is reserved for "empty cell"
//! assert!(Sign::new(0).is_none());
//! assert_eq!(Sign::new(2).map(Sign::raw), Some(2));
//! ```

use std::num::NonZeroU16;

use serde::{Deserialize, Serialize};

/// Unique identifier for a live item.
///
/// Ids are allocated sequentially in placement order and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

/// Item type id. Two items are similar iff their signs match.
///
/// Backed by `NonZeroU16`: the grid stores `Option<Sign>` and an empty
/// cell is `None`, which is the same two bytes as a raw `u16` with 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sign(NonZeroU16);

impl Sign {
    /// Sign used for every seeded item except the last one.
    pub const PRIMARY: Sign = Sign(NonZeroU16::MIN);

    /// Sign of the single item placed last at initialization.
    pub const SECONDARY: Sign = match NonZeroU16::new(2) {
        Some(v) => Sign(v),
        None => unreachable!(),
    };

    /// Create a sign from a raw value. Returns `None` for 0.
    #[must_use]
    pub const fn new(raw: u16) -> Option<Self> {
        match NonZeroU16::new(raw) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Get the raw sign value (never 0).
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0.get()
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sign({})", self.0)
    }
}

//! Items and the live item set.
//!
//! ## Key Types
//!
//! - `Item`: identity, sign, level and cached board position
//! - `ItemSet`: live items keyed by `ItemId`

pub mod item;
pub mod set;

pub use item::Item;
pub use set::ItemSet;

//! Drop resolution - the merge engine.
//!
//! A drop of item `D` onto target `T` resolves to exactly one of:
//!
//! 1. **Cancel**: no target cell. Nothing changes.
//! 2. **Home**: `T` is `D`'s own cell. Nothing changes.
//! 3. **Merge**: `T` holds a similar item. It is destroyed and `D` levels up.
//! 4. **Displace**: `T` holds a different item. It is relocated, `D` takes `T`.
//! 5. **Move**: `T` is empty. `D` takes `T`.
//!
//! Every lookup that can fail happens before the first write, so an error
//! leaves the grid and item set untouched.
//!
//! ## Displacement
//!
//! `D`'s origin and `T` are both cleared before searching. The search runs
//! from `T` and falls back to `D`'s origin, which is guaranteed empty, so
//! the displaced item never lands on an occupied cell. On a full board
//! this makes displacement a swap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DropError, ItemId};
use crate::grid::{CellIndex, GridModel, NearestEmptySearch};
use crate::items::ItemSet;

/// What a drop did. Rendering uses this to place item visuals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// Dropped outside every cell. Restore the item to `origin`.
    Cancelled { item: ItemId, origin: CellIndex },

    /// Dropped on its own cell. Restore the item to `origin`.
    Home { item: ItemId, origin: CellIndex },

    /// Absorbed a similar item.
    Merged {
        item: ItemId,
        absorbed: ItemId,
        from: CellIndex,
        to: CellIndex,
        level: u32,
        /// False when the level was already saturated.
        leveled_up: bool,
    },

    /// Took an occupied cell, pushing its occupant elsewhere.
    Displaced {
        item: ItemId,
        from: CellIndex,
        to: CellIndex,
        displaced: ItemId,
        displaced_to: CellIndex,
    },

    /// Moved into an empty cell.
    Moved {
        item: ItemId,
        from: CellIndex,
        to: CellIndex,
    },
}

impl DropOutcome {
    /// The dragged item.
    #[must_use]
    pub fn item(&self) -> ItemId {
        match self {
            DropOutcome::Cancelled { item, .. }
            | DropOutcome::Home { item, .. }
            | DropOutcome::Merged { item, .. }
            | DropOutcome::Displaced { item, .. }
            | DropOutcome::Moved { item, .. } => *item,
        }
    }

    /// Did the board change?
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        !matches!(self, DropOutcome::Cancelled { .. } | DropOutcome::Home { .. })
    }

    /// Cell the dragged item's visual should rest on.
    #[must_use]
    pub fn resting_cell(&self) -> CellIndex {
        match self {
            DropOutcome::Cancelled { origin, .. } | DropOutcome::Home { origin, .. } => *origin,
            DropOutcome::Merged { to, .. }
            | DropOutcome::Displaced { to, .. }
            | DropOutcome::Moved { to, .. } => *to,
        }
    }
}

/// Applies the merge/displace/reject policy.
#[derive(Clone, Copy, Debug)]
pub struct DropResolver {
    max_level: u32,
}

impl DropResolver {
    /// Create a resolver whose merges saturate at `max_level`.
    #[must_use]
    pub fn new(max_level: u32) -> Self {
        Self { max_level }
    }

    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Resolve a drop of `item` onto `target`.
    pub fn resolve(
        &self,
        grid: &mut GridModel,
        items: &mut ItemSet,
        item: ItemId,
        target: Option<CellIndex>,
    ) -> Result<DropOutcome, DropError> {
        let dragged = items.get(item).ok_or(DropError::UnknownItem(item))?;
        let origin = dragged.cell();
        let sign = dragged.sign();
        grid.get(origin)?;

        let Some(target) = target else {
            debug!(%item, %origin, "drop cancelled");
            return Ok(DropOutcome::Cancelled { item, origin });
        };

        let Some(target_sign) = grid.get(target)? else {
            grid.clear(origin)?;
            grid.set(target, sign)?;
            self.move_item(items, item, target);
            debug!(%item, from = %origin, to = %target, "moved into empty cell");
            return Ok(DropOutcome::Moved { item, from: origin, to: target });
        };

        let occupant = items.at(target).ok_or(DropError::Unclaimed(target))?.id();

        if occupant == item {
            debug!(%item, %origin, "dropped home");
            return Ok(DropOutcome::Home { item, origin });
        }

        if target_sign == sign {
            items.remove(occupant);
            grid.clear(origin)?;
            grid.set(target, sign)?;

            let (level, leveled_up) = match items.get_mut(item) {
                Some(survivor) => {
                    survivor.set_cell(target);
                    let leveled_up = survivor.level_up(self.max_level);
                    (survivor.level(), leveled_up)
                }
                None => return Err(DropError::UnknownItem(item)),
            };

            debug!(%item, absorbed = %occupant, to = %target, level, leveled_up, "merged");
            return Ok(DropOutcome::Merged {
                item,
                absorbed: occupant,
                from: origin,
                to: target,
                level,
                leveled_up,
            });
        }

        grid.clear(origin)?;
        grid.clear(target)?;
        let landing = NearestEmptySearch::new(grid).find_empty_or(target, origin)?;
        grid.set(landing, target_sign)?;
        self.move_item(items, occupant, landing);

        grid.set(target, sign)?;
        self.move_item(items, item, target);

        debug!(
            %item,
            from = %origin,
            to = %target,
            displaced = %occupant,
            displaced_to = %landing,
            "displaced occupant"
        );
        Ok(DropOutcome::Displaced {
            item,
            from: origin,
            to: target,
            displaced: occupant,
            displaced_to: landing,
        })
    }

    fn move_item(&self, items: &mut ItemSet, id: ItemId, cell: CellIndex) {
        if let Some(item) = items.get_mut(id) {
            item.set_cell(cell);
        }
    }
}

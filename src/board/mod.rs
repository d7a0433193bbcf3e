//! Board seeding, drop resolution and the owning `Board`.
//!
//! ## Control Flow
//!
//! 1. The input collaborator emits a `DropGesture` (item + point)
//! 2. `CellLocator` turns the point into a target cell, or none
//! 3. `DropResolver` applies the merge/displace/reject policy
//! 4. Rendering reads item positions and the returned `DropOutcome`

pub mod init;
pub mod resolver;
pub mod state;

pub use init::BoardInitializer;
pub use resolver::{DropOutcome, DropResolver};
pub use state::{Board, DropGesture};

//! Navigation: shortest paths through a carved maze and when to recompute them.
//!
//! # Invariants
//! - Search only crosses open walls; the grid's wall flags are never written.
//! - Marking a path clears every previous mark first.
//! - A destination that cannot be reached means the maze lost its
//!   connectivity. That is a bug elsewhere and aborts loudly.
//! - Paths are recomputed on cell-change and destination-change events only.

mod error;
mod navigator;
mod path;

pub use error::NavError;
pub use navigator::{NavStats, Navigator};
pub use path::{Path, PathFinder};

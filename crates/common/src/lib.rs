//! Shared vocabulary for every mazerun crate.
//!
//! # Invariants
//! - Coordinates are unsigned; bounds are checked against a grid's
//!   `width × depth` before any cell is touched.
//! - Every neighbour scan uses [`Direction::SCAN_ORDER`].

mod error;
mod types;

pub use error::MazeError;
pub use types::{CellCoord, Direction, MazeId};

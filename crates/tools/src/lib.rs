//! Developer tooling: maze inspector and structural invariant checks.
//!
//! # Invariants
//! - Tools only read mazes.
//! - A maze straight out of the generator validates with no violations.

pub mod inspector;
pub mod validate;

pub use inspector::{CellInfo, MazeInspector, MazeSummary};
pub use validate::{InvariantViolation, validate, validate_grid};

//! Maze Kernel: the cell grid, maze generation, and the completed maze.
//!
//! # Invariants
//! - Wall flags mirror across every shared wall. The grid's wall-removal
//!   operation is the only code path that clears a wall.
//! - A generated maze is complete on return: carving and loop injection
//!   never leave partial state observable.
//! - Outside this crate only `is_on_path` can change, through
//!   [`Maze::annotate_path`] and [`Maze::clear_path`].

pub mod cell;
pub mod config;
pub mod generator;
pub mod grid;
pub mod maze;
pub mod rng;

pub use cell::{Cell, Walls};
pub use config::{GeneratorConfig, RampReset, ShortcutConfig};
pub use generator::MazeGenerator;
pub use grid::Grid;
pub use maze::{GenerationReport, Maze};
pub use rng::{CarveRng, SeededRng};

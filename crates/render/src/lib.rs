//! Rendering adapter: everything a front end needs to draw a maze.
//!
//! # Invariants
//! - Renderers read the maze; they never mutate it.
//! - World positions map to cells with `floor(p / room + 0.5)` per axis, so a
//!   cell owns the square of side `room_size` centred on its world position.
//! - Every standing wall yields exactly one box, even when two cells share it.
//! - Minimap tiles are square: `minimap_size / depth` pixels per side.

mod ascii;
mod layout;
mod minimap;

pub use ascii::{AsciiRenderer, RenderView, Renderer};
pub use layout::{Block, CellLayout, LayoutConfig, WallBox};
pub use minimap::{Minimap, MinimapTile, TileKind};

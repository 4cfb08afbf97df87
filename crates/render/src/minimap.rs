use mazerun_common::{CellCoord, MazeError};
use mazerun_kernel::{Maze, Walls};
use serde::Serialize;

/// How a minimap tile is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileKind {
    Start,
    End,
    Path,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MinimapTile {
    pub coord: CellCoord,
    pub kind: TileKind,
    pub walls: Walls,
}

/// Top-down overview of the maze, drawn in the corner of the screen.
///
/// Pixel coordinates are local to the minimap: origin at its top-left
/// corner, `y` growing downwards like grid rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimap {
    size: f32,
    width: usize,
    depth: usize,
}

impl Minimap {
    /// `size` is the pixel height; the width follows the maze aspect ratio.
    pub fn new(size: u32, width: usize, depth: usize) -> Self {
        Self {
            size: size as f32,
            width,
            depth,
        }
    }

    pub fn for_maze(size: u32, maze: &Maze) -> Self {
        Self::new(size, maze.width(), maze.depth())
    }

    pub fn pixel_width(&self) -> f32 {
        self.size * self.width as f32 / self.depth as f32
    }

    pub fn pixel_height(&self) -> f32 {
        self.size
    }

    /// Side length of one square tile in pixels.
    pub fn tile_size(&self) -> f32 {
        self.size / self.depth as f32
    }

    /// Cell under a click at local pixel `(px, py)`.
    pub fn tile_at(&self, px: f32, py: f32) -> Result<CellCoord, MazeError> {
        let tile = self.tile_size();
        let coord = CellCoord::checked(
            pixel_cell(px, tile),
            pixel_cell(py, tile),
            self.width,
            self.depth,
        );
        if let Err(err) = &coord {
            tracing::debug!(px, py, %err, "minimap click missed the grid");
        }
        coord
    }

    /// Pixel centre of a tile, where the player marker is drawn.
    pub fn tile_center(&self, coord: CellCoord) -> (f32, f32) {
        let tile = self.tile_size();
        (
            (coord.x as f32 + 0.5) * tile,
            (coord.y as f32 + 0.5) * tile,
        )
    }

    /// One tile per cell, row by row.
    pub fn frame(&self, maze: &Maze) -> Vec<MinimapTile> {
        let grid = maze.grid();
        let mut tiles = Vec::with_capacity(grid.cell_count());
        for y in 0..grid.depth() {
            for x in 0..grid.width() {
                let cell = &grid[CellCoord::new(x, y)];
                let kind = if cell.is_start() {
                    TileKind::Start
                } else if cell.is_end() {
                    TileKind::End
                } else if cell.is_on_path() {
                    TileKind::Path
                } else {
                    TileKind::Floor
                };
                tiles.push(MinimapTile {
                    coord: cell.coord(),
                    kind,
                    walls: cell.walls(),
                });
            }
        }
        tiles
    }
}

fn pixel_cell(value: f32, tile: f32) -> i64 {
    let cell = (value / tile).floor();
    if cell.is_finite() {
        cell as i64
    } else {
        i64::MIN
    }
}

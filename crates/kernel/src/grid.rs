use std::collections::VecDeque;
use std::ops::Index;

use mazerun_common::{CellCoord, Direction, MazeError};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// The `width × depth` cell grid, indexed `tiles[x][y]`.
///
/// Dimensions are fixed at construction. A resized maze is a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    depth: usize,
    tiles: Vec<Vec<Cell>>,
}

impl Grid {
    /// Allocate a grid with every cell walled in on all four sides.
    pub fn new(width: usize, depth: usize) -> Result<Self, MazeError> {
        if width == 0 || depth == 0 {
            return Err(MazeError::InvalidDimensions { width, depth });
        }
        let tiles = (0..width)
            .map(|x| {
                (0..depth)
                    .map(|y| Cell::walled(CellCoord::new(x, y)))
                    .collect()
            })
            .collect();
        Ok(Self {
            width,
            depth,
            tiles,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.depth
    }

    /// Column-major view: `tiles()[x][y]`.
    pub fn tiles(&self) -> &[Vec<Cell>] {
        &self.tiles
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.tiles.get(coord.x).and_then(|col| col.get(coord.y))
    }

    pub(crate) fn cell_mut(&mut self, coord: CellCoord) -> &mut Cell {
        &mut self.tiles[coord.x][coord.y]
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.within(self.width, self.depth)
    }

    /// Reject coordinates outside the grid before they reach a cell.
    pub fn ensure(&self, coord: CellCoord) -> Result<CellCoord, MazeError> {
        CellCoord::checked(coord.x as i64, coord.y as i64, self.width, self.depth)
    }

    /// Validate signed coordinates, e.g. from a world-space conversion.
    pub fn check(&self, x: i64, y: i64) -> Result<CellCoord, MazeError> {
        CellCoord::checked(x, y, self.width, self.depth)
    }

    /// All cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.tiles.iter().flatten()
    }

    fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.tiles.iter_mut().flatten()
    }

    /// Grid-adjacent cells in scan order, ignoring walls.
    pub fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = (Direction, CellCoord)> {
        let (width, depth) = (self.width, self.depth);
        Direction::SCAN_ORDER
            .into_iter()
            .filter_map(move |dir| coord.step(dir, width, depth).map(|n| (dir, n)))
    }

    /// Neighbours reachable through an open wall, in scan order.
    pub fn passages(&self, coord: CellCoord) -> impl Iterator<Item = (Direction, CellCoord)> + '_ {
        self.neighbors(coord)
            .filter(move |(dir, _)| self.is_open(coord, *dir))
    }

    /// Whether the wall on `dir` side of `coord` has been removed.
    pub fn is_open(&self, coord: CellCoord, dir: Direction) -> bool {
        self.cell(coord).is_some_and(|c| !c.walls.has(dir))
    }

    /// Remove the wall between `coord` and its neighbour in `dir`.
    ///
    /// Clears both sides of the shared wall. Returns the neighbour, or `None`
    /// when `dir` points off the grid (nothing is changed then).
    pub(crate) fn remove_wall(&mut self, coord: CellCoord, dir: Direction) -> Option<CellCoord> {
        let neighbor = coord.step(dir, self.width, self.depth)?;
        self.cell_mut(coord).walls.open(dir);
        self.cell_mut(neighbor).walls.open(dir.opposite());
        Some(neighbor)
    }

    /// Number of removed walls, each shared wall counted once.
    pub fn open_wall_count(&self) -> usize {
        self.cells()
            .map(|c| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|dir| {
                        c.coord.step(*dir, self.width, self.depth).is_some()
                            && !c.walls.has(*dir)
                    })
                    .count()
            })
            .sum()
    }

    /// Carving-independent reachability: cells reachable from `from`
    /// through open walls, in BFS order.
    pub fn reachable_from(&self, from: CellCoord) -> Vec<CellCoord> {
        let mut seen = vec![vec![false; self.depth]; self.width];
        let mut order = Vec::with_capacity(self.cell_count());
        if !self.contains(from) {
            return order;
        }
        let mut queue = VecDeque::from([from]);
        seen[from.x][from.y] = true;
        while let Some(current) = queue.pop_front() {
            order.push(current);
            for (_, next) in self.passages(current) {
                if !seen[next.x][next.y] {
                    seen[next.x][next.y] = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    pub(crate) fn clear_path(&mut self) {
        for cell in self.cells_mut() {
            cell.is_on_path = false;
        }
    }

    pub(crate) fn set_on_path(&mut self, coord: CellCoord) {
        self.cell_mut(coord).is_on_path = true;
    }

    /// Coordinates currently marked as on the path, column by column.
    pub fn path_cells(&self) -> Vec<CellCoord> {
        self.cells()
            .filter(|c| c.is_on_path)
            .map(|c| c.coord)
            .collect()
    }
}

impl Index<CellCoord> for Grid {
    type Output = Cell;

    fn index(&self, coord: CellCoord) -> &Cell {
        &self.tiles[coord.x][coord.y]
    }
}

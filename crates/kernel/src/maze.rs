use mazerun_common::{CellCoord, Direction, MazeError, MazeId};
use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// Counters gathered while a maze was generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Walls removed while carving the spanning tree.
    pub carved_walls: usize,
    /// Walls removed by loop injection.
    pub shortcuts: usize,
    pub max_hall_id: u32,
    /// Carving depth of the end cell.
    pub farthest_distance: u32,
}

/// A completed maze: the grid plus its designated start and end cells.
///
/// Only produced by [`crate::MazeGenerator::generate`] or
/// [`Maze::from_layout`], so every `Maze` is fully carved and connected.
#[derive(Debug, Clone, Serialize)]
pub struct Maze {
    id: MazeId,
    grid: Grid,
    start: CellCoord,
    end: CellCoord,
    seed: Option<u64>,
    report: GenerationReport,
}

impl Maze {
    pub(crate) fn assemble(
        grid: Grid,
        start: CellCoord,
        end: CellCoord,
        seed: Option<u64>,
        report: GenerationReport,
    ) -> Self {
        Self {
            id: MazeId::new(),
            grid,
            start,
            end,
            seed,
            report,
        }
    }

    /// Build a maze from a hand-authored set of passages.
    ///
    /// Each passage opens the wall on `dir` side of a cell. The start is
    /// `(0, 0)`. Fails if a passage leaves the grid, `end` is outside it, or
    /// any cell is left unreachable.
    pub fn from_layout(
        width: usize,
        depth: usize,
        passages: &[(CellCoord, Direction)],
        end: CellCoord,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, depth)?;
        let end = grid.ensure(end)?;
        for &(coord, dir) in passages {
            let coord = grid.ensure(coord)?;
            if grid.remove_wall(coord, dir).is_none() {
                let (dx, dy) = dir.delta();
                return Err(MazeError::OutOfBounds {
                    x: coord.x as i64 + dx,
                    y: coord.y as i64 + dy,
                    width,
                    depth,
                });
            }
        }

        let start = CellCoord::new(0, 0);
        let order = grid.reachable_from(start);
        if order.len() != grid.cell_count() {
            return Err(MazeError::Disconnected {
                unreachable: grid.cell_count() - order.len(),
                total: grid.cell_count(),
            });
        }

        // BFS order visits parents before children, so one pass settles depth.
        for &coord in &order {
            let depth_here = grid[coord].distance_to_start;
            let children: Vec<CellCoord> = grid
                .passages(coord)
                .map(|(_, n)| n)
                .filter(|n| *n != start && !grid[*n].visited)
                .collect();
            for child in children {
                let cell = grid.cell_mut(child);
                cell.visited = true;
                cell.distance_to_start = depth_here + 1;
            }
            grid.cell_mut(coord).visited = true;
        }
        grid.cell_mut(start).is_start = true;
        grid.cell_mut(end).is_end = true;

        let report = GenerationReport {
            carved_walls: grid.open_wall_count(),
            shortcuts: 0,
            max_hall_id: 0,
            farthest_distance: grid[end].distance_to_start,
        };
        Ok(Self::assemble(grid, start, end, None, report))
    }

    pub(crate) fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
    }

    /// Unique per generated maze, even for equal seeds.
    pub fn id(&self) -> MazeId {
        self.id
    }

    /// Read-only view of the carved cells.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cells along x.
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    /// Cells along y.
    pub fn depth(&self) -> usize {
        self.grid.depth()
    }

    /// Spawn cell.
    pub fn start(&self) -> CellCoord {
        self.start
    }

    /// Goal cell: the farthest cell reached while carving.
    pub fn end(&self) -> CellCoord {
        self.end
    }

    /// Seed of the RNG that carved this maze, when it was seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Counters gathered while carving.
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Replace the path annotation with `cells`.
    ///
    /// Every coordinate is validated before any flag changes, and the
    /// previous path is cleared first so no stale cell stays marked.
    pub fn annotate_path(&mut self, cells: &[CellCoord]) -> Result<(), MazeError> {
        for &coord in cells {
            self.grid.ensure(coord)?;
        }
        self.grid.clear_path();
        for &coord in cells {
            self.grid.set_on_path(coord);
        }
        Ok(())
    }

    pub fn clear_path(&mut self) {
        self.grid.clear_path();
    }
}

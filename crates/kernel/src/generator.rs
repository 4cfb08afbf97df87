use mazerun_common::{CellCoord, Direction, MazeError};

use crate::config::{GeneratorConfig, RampReset, ShortcutConfig};
use crate::grid::Grid;
use crate::maze::{GenerationReport, Maze};
use crate::rng::{CarveRng, SeededRng};

/// Carves a maze into a freshly walled grid.
///
/// `generate` consumes the generator: a grid is carved exactly once, and the
/// caller only ever sees the completed [`Maze`].
#[derive(Debug)]
pub struct MazeGenerator {
    grid: Grid,
    config: GeneratorConfig,
    stack: Vec<CellCoord>,
    start: CellCoord,
}

/// Result of the spanning-tree pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CarveOutcome {
    carved_walls: usize,
    farthest: CellCoord,
    farthest_distance: u32,
    max_hall_id: u32,
}

impl MazeGenerator {
    /// Allocate the walled grid and seed the carving stack with `(0, 0)`.
    pub fn new(width: usize, depth: usize, config: GeneratorConfig) -> Result<Self, MazeError> {
        let mut grid = Grid::new(width, depth)?;
        let start = CellCoord::new(0, 0);
        let origin = grid.cell_mut(start);
        origin.visited = true;
        origin.distance_to_start = 0;
        origin.hall_id = 0;
        origin.is_start = true;
        Ok(Self {
            grid,
            config,
            stack: vec![start],
            start,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Carve with a seeded RNG and record the seed on the maze.
    pub fn generate_seeded(self, seed: u64) -> Maze {
        let mut rng = SeededRng::new(seed);
        let mut maze = self.generate(&mut rng);
        maze.set_seed(seed);
        maze
    }

    /// Carve the spanning tree, pick the end cell, then inject loops.
    pub fn generate<R: CarveRng + ?Sized>(mut self, rng: &mut R) -> Maze {
        let _span = tracing::info_span!(
            "generate_maze",
            width = self.grid.width(),
            depth = self.grid.depth()
        )
        .entered();

        let outcome = self.carve(rng);
        self.grid.cell_mut(outcome.farthest).is_end = true;
        tracing::debug!(
            carved = outcome.carved_walls,
            end = %outcome.farthest,
            distance = outcome.farthest_distance,
            max_hall_id = outcome.max_hall_id,
            "spanning tree carved"
        );

        let shortcuts = if self.config.shortcuts.enabled {
            inject_loops(
                &mut self.grid,
                &self.config.shortcuts,
                outcome.max_hall_id,
                rng,
            )
        } else {
            0
        };
        tracing::debug!(shortcuts, "loop injection complete");

        let report = GenerationReport {
            carved_walls: outcome.carved_walls,
            shortcuts,
            max_hall_id: outcome.max_hall_id,
            farthest_distance: outcome.farthest_distance,
        };
        Maze::assemble(self.grid, self.start, outcome.farthest, None, report)
    }

    fn unvisited_neighbors(&self, coord: CellCoord) -> Vec<(Direction, CellCoord)> {
        self.grid
            .neighbors(coord)
            .filter(|(_, n)| !self.grid[*n].visited)
            .collect()
    }

    fn carve<R: CarveRng + ?Sized>(&mut self, rng: &mut R) -> CarveOutcome {
        let mut hall_counter: u32 = 0;
        let mut carved_walls = 0;
        let mut farthest = self.start;
        let mut farthest_distance = 0;
        let mut max_hall_id = 0;

        while let Some(current) = self.stack.pop() {
            let unvisited = self.unvisited_neighbors(current);
            if unvisited.is_empty() {
                // Retired without being pushed again: the run ends here.
                hall_counter += 1;
                continue;
            }

            let (dir, next) = unvisited[rng.pick(unvisited.len())];
            self.grid.remove_wall(current, dir);
            carved_walls += 1;

            let distance = self.grid[current].distance_to_start + 1;
            let cell = self.grid.cell_mut(next);
            cell.visited = true;
            cell.distance_to_start = distance;
            cell.hall_id = hall_counter;
            max_hall_id = max_hall_id.max(hall_counter);

            // Strictly greater: the first cell to reach a depth keeps it.
            if distance > farthest_distance {
                farthest = next;
                farthest_distance = distance;
            }

            let more_left = unvisited.len() > 1;
            if rng.chance(self.config.branch_probability) {
                self.stack.push(next);
                if more_left {
                    self.stack.push(current);
                }
            } else {
                if more_left {
                    self.stack.push(current);
                }
                self.stack.push(next);
            }
        }

        CarveOutcome {
            carved_walls,
            farthest,
            farthest_distance,
            max_hall_id,
        }
    }
}

/// Open extra walls between cells whose hall ids are moderately far apart.
///
/// Each unordered adjacent pair is considered once, columns outer and rows
/// inner, south neighbour before east neighbour. Returns the number of walls
/// opened.
pub(crate) fn inject_loops<R: CarveRng + ?Sized>(
    grid: &mut Grid,
    config: &ShortcutConfig,
    max_hall_id: u32,
    rng: &mut R,
) -> usize {
    let mut opened = 0;
    let mut streak: u32 = 0;

    for x in 0..grid.width() {
        if config.ramp_reset == RampReset::EachColumn {
            streak = 0;
        }
        for y in 0..grid.depth() {
            let tile = CellCoord::new(x, y);
            for dir in [Direction::South, Direction::East] {
                let Some(neighbor) = tile.step(dir, grid.width(), grid.depth()) else {
                    continue;
                };
                let (a, b) = (&grid[tile], &grid[neighbor]);
                if !a.has_wall(dir) || a.has_shortcut || b.has_shortcut {
                    continue;
                }
                if !config.hall_gap_qualifies(a.hall_id, b.hall_id, max_hall_id) {
                    continue;
                }

                let probability =
                    config.base_probability + config.probability_step * f64::from(streak);
                if !rng.chance(probability) {
                    continue;
                }

                grid.remove_wall(tile, dir);
                grid.cell_mut(tile).has_shortcut = true;
                grid.cell_mut(neighbor).has_shortcut = true;
                opened += 1;
                streak += 1;
                tracing::trace!(%tile, %neighbor, probability, "shortcut opened");

                if let RampReset::AboveCap { cap } = config.ramp_reset {
                    let next =
                        config.base_probability + config.probability_step * f64::from(streak);
                    if next > cap + 1e-9 {
                        streak = 0;
                    }
                }
            }
        }
    }
    opened
}

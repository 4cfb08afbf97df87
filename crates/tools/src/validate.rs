use std::collections::{HashSet, VecDeque};

use mazerun_common::{CellCoord, Direction};
use mazerun_kernel::{Grid, Maze};
use serde::Serialize;

/// One broken structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum InvariantViolation {
    /// Some cells cannot be reached from the start.
    Unreachable { count: usize },
    /// Two neighbours disagree about the wall between them.
    WallMismatch { cell: CellCoord, side: Direction },
    /// A wall on the outer border is open.
    OpenBorder { cell: CellCoord, side: Direction },
    StartCount(usize),
    EndCount(usize),
    /// The maze's recorded start or end disagrees with the cell flags.
    EndpointMismatch { recorded: CellCoord },
    /// Cells marked as on the path do not form one connected route.
    BrokenPath { components: usize },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreachable { count } => write!(f, "{count} cells unreachable from start"),
            Self::WallMismatch { cell, side } => {
                write!(f, "wall {side:?} of {cell} not mirrored by its neighbour")
            }
            Self::OpenBorder { cell, side } => write!(f, "border wall {side:?} of {cell} is open"),
            Self::StartCount(n) => write!(f, "expected one start cell, found {n}"),
            Self::EndCount(n) => write!(f, "expected one end cell, found {n}"),
            Self::EndpointMismatch { recorded } => {
                write!(f, "recorded endpoint {recorded} is not flagged")
            }
            Self::BrokenPath { components } => {
                write!(f, "path marks split into {components} pieces")
            }
        }
    }
}

/// Check a maze's grid plus its recorded start and end.
pub fn validate(maze: &Maze) -> Vec<InvariantViolation> {
    let grid = maze.grid();
    let mut violations = validate_grid(grid);
    if !grid[maze.start()].is_start() {
        violations.push(InvariantViolation::EndpointMismatch {
            recorded: maze.start(),
        });
    }
    if !grid[maze.end()].is_end() {
        violations.push(InvariantViolation::EndpointMismatch {
            recorded: maze.end(),
        });
    }
    violations
}

/// Structural checks that need only the grid.
pub fn validate_grid(grid: &Grid) -> Vec<InvariantViolation> {
    let _span = tracing::debug_span!("validate_grid", width = grid.width(), depth = grid.depth())
        .entered();
    let mut violations = Vec::new();

    for cell in grid.cells() {
        let coord = cell.coord();
        for side in Direction::SCAN_ORDER {
            match coord.step(side, grid.width(), grid.depth()) {
                // Report each shared wall from one side only.
                Some(next) if matches!(side, Direction::South | Direction::East) => {
                    if cell.has_wall(side) != grid[next].has_wall(side.opposite()) {
                        violations.push(InvariantViolation::WallMismatch { cell: coord, side });
                    }
                }
                Some(_) => {}
                None => {
                    if !cell.has_wall(side) {
                        violations.push(InvariantViolation::OpenBorder { cell: coord, side });
                    }
                }
            }
        }
    }

    let starts: Vec<CellCoord> = grid.cells().filter(|c| c.is_start()).map(|c| c.coord()).collect();
    let ends = grid.cells().filter(|c| c.is_end()).count();
    if starts.len() != 1 {
        violations.push(InvariantViolation::StartCount(starts.len()));
    }
    if ends != 1 {
        violations.push(InvariantViolation::EndCount(ends));
    }

    let from = starts.first().copied().unwrap_or_default();
    let reached = grid.reachable_from(from).len();
    if reached != grid.cell_count() {
        violations.push(InvariantViolation::Unreachable {
            count: grid.cell_count() - reached,
        });
    }

    let components = path_components(grid);
    if components > 1 {
        violations.push(InvariantViolation::BrokenPath { components });
    }

    for violation in &violations {
        tracing::debug!(%violation, "invariant violated");
    }
    violations
}

fn path_components(grid: &Grid) -> usize {
    let marked: HashSet<CellCoord> = grid.path_cells().into_iter().collect();
    let mut seen = HashSet::new();
    let mut components = 0;
    for &origin in &marked {
        if !seen.insert(origin) {
            continue;
        }
        components += 1;
        let mut queue = VecDeque::from([origin]);
        while let Some(current) = queue.pop_front() {
            for (_, next) in grid.passages(current) {
                if marked.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    components
}

use mazerun_common::{CellCoord, MazeId};
use mazerun_kernel::{Maze, Walls};
use serde::Serialize;

/// Maze inspector for developer tooling.
///
/// Read-only queries against a maze for debugging and the CLI.
pub struct MazeInspector;

impl MazeInspector {
    pub fn summary(maze: &Maze) -> MazeSummary {
        let grid = maze.grid();
        let report = maze.report();
        MazeSummary {
            id: maze.id(),
            width: maze.width(),
            depth: maze.depth(),
            seed: maze.seed(),
            start: maze.start(),
            end: maze.end(),
            open_walls: grid.open_wall_count(),
            shortcuts: report.shortcuts,
            max_hall_id: report.max_hall_id,
            farthest_distance: report.farthest_distance,
            dead_ends: grid.cells().filter(|c| c.is_dead_end()).count(),
            path_cells: grid.path_cells().len(),
        }
    }

    pub fn inspect_cell(maze: &Maze, coord: CellCoord) -> Option<CellInfo> {
        maze.grid().cell(coord).map(|cell| CellInfo {
            coord,
            walls: cell.walls(),
            hall_id: cell.hall_id(),
            distance_to_start: cell.distance_to_start(),
            has_shortcut: cell.has_shortcut(),
            is_on_path: cell.is_on_path(),
        })
    }

    /// Count of cells per hall id, indexed by id.
    pub fn hall_sizes(maze: &Maze) -> Vec<usize> {
        let mut sizes = vec![0; maze.report().max_hall_id as usize + 1];
        for cell in maze.grid().cells() {
            if let Some(slot) = sizes.get_mut(cell.hall_id() as usize) {
                *slot += 1;
            }
        }
        sizes
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MazeSummary {
    pub id: MazeId,
    pub width: usize,
    pub depth: usize,
    pub seed: Option<u64>,
    pub start: CellCoord,
    pub end: CellCoord,
    pub open_walls: usize,
    pub shortcuts: usize,
    pub max_hall_id: u32,
    pub farthest_distance: u32,
    pub dead_ends: usize,
    pub path_cells: usize,
}

impl std::fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seed = self
            .seed
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        write!(
            f,
            "Maze {}x{} seed={} start={} end={} open_walls={} shortcuts={} halls={} farthest={} dead_ends={} path_cells={}",
            self.width,
            self.depth,
            seed,
            self.start,
            self.end,
            self.open_walls,
            self.shortcuts,
            self.max_hall_id + 1,
            self.farthest_distance,
            self.dead_ends,
            self.path_cells,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CellInfo {
    pub coord: CellCoord,
    pub walls: Walls,
    pub hall_id: u32,
    pub distance_to_start: u32,
    pub has_shortcut: bool,
    pub is_on_path: bool,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.walls;
        let sides: String = [(w.north, 'N'), (w.east, 'E'), (w.south, 'S'), (w.west, 'W')]
            .into_iter()
            .map(|(standing, c)| if standing { c } else { '.' })
            .collect();
        write!(
            f,
            "Cell {} walls={} hall={} distance={} shortcut={} on_path={}",
            self.coord,
            sides,
            self.hall_id,
            self.distance_to_start,
            self.has_shortcut,
            self.is_on_path
        )
    }
}

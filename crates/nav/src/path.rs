use std::collections::VecDeque;

use mazerun_common::{CellCoord, Direction};
use mazerun_kernel::{Grid, Maze};

use crate::NavError;

/// Cells from source to destination, both included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<CellCoord>,
}

impl Path {
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell-to-cell moves needed to follow the path.
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    pub fn destination(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        self.cells.contains(&coord)
    }

    /// The direction of the first move, if any move is needed.
    pub fn first_direction(&self) -> Option<Direction> {
        match self.cells.as_slice() {
            [from, to, ..] => from.direction_to(*to),
            _ => None,
        }
    }
}

/// Breadth-first shortest path search over a carved grid.
pub struct PathFinder;

impl PathFinder {
    /// Minimum-hop path from `from` to `to` through open walls.
    ///
    /// Ties between equally short paths resolve by neighbour scan order.
    ///
    /// # Panics
    /// If `to` cannot be reached. Generated mazes are connected, so this only
    /// happens when the grid's connectivity invariant was broken elsewhere.
    pub fn shortest_path(grid: &Grid, from: CellCoord, to: CellCoord) -> Result<Path, NavError> {
        let from = grid.ensure(from)?;
        let to = grid.ensure(to)?;
        let _span = tracing::debug_span!("shortest_path", %from, %to).entered();

        match search(grid, from, to) {
            Some(path) => {
                tracing::trace!(hops = path.hops(), "path found");
                Ok(path)
            }
            None => {
                tracing::error!(%from, %to, "destination unreachable through carved passages");
                panic!("maze connectivity invariant violated: {to} is unreachable from {from}");
            }
        }
    }

    /// Clear the previous path marks, then compute and mark a new path.
    pub fn mark(maze: &mut Maze, from: CellCoord, to: CellCoord) -> Result<Path, NavError> {
        let path = Self::shortest_path(maze.grid(), from, to)?;
        maze.annotate_path(path.cells())?;
        Ok(path)
    }

    /// [`PathFinder::mark`] towards the maze's end cell.
    pub fn mark_to_end(maze: &mut Maze, from: CellCoord) -> Result<Path, NavError> {
        let end = maze.end();
        Self::mark(maze, from, end)
    }
}

fn search(grid: &Grid, from: CellCoord, to: CellCoord) -> Option<Path> {
    let mut visited = vec![vec![false; grid.depth()]; grid.width()];
    let mut parent: Vec<Vec<Option<CellCoord>>> = vec![vec![None; grid.depth()]; grid.width()];
    let mut queue = VecDeque::from([from]);
    visited[from.x][from.y] = true;

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut cells = vec![current];
            let mut cursor = current;
            while let Some(prev) = parent[cursor.x][cursor.y] {
                cells.push(prev);
                cursor = prev;
            }
            cells.reverse();
            return Some(Path { cells });
        }
        for (_, next) in grid.passages(current) {
            if !visited[next.x][next.y] {
                visited[next.x][next.y] = true;
                parent[next.x][next.y] = Some(current);
                queue.push_back(next);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_common::MazeError;
    use mazerun_kernel::{GeneratorConfig, MazeGenerator};

    fn c(x: usize, y: usize) -> CellCoord {
        CellCoord::new(x, y)
    }

    /// 3x3 ring around the centre, with the centre hanging off (1,0):
    ///
    /// ```text
    /// +--+--+--+
    /// |S       |
    /// +  +  +  +
    /// |  |  |  |
    /// +  +--+  +
    /// |       E|
    /// +--+--+--+
    /// ```
    fn ring() -> Maze {
        Maze::from_layout(
            3,
            3,
            &[
                (c(0, 0), Direction::East),
                (c(1, 0), Direction::East),
                (c(0, 0), Direction::South),
                (c(0, 1), Direction::South),
                (c(0, 2), Direction::East),
                (c(1, 2), Direction::East),
                (c(2, 0), Direction::South),
                (c(2, 1), Direction::South),
                (c(1, 0), Direction::South),
            ],
            c(2, 2),
        )
        .unwrap()
    }

    #[test]
    fn shortest_path_on_known_layout() {
        let maze = ring();
        let path = PathFinder::shortest_path(maze.grid(), c(0, 0), c(2, 2)).unwrap();
        // Both ways round the ring take four hops.
        assert_eq!(path.hops(), 4);
        assert_eq!(path.source(), Some(c(0, 0)));
        assert_eq!(path.destination(), Some(c(2, 2)));
        // North-south-west-east scan order prefers going south first.
        assert_eq!(path.cells(), &[c(0, 0), c(0, 1), c(0, 2), c(1, 2), c(2, 2)]);
        assert_eq!(path.first_direction(), Some(Direction::South));
    }

    #[test]
    fn dead_end_branch_is_reached() {
        let maze = ring();
        let path = PathFinder::shortest_path(maze.grid(), c(1, 1), c(2, 2)).unwrap();
        assert_eq!(path.cells(), &[c(1, 1), c(1, 0), c(2, 0), c(2, 1), c(2, 2)]);
    }

    #[test]
    fn path_never_crosses_walls() {
        for seed in 0..20 {
            let maze = MazeGenerator::new(12, 9, GeneratorConfig::default())
                .unwrap()
                .generate_seeded(seed);
            let path = PathFinder::shortest_path(maze.grid(), maze.start(), maze.end()).unwrap();
            for pair in path.cells().windows(2) {
                let dir = pair[0].direction_to(pair[1]).expect("adjacent cells");
                assert!(maze.grid().is_open(pair[0], dir));
            }
        }
    }

    #[test]
    fn tree_path_length_matches_carving_depth() {
        // In a loop-free maze the unique path from the start is as long as
        // the end cell's carving depth.
        for seed in 0..20 {
            let maze = MazeGenerator::new(10, 10, GeneratorConfig::without_shortcuts())
                .unwrap()
                .generate_seeded(seed);
            let path = PathFinder::shortest_path(maze.grid(), maze.start(), maze.end()).unwrap();
            assert_eq!(
                path.hops() as u32,
                maze.grid()[maze.end()].distance_to_start()
            );
        }
    }

    #[test]
    fn mark_sets_every_cell_on_path() {
        let mut maze = ring();
        let path = PathFinder::mark_to_end(&mut maze, c(0, 0)).unwrap();
        let mut marked = maze.grid().path_cells();
        marked.sort();
        let mut expected = path.cells().to_vec();
        expected.sort();
        assert_eq!(marked, expected);
    }

    #[test]
    fn moving_the_source_clears_stale_marks() {
        let mut maze = ring();
        PathFinder::mark_to_end(&mut maze, c(0, 0)).unwrap();
        assert!(maze.grid()[c(0, 0)].is_on_path());

        let path = PathFinder::mark_to_end(&mut maze, c(0, 1)).unwrap();
        assert_eq!(path.hops(), 3);
        assert!(!maze.grid()[c(0, 0)].is_on_path());
        assert_eq!(maze.grid().path_cells().len(), path.len());
    }

    #[test]
    fn single_cell_path() {
        let mut maze = MazeGenerator::new(1, 1, GeneratorConfig::default())
            .unwrap()
            .generate_seeded(3);
        let path = PathFinder::mark_to_end(&mut maze, c(0, 0)).unwrap();
        assert_eq!(path.cells(), &[c(0, 0)]);
        assert_eq!(path.hops(), 0);
        assert_eq!(path.first_direction(), None);
        assert!(maze.grid()[c(0, 0)].is_on_path());
    }

    #[test]
    fn out_of_bounds_rejected_before_search() {
        let mut maze = ring();
        let err = PathFinder::mark(&mut maze, c(3, 0), c(2, 2)).unwrap_err();
        assert!(matches!(
            err,
            NavError::Maze(MazeError::OutOfBounds { x: 3, y: 0, .. })
        ));
        let err = PathFinder::mark(&mut maze, c(0, 0), c(0, 9)).unwrap_err();
        assert!(matches!(err, NavError::Maze(MazeError::OutOfBounds { .. })));
        assert!(maze.grid().path_cells().is_empty());
    }

    #[test]
    #[should_panic(expected = "connectivity invariant")]
    fn unreachable_destination_is_fatal() {
        let grid = Grid::new(2, 1).unwrap();
        let _ = PathFinder::shortest_path(&grid, c(0, 0), c(1, 0));
    }
}

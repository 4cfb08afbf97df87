use mazerun_common::{CellCoord, MazeId};
use mazerun_kernel::Maze;

use crate::{NavError, Path, PathFinder};

/// How often the navigator searched versus skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavStats {
    pub recomputes: u64,
    /// Events that did not change the player cell or destination.
    pub skipped: u64,
    pub last_hops: Option<usize>,
}

/// Keeps the marked path current as the player moves.
///
/// The path is recomputed only when the player enters a different cell or
/// the destination changes, never per frame.
#[derive(Debug, Clone)]
pub struct Navigator {
    maze_id: MazeId,
    player: Option<CellCoord>,
    destination: CellCoord,
    path: Option<Path>,
    stats: NavStats,
}

impl Navigator {
    /// Bind to `maze`, aiming for its end cell.
    pub fn new(maze: &Maze) -> Self {
        Self {
            maze_id: maze.id(),
            player: None,
            destination: maze.end(),
            path: None,
            stats: NavStats::default(),
        }
    }

    /// Maze the navigator is bound to.
    pub fn maze_id(&self) -> MazeId {
        self.maze_id
    }

    /// Last cell the player was seen in.
    pub fn player(&self) -> Option<CellCoord> {
        self.player
    }

    /// Cell the path leads to.
    pub fn destination(&self) -> CellCoord {
        self.destination
    }

    /// Most recently computed path.
    pub fn last_path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Recompute counters over the navigator's lifetime.
    pub fn stats(&self) -> NavStats {
        self.stats
    }

    /// The player is now in `cell`. Returns the new path when one was computed.
    pub fn player_entered(
        &mut self,
        maze: &mut Maze,
        cell: CellCoord,
    ) -> Result<Option<&Path>, NavError> {
        self.check_bound(maze)?;
        let cell = maze.grid().ensure(cell)?;
        if self.player == Some(cell) {
            self.stats.skipped += 1;
            return Ok(None);
        }
        tracing::debug!(%cell, "player entered cell");
        self.player = Some(cell);
        self.recompute(maze, cell).map(Some)
    }

    /// Aim for `cell` instead. The path is recomputed if the player's cell is known.
    pub fn set_destination(
        &mut self,
        maze: &mut Maze,
        cell: CellCoord,
    ) -> Result<Option<&Path>, NavError> {
        self.check_bound(maze)?;
        let cell = maze.grid().ensure(cell)?;
        if self.destination == cell && self.path.is_some() {
            self.stats.skipped += 1;
            return Ok(None);
        }
        tracing::debug!(destination = %cell, "destination changed");
        self.destination = cell;
        match self.player {
            Some(player) => self.recompute(maze, player).map(Some),
            None => Ok(None),
        }
    }

    /// Forget all state and follow a freshly generated maze.
    pub fn rebind(&mut self, maze: &Maze) {
        tracing::debug!(old = ?self.maze_id, new = ?maze.id(), "navigator rebound");
        self.maze_id = maze.id();
        self.player = None;
        self.destination = maze.end();
        self.path = None;
    }

    fn check_bound(&self, maze: &Maze) -> Result<(), NavError> {
        if maze.id() == self.maze_id {
            Ok(())
        } else {
            Err(NavError::WrongMaze {
                bound: self.maze_id,
                given: maze.id(),
            })
        }
    }

    fn recompute(&mut self, maze: &mut Maze, from: CellCoord) -> Result<&Path, NavError> {
        let path = PathFinder::mark(maze, from, self.destination)?;
        self.stats.recomputes += 1;
        self.stats.last_hops = Some(path.hops());
        tracing::debug!(%from, to = %self.destination, hops = path.hops(), "path recomputed");
        Ok(self.path.insert(path))
    }
}

use mazerun_common::{MazeError, MazeId};

/// Errors from navigation requests.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NavError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("navigator is bound to maze {bound:?}, not {given:?}")]
    WrongMaze { bound: MazeId, given: MazeId },
}

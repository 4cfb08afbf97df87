use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MazeError;

/// Unique identity of one generated maze.
///
/// A regenerated maze always gets a fresh id, so consumers holding on to an
/// old id can tell that the grid under them was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MazeId(pub Uuid);

impl MazeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MazeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A cell position inside a `width × depth` grid.
///
/// `x` grows to the east, `y` grows to the south.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Validate signed coordinates against grid dimensions.
    pub fn checked(x: i64, y: i64, width: usize, depth: usize) -> Result<Self, MazeError> {
        let inside = x >= 0 && y >= 0 && (x as u64) < width as u64 && (y as u64) < depth as u64;
        if inside {
            Ok(Self::new(x as usize, y as usize))
        } else {
            Err(MazeError::OutOfBounds { x, y, width, depth })
        }
    }

    /// Whether this coordinate lies inside a `width × depth` grid.
    pub fn within(self, width: usize, depth: usize) -> bool {
        self.x < width && self.y < depth
    }

    /// The adjacent coordinate in `dir`, if it stays inside the grid.
    pub fn step(self, dir: Direction, width: usize, depth: usize) -> Option<Self> {
        let next = match dir {
            Direction::North => Self::new(self.x, self.y.checked_sub(1)?),
            Direction::South => Self::new(self.x, self.y + 1),
            Direction::West => Self::new(self.x.checked_sub(1)?, self.y),
            Direction::East => Self::new(self.x + 1, self.y),
        };
        next.within(width, depth).then_some(next)
    }

    /// Direction from `self` to an orthogonally adjacent `other`.
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        match (
            other.x as i64 - self.x as i64,
            other.y as i64 - self.y as i64,
        ) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (-1, 0) => Some(Direction::West),
            (1, 0) => Some(Direction::East),
            _ => None,
        }
    }

    /// Manhattan distance in cells.
    pub fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four wall sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Neighbour enumeration order shared by carving and path search.
    /// Keeping one order makes tie-breaks reproducible for a fixed maze.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Unit offset `(dx, dy)` on the grid.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::West => (-1, 0),
            Self::East => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

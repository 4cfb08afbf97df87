use mazerun_common::{CellCoord, Direction};
use serde::{Deserialize, Serialize};

/// Wall presence on the four sides of a cell. `true` blocks movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Walls {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Walls {
    pub const ALL: Walls = Walls {
        north: true,
        east: true,
        south: true,
        west: true,
    };

    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    pub(crate) fn open(&mut self, dir: Direction) {
        match dir {
            Direction::North => self.north = false,
            Direction::East => self.east = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
        }
    }

    /// Number of standing walls.
    pub fn count(&self) -> usize {
        [self.north, self.east, self.south, self.west]
            .iter()
            .filter(|w| **w)
            .count()
    }

    /// Flags in `[N, E, S, W]` order, as renderers index them.
    pub fn as_array(&self) -> [bool; 4] {
        [self.north, self.east, self.south, self.west]
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::ALL
    }
}

/// One grid position.
///
/// Fields are written only by the kernel. Collaborators read them through
/// the accessors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) coord: CellCoord,
    pub(crate) walls: Walls,
    pub(crate) visited: bool,
    /// Carving run that produced this cell.
    pub(crate) hall_id: u32,
    pub(crate) distance_to_start: u32,
    pub(crate) has_shortcut: bool,
    pub(crate) is_start: bool,
    pub(crate) is_end: bool,
    pub(crate) is_on_path: bool,
}

impl Cell {
    pub(crate) fn walled(coord: CellCoord) -> Self {
        Self {
            coord,
            walls: Walls::ALL,
            visited: false,
            hall_id: 0,
            distance_to_start: 0,
            has_shortcut: false,
            is_start: false,
            is_end: false,
            is_on_path: false,
        }
    }

    /// Position of this cell in the grid.
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    pub fn x(&self) -> usize {
        self.coord.x
    }

    pub fn y(&self) -> usize {
        self.coord.y
    }

    /// Wall flags, one per side.
    pub fn walls(&self) -> Walls {
        self.walls
    }

    /// `true` if the side towards `dir` is still walled.
    pub fn has_wall(&self, dir: Direction) -> bool {
        self.walls.has(dir)
    }

    /// Set once the carve has reached this cell.
    pub fn visited(&self) -> bool {
        self.visited
    }

    /// Carving run this cell was reached in.
    pub fn hall_id(&self) -> u32 {
        self.hall_id
    }

    /// Carve depth: tree distance from the start cell.
    pub fn distance_to_start(&self) -> u32 {
        self.distance_to_start
    }

    /// `true` if loop injection opened a wall here.
    pub fn has_shortcut(&self) -> bool {
        self.has_shortcut
    }

    pub fn is_start(&self) -> bool {
        self.is_start
    }

    pub fn is_end(&self) -> bool {
        self.is_end
    }

    /// `true` if the active path runs through this cell.
    pub fn is_on_path(&self) -> bool {
        self.is_on_path
    }

    /// A dead end has exactly one open side.
    pub fn is_dead_end(&self) -> bool {
        self.walls.count() == 3
    }
}

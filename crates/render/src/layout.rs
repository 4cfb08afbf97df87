use glam::Vec3;
use mazerun_common::{CellCoord, Direction, MazeError};
use mazerun_kernel::Grid;
use serde::{Deserialize, Serialize};

/// World-space dimensions of one maze room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub room_size: f32,
    pub room_height: f32,
    pub wall_depth: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            room_size: 15.0,
            room_height: 10.0,
            wall_depth: 0.2,
        }
    }
}

/// Axis-aligned box given by its centre and full size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub center: Vec3,
    pub size: Vec3,
}

impl Block {
    pub fn min(&self) -> Vec3 {
        self.center - self.size * 0.5
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.size * 0.5
    }
}

/// One standing wall and the cell side it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBox {
    pub cell: CellCoord,
    pub side: Direction,
    pub block: Block,
}

/// Maps between grid cells and world space for a maze of fixed size.
///
/// Cell `(x, y)` is centred at world `(x * room, 0, y * room)`; grid `y`
/// runs along world `z`.
#[derive(Debug, Clone, Copy)]
pub struct CellLayout {
    config: LayoutConfig,
    width: usize,
    depth: usize,
}

impl CellLayout {
    pub fn new(config: LayoutConfig, width: usize, depth: usize) -> Self {
        Self {
            config,
            width,
            depth,
        }
    }

    pub fn for_grid(config: LayoutConfig, grid: &Grid) -> Self {
        Self::new(config, grid.width(), grid.depth())
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn cell_to_world(&self, coord: CellCoord) -> Vec3 {
        let room = self.config.room_size;
        Vec3::new(coord.x as f32 * room, 0.0, coord.y as f32 * room)
    }

    /// Cell whose room contains `pos`. Height is ignored.
    pub fn world_to_cell(&self, pos: Vec3) -> Result<CellCoord, MazeError> {
        let room = self.config.room_size;
        CellCoord::checked(
            axis_cell(pos.x, room),
            axis_cell(pos.z, room),
            self.width,
            self.depth,
        )
    }

    /// One box per standing wall.
    ///
    /// A wall between two cells is emitted once, from the north or west side
    /// of the later cell; east and south boxes only appear on the border.
    pub fn wall_boxes(&self, grid: &Grid) -> Vec<WallBox> {
        let mut boxes = Vec::new();
        for cell in grid.cells() {
            let coord = cell.coord();
            let walls = cell.walls();
            let last_column = coord.x + 1 == grid.width();
            let last_row = coord.y + 1 == grid.depth();
            let sides = [
                (Direction::North, walls.north),
                (Direction::West, walls.west),
                (Direction::East, walls.east && last_column),
                (Direction::South, walls.south && last_row),
            ];
            for (side, standing) in sides {
                if standing {
                    boxes.push(WallBox {
                        cell: coord,
                        side,
                        block: self.wall_block(coord, side),
                    });
                }
            }
        }
        tracing::trace!(walls = boxes.len(), "wall boxes built");
        boxes
    }

    /// Floor slab under the whole grid, top face at `y = 0`.
    pub fn floor_box(&self) -> Block {
        let room = self.config.room_size;
        let thickness = self.config.wall_depth;
        Block {
            center: Vec3::new(
                (self.width as f32 - 1.0) * room * 0.5,
                -thickness * 0.5,
                (self.depth as f32 - 1.0) * room * 0.5,
            ),
            size: Vec3::new(
                self.width as f32 * room,
                thickness,
                self.depth as f32 * room,
            ),
        }
    }

    fn wall_block(&self, coord: CellCoord, side: Direction) -> Block {
        let LayoutConfig {
            room_size: room,
            room_height: height,
            wall_depth,
        } = self.config;
        let origin = self.cell_to_world(coord);
        let (dx, dz) = side.delta();
        let center = Vec3::new(
            origin.x + dx as f32 * room * 0.5,
            height * 0.5,
            origin.z + dz as f32 * room * 0.5,
        );
        let size = match side {
            Direction::North | Direction::South => Vec3::new(room, height, wall_depth),
            Direction::East | Direction::West => Vec3::new(wall_depth, height, room),
        };
        Block { center, size }
    }
}

fn axis_cell(value: f32, room: f32) -> i64 {
    let cell = (value / room + 0.5).floor();
    if cell.is_finite() {
        cell as i64
    } else {
        i64::MIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazerun_kernel::{GeneratorConfig, MazeGenerator};

    fn layout(width: usize, depth: usize) -> CellLayout {
        CellLayout::new(LayoutConfig::default(), width, depth)
    }

    #[test]
    fn cell_centres_map_back() {
        let layout = layout(15, 10);
        for x in 0..15 {
            for y in 0..10 {
                let coord = CellCoord::new(x, y);
                let world = layout.cell_to_world(coord);
                assert_eq!(layout.world_to_cell(world), Ok(coord));
            }
        }
    }

    #[test]
    fn room_edges_round_to_the_next_cell() {
        let layout = layout(3, 3);
        // Cell (1, 0) spans x in [7.5, 22.5).
        assert_eq!(
            layout.world_to_cell(Vec3::new(7.5, 3.0, 0.0)),
            Ok(CellCoord::new(1, 0))
        );
        assert_eq!(
            layout.world_to_cell(Vec3::new(7.49, 0.0, 0.0)),
            Ok(CellCoord::new(0, 0))
        );
        assert_eq!(
            layout.world_to_cell(Vec3::new(22.4, 0.0, 14.0)),
            Ok(CellCoord::new(1, 1))
        );
    }

    #[test]
    fn outside_positions_are_rejected() {
        let layout = layout(3, 2);
        assert!(matches!(
            layout.world_to_cell(Vec3::new(-8.0, 0.0, 0.0)),
            Err(MazeError::OutOfBounds { x: -1, y: 0, .. })
        ));
        assert!(matches!(
            layout.world_to_cell(Vec3::new(0.0, 0.0, 23.0)),
            Err(MazeError::OutOfBounds { x: 0, y: 2, .. })
        ));
        assert!(layout.world_to_cell(Vec3::new(f32::NAN, 0.0, 0.0)).is_err());
    }

    #[test]
    fn closed_cell_has_four_walls() {
        let grid = Grid::new(1, 1).unwrap();
        let boxes = layout(1, 1).wall_boxes(&grid);
        assert_eq!(boxes.len(), 4);

        let north = boxes.iter().find(|b| b.side == Direction::North).unwrap();
        assert_eq!(north.block.center, Vec3::new(0.0, 5.0, -7.5));
        assert_eq!(north.block.size, Vec3::new(15.0, 10.0, 0.2));

        let east = boxes.iter().find(|b| b.side == Direction::East).unwrap();
        assert_eq!(east.block.center, Vec3::new(7.5, 5.0, 0.0));
        assert_eq!(east.block.size, Vec3::new(0.2, 10.0, 15.0));
    }

    #[test]
    fn shared_walls_emitted_once() {
        let (width, depth) = (6, 4);
        let maze = MazeGenerator::new(width, depth, GeneratorConfig::default())
            .unwrap()
            .generate_seeded(21);
        let boxes = layout(width, depth).wall_boxes(maze.grid());
        let all_edges = width * (depth + 1) + depth * (width + 1);
        assert_eq!(boxes.len(), all_edges - maze.grid().open_wall_count());

        let mut centres: Vec<(i32, i32)> = boxes
            .iter()
            .map(|b| ((b.block.center.x * 2.0) as i32, (b.block.center.z * 2.0) as i32))
            .collect();
        centres.sort();
        centres.dedup();
        assert_eq!(centres.len(), boxes.len());
    }

    #[test]
    fn floor_spans_the_grid() {
        let floor = layout(15, 10).floor_box();
        assert_eq!(floor.min().x, -7.5);
        assert_eq!(floor.min().z, -7.5);
        assert_eq!(floor.max().x, 14.5 * 15.0);
        assert_eq!(floor.max().z, 9.5 * 15.0);
        assert!((floor.max().y).abs() < 1e-6);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("room_size: 4.0\n").unwrap();
        assert_eq!(config.room_size, 4.0);
        assert_eq!(config.room_height, 10.0);
        assert_eq!(config.wall_depth, 0.2);
    }
}

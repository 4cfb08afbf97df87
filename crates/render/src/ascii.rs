use mazerun_common::CellCoord;
use mazerun_kernel::{Cell, Maze};

/// What the viewer is looking at, beyond the maze itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderView {
    /// Cell the player currently stands in.
    pub player: Option<CellCoord>,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the maze and a view, then produces output. It never
/// mutates the maze.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given maze and view.
    fn render(&self, maze: &Maze, view: &RenderView) -> Self::Output;
}

/// Text renderer for terminals, logs and tests.
///
/// One text row per grid row. Start is `S`, end is `E`, cells on the marked
/// path are `*` and the player is `@`.
#[derive(Debug, Default)]
pub struct AsciiRenderer {
    /// Print a one-line summary above the grid.
    pub header: bool,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self { header: true }
    }

    /// Grid only, no header line.
    pub fn bare() -> Self {
        Self { header: false }
    }

    fn symbol(cell: &Cell, view: &RenderView) -> char {
        if view.player == Some(cell.coord()) {
            '@'
        } else if cell.is_start() {
            'S'
        } else if cell.is_end() {
            'E'
        } else if cell.is_on_path() {
            '*'
        } else {
            ' '
        }
    }
}

impl Renderer for AsciiRenderer {
    type Output = String;

    fn render(&self, maze: &Maze, view: &RenderView) -> String {
        let grid = maze.grid();
        let mut out = String::new();
        if self.header {
            out.push_str(&format!(
                "maze {}x{} start={} end={}\n",
                maze.width(),
                maze.depth(),
                maze.start(),
                maze.end()
            ));
        }

        for y in 0..grid.depth() {
            if y == 0 {
                for x in 0..grid.width() {
                    let north = grid[CellCoord::new(x, 0)].walls().north;
                    out.push_str(if north { "+---" } else { "+   " });
                }
                out.push_str("+\n");
            }

            let west = grid[CellCoord::new(0, y)].walls().west;
            out.push(if west { '|' } else { ' ' });
            for x in 0..grid.width() {
                let cell = &grid[CellCoord::new(x, y)];
                out.push(' ');
                out.push(Self::symbol(cell, view));
                out.push(' ');
                out.push(if cell.walls().east { '|' } else { ' ' });
            }
            out.push('\n');

            for x in 0..grid.width() {
                let south = grid[CellCoord::new(x, y)].walls().south;
                out.push_str(if south { "+---" } else { "+   " });
            }
            out.push_str("+\n");
        }
        out
    }
}

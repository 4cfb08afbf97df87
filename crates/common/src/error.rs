/// Errors shared by every crate that addresses cells of a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("invalid maze dimensions {width}x{depth}: both must be at least 1")]
    InvalidDimensions { width: usize, depth: usize },
    #[error("cell ({x}, {y}) is outside the {width}x{depth} grid")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        depth: usize,
    },
    #[error("{unreachable} of {total} cells cannot be reached from the start cell")]
    Disconnected { unreachable: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_message_names_cell_and_grid() {
        let err = MazeError::OutOfBounds {
            x: -1,
            y: 4,
            width: 3,
            depth: 3,
        };
        assert_eq!(err.to_string(), "cell (-1, 4) is outside the 3x3 grid");
    }
}

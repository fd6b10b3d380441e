use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Invalid maze size {cols}x{rows}, both dimensions must be at least 1")]
    InvalidDimensions { cols: usize, rows: usize },
    #[error("Cells of size {cell_size} starting at {origin} do not fit in the drawing plane")]
    InvalidGeometry { origin: Dims, cell_size: Dims },
    #[error("Position {pos} is out of range of grid with size {size}")]
    OutOfRange { pos: Dims, size: Dims },
}

pub mod cell;
pub mod grid;

pub use cell::{Cell, CellBounds, CellWall};
pub use grid::{Carve, Grid};

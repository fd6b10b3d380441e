pub mod algorithms;
pub mod array;
pub mod dims;
pub mod error;
pub mod gameboard;
pub mod maze;
pub mod sink;

pub use error::MazeError;
pub use maze::{Maze, MazeParams};

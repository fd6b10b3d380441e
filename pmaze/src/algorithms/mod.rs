mod backtracker;
pub mod solver;

use std::fmt;

use crate::{error::MazeError, gameboard::Grid, sink::DrawSink};

pub use backtracker::RecursiveBacktracker;
pub use solver::{solve, solve_path};

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

pub trait MazeGenerator: fmt::Debug {
    /// Carves passages into a fully walled `grid`, in place.
    ///
    /// Cells touched by the generator may be left marked as visited,
    /// the caller resets them before solving.
    fn generate(
        &self,
        grid: &mut Grid,
        rng: &mut Random,
        sink: &mut dyn DrawSink,
    ) -> Result<(), MazeError>;
}

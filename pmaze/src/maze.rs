use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{
    algorithms::{self, MazeGenerator, Random, RecursiveBacktracker},
    dims::Dims,
    error::MazeError,
    gameboard::{CellWall, Grid},
    sink::{DrawSink, NoopSink},
};

/// Everything needed to build a [`Maze`].
///
/// `origin` and `cell_size` only position the cells for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MazeParams {
    pub origin: Dims,
    pub num_rows: usize,
    pub num_cols: usize,
    pub cell_size: Dims,
    /// Used for deterministic generation.
    pub seed: Option<u64>,
}

impl MazeParams {
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            origin: Dims::ZERO,
            num_rows,
            num_cols,
            cell_size: Dims::ONE,
            seed: None,
        }
    }

    pub fn origin(mut self, value: Dims) -> Self {
        self.origin = value;
        self
    }

    pub fn cell_size(mut self, value: Dims) -> Self {
        self.cell_size = value;
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }
}

/// A generated perfect maze, ready to be solved.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid,
    params: MazeParams,
    seed: u64,
}

impl Maze {
    /// Generates a maze with the recursive backtracker, reporting every change to `sink`.
    pub fn new(params: MazeParams, sink: &mut dyn DrawSink) -> Result<Self, MazeError> {
        Self::with_generator(params, &RecursiveBacktracker, sink)
    }

    pub fn headless(params: MazeParams) -> Result<Self, MazeError> {
        Self::new(params, &mut NoopSink)
    }

    pub fn with_generator(
        params: MazeParams,
        generator: &dyn MazeGenerator,
        sink: &mut dyn DrawSink,
    ) -> Result<Self, MazeError> {
        let mut grid = Grid::with_geometry(
            params.num_cols,
            params.num_rows,
            params.origin,
            params.cell_size,
        )?;

        let seed = params.seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);
        log::debug!("Generating maze with seed {}", seed);

        for cell in grid.cells().iter() {
            sink.draw_cell(cell);
        }

        Self::break_entrance_and_exit(&mut grid, sink)?;
        generator.generate(&mut grid, &mut rng, sink)?;
        grid.reset_visited();

        Ok(Maze { grid, params, seed })
    }

    fn break_entrance_and_exit(grid: &mut Grid, sink: &mut dyn DrawSink) -> Result<(), MazeError> {
        let (entrance, exit) = (grid.entrance(), grid.exit());

        grid.set_wall(entrance, CellWall::Top, false)?;
        sink.draw_cell(grid.cell(entrance)?);
        grid.set_wall(exit, CellWall::Bottom, false)?;
        sink.draw_cell(grid.cell(exit)?);

        Ok(())
    }

    /// Searches for the path from the entrance to the exit.
    ///
    /// Solving marks cells as visited, call [`Maze::reset_visited`] before solving again.
    pub fn solve(&mut self, sink: &mut dyn DrawSink) -> Result<bool, MazeError> {
        algorithms::solve(&mut self.grid, sink)
    }

    /// Like [`Maze::solve`], but returns the cells of the path.
    pub fn solve_path(&mut self, sink: &mut dyn DrawSink) -> Result<Option<Vec<Dims>>, MazeError> {
        algorithms::solve_path(&mut self.grid, sink)
    }

    pub fn reset_visited(&mut self) {
        self.grid.reset_visited();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> &MazeParams {
        &self.params
    }

    /// Seed the maze was generated with, either given or drawn at random.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> Dims {
        self.grid.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkEvent};

    #[test]
    fn construction_order() {
        let mut sink = RecordingSink::new();
        let maze = Maze::new(MazeParams::new(2, 3).seed(9), &mut sink).unwrap();

        let cells: Vec<_> = sink.cells().collect();
        // every cell first, then entrance and exit, then carved pairs
        let initial: Vec<_> = maze.grid().iter_pos().collect();
        assert_eq!(&cells[..6], initial.as_slice());
        assert_eq!(&cells[6..8], &[Dims(0, 0), Dims(2, 1)]);
        assert_eq!(cells.len(), 6 + 2 + 2 * 5);
    }

    #[test]
    fn ready_to_solve() {
        let maze = Maze::headless(MazeParams::new(4, 4)).unwrap();
        assert!(maze.grid().cells().iter().all(|c| !c.is_visited()));
    }

    #[test]
    fn keeps_random_seed() {
        let maze = Maze::headless(MazeParams::new(5, 5)).unwrap();
        let again = Maze::headless(MazeParams::new(5, 5).seed(maze.seed())).unwrap();
        let walls = |maze: &Maze| {
            maze.grid()
                .cells()
                .iter()
                .map(|c| CellWall::get_in_order().map(|w| c.get_wall(w)))
                .collect::<Vec<_>>()
        };
        assert_eq!(walls(&maze), walls(&again));
    }

    #[test]
    fn rejects_invalid_size() {
        assert_eq!(
            Maze::headless(MazeParams::new(0, 4)).unwrap_err(),
            MazeError::InvalidDimensions { cols: 4, rows: 0 }
        );
    }

    #[test]
    fn rejects_geometry_out_of_range() {
        let wide = Maze::headless(MazeParams::new(3, 3).cell_size(Dims(2_000_000_000, 1)).seed(1));
        assert!(matches!(wide, Err(MazeError::InvalidGeometry { .. })));

        let shifted = Maze::headless(MazeParams::new(2, 2).origin(Dims(i32::MAX, 0)));
        assert!(matches!(shifted, Err(MazeError::InvalidGeometry { .. })));
    }

    #[test]
    fn solve_then_reset() {
        let mut maze = Maze::headless(MazeParams::new(6, 3).seed(1)).unwrap();
        let mut sink = RecordingSink::new();
        assert!(maze.solve(&mut sink).unwrap());
        assert!(matches!(
            sink.events.last(),
            Some(SinkEvent::Move { to, .. }) if *to == Dims(2, 5)
        ));

        assert!(!maze.solve(&mut NoopSink).unwrap());
        maze.reset_visited();
        assert!(maze.solve(&mut NoopSink).unwrap());
    }

    #[test]
    fn cell_geometry_follows_params() {
        let params = MazeParams::new(2, 2)
            .origin(Dims(50, 60))
            .cell_size(Dims(10, 20))
            .seed(3);
        let maze = Maze::headless(params).unwrap();
        let cell = maze.grid().cell(Dims(1, 1)).unwrap();
        assert_eq!(cell.bounds().top_left, Dims(60, 80));
        assert_eq!(cell.center(), Dims(65, 90));
        assert_eq!(maze.params(), &params);
    }
}

use rand::{seq::SliceRandom as _, Rng as _};
use smallvec::SmallVec;

use super::{MazeGenerator, Random};

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{Carve, Grid},
    sink::DrawSink,
};

/// Randomized depth first search, also known as recursive backtracker.
///
/// Produces a perfect maze: every carve joins a visited cell with an unvisited one,
/// so the passages always form a tree and end up spanning the whole grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursiveBacktracker;

impl RecursiveBacktracker {
    /// Runs the generation from a fixed `start` cell.
    pub fn generate_from(
        &self,
        grid: &mut Grid,
        start: Dims,
        rng: &mut Random,
        sink: &mut dyn DrawSink,
    ) -> Result<(), MazeError> {
        log::debug!(
            "Carving {}x{} grid from {}",
            grid.num_cols(),
            grid.num_rows(),
            start
        );

        let mut stack = Vec::with_capacity(grid.cell_count());
        let mut carved = 0usize;

        grid.set_visited(start, true)?;
        stack.push(start);
        while let Some(current) = stack.pop() {
            let unvisited_neighbors = grid
                .neighbors_to_carve(current)?
                .into_iter()
                .filter(|carve| !grid.cells()[carve.neighbor].is_visited())
                .collect::<SmallVec<[Carve; 4]>>();

            // dead end, resume with the cell below on the stack
            let Some(&carve) = unvisited_neighbors.choose(rng) else {
                continue;
            };

            stack.push(current);

            grid.set_wall(current, carve.own_wall, false)?;
            grid.set_wall(carve.neighbor, carve.neighbor_wall, false)?;
            sink.draw_cell(grid.cell(current)?);
            sink.draw_cell(grid.cell(carve.neighbor)?);
            log::trace!("Carved {} -> {}", current, carve.neighbor);
            carved += 1;

            grid.set_visited(carve.neighbor, true)?;
            stack.push(carve.neighbor);
        }

        log::debug!("Carved {} passages", carved);

        Ok(())
    }
}

impl MazeGenerator for RecursiveBacktracker {
    fn generate(
        &self,
        grid: &mut Grid,
        rng: &mut Random,
        sink: &mut dyn DrawSink,
    ) -> Result<(), MazeError> {
        let Dims(w, h) = grid.size();
        let start = Dims(rng.gen_range(0..w), rng.gen_range(0..h));

        self.generate_from(grid, start, rng, sink)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::sink::{NoopSink, RecordingSink};

    /// Test-only helper: Manhattan length of an offset.
    trait AbsSum {
        fn abs_sum(self) -> i32;
    }
    
    impl AbsSum for Dims {
        fn abs_sum(self) -> i32 {
            self.0.abs() + self.1.abs()
        }
    }

    fn carve(cols: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(cols, rows).unwrap();
        let mut rng = Random::seed_from_u64(seed);
        RecursiveBacktracker
            .generate(&mut grid, &mut rng, &mut NoopSink)
            .unwrap();
        grid
    }

    #[test]
    fn spans_every_cell() {
        for (cols, rows) in [(1, 1), (1, 7), (7, 1), (5, 5), (13, 4)] {
            let grid = carve(cols, rows, 42);
            assert_eq!(grid.open_passage_count(), cols * rows - 1);
            assert_eq!(grid.reachable_from(Dims::ZERO).unwrap().len(), cols * rows);
            assert!(grid.walls_consistent());
        }
    }

    #[test]
    fn visits_every_cell() {
        let grid = carve(6, 4, 7);
        assert!(grid.cells().iter().all(|cell| cell.is_visited()));
    }

    #[test]
    fn reports_both_cells_of_each_carve() {
        let mut grid = Grid::new(4, 3).unwrap();
        let mut rng = Random::seed_from_u64(3);
        let mut sink = RecordingSink::new();
        RecursiveBacktracker
            .generate_from(&mut grid, Dims(2, 1), &mut rng, &mut sink)
            .unwrap();

        let cells: Vec<_> = sink.cells().collect();
        assert_eq!(cells.len(), 2 * (4 * 3 - 1));
        for pair in cells.chunks(2) {
            assert_eq!(
                (pair[0] - pair[1]).abs_sum(),
                1,
                "carve notifications come in adjacent pairs"
            );
        }
        assert_eq!(sink.moves().count(), 0);
    }

    #[test]
    fn start_out_of_range() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut rng = Random::seed_from_u64(0);
        let err = RecursiveBacktracker
            .generate_from(&mut grid, Dims(5, 5), &mut rng, &mut NoopSink)
            .unwrap_err();
        assert!(matches!(err, MazeError::OutOfRange { .. }));
    }

    #[test]
    fn deep_grid_does_not_overflow() {
        // a single row forces the stack to hold every cell at once
        let grid = carve(200_000, 1, 1);
        assert_eq!(grid.open_passage_count(), 199_999);
    }
}

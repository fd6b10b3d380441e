//! Depth first search with backtracking from the entrance to the exit.
//!
//! Neighbors are tried in the fixed order left, right, top, bottom, so solving
//! a given grid always produces the same sequence of moves. Cells are marked as
//! visited when entered and are never unmarked, a dead end stays dead. The
//! entrance is checked before anything else: a second run on the same grid
//! without [`Grid::reset_visited`] finds it already visited and fails without
//! a single notification, even when the entrance is also the exit.

use std::iter;

use smallvec::SmallVec;

use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::Grid,
    sink::{DrawSink, MoveKind},
};

struct Frame {
    pos: Dims,
    neighbors: SmallVec<[Dims; 4]>,
    next: usize,
}

impl Frame {
    fn new(grid: &Grid, pos: Dims) -> Result<Self, MazeError> {
        Ok(Frame {
            pos,
            neighbors: grid.passable_neighbors(pos)?,
            next: 0,
        })
    }
}

/// Returns whether a path from the entrance to the exit exists.
pub fn solve(grid: &mut Grid, sink: &mut dyn DrawSink) -> Result<bool, MazeError> {
    Ok(solve_path(grid, sink)?.is_some())
}

/// Finds the path from the entrance to the exit, both included.
///
/// Every tentative move is reported to the `sink` as [`MoveKind::Commit`],
/// every move taken back as [`MoveKind::Undo`].
pub fn solve_path(
    grid: &mut Grid,
    sink: &mut dyn DrawSink,
) -> Result<Option<Vec<Dims>>, MazeError> {
    let (start, exit) = (grid.entrance(), grid.exit());

    if grid.is_visited(start)? {
        log::debug!("Entrance already visited, nothing to solve");
        return Ok(None);
    }

    grid.set_visited(start, true)?;
    if start == exit {
        return Ok(Some(vec![start]));
    }

    let mut stack = Vec::with_capacity(grid.cell_count());
    stack.push(Frame::new(grid, start)?);

    while let Some(frame) = stack.last_mut() {
        let next = frame.neighbors.get(frame.next).copied();
        frame.next += 1;
        let current = frame.pos;

        let Some(next) = next else {
            stack.pop();
            if let Some(parent) = stack.last() {
                log::trace!("Backtracking {} -> {}", current, parent.pos);
                sink.draw_move(grid.cell(parent.pos)?, grid.cell(current)?, MoveKind::Undo);
            }
            continue;
        };

        if grid.is_visited(next)? {
            continue;
        }

        log::trace!("Moving {} -> {}", current, next);
        sink.draw_move(grid.cell(current)?, grid.cell(next)?, MoveKind::Commit);
        grid.set_visited(next, true)?;

        if next == exit {
            let path = stack
                .iter()
                .map(|frame| frame.pos)
                .chain(iter::once(next))
                .collect::<Vec<_>>();
            log::debug!("Found path of {} cells", path.len());
            return Ok(Some(path));
        }

        stack.push(Frame::new(grid, next)?);
    }

    log::debug!("No path from {} to {}", start, exit);

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gameboard::CellWall::*,
        sink::{NoopSink, RecordingSink},
    };

    /// 3x2 grid with a single route 0,0 -> 1,0 -> 1,1 -> 2,1 and a dead end at 0,1.
    fn corridor() -> Grid {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.remove_wall(Dims(0, 0), Right).unwrap();
        grid.remove_wall(Dims(1, 0), Bottom).unwrap();
        grid.remove_wall(Dims(1, 1), Right).unwrap();
        grid.remove_wall(Dims(1, 1), Left).unwrap();
        grid.remove_wall(Dims(1, 0), Right).unwrap();
        grid
    }

    #[test]
    fn finds_path() {
        let mut grid = corridor();
        let path = solve_path(&mut grid, &mut NoopSink).unwrap().unwrap();
        assert_eq!(path, vec![Dims(0, 0), Dims(1, 0), Dims(1, 1), Dims(2, 1)]);
    }

    #[test]
    fn reports_moves_and_undos_in_order() {
        let mut grid = corridor();
        let mut sink = RecordingSink::new();
        assert!(solve(&mut grid, &mut sink).unwrap());

        let moves: Vec<_> = sink.moves().collect();
        assert_eq!(
            moves,
            vec![
                (Dims(0, 0), Dims(1, 0), MoveKind::Commit),
                // right before bottom
                (Dims(1, 0), Dims(2, 0), MoveKind::Commit),
                (Dims(1, 0), Dims(2, 0), MoveKind::Undo),
                (Dims(1, 0), Dims(1, 1), MoveKind::Commit),
                // left before right
                (Dims(1, 1), Dims(0, 1), MoveKind::Commit),
                (Dims(1, 1), Dims(0, 1), MoveKind::Undo),
                (Dims(1, 1), Dims(2, 1), MoveKind::Commit),
            ]
        );
        assert_eq!(sink.cells().count(), 0);
    }

    #[test]
    fn walled_grid_has_no_path() {
        let mut grid = Grid::new(3, 3).unwrap();
        let mut sink = RecordingSink::new();
        assert!(!solve(&mut grid, &mut sink).unwrap());
        assert!(sink.events.is_empty());
        assert!(grid.is_visited(Dims::ZERO).unwrap());
    }

    #[test]
    fn dead_cells_stay_visited() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.remove_wall(Dims(0, 0), Right).unwrap();
        assert!(!solve(&mut grid, &mut NoopSink).unwrap());
        assert!(grid.is_visited(Dims(1, 0)).unwrap());
        assert!(!grid.is_visited(Dims(1, 1)).unwrap());
    }

    #[test]
    fn second_run_fails_until_reset() {
        let mut grid = corridor();
        assert!(solve(&mut grid, &mut NoopSink).unwrap());

        let mut sink = RecordingSink::new();
        assert!(!solve(&mut grid, &mut sink).unwrap());
        assert!(sink.events.is_empty());

        grid.reset_visited();
        assert!(solve(&mut grid, &mut NoopSink).unwrap());
    }

    #[test]
    fn single_cell() {
        let mut grid = Grid::new(1, 1).unwrap();
        assert_eq!(
            solve_path(&mut grid, &mut NoopSink).unwrap(),
            Some(vec![Dims::ZERO])
        );

        // entrance is the exit, but it was already visited
        let mut sink = RecordingSink::new();
        assert!(!solve(&mut grid, &mut sink).unwrap());
        assert!(sink.events.is_empty());
    }
}

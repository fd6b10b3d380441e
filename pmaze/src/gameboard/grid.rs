use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::{array::Array2D, dims::Dims, error::MazeError};

use super::cell::{Cell, CellBounds, CellWall};

/// Candidate for carving: the neighbor and the wall pair separating it from the origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carve {
    pub neighbor: Dims,
    /// Wall on the neighbor, facing back toward the origin cell.
    pub neighbor_wall: CellWall,
    /// Wall on the origin cell, facing the neighbor.
    pub own_wall: CellWall,
}

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a fully walled grid with unit sized cells at the origin.
    pub fn new(num_cols: usize, num_rows: usize) -> Result<Self, MazeError> {
        Self::with_geometry(num_cols, num_rows, Dims::ZERO, Dims::ONE)
    }

    /// Creates a fully walled grid whose cells carry pixel bounds
    /// starting at `origin`, each `cell_size` large.
    pub fn with_geometry(
        num_cols: usize,
        num_rows: usize,
        origin: Dims,
        cell_size: Dims,
    ) -> Result<Self, MazeError> {
        // positions are i32, the whole grid must stay addressable
        let addressable = i32::try_from(num_cols)
            .ok()
            .zip(i32::try_from(num_rows).ok())
            .and_then(|(c, r)| c.checked_mul(r))
            .is_some();

        if num_cols == 0 || num_rows == 0 || !addressable {
            return Err(MazeError::InvalidDimensions {
                cols: num_cols,
                rows: num_rows,
            });
        }

        // every corner lies between the origin and the far corner once the
        // cell size is positive
        if !cell_size.all_positive()
            || far_corner(num_cols, num_rows, origin, cell_size).is_none()
        {
            return Err(MazeError::InvalidGeometry { origin, cell_size });
        }

        let cells = Array2D::from_fn(num_cols, num_rows, |pos| {
            let top_left = origin + pos * cell_size;
            Cell::new(
                pos,
                CellBounds {
                    top_left,
                    bottom_right: top_left + cell_size,
                },
            )
        });

        Ok(Grid { cells })
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn num_cols(&self) -> usize {
        self.size().0 as usize
    }

    pub fn num_rows(&self) -> usize {
        self.size().1 as usize
    }

    pub fn cell_count(&self) -> usize {
        self.num_cols() * self.num_rows()
    }

    /// Top-left cell, the one with the entrance in its top wall.
    pub fn entrance(&self) -> Dims {
        Dims::ZERO
    }

    /// Bottom-right cell, the one with the exit in its bottom wall.
    pub fn exit(&self) -> Dims {
        self.size() - Dims::ONE
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    fn check_bounds(&self, pos: Dims) -> Result<(), MazeError> {
        if self.is_in_bounds(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfRange {
                pos,
                size: self.size(),
            })
        }
    }

    pub fn cell(&self, pos: Dims) -> Result<&Cell, MazeError> {
        self.check_bounds(pos)?;
        Ok(&self.cells[pos])
    }

    pub fn cells(&self) -> &Array2D<Cell> {
        &self.cells
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    /// All in-bounds neighbors of `pos`, whether or not the wall between is open.
    pub fn neighbors_to_carve(&self, pos: Dims) -> Result<SmallVec<[Carve; 4]>, MazeError> {
        self.check_bounds(pos)?;

        Ok(CellWall::get_in_order()
            .into_iter()
            .map(|own_wall| (own_wall, pos + own_wall.to_coord()))
            .filter(|(_, neighbor)| self.is_in_bounds(*neighbor))
            .map(|(own_wall, neighbor)| Carve {
                neighbor,
                neighbor_wall: own_wall.reverse_wall(),
                own_wall,
            })
            .collect())
    }

    /// Neighbors of `pos` reachable through a wall that is open on both sides.
    pub fn passable_neighbors(&self, pos: Dims) -> Result<SmallVec<[Dims; 4]>, MazeError> {
        let cell = self.cell(pos)?;

        Ok(CellWall::get_in_order()
            .into_iter()
            .filter(|wall| cell.is_open(*wall))
            .filter_map(|wall| {
                let neighbor = pos + wall.to_coord();
                self.cells
                    .get(neighbor)
                    .filter(|n| n.is_open(wall.reverse_wall()))
                    .map(|_| neighbor)
            })
            .collect())
    }

    /// Sets exactly one wall flag. The facing wall of the neighbor is left alone.
    pub fn set_wall(&mut self, pos: Dims, side: CellWall, present: bool) -> Result<(), MazeError> {
        self.check_bounds(pos)?;
        self.cells[pos].set_wall(side, present);
        Ok(())
    }

    /// Removes the wall on `side` of `pos` together with the facing wall of the neighbor.
    ///
    /// On the outer edge there is no neighbor and only the single flag is cleared.
    pub fn remove_wall(&mut self, pos: Dims, side: CellWall) -> Result<(), MazeError> {
        self.check_bounds(pos)?;

        let neighbor = pos + side.to_coord();
        match self.cells.get_pair_mut(pos, neighbor) {
            Some((cell, other)) => {
                cell.remove_wall(side);
                other.remove_wall(side.reverse_wall());
            }
            None => self.cells[pos].remove_wall(side),
        }

        Ok(())
    }

    pub fn is_visited(&self, pos: Dims) -> Result<bool, MazeError> {
        Ok(self.cell(pos)?.is_visited())
    }

    pub fn set_visited(&mut self, pos: Dims, visited: bool) -> Result<(), MazeError> {
        self.check_bounds(pos)?;
        self.cells[pos].set_visited(visited);
        Ok(())
    }

    pub fn reset_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    /// Every cell reachable from `start` through open passages, `start` included.
    pub fn reachable_from(&self, start: Dims) -> Result<HashSet<Dims>, MazeError> {
        self.check_bounds(start)?;

        let mut seen = HashSet::with_capacity(self.cell_count());
        let mut stack = vec![start];
        seen.insert(start);

        while let Some(current) = stack.pop() {
            for next in self.passable_neighbors(current)? {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        Ok(seen)
    }

    /// Number of open passages between pairs of cells. Entrance and exit don't count.
    pub fn open_passage_count(&self) -> usize {
        self.iter_pos()
            .map(|pos| {
                [CellWall::Right, CellWall::Bottom]
                    .into_iter()
                    .filter(|&wall| {
                        let neighbor = pos + wall.to_coord();
                        self.cells[pos].is_open(wall)
                            && self
                                .cells
                                .get(neighbor)
                                .is_some_and(|n| n.is_open(wall.reverse_wall()))
                    })
                    .count()
            })
            .sum()
    }

    /// Checks that every wall shared by two cells has the same state on both sides.
    pub fn walls_consistent(&self) -> bool {
        self.iter_pos().all(|pos| {
            [CellWall::Right, CellWall::Bottom].into_iter().all(|wall| {
                match self.cells.get(pos + wall.to_coord()) {
                    Some(neighbor) => {
                        self.cells[pos].get_wall(wall) == neighbor.get_wall(wall.reverse_wall())
                    }
                    None => true,
                }
            })
        })
    }
}

/// Bottom right pixel of the last cell, `None` if it does not fit in `i32`.
fn far_corner(num_cols: usize, num_rows: usize, origin: Dims, cell_size: Dims) -> Option<Dims> {
    let cols = i32::try_from(num_cols).ok()?;
    let rows = i32::try_from(num_rows).ok()?;

    Some(Dims(
        origin.0.checked_add(cols.checked_mul(cell_size.0)?)?,
        origin.1.checked_add(rows.checked_mul(cell_size.1)?)?,
    ))
}

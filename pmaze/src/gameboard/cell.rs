use crate::dims::Dims;

use self::CellWall::*;

/// Pixel rectangle a cell occupies. Only renderers care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellBounds {
    pub top_left: Dims,
    pub bottom_right: Dims,
}

impl CellBounds {
    pub fn center(&self) -> Dims {
        (self.top_left + self.bottom_right) / 2
    }
}

#[derive(Debug, Clone)]
pub struct Cell {
    walls: [bool; 4],
    visited: bool,
    coord: Dims,
    bounds: CellBounds,
}

impl Cell {
    /// Creates a cell with all four walls present.
    pub fn new(coord: Dims, bounds: CellBounds) -> Cell {
        Cell {
            walls: [true; 4],
            visited: false,
            coord,
            bounds,
        }
    }

    pub fn set_wall(&mut self, wall: CellWall, present: bool) {
        self.walls[wall.index()] = present;
    }

    pub fn remove_wall(&mut self, wall: CellWall) {
        self.set_wall(wall, false);
    }

    pub fn get_wall(&self, wall: CellWall) -> bool {
        self.walls[wall.index()]
    }

    pub fn is_open(&self, wall: CellWall) -> bool {
        !self.get_wall(wall)
    }

    pub fn is_closed(&self, wall: CellWall) -> bool {
        self.get_wall(wall)
    }

    pub fn wall_count(&self) -> usize {
        self.walls.iter().filter(|&&w| w).count()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn get_coord(&self) -> Dims {
        self.coord
    }

    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    pub fn center(&self) -> Dims {
        self.bounds.center()
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for Cell {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    Top,
    Bottom,
    Left,
    Right,
}

impl CellWall {
    pub fn index(self) -> usize {
        match self {
            Top => 0,
            Bottom => 1,
            Left => 2,
            Right => 3,
        }
    }

    /// Offset from a cell to its neighbor behind this wall. Rows grow downwards.
    pub fn to_coord(self) -> Dims {
        match self {
            Left => Dims(-1, 0),
            Right => Dims(1, 0),
            Top => Dims(0, -1),
            Bottom => Dims(0, 1),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        match self {
            Left => Right,
            Right => Left,
            Top => Bottom,
            Bottom => Top,
        }
    }

    /// All walls in the order neighbors are enumerated: left, right, top, bottom.
    pub fn get_in_order() -> [CellWall; 4] {
        [Left, Right, Top, Bottom]
    }
}

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Integer 2D coordinate.
///
/// Used both for cell addresses, where `.0` is the column and `.1` the row,
/// and for pixel points of the cell bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    /// Iterates all positions in `from..to` in row-major order.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

/// Component-wise product, used to scale a cell address by the cell size.
impl Mul<Dims> for Dims {
    type Output = Dims;

    fn mul(self, other: Dims) -> Dims {
        Dims(self.0 * other.0, self.1 * other.1)
    }
}

impl Div<i32> for Dims {
    type Output = Dims;

    fn div(self, other: i32) -> Dims {
        Dims(self.0 / other, self.1 / other)
    }
}

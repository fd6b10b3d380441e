use std::ops;

use crate::dims::Dims;

/// Flat row-major 2D buffer addressed by [`Dims`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(Dims) -> T) -> Self {
        let buf = Dims::iter_fill(Dims::ZERO, Dims(width as i32, height as i32))
            .map(&mut f)
            .collect();

        Self { buf, width, height }
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let Dims(x, y) = pos;
        let (x, y) = (x as usize, y as usize);

        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let x = idx % self.width;
        let y = idx / self.width;

        Some(Dims(x as i32, y as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.buf.iter_mut()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }

    /// Mutable access to two distinct positions at once.
    ///
    /// Returns `None` if either position is out of bounds or both are equal.
    pub fn get_pair_mut(&mut self, a: Dims, b: Dims) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (self.dim_to_idx(a)?, self.dim_to_idx(b)?);
        if ia == ib {
            return None;
        }

        if ia < ib {
            let (lo, hi) = self.buf.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.buf.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }
}

impl<T: Clone> Array2D<T> {
    pub fn new(item: T, width: usize, height: usize) -> Self {
        Self {
            buf: vec![item; width * height],
            width,
            height,
        }
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}

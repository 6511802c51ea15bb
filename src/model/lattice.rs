//! Dense scalar storage on a regular 3D lattice.
//!
//! Cells are stored contiguously with the first axis varying fastest:
//! `index(i, j, k) = k * dim0 * dim1 + j * dim0 + i`. This is the layout
//! isosurface extractors conventionally expect, so the backing buffer can be
//! handed over with [`Lattice::as_slice`] or [`Lattice::into_vec`] without
//! reordering.

use std::ops::{Index, IndexMut};
use thiserror::Error;

/// Lattice dimensions that cannot back a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A caller-provided buffer has the wrong number of cells.
    #[error("lattice buffer has {actual} cells but dimensions {dims:?} require {expected}")]
    Length {
        dims: [usize; 3],
        expected: usize,
        actual: usize,
    },

    /// The cell count overflows `usize` or cannot be allocated.
    #[error("lattice dimensions {0:?} are too large to allocate")]
    TooLarge([usize; 3]),
}

/// Total number of cells, `None` on overflow.
pub fn cell_count(dims: [usize; 3]) -> Option<usize> {
    dims[0].checked_mul(dims[1])?.checked_mul(dims[2])
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    dims: [usize; 3],
    data: Vec<f32>,
}

impl Lattice {
    /// Allocates a zero-filled lattice.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::TooLarge`] if the cell count overflows or the
    /// allocation is refused.
    pub fn zeros(dims: [usize; 3]) -> Result<Self, ShapeError> {
        let len = cell_count(dims).ok_or(ShapeError::TooLarge(dims))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ShapeError::TooLarge(dims))?;
        data.resize(len, 0.0);
        Ok(Self { dims, data })
    }

    /// Wraps a caller-provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if `data.len()` differs from `dims[0] * dims[1] * dims[2]`.
    pub fn from_vec(dims: [usize; 3], data: Vec<f32>) -> Result<Self, ShapeError> {
        let expected = cell_count(dims).ok_or(ShapeError::TooLarge(dims))?;
        if data.len() != expected {
            return Err(ShapeError::Length {
                dims,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat offset of cell `(i, j, k)`.
    ///
    /// Coordinates are bounds-checked in debug builds only.
    #[inline]
    pub fn offset(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(
            i < self.dims[0] && j < self.dims[1] && k < self.dims[2],
            "lattice coordinate ({i}, {j}, {k}) out of bounds for {:?}",
            self.dims
        );
        k * self.dims[0] * self.dims[1] + j * self.dims[0] + i
    }

    /// Inverse of [`offset`](Self::offset).
    pub fn coords(&self, index: usize) -> [usize; 3] {
        let plane = self.dims[0] * self.dims[1];
        let k = index / plane;
        let rem = index % plane;
        [rem % self.dims[0], rem / self.dims[0], k]
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f32 {
        self.data[self.offset(i, j, k)]
    }

    /// Adds `value` into cell `(i, j, k)`.
    #[inline]
    pub fn add(&mut self, i: usize, j: usize, k: usize, value: f32) {
        let idx = self.offset(i, j, k);
        self.data[idx] += value;
    }

    /// Adds every cell of `other` into the matching cell of `self`.
    ///
    /// # Panics
    ///
    /// Panics if the two lattices have different dimensions.
    pub fn accumulate(&mut self, other: &Lattice) {
        assert_eq!(self.dims, other.dims, "cannot accumulate lattices of different shape");
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            *dst += *src;
        }
    }

    /// Returns `true` if every cell is exactly zero.
    pub fn is_zeroed(&self) -> bool {
        self.data.iter().all(|&v| v == 0.0)
    }

    pub fn fill_zero(&mut self) {
        self.data.fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl Index<[usize; 3]> for Lattice {
    type Output = f32;

    fn index(&self, [i, j, k]: [usize; 3]) -> &f32 {
        &self.data[self.offset(i, j, k)]
    }
}

impl IndexMut<[usize; 3]> for Lattice {
    fn index_mut(&mut self, [i, j, k]: [usize; 3]) -> &mut f32 {
        let idx = self.offset(i, j, k);
        &mut self.data[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_axis_varies_fastest() {
        let lattice = Lattice::zeros([4, 3, 2]).expect("lattice");
        assert_eq!(lattice.offset(0, 0, 0), 0);
        assert_eq!(lattice.offset(1, 0, 0), 1);
        assert_eq!(lattice.offset(0, 1, 0), 4);
        assert_eq!(lattice.offset(0, 0, 1), 12);
        assert_eq!(lattice.offset(3, 2, 1), 23);
        assert_eq!(lattice.len(), 24);
    }

    #[test]
    fn coords_inverts_offset() {
        let lattice = Lattice::zeros([5, 3, 4]).expect("lattice");
        for idx in 0..lattice.len() {
            let [i, j, k] = lattice.coords(idx);
            assert_eq!(lattice.offset(i, j, k), idx);
        }
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Lattice::from_vec([2, 2, 2], vec![0.0; 7]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Length {
                dims: [2, 2, 2],
                expected: 8,
                actual: 7
            }
        );
        assert!(Lattice::from_vec([2, 2, 2], vec![0.0; 8]).is_ok());
    }

    #[test]
    fn oversized_dimensions_are_an_error() {
        let dims = [1 << 22; 3];
        assert_eq!(cell_count(dims), None);
        assert_eq!(Lattice::zeros(dims), Err(ShapeError::TooLarge(dims)));
        assert_eq!(
            Lattice::from_vec(dims, Vec::new()),
            Err(ShapeError::TooLarge(dims))
        );
        assert_eq!(
            Lattice::zeros([usize::MAX, 1, 1]),
            Err(ShapeError::TooLarge([usize::MAX, 1, 1]))
        );
    }

    #[test]
    fn add_and_index_agree() {
        let mut lattice = Lattice::zeros([3, 3, 3]).expect("lattice");
        lattice.add(1, 2, 0, 0.5);
        lattice.add(1, 2, 0, 0.25);
        lattice[[2, 0, 1]] = 4.0;
        assert_eq!(lattice.get(1, 2, 0), 0.75);
        assert_eq!(lattice[[2, 0, 1]], 4.0);
        assert!(!lattice.is_zeroed());
        lattice.fill_zero();
        assert!(lattice.is_zeroed());
    }

    #[test]
    fn accumulate_sums_cellwise() {
        let mut a = Lattice::from_vec([2, 1, 1], vec![1.0, 2.0]).unwrap();
        let b = Lattice::from_vec([2, 1, 1], vec![0.5, -2.0]).unwrap();
        a.accumulate(&b);
        assert_eq!(a.as_slice(), &[1.5, 0.0]);
    }

    #[test]
    #[should_panic(expected = "different shape")]
    fn accumulate_rejects_mismatched_shapes() {
        let mut a = Lattice::zeros([2, 2, 2]).expect("lattice");
        a.accumulate(&Lattice::zeros([2, 2, 3]).expect("lattice"));
    }
}

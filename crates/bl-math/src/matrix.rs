//! `Matrix`: a two-dimensional matrix of reals.
//!
//! A thin newtype around `nalgebra::DMatrix<f64>`. Storage is column-major,
//! so a whole column is one contiguous slice; the lattice code relies on
//! this to roll back one time step at a time.

use bl_core::Real;
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// A dynamically-sized 2D matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a `rows × cols` matrix filled with `value`.
    pub fn from_element(rows: usize, cols: usize, value: Real) -> Self {
        Self(DMatrix::from_element(rows, cols, value))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Column `j` as a contiguous slice.
    ///
    /// # Panics
    /// Panics if `j >= cols()`.
    pub fn column_slice(&self, j: usize) -> &[Real] {
        let rows = self.rows();
        &self.0.as_slice()[j * rows..(j + 1) * rows]
    }

    /// Column `j` as a mutable contiguous slice.
    ///
    /// # Panics
    /// Panics if `j >= cols()`.
    pub fn column_slice_mut(&mut self, j: usize) -> &mut [Real] {
        let rows = self.rows();
        &mut self.0.as_mut_slice()[j * rows..(j + 1) * rows]
    }

    /// Borrow column `j` mutably and column `j + 1` immutably at once.
    ///
    /// # Panics
    /// Panics if `j + 1 >= cols()`.
    pub fn adjacent_columns_mut(&mut self, j: usize) -> (&mut [Real], &[Real]) {
        let rows = self.rows();
        let (left, right) = self.0.as_mut_slice().split_at_mut((j + 1) * rows);
        (&mut left[j * rows..], &right[..rows])
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2 × 3 matrix with `m[(i, j)] = 10·i + j`.
    fn sample() -> Matrix {
        let mut m = Matrix::from_element(2, 3, 0.0);
        for i in 0..2 {
            for j in 0..3 {
                m[(i, j)] = (10 * i + j) as Real;
            }
        }
        m
    }

    #[test]
    fn from_element_and_shape() {
        let m = Matrix::from_element(3, 4, f64::NAN);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!((0..4).all(|j| m.column_slice(j).iter().all(|x| x.is_nan())));
    }

    #[test]
    fn columns_are_contiguous() {
        let m = sample();
        assert_eq!(m.column_slice(0), &[0.0, 10.0]);
        assert_eq!(m.column_slice(2), &[2.0, 12.0]);
    }

    #[test]
    fn adjacent_columns_split() {
        let mut m = sample();
        {
            let (current, next) = m.adjacent_columns_mut(1);
            current[0] = next[0] + next[1];
            current[1] = -1.0;
        }
        assert_eq!(m[(0, 1)], 14.0);
        assert_eq!(m[(1, 1)], -1.0);
        assert_eq!(m[(0, 2)], 2.0);
    }

    #[test]
    fn column_slice_mut_writes_through() {
        let mut m = sample();
        m.column_slice_mut(0)[1] = 4.0;
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(1, 1)], 11.0);
    }
}

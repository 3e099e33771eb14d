//! Triangular lattice stored in a dense square arena.
//!
//! A lattice over `N` steps is an `(N + 1) × (N + 1)` [`Matrix`] indexed by
//! `(row, step)`. Column `t` holds `t + 1` nodes in rows `0..=t`; the cells
//! above the diagonal are never written and stay NaN.

use bl_core::{errors::Error, errors::Result, Real, Size};
use bl_math::Matrix;
use std::fmt;

/// Marker stored in the cells of the upper triangle.
pub const UNDEFINED: Real = f64::NAN;

/// An `(N + 1) × (N + 1)` lattice where only cells with `row <= step` exist.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularLattice {
    cells: Matrix,
}

impl TriangularLattice {
    /// Cells of the arena over `steps` steps, or `None` when it cannot be
    /// held in a single allocation.
    pub fn arena_cells(steps: Size) -> Option<Size> {
        let side = steps.checked_add(1)?;
        let cells = side.checked_mul(side)?;
        let bytes = cells.checked_mul(std::mem::size_of::<Real>())?;
        (bytes <= isize::MAX as usize).then_some(cells)
    }

    /// Allocate a lattice over `steps` steps with every cell undefined.
    pub fn new(steps: Size) -> Self {
        Self {
            cells: Matrix::from_element(steps + 1, steps + 1, UNDEFINED),
        }
    }

    /// Number of time steps `N`.
    pub fn steps(&self) -> Size {
        self.cells.cols() - 1
    }

    /// Value at `(row, step)`, or `None` for a cell above the diagonal or
    /// outside the lattice.
    pub fn get(&self, row: Size, step: Size) -> Option<Real> {
        if step > self.steps() || row > step {
            None
        } else {
            Some(self.cells[(row, step)])
        }
    }

    /// Write the value at `(row, step)`.
    ///
    /// # Errors
    /// [`Error::IndexOutOfRange`] if the cell is above the diagonal or
    /// outside the lattice.
    pub fn set(&mut self, row: Size, step: Size, value: Real) -> Result<()> {
        if step > self.steps() {
            return Err(Error::IndexOutOfRange {
                index: step,
                size: self.steps() + 1,
            });
        }
        if row > step {
            return Err(Error::IndexOutOfRange {
                index: row,
                size: step + 1,
            });
        }
        self.cells[(row, step)] = value;
        Ok(())
    }

    /// The `step + 1` defined nodes of column `step`.
    pub fn column(&self, step: Size) -> &[Real] {
        &self.cells.column_slice(step)[..=step]
    }

    /// Mutable view of the `step + 1` defined nodes of column `step`.
    pub fn column_mut(&mut self, step: Size) -> &mut [Real] {
        &mut self.cells.column_slice_mut(step)[..=step]
    }

    /// Column `step` (mutable) together with column `step + 1` (read-only),
    /// each trimmed to its defined nodes.
    pub fn column_pair_mut(&mut self, step: Size) -> (&mut [Real], &[Real]) {
        let (current, next) = self.cells.adjacent_columns_mut(step);
        (&mut current[..=step], &next[..=step + 1])
    }

    /// Number of cells in column `step` that hold a value (are not NaN).
    pub fn valid_cells(&self, step: Size) -> Size {
        self.cells
            .column_slice(step)
            .iter()
            .filter(|x| !x.is_nan())
            .count()
    }

    /// Root node `(0, 0)`.
    pub fn root(&self) -> Real {
        self.cells[(0, 0)]
    }

    /// Borrow the dense storage.
    pub fn matrix(&self) -> &Matrix {
        &self.cells
    }

    /// Consume the lattice, returning the dense storage.
    pub fn into_matrix(self) -> Matrix {
        self.cells
    }
}

/// Renders the lattice as a table, one row per down-move count and one
/// column per step, with values rounded to two decimals and undefined cells
/// left blank.
impl fmt::Display for TriangularLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.steps();
        let width = (0..=n)
            .flat_map(|t| self.column(t).iter())
            .map(|v| format!("{v:.2}").len())
            .max()
            .unwrap_or(1)
            .max(format!("t={n}").len());

        write!(f, "{:>4}", "")?;
        for t in 0..=n {
            write!(f, " {:>width$}", format!("t={t}"))?;
        }
        for row in 0..=n {
            writeln!(f)?;
            write!(f, "{:>4}", format!("i={row}"))?;
            for t in 0..=n {
                match self.get(row, t) {
                    Some(v) => write!(f, " {v:>width$.2}")?,
                    None => write!(f, " {:>width$}", "")?,
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_lattice_is_all_undefined() {
        let lattice = TriangularLattice::new(3);
        assert_eq!(lattice.steps(), 3);
        assert_eq!(lattice.matrix().rows(), 4);
        assert!((0..=3).all(|t| lattice.valid_cells(t) == 0));
        assert_eq!(lattice.valid_cells(2), 0);
    }

    #[test]
    fn arena_size_is_checked() {
        assert_eq!(TriangularLattice::arena_cells(0), Some(1));
        assert_eq!(TriangularLattice::arena_cells(4), Some(25));
        assert_eq!(TriangularLattice::arena_cells(i32::MAX as Size), None);
        assert_eq!(TriangularLattice::arena_cells(usize::MAX / 2), None);
        assert_eq!(TriangularLattice::arena_cells(usize::MAX), None);
    }

    #[test]
    fn get_and_set_respect_the_diagonal() {
        let mut lattice = TriangularLattice::new(2);
        lattice.set(1, 2, 5.0).unwrap();
        assert_eq!(lattice.get(1, 2), Some(5.0));
        assert_eq!(lattice.get(2, 1), None);
        assert_eq!(lattice.get(0, 3), None);
        assert_eq!(
            lattice.set(2, 1, 1.0),
            Err(Error::IndexOutOfRange { index: 2, size: 2 })
        );
        assert_eq!(
            lattice.set(0, 3, 1.0),
            Err(Error::IndexOutOfRange { index: 3, size: 3 })
        );
    }

    #[test]
    fn columns_are_trimmed_to_the_triangle() {
        let mut lattice = TriangularLattice::new(3);
        lattice.column_mut(3).copy_from_slice(&[4.0, 3.0, 2.0, 1.0]);
        {
            let (current, next) = lattice.column_pair_mut(2);
            assert_eq!(current.len(), 3);
            assert_eq!(next, &[4.0, 3.0, 2.0, 1.0]);
            for i in 0..current.len() {
                current[i] = next[i] + next[i + 1];
            }
        }
        assert_eq!(lattice.column(2), &[7.0, 5.0, 3.0]);
        assert_eq!(lattice.valid_cells(2), 3);
        assert_eq!(lattice.valid_cells(3), 4);
        assert!(lattice.matrix()[(3, 2)].is_nan());
    }

    #[test]
    fn display_leaves_upper_triangle_blank() {
        let mut lattice = TriangularLattice::new(1);
        lattice.set(0, 0, 10.0).unwrap();
        lattice.set(0, 1, 12.5).unwrap();
        lattice.set(1, 1, 8.0).unwrap();
        let text = lattice.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("t=0") && lines[0].contains("t=1"));
        assert!(lines[1].starts_with(" i=0") && lines[1].contains("10.00"));
        assert!(lines[1].contains("12.50"));
        assert!(lines[2].starts_with(" i=1") && lines[2].contains("8.00"));
        assert!(!text.contains("NaN"));
    }
}

//! # bl-math
//!
//! Mathematical utilities: the dense [`Matrix`] newtype (over nalgebra)
//! that backs every lattice, and floating-point comparison helpers.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison.
pub mod comparison;

/// Dense column-major matrix.
pub mod matrix;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::close_enough;
pub use matrix::Matrix;

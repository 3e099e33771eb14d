//! # bl-methods
//!
//! Numerical methods: the bounded-range binomial tree, the triangular
//! lattice arena, and backward-induction pricing over both.
//!
//! # Modules
//!
//! * [`lattice`]: time grid, binomial tree, triangular lattice, roll-back

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial tree, triangular storage, backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    price_european, roll_back_european, BinomialTree, RolledBackLattice, TimeGrid,
    TriangularLattice,
};

//! # bl-core
//!
//! Core types and error definitions for binlattice.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: scalar type aliases and the error
//! enum with the `ensure_config!` macro.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure_config!` macro.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes, step counts and lattice indices.
pub type Size = usize;

/// A continuously-compounded rate expressed as a decimal (e.g. 0.05 = 5 %).
pub type Rate = Real;

/// A discount (or accumulation) factor.
pub type DiscountFactor = Real;

/// A price or value.
pub type Price = Real;

/// A probability in [0, 1].
pub type Probability = Real;

/// A time measurement in years.
pub type Time = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};

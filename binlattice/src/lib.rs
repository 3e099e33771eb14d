//! # binlattice
//!
//! Binomial lattice pricing of European options.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates, plus the configuration loading and text
//! reports used by the `binlattice` binary.
//!
//! ## Quick start
//!
//! ```rust
//! use binlattice::pricingengines::{calculate_option_price, LatticeParameters};
//!
//! let params = LatticeParameters::default().with_steps(4);
//! let pricing = calculate_option_price(&params).unwrap();
//! assert!(pricing.price > 0.0);
//! assert_eq!(pricing.option_values.valid_cells(4), 5);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use bl_core as core;

/// Dense matrix storage and float comparisons.
pub use bl_math as math;

/// Option payoffs, instruments, and the pricing engine trait.
pub use bl_instruments as instruments;

/// Binomial tree, triangular lattice, backward induction.
pub use bl_methods as methods;

/// Binomial lattice pricing engine.
pub use bl_pricingengines as pricingengines;

/// TOML configuration and command-line parameter overrides.
pub mod config;

/// Text reports: lattice tables, parity check, convergence sweep.
pub mod report;

//! # bl-pricingengines
//!
//! Pricing engines for European options on a bounded-range binomial
//! lattice.
//!
//! ## Engines
//!
//! - [`BinomialLatticeEngine`]: backward induction on a [`BinomialTree`](bl_methods::BinomialTree)
//! - [`calculate_option_price`]: one-call pricing from a flat [`LatticeParameters`] set,
//!   returning the root price together with both lattices

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod binomial_lattice_engine;

pub use binomial_lattice_engine::{
    calculate_option_price, option_price, BinomialLatticeEngine, LatticeParameters,
    LatticePricing,
};

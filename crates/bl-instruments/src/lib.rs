//! # bl-instruments
//!
//! Option payoffs, the European option instrument, and the
//! [`PricingEngine`] trait through which engines price it.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod instrument;
pub mod option;
pub mod payoff;

pub use instrument::{PricingEngine, PricingResults};
pub use option::{EuropeanOption, EuropeanOptionArguments};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff, StrikedPayoff};

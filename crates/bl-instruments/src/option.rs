//! European option instrument.
//!
//! The option lives over the horizon `[start_time, end_time]` (in years) and
//! can only be exercised at `end_time`.

use crate::instrument::{PricingEngine, PricingResults};
use crate::payoff::{OptionType, PlainVanillaPayoff, StrikedPayoff};
use bl_core::{errors::Result, Real, Time};
use std::sync::Arc;

// ────────────────────────────────────────────────────────────────────────────
// Option arguments (sent to pricing engines)
// ────────────────────────────────────────────────────────────────────────────

/// Arguments needed for pricing a European option.
#[derive(Debug, Clone)]
pub struct EuropeanOptionArguments {
    /// The payoff.
    pub payoff: Arc<dyn StrikedPayoff>,
    /// Valuation time.
    pub start_time: Time,
    /// Expiry time.
    pub end_time: Time,
}

impl EuropeanOptionArguments {
    /// Length of the pricing horizon, `end_time − start_time`.
    pub fn horizon(&self) -> Time {
        self.end_time - self.start_time
    }
}

// ────────────────────────────────────────────────────────────────────────────
// EuropeanOption
// ────────────────────────────────────────────────────────────────────────────

/// A European option on a single underlying asset.
#[derive(Debug, Clone)]
pub struct EuropeanOption {
    payoff: Arc<dyn StrikedPayoff>,
    start_time: Time,
    end_time: Time,
}

impl EuropeanOption {
    /// Create a new European option.
    pub fn new(payoff: Arc<dyn StrikedPayoff>, start_time: Time, end_time: Time) -> Self {
        Self {
            payoff,
            start_time,
            end_time,
        }
    }

    /// Convenience: a plain vanilla call/put.
    pub fn vanilla(option_type: OptionType, strike: Real, start_time: Time, end_time: Time) -> Self {
        Self::new(
            Arc::new(PlainVanillaPayoff::new(option_type, strike)),
            start_time,
            end_time,
        )
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.payoff.strike()
    }

    /// The option type (call/put).
    pub fn option_type(&self) -> OptionType {
        self.payoff.option_type()
    }

    /// The payoff.
    pub fn payoff(&self) -> &dyn StrikedPayoff {
        &*self.payoff
    }

    /// Valuation time.
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    /// Expiry time.
    pub fn end_time(&self) -> Time {
        self.end_time
    }

    /// Get the arguments for a pricing engine.
    pub fn arguments(&self) -> EuropeanOptionArguments {
        EuropeanOptionArguments {
            payoff: Arc::clone(&self.payoff),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Price this option using the given engine.
    pub fn price(
        &self,
        engine: &dyn PricingEngine<EuropeanOptionArguments>,
    ) -> Result<PricingResults> {
        engine.calculate(&self.arguments())
    }
}

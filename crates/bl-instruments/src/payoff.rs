//! Option payoffs.
//!
//! Payoffs describe the terminal payoff of an option as a function of the
//! underlying asset price.

use bl_core::{errors::Error, Real};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// A call option (right to buy).
    #[default]
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// `true` for calls.
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl From<bool> for OptionType {
    /// `true` maps to a call, `false` to a put.
    fn from(is_call: bool) -> Self {
        if is_call {
            OptionType::Call
        } else {
            OptionType::Put
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::InvalidArgument(format!(
                "unknown option type '{other}', expected call or put"
            ))),
        }
    }
}

/// Base trait for option payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;
}

/// A payoff depending on a strike price.
pub trait StrikedPayoff: Payoff {
    /// The strike price.
    fn strike(&self) -> Real;

    /// The option type (call / put).
    fn option_type(&self) -> OptionType;
}

/// Standard "plain vanilla" option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }
}

impl StrikedPayoff for PlainVanillaPayoff {
    fn strike(&self) -> Real {
        self.strike
    }

    fn option_type(&self) -> OptionType {
        self.option_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vanilla_call() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert!((p.value(110.0) - 10.0).abs() < 1e-15);
        assert!((p.value(90.0) - 0.0).abs() < 1e-15);
        assert!((p.value(100.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn plain_vanilla_put() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert!((p.value(90.0) - 10.0).abs() < 1e-15);
        assert!((p.value(110.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn option_type_parsing() {
        assert_eq!("call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("PUT".parse::<OptionType>(), Ok(OptionType::Put));
        assert_eq!("p".parse::<OptionType>(), Ok(OptionType::Put));
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn option_type_from_flag() {
        assert_eq!(OptionType::from(true), OptionType::Call);
        assert_eq!(OptionType::from(false), OptionType::Put);
        assert_eq!(OptionType::default(), OptionType::Call);
    }
}

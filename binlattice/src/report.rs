//! Plain-text reports printed by the `binlattice` binary.

use bl_core::{ensure_config, errors::Result, Price, Real, Size};
use bl_instruments::OptionType;
use bl_pricingengines::{option_price, LatticePricing, LatticeParameters};
use std::fmt;
use tracing::debug;

/// Largest step count whose lattices are still printed as tables.
pub const MAX_DISPLAY_STEPS: Size = 16;

/// Root price followed by the asset and option lattice tables.
pub fn render_lattices(params: &LatticeParameters, pricing: &LatticePricing) -> String {
    format!(
        "{} price: {:.6}\n\nAsset prices:\n{}\n\nOption values:\n{}\n",
        params.option_type, pricing.price, pricing.asset_prices, pricing.option_values
    )
}

/// Put-call parity check for one parameter set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParityCheck {
    /// Call price.
    pub call: Price,
    /// Put price with the same strike.
    pub put: Price,
    /// `S − K·e^{−r(T − t)}`.
    pub forward_intrinsic: Price,
}

impl ParityCheck {
    /// Price the call and the put for `params`, ignoring its option type.
    pub fn run(params: &LatticeParameters) -> Result<Self> {
        let call = option_price(&params.with_option_type(OptionType::Call))?;
        let put = option_price(&params.with_option_type(OptionType::Put))?;
        let forward_intrinsic =
            params.start_price - params.option_strike * (-params.r * params.horizon()).exp();
        Ok(Self {
            call,
            put,
            forward_intrinsic,
        })
    }

    /// `(call − put) − (S − K·e^{−r(T − t)})`.
    pub fn gap(&self) -> Real {
        (self.call - self.put) - self.forward_intrinsic
    }
}

impl fmt::Display for ParityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "call            {:>14.8}", self.call)?;
        writeln!(f, "put             {:>14.8}", self.put)?;
        writeln!(f, "call - put      {:>14.8}", self.call - self.put)?;
        writeln!(f, "S - K*exp(-rT)  {:>14.8}", self.forward_intrinsic)?;
        write!(f, "gap             {:>14.3e}", self.gap())
    }
}

/// One row of a convergence sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceRow {
    /// Number of time steps.
    pub steps: Size,
    /// Root price.
    pub price: Price,
    /// Change from the previous row, if any.
    pub change: Option<Real>,
}

/// Prices at each step count in `steps`, in the given order.
pub fn convergence(params: &LatticeParameters, steps: &[Size]) -> Result<Vec<ConvergenceRow>> {
    ensure_config!(!steps.is_empty(), "convergence sweep needs at least one step count");
    let mut rows: Vec<ConvergenceRow> = Vec::with_capacity(steps.len());
    for &n in steps {
        let price = option_price(&params.with_steps(n))?;
        let change = rows.last().map(|prev| price - prev.price);
        debug!(steps = n, price, "convergence point");
        rows.push(ConvergenceRow {
            steps: n,
            price,
            change,
        });
    }
    Ok(rows)
}

/// Table of a convergence sweep.
pub fn render_convergence(rows: &[ConvergenceRow]) -> String {
    let mut out = format!("{:>10} {:>18} {:>14}\n", "steps", "price", "change");
    for row in rows {
        let change = match row.change {
            Some(c) => format!("{c:.3e}"),
            None => "-".to_string(),
        };
        out.push_str(&format!("{:>10} {:>18.12} {:>14}\n", row.steps, row.price, change));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bl_pricingengines::calculate_option_price;

    #[test]
    fn parity_gap_is_tiny() {
        let check = ParityCheck::run(&LatticeParameters::default().with_steps(200)).unwrap();
        assert!(check.gap().abs() < 1e-9, "{check}");
        assert_relative_eq!(check.forward_intrinsic, 4.877_057_549_928_594, epsilon = 1e-12);
    }

    #[test]
    fn convergence_rows_chain_changes() {
        let rows = convergence(&LatticeParameters::default(), &[10, 100]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].change, None);
        assert_relative_eq!(rows[0].price, 5.629_948_333_309_783, epsilon = 1e-10);
        assert_relative_eq!(rows[1].change.unwrap(), rows[1].price - rows[0].price);

        let table = render_convergence(&rows);
        assert_eq!(table.lines().count(), 3);
        assert!(table.lines().nth(1).unwrap().trim_end().ends_with('-'));
    }

    #[test]
    fn empty_sweep_is_rejected() {
        assert!(convergence(&LatticeParameters::default(), &[]).is_err());
    }

    #[test]
    fn lattice_report_has_both_tables() {
        let params = LatticeParameters::default().with_steps(4);
        let pricing = calculate_option_price(&params).unwrap();
        let text = render_lattices(&params, &pricing);
        assert!(text.starts_with("Call price: 6.812114"));
        assert!(text.contains("Asset prices:"));
        assert!(text.contains("Option values:"));
        assert!(text.contains("i=4"));
    }
}

//! Binomial lattice engine for European options.
//!
//! The asset starts at `start_price` and over `N` equal steps can at most
//! reach `start_price · max_up` (all up-moves) or `start_price · max_down`
//! (all down-moves). With `Δt = (end − start) / N`:
//!
//! $$u = \text{max\_up}^{1/N}, \quad d = \text{max\_down}^{1/N}, \quad
//!   pv = e^{-r\Delta t}, \quad fv = e^{r\Delta t}$$
//!
//! and each node is valued as
//!
//! $$V_{i,t} = pv\left(\frac{fv - d}{u - d} V_{i,t+1} + \frac{u - fv}{u - d} V_{i+1,t+1}\right)$$
//!
//! starting from the payoff at `t = N`.

use bl_core::{
    ensure_config,
    errors::{Error, Result},
    DiscountFactor, Price, Rate, Real, Size, Time,
};
use bl_instruments::{
    EuropeanOption, EuropeanOptionArguments, OptionType, Payoff, PricingEngine, PricingResults,
};
use bl_math::Matrix;
use bl_methods::{price_european, roll_back_european, BinomialTree, TimeGrid, TriangularLattice};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Above this many cells (both lattices together) a full roll-back is
/// reported as memory-heavy.
const LARGE_LATTICE_CELLS: Size = 10_000_000;

// ─── Parameters ───────────────────────────────────────────────────────────────

/// Flat parameter set for one pricing run.
///
/// Every field has a default, so a configuration file may give any subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeParameters {
    /// Valuation time (years).
    pub start_time: Time,
    /// Expiry time (years).
    pub end_time: Time,
    /// Number of time steps `N`.
    pub n_time_periods: Size,
    /// Continuously-compounded risk-free rate.
    pub r: Rate,
    /// Cumulative up-move factor over the whole horizon.
    pub max_up: Real,
    /// Cumulative down-move factor over the whole horizon.
    pub max_down: Real,
    /// Asset price at `start_time`.
    pub start_price: Price,
    /// Call or put.
    pub option_type: OptionType,
    /// Strike price.
    pub option_strike: Price,
}

impl Default for LatticeParameters {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            end_time: 1.0,
            n_time_periods: 10_000,
            r: 0.05,
            max_up: 1.2,
            max_down: 0.8,
            start_price: 100.0,
            option_type: OptionType::Call,
            option_strike: 100.0,
        }
    }
}

impl LatticeParameters {
    /// `true` when pricing a call.
    pub fn is_call_option(&self) -> bool {
        self.option_type.is_call()
    }

    /// Same parameters with a different number of steps.
    pub fn with_steps(self, n_time_periods: Size) -> Self {
        Self {
            n_time_periods,
            ..self
        }
    }

    /// Same parameters with a different option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }

    /// Same parameters with a different strike.
    pub fn with_strike(self, option_strike: Price) -> Self {
        Self {
            option_strike,
            ..self
        }
    }

    /// Length of the pricing horizon, `end_time − start_time`.
    pub fn horizon(&self) -> Time {
        self.end_time - self.start_time
    }

    /// The engine half of the parameters.
    pub fn engine(&self) -> BinomialLatticeEngine {
        BinomialLatticeEngine::new(
            self.start_price,
            self.r,
            self.max_up,
            self.max_down,
            self.n_time_periods,
        )
    }

    /// The instrument half of the parameters.
    pub fn option(&self) -> EuropeanOption {
        EuropeanOption::vanilla(
            self.option_type,
            self.option_strike,
            self.start_time,
            self.end_time,
        )
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Root price plus the asset and option value lattices of one run.
#[derive(Debug, Clone)]
pub struct LatticePricing {
    /// Option value at the root node.
    pub price: Price,
    /// Underlying price at every node.
    pub asset_prices: TriangularLattice,
    /// Option value at every node.
    pub option_values: TriangularLattice,
}

impl LatticePricing {
    /// Split into `(price, asset lattice, option lattice)` as dense
    /// `(N + 1) × (N + 1)` matrices with NaN above the diagonal.
    pub fn into_parts(self) -> (Price, Matrix, Matrix) {
        (
            self.price,
            self.asset_prices.into_matrix(),
            self.option_values.into_matrix(),
        )
    }
}

// ─── Engine ───────────────────────────────────────────────────────────────────

/// Prices European options on a bounded-range binomial tree.
#[derive(Debug, Clone)]
pub struct BinomialLatticeEngine {
    spot: Price,
    rate: Rate,
    max_up: Real,
    max_down: Real,
    steps: Size,
}

impl BinomialLatticeEngine {
    /// Create a new engine.
    pub fn new(spot: Price, rate: Rate, max_up: Real, max_down: Real, steps: Size) -> Self {
        Self {
            spot,
            rate,
            max_up,
            max_down,
            steps,
        }
    }

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Validate the inputs and build the tree and per-step discount factor.
    fn setup(&self, args: &EuropeanOptionArguments) -> Result<(BinomialTree, DiscountFactor)> {
        let strike = args.payoff.strike();
        ensure_config!(strike.is_finite(), "strike must be finite, got {strike}");

        let grid = TimeGrid::uniform(args.start_time, args.end_time, self.steps)?;
        if grid.horizon() <= 0.0 {
            warn!(
                start_time = args.start_time,
                end_time = args.end_time,
                "non-positive pricing horizon, the lattice has no time to evolve forward"
            );
        }

        let tree = BinomialTree::bounded_range(
            self.spot,
            self.rate,
            grid.dt(),
            grid.steps(),
            self.max_up,
            self.max_down,
        )?;
        let discount = (-self.rate * grid.dt()).exp();

        debug!(
            payoff = args.payoff.name(),
            strike,
            steps = self.steps,
            dt = grid.dt(),
            up = tree.up(),
            down = tree.down(),
            pv = discount,
            fv = tree.growth(),
            p_up = tree.probability(0, 0, 1),
            p_down = tree.probability(0, 0, 0),
            degenerate = tree.is_degenerate(),
            "binomial lattice set up"
        );
        Ok((tree, discount))
    }

    /// Root price only, using O(N) memory.
    pub fn npv(&self, args: &EuropeanOptionArguments) -> Result<Price> {
        let (tree, discount) = self.setup(args)?;
        let payoff = |s: Real| args.payoff.value(s);
        Ok(price_european(&tree, &payoff, discount))
    }

    /// Root price together with the full asset and option lattices.
    pub fn lattices(&self, args: &EuropeanOptionArguments) -> Result<LatticePricing> {
        let (tree, discount) = self.setup(args)?;

        let arena = TriangularLattice::arena_cells(self.steps).ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "{} time steps: the lattices do not fit in memory, use the price-only roll-back",
                self.steps
            ))
        })?;
        let cells = 2 * arena;
        if cells > LARGE_LATTICE_CELLS {
            warn!(
                steps = self.steps,
                cells,
                megabytes = cells * std::mem::size_of::<Real>() / (1 << 20),
                "allocating large lattices, consider the price-only roll-back"
            );
        }

        let payoff = |s: Real| args.payoff.value(s);
        let rolled = roll_back_european(&tree, &payoff, discount);
        debug!(price = rolled.root_value(), "lattice roll-back complete");
        Ok(LatticePricing {
            price: rolled.root_value(),
            asset_prices: rolled.assets,
            option_values: rolled.values,
        })
    }
}

impl PricingEngine<EuropeanOptionArguments> for BinomialLatticeEngine {
    fn calculate(&self, args: &EuropeanOptionArguments) -> Result<PricingResults> {
        let (tree, discount) = self.setup(args)?;
        let payoff = |s: Real| args.payoff.value(s);
        let npv = price_european(&tree, &payoff, discount);

        Ok(PricingResults::from_npv(npv)
            .with_result("up_factor", tree.up())
            .with_result("down_factor", tree.down())
            .with_result("up_probability", tree.probability(0, 0, 1))
            .with_result("down_probability", tree.probability(0, 0, 0))
            .with_result("discount_factor", discount))
    }
}

// ─── One-call entry points ────────────────────────────────────────────────────

/// Build both lattices for `params` and return them with the root price.
///
/// # Errors
/// * `InvalidConfiguration` for zero steps, a non-positive start price,
///   non-positive or inverted range bounds, or non-finite inputs.
/// * `ModelInconsistency` when the implied risk-neutral weights leave [0, 1].
pub fn calculate_option_price(params: &LatticeParameters) -> Result<LatticePricing> {
    params.engine().lattices(&params.option().arguments())
}

/// Root price for `params` without materialising the lattices.
pub fn option_price(params: &LatticeParameters) -> Result<Price> {
    params.engine().npv(&params.option().arguments())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bl_core::errors::Error;

    fn small() -> LatticeParameters {
        LatticeParameters::default().with_steps(4)
    }

    #[test]
    fn defaults_match_reference_run() {
        let p = LatticeParameters::default();
        assert_eq!(p.n_time_periods, 10_000);
        assert_eq!(p.start_price, 100.0);
        assert_eq!(p.option_strike, 100.0);
        assert!(p.is_call_option());
        assert_eq!(p.horizon(), 1.0);
    }

    #[test]
    fn four_step_call_is_populated() {
        let pricing = calculate_option_price(&small()).unwrap();
        assert!(pricing.price > 0.0 && pricing.price < 20.0);
        assert_eq!(pricing.option_values.root(), pricing.price);
        assert_eq!(pricing.asset_prices.steps(), 4);
        assert_relative_eq!(pricing.asset_prices.root(), 100.0);
    }

    #[test]
    fn price_only_matches_full_lattice() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let params = small().with_steps(40).with_option_type(option_type);
            let full = calculate_option_price(&params).unwrap();
            assert_eq!(option_price(&params).unwrap(), full.price);
        }
    }

    #[test]
    fn engine_reports_tree_constants() {
        let params = small();
        let results = params.option().price(&params.engine()).unwrap();
        let pu = results.result("up_probability").unwrap();
        let pd = results.result("down_probability").unwrap();
        assert_relative_eq!(pu + pd, 1.0, epsilon = 1e-14);
        assert_relative_eq!(
            results.result("up_factor").unwrap().powi(4),
            1.2,
            max_relative = 1e-12
        );
        assert_relative_eq!(results.npv, option_price(&params).unwrap());
    }

    #[test]
    fn zero_steps_fail_fast() {
        let err = calculate_option_price(&small().with_steps(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn non_positive_start_price_fails_fast() {
        let params = LatticeParameters {
            start_price: 0.0,
            ..small()
        };
        assert!(matches!(
            option_price(&params),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn non_finite_strike_fails_fast() {
        let params = small().with_strike(f64::INFINITY);
        assert!(matches!(
            calculate_option_price(&params),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn into_parts_returns_dense_square_matrices() {
        let (price, assets, values) = calculate_option_price(&small()).unwrap().into_parts();
        assert_eq!((assets.rows(), assets.cols()), (5, 5));
        assert_eq!((values.rows(), values.cols()), (5, 5));
        assert_eq!(values[(0, 0)], price);
        assert!(assets[(1, 0)].is_nan());
    }
}

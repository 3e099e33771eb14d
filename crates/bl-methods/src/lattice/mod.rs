//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`BinomialTree`]: recombining tree whose per-step factors are the
//!   `N`-th roots of a cumulative up/down range
//! * [`TriangularLattice`]: dense square arena holding one value per node
//! * [`TimeGrid`]: uniform grid of time points over the pricing horizon
//! * [`price_european`]: backward induction keeping a single column
//! * [`roll_back_european`]: backward induction materialising both lattices
//!
//! Both roll-backs evaluate the same expression in the same order, so the
//! root of [`roll_back_european`] equals [`price_european`] bit for bit.

pub mod binomial_tree;
pub mod triangular;

pub use binomial_tree::BinomialTree;
pub use triangular::TriangularLattice;

use bl_core::{ensure_config, errors::Result, DiscountFactor, Probability, Real, Size, Time};
use tracing::trace;

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points used by lattice methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    dt: Time,
    steps: Size,
}

impl TimeGrid {
    /// Create a uniform grid from `start` to `end` with `steps` intervals.
    ///
    /// `end < start` is accepted and yields a negative step.
    pub fn uniform(start: Time, end: Time, steps: Size) -> Result<Self> {
        ensure_config!(steps > 0, "number of time steps must be positive");
        ensure_config!(
            start.is_finite() && end.is_finite(),
            "grid bounds must be finite, got [{start}, {end}]"
        );
        Ok(Self {
            dt: (end - start) / steps as Real,
            steps,
        })
    }

    /// Number of steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Length of every step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Length of the whole grid, `end − start`.
    pub fn horizon(&self) -> Time {
        self.dt * self.steps as Real
    }
}

// ─── Backward induction ───────────────────────────────────────────────────────

/// Asset and option lattices produced by [`roll_back_european`].
#[derive(Debug, Clone)]
pub struct RolledBackLattice {
    /// Underlying price at every node.
    pub assets: TriangularLattice,
    /// Discounted risk-neutral option value at every node.
    pub values: TriangularLattice,
}

impl RolledBackLattice {
    /// Option value at the root node.
    pub fn root_value(&self) -> Real {
        self.values.root()
    }
}

/// One backward step: `current[i] = discount · (pu · next[i] + pd · next[i + 1])`.
#[cfg(not(feature = "parallel"))]
fn discount_column(
    current: &mut [Real],
    next: &[Real],
    pu: Probability,
    pd: Probability,
    discount: DiscountFactor,
) {
    for (i, value) in current.iter_mut().enumerate() {
        *value = discount * (pu * next[i] + pd * next[i + 1]);
    }
}

#[cfg(feature = "parallel")]
fn discount_column(
    current: &mut [Real],
    next: &[Real],
    pu: Probability,
    pd: Probability,
    discount: DiscountFactor,
) {
    use rayon::prelude::*;

    current.par_iter_mut().enumerate().for_each(|(i, value)| {
        *value = discount * (pu * next[i] + pd * next[i + 1]);
    });
}

/// Price a European option by backward induction on a binomial tree,
/// keeping only one column of values alive.
///
/// # Arguments
/// * `tree`: the binomial tree (already constructed)
/// * `payoff`: terminal payoff function `S → value` (e.g. `|s| (s - K).max(0.0)`)
/// * `discount`: per-step discount factor, typically `exp(−r · Δt)`
pub fn price_european(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
) -> Real {
    let n = tree.steps();
    let pu = tree.probability(0, 0, 1);
    let pd = tree.probability(0, 0, 0);

    // Terminal values at maturity
    let mut values: Vec<Real> = (0..tree.size(n))
        .map(|i| payoff(tree.underlying(n, i)))
        .collect();

    // Roll back through the tree; values[i + 1] is still the step-(t + 1)
    // value when values[i] is overwritten.
    for t in (0..n).rev() {
        for i in 0..tree.size(t) {
            values[i] = discount * (pu * values[i] + pd * values[i + 1]);
        }
    }

    values[0]
}

/// Price a European option by backward induction, materialising the asset
/// and option value at every node.
///
/// Columns are filled from `t = N` down to `t = 0`; column `t` is only
/// computed once column `t + 1` is complete.
pub fn roll_back_european(
    tree: &BinomialTree,
    payoff: &dyn Fn(Real) -> Real,
    discount: DiscountFactor,
) -> RolledBackLattice {
    let n = tree.steps();
    let pu = tree.probability(0, 0, 1);
    let pd = tree.probability(0, 0, 0);
    let mut assets = TriangularLattice::new(n);
    let mut values = TriangularLattice::new(n);

    for t in (0..=n).rev() {
        for (i, s) in assets.column_mut(t).iter_mut().enumerate() {
            *s = tree.underlying(t, i);
        }

        if t == n {
            let terminal = assets.column(n);
            for (v, &s) in values.column_mut(n).iter_mut().zip(terminal) {
                *v = payoff(s);
            }
        } else {
            let (current, next) = values.column_pair_mut(t);
            discount_column(current, next, pu, pd, discount);
        }
        trace!(step = t, nodes = t + 1, "lattice column rolled back");
    }

    RolledBackLattice { assets, values }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

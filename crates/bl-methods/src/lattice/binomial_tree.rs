//! Recombining binomial tree with bounded cumulative range.
//!
//! The tree is parameterised by the total multiplicative range the asset
//! could cover over the whole horizon: `max_up` if it moved up at every step
//! and `max_down` if it moved down at every step. The per-step factors are
//! the `N`-th roots of these bounds:
//!
//! $$u = \text{max\_up}^{1/N}, \qquad d = \text{max\_down}^{1/N}$$
//!
//! and the risk-neutral weights follow from no-arbitrage with the one-step
//! accumulation factor $g = e^{r\Delta t}$:
//!
//! $$p_u = \frac{g - d}{u - d}, \qquad p_d = \frac{u - g}{u - d}$$
//!
//! Node `(t, i)` is the state after `i` down-moves and `t − i` up-moves,
//! so an up-move keeps the row index and a down-move goes one row down.

use bl_core::{ensure_config, errors::Error, errors::Result, Probability, Rate, Real, Size, Time};
use bl_math::close_enough;

/// Slack allowed when checking that the risk-neutral weights lie in [0, 1].
const PROBABILITY_TOLERANCE: Real = 1e-12;

/// Largest supported step count; node exponents must fit in an `i32`.
pub const MAX_STEPS: Size = i32::MAX as Size;

/// A recombining binomial tree over `steps` equal time steps.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    x0: Real,
    steps: Size,
    up: Real,
    down: Real,
    growth: Real,
    pu: Probability,
    pd: Probability,
}

impl BinomialTree {
    /// Build the tree from the cumulative range bounds.
    ///
    /// # Errors
    /// * [`Error::InvalidConfiguration`] if `steps` is zero or above
    ///   [`MAX_STEPS`], `x0 <= 0`, either bound is non-positive,
    ///   `max_up < max_down`, or any input is not finite.
    /// * [`Error::ModelInconsistency`] if `d ≤ e^{rΔt} ≤ u` fails, i.e. the
    ///   implied up/down weights fall outside [0, 1].
    ///
    /// When `u == d` (to within a few ulps) the tree is degenerate: every
    /// node of a column carries the same price and all mass goes on the up
    /// branch. Only a flat path (`u = 1`) or one growing at the risk-free
    /// rate (`u = e^{rΔt}`) is accepted; any other common factor is a
    /// [`Error::ModelInconsistency`].
    pub fn bounded_range(
        x0: Real,
        rate: Rate,
        dt: Time,
        steps: Size,
        max_up: Real,
        max_down: Real,
    ) -> Result<Self> {
        ensure_config!(steps > 0, "number of time steps must be positive");
        ensure_config!(
            steps <= MAX_STEPS,
            "number of time steps must not exceed {MAX_STEPS}, got {steps}"
        );
        ensure_config!(
            x0.is_finite() && x0 > 0.0,
            "start price must be positive and finite, got {x0}"
        );
        ensure_config!(rate.is_finite(), "rate must be finite, got {rate}");
        ensure_config!(dt.is_finite(), "time step must be finite, got {dt}");
        ensure_config!(
            max_up.is_finite() && max_up > 0.0,
            "max_up must be positive and finite, got {max_up}"
        );
        ensure_config!(
            max_down.is_finite() && max_down > 0.0,
            "max_down must be positive and finite, got {max_down}"
        );
        ensure_config!(
            max_up >= max_down,
            "max_up ({max_up}) must not be below max_down ({max_down})"
        );

        let n = steps as Real;
        let up = max_up.powf(1.0 / n);
        let down = max_down.powf(1.0 / n);
        let growth = (rate * dt).exp();

        let (pu, pd) = if close_enough(up, down, 4) {
            let flat = close_enough(up, 1.0, 4);
            let at_rate = (growth - up).abs() <= PROBABILITY_TOLERANCE * up;
            if !(flat || at_rate) {
                return Err(Error::ModelInconsistency(format!(
                    "zero-width range with u = d = {up} admits no risk-neutral weights \
                     (e^(r dt) = {growth})"
                )));
            }
            (1.0, 0.0)
        } else {
            let pu = (growth - down) / (up - down);
            let pd = (up - growth) / (up - down);
            let bounds = -PROBABILITY_TOLERANCE..=1.0 + PROBABILITY_TOLERANCE;
            let in_range = |p: Real| bounds.contains(&p);
            if !(in_range(pu) && in_range(pd)) {
                return Err(Error::ModelInconsistency(format!(
                    "risk-neutral weights out of [0, 1]: p_up = {pu}, p_down = {pd} \
                     (d = {down}, e^(r dt) = {growth}, u = {up})"
                )));
            }
            (pu, pd)
        };

        Ok(Self {
            x0,
            steps,
            up,
            down,
            growth,
            pu,
            pd,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Per-step up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Per-step down factor `d`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// One-step accumulation factor `e^{rΔt}`.
    pub fn growth(&self) -> Real {
        self.growth
    }

    /// `true` for a zero-width range (`u ≈ d`).
    pub fn is_degenerate(&self) -> bool {
        close_enough(self.up, self.down, 4)
    }

    /// Number of nodes at time step `t` (always `t + 1`).
    pub fn size(&self, t: Size) -> Size {
        t + 1
    }

    /// Underlying value at node `(t, row)`: `x0 · u^(t−row) · d^row`.
    pub fn underlying(&self, t: Size, row: Size) -> Real {
        debug_assert!(row <= t, "row {row} above the diagonal at step {t}");
        self.x0 * self.up.powi((t - row) as i32) * self.down.powi(row as i32)
    }

    /// Transition probability for `branch` (0 = down, 1 = up).
    pub fn probability(&self, _t: Size, _row: Size, branch: Size) -> Probability {
        if branch == 1 {
            self.pu
        } else {
            self.pd
        }
    }
}

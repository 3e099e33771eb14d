//! Floating-point comparison.

use bl_core::Real;

/// Return `true` if `a` and `b` are at most `n` ulps of the larger
/// magnitude apart.
#[inline]
pub fn close_enough(a: Real, b: Real, n: u32) -> bool {
    if a == b {
        return true;
    }
    let tolerance = a.abs().max(b.abs()) * Real::EPSILON * Real::from(n);
    (a - b).abs() <= tolerance
}

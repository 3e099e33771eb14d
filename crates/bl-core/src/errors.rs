//! Error types for binlattice.
//!
//! A single `thiserror`-derived enum covers every failure the pricer can
//! report. Input validation goes through [`ensure_config!`](crate::ensure_config).

use thiserror::Error;

/// The top-level error type used throughout binlattice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Invalid pricing configuration, detected before any work is done.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The model parameters admit no risk-neutral weights in [0, 1].
    #[error("model inconsistency: {0}")]
    ModelInconsistency(String),

    /// Index out of range.
    #[error("index ({index}) out of range [0, {size})")]
    IndexOutOfRange {
        /// The index that was out of range.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout binlattice.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidConfiguration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use bl_core::{ensure_config, errors::Error};
/// fn steps(n: usize) -> bl_core::errors::Result<usize> {
///     ensure_config!(n > 0, "number of time steps must be positive");
///     Ok(n)
/// }
/// assert!(steps(4).is_ok());
/// assert!(matches!(steps(0), Err(Error::InvalidConfiguration(_))));
/// ```
#[macro_export]
macro_rules! ensure_config {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidConfiguration(
                format!($($msg)*)
            ));
        }
    };
}

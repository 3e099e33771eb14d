//! Configuration management.
//!
//! Settings come from a TOML file and are then overridden by command-line
//! flags:
//!
//! ```toml
//! log_level = "debug"
//!
//! [lattice]
//! n_time_periods = 4
//! option_type = "put"
//! option_strike = 95.0
//! ```
//!
//! Every key is optional; missing ones take the documented defaults.

use bl_core::{Price, Rate, Real, Size, Time};
use bl_instruments::OptionType;
use bl_pricingengines::LatticeParameters;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "binlattice.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// The configuration file could not be read.
    #[error("Cannot read configuration file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`AppConfig`].
    #[error("Invalid configuration file {path}: {source}")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

/// Log levels accepted in the configuration file and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Application configuration: logging plus the pricing parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Lattice pricing parameters
    pub lattice: LatticeParameters,
}

impl AppConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    ///
    /// An explicitly given file that cannot be read is an error.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::load(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Command-line overrides for individual pricing parameters.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LatticeOverrides {
    /// Valuation time in years
    #[arg(long)]
    pub start_time: Option<Time>,

    /// Expiry time in years
    #[arg(long)]
    pub end_time: Option<Time>,

    /// Number of time steps
    #[arg(short = 'n', long)]
    pub steps: Option<Size>,

    /// Continuously-compounded risk-free rate
    #[arg(short, long, allow_hyphen_values = true)]
    pub rate: Option<Rate>,

    /// Cumulative up-move factor over the horizon
    #[arg(long)]
    pub max_up: Option<Real>,

    /// Cumulative down-move factor over the horizon
    #[arg(long)]
    pub max_down: Option<Real>,

    /// Asset price at the valuation time
    #[arg(short, long)]
    pub spot: Option<Price>,

    /// Option type (call or put)
    #[arg(short = 't', long)]
    pub option_type: Option<OptionType>,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: Option<Price>,
}

impl LatticeOverrides {
    /// Apply the overrides that were given on top of `params`.
    pub fn apply(&self, params: LatticeParameters) -> LatticeParameters {
        LatticeParameters {
            start_time: self.start_time.unwrap_or(params.start_time),
            end_time: self.end_time.unwrap_or(params.end_time),
            n_time_periods: self.steps.unwrap_or(params.n_time_periods),
            r: self.rate.unwrap_or(params.r),
            max_up: self.max_up.unwrap_or(params.max_up),
            max_down: self.max_down.unwrap_or(params.max_down),
            start_price: self.spot.unwrap_or(params.start_price),
            option_type: self.option_type.unwrap_or(params.option_type),
            option_strike: self.strike.unwrap_or(params.option_strike),
        }
    }
}

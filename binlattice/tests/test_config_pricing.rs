//! Configuration files driving full pricing runs through the façade.

use approx::assert_relative_eq;
use binlattice::config::{AppConfig, LatticeOverrides, LogLevel};
use binlattice::instruments::OptionType;
use binlattice::pricingengines::{calculate_option_price, option_price};
use binlattice::report::{convergence, ParityCheck};
use std::io::Write;

fn config_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn four_step_put_from_file() {
    let file = config_file(
        r#"
        log_level = "warn"

        [lattice]
        n_time_periods = 4
        option_type = "put"
        "#,
    );
    let config = AppConfig::resolve(Some(file.path())).unwrap();
    assert_eq!(config.log_level, LogLevel::Warn);

    let pricing = calculate_option_price(&config.lattice).unwrap();
    assert_relative_eq!(pricing.price, 1.935_056_903_573_129, epsilon = 1e-10);
    assert_eq!(pricing.asset_prices.steps(), 4);
}

#[test]
fn command_line_overrides_win_over_file() {
    let file = config_file("[lattice]\nn_time_periods = 50\noption_strike = 120.0\n");
    let config = AppConfig::load(file.path()).unwrap();
    let overrides = LatticeOverrides {
        steps: Some(4),
        strike: Some(100.0),
        ..Default::default()
    };
    let params = overrides.apply(config.lattice);
    assert_eq!(params.n_time_periods, 4);
    assert_relative_eq!(
        option_price(&params).unwrap(),
        6.812_114_453_501_748,
        epsilon = 1e-10
    );
}

#[test]
fn invalid_parameters_in_file_surface_as_pricing_errors() {
    let file = config_file("[lattice]\nmax_up = 0.5\nmax_down = 0.9\n");
    let config = AppConfig::load(file.path()).unwrap();
    assert!(option_price(&config.lattice).is_err());
}

#[test]
fn parity_and_convergence_reports_agree_on_defaults() {
    let params = AppConfig::default().lattice;
    assert_eq!(params.option_type, OptionType::Call);

    let check = ParityCheck::run(&params.with_steps(1000)).unwrap();
    assert!(check.gap().abs() < 1e-9);

    let rows = convergence(&params, &[10, 100, 1000]).unwrap();
    let changes: Vec<f64> = rows.iter().filter_map(|r| r.change).map(f64::abs).collect();
    assert_eq!(changes.len(), 2);
    assert!(changes[1] < changes[0]);
    assert_relative_eq!(rows[2].price, 4.877_057_549_930_948, epsilon = 1e-8);
}

//! Command-line front end for the binomial lattice pricer.

use anyhow::{bail, Context, Result};
use binlattice::config::{AppConfig, LatticeOverrides, LogLevel};
use binlattice::pricingengines::{calculate_option_price, option_price};
use binlattice::report::{self, ParityCheck, MAX_DISPLAY_STEPS};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "binlattice")]
#[command(about = "Price European options on a bounded-range binomial lattice")]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to ./binlattice.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price one option
    Price {
        #[command(flatten)]
        overrides: LatticeOverrides,

        /// Build both lattices and print them as tables
        #[arg(long)]
        show_lattices: bool,
    },
    /// Compare call minus put with the discounted forward intrinsic value
    Parity {
        #[command(flatten)]
        overrides: LatticeOverrides,
    },
    /// Price at increasing step counts
    Convergence {
        #[command(flatten)]
        overrides: LatticeOverrides,

        /// Comma-separated step counts
        #[arg(long = "sweep", value_delimiter = ',', default_value = "10,100,1000,10000")]
        sweep: Vec<usize>,
    },
}

fn init_tracing(fallback: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.config.as_deref())?;
    init_tracing(cli.log_level.unwrap_or(config.log_level));

    match cli.command {
        Commands::Price {
            overrides,
            show_lattices,
        } => {
            let params = overrides.apply(config.lattice);
            info!(?params, show_lattices, "pricing");
            if show_lattices {
                if params.n_time_periods > MAX_DISPLAY_STEPS {
                    bail!(
                        "--show-lattices needs at most {MAX_DISPLAY_STEPS} steps, got {}",
                        params.n_time_periods
                    );
                }
                let pricing = calculate_option_price(&params).context("pricing failed")?;
                print!("{}", report::render_lattices(&params, &pricing));
            } else {
                let price = option_price(&params).context("pricing failed")?;
                println!("{} price: {price:.12}", params.option_type);
            }
        }
        Commands::Parity { overrides } => {
            let params = overrides.apply(config.lattice);
            info!(?params, "put-call parity check");
            let check = ParityCheck::run(&params).context("parity check failed")?;
            println!("{check}");
        }
        Commands::Convergence { overrides, sweep } => {
            let params = overrides.apply(config.lattice);
            info!(?params, ?sweep, "convergence sweep");
            let rows = report::convergence(&params, &sweep).context("convergence sweep failed")?;
            print!("{}", report::render_convergence(&rows));
        }
    }

    Ok(())
}

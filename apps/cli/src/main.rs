//! # avquote
//!
//! Prices AV room bills of quantities and writes client proposal workbooks.
//!
//! ## Usage
//! ```text
//! avquote export project.json --currency INR --margin 15
//! avquote totals project.json --json
//! avquote config init
//! avquote config show
//! avquote currencies
//! ```
//!
//! ## Pipeline
//! ```text
//! project.json ──► validate ──► resolve rate ──► price ──► render xlsx
//!                                   │
//!                                   └─ lookup failure: warn, use 1.0
//! ```

mod cli;
mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Export(args) => commands::export::execute(args).await,
        Commands::Totals(args) => commands::totals::execute(args).await,
        Commands::Config(cmd) => commands::config::execute(cmd),
        Commands::Currencies => commands::currencies::execute(),
    }
}

/// Sets up logging to stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,reqwest=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

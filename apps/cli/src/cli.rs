use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "avquote")]
#[command(author, version, about = "Price AV room BOQs and write proposal workbooks", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Price a project and write the proposal workbook
    Export(ExportArgs),

    /// Price a project and print room and project totals
    Totals(TotalsArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// List currencies with known symbols
    Currencies,
}

/// Options shared by every command that prices a project.
#[derive(Args, Debug, Clone)]
pub struct PricingArgs {
    /// Project JSON file (client details and rooms)
    pub input: PathBuf,

    /// Target currency, overriding the config (e.g. INR)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Default margin percent for items without their own
    #[arg(short, long)]
    pub margin: Option<Decimal>,

    /// Config file path
    #[arg(long, env = "AVQUOTE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub pricing: PricingArgs,

    /// Output directory, overriding the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TotalsArgs {
    #[command(flatten)]
    pub pricing: PricingArgs,

    /// Print totals as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a default config file
    Init {
        /// Config file path (defaults to the platform config directory)
        #[arg(long, env = "AVQUOTE_CONFIG")]
        config: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show {
        /// Config file path
        #[arg(long, env = "AVQUOTE_CONFIG")]
        config: Option<PathBuf>,
    },
}

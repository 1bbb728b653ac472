use crate::strategy::{BatchConfig, InputFiles};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compute group balances and the transfers that settle them
#[derive(Parser, Debug)]
#[command(name = "settlement-engine")]
#[command(about = "Compute group expense balances and a settlement plan", long_about = None)]
pub struct CliArgs {
    /// Participants CSV file (id,name)
    #[arg(value_name = "PARTICIPANTS", help = "Path to the participants CSV file")]
    pub participants_file: PathBuf,

    /// Expenses CSV file (id,description,amount,payer,beneficiaries,date)
    #[arg(value_name = "EXPENSES", help = "Path to the expenses CSV file")]
    pub expenses_file: PathBuf,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for streaming single-threaded or 'async' for batched multi-threaded"
    )]
    pub strategy: StrategyType,

    /// Number of expenses per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of expenses per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads folding each batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Report sections to write to stdout
    #[arg(
        long = "report",
        value_name = "KIND",
        default_value = "all",
        help = "Report to print: 'balances', 'settlement' or 'all'"
    )]
    pub report: ReportKind,

    /// Fail when the input has integrity warnings
    #[arg(
        long = "strict",
        help = "Exit with an error if any integrity warning is raised"
    )]
    pub strict: bool,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Which report sections are written
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Per-participant paid, share and balance
    Balances,
    /// Transfers that settle the balances
    Settlement,
    /// Balances, an empty line, then transfers
    All,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults; zero values are replaced by
    /// the defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    pub fn input_files(&self) -> InputFiles {
        InputFiles::new(&self.participants_file, &self.expenses_file)
    }
}

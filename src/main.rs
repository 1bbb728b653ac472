//! Rust Settlement Engine CLI
//!
//! Command-line interface for settling shared group expenses from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- participants.csv expenses.csv > report.csv
//! cargo run -- --report settlement participants.csv expenses.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 participants.csv expenses.csv
//! cargo run -- --strict participants.csv expenses.csv
//! ```
//!
//! The report is written to stdout; logs go to stderr.
//!
//! # Logging
//!
//! - `RUST_LOG` sets the filter (default: `rust_settlement_engine=info`)
//! - `SETTLEMENT_LOG_JSON` switches to JSON log lines when set
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, unreadable input, integrity warnings with `--strict`)

use rust_settlement_engine::cli;
use rust_settlement_engine::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rust_settlement_engine=info"));
    let json_logging = std::env::var_os("SETTLEMENT_LOG_JSON").is_some();

    if json_logging {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() {
    init_logging();

    let args = cli::parse_args();

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    let mut output = std::io::stdout();
    let result = strategy
        .process(&args.input_files(), args.report, &mut output)
        .and_then(|report| {
            if args.strict {
                report.ensure_clean()
            } else {
                Ok(())
            }
        });

    if let Err(e) = result {
        tracing::error!(error = %e, "Settlement failed");
        process::exit(1);
    }
}

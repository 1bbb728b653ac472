//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. Expenses are read in batches and each batch is
//! folded into shared running totals by several tokio tasks.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── IntegrityChecker (reference diagnostics, on the reading task)
//!     └── BatchProcessor (chunking + tokio tasks)
//!         └── AsyncBalanceAccumulator (DashMap-backed totals)
//! ```
//!
//! # Determinism
//!
//! Expenses only add to totals and rounding happens once at the end, so the
//! output is identical to the sync strategy regardless of task scheduling.

use crate::cli::ReportKind;
use crate::core::{AsyncBalanceAccumulator, BatchProcessor, IntegrityChecker, SettlementReport};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::{write_report, CsvFormat};
use crate::strategy::{InputFiles, ProcessingStrategy};
use crate::types::{Expense, Participant, SettlementError};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio_util::compat::{Compat, TokioAsyncReadCompatExt};

/// Configuration for batch processing
///
/// Controls how many expenses are read per batch and how many worker threads
/// fold each batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of expenses per batch
    pub batch_size: usize,
    /// Number of worker threads, and chunks per batch
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values fall back to the defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                batch_size,
                default = default.batch_size,
                "Invalid batch_size, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                max_concurrent_batches,
                default = default.max_concurrent_batches,
                "Invalid max_concurrent_batches, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Batches are processed one after another; within a batch, chunks are
/// folded in parallel.
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    async fn run(&self, input: &InputFiles) -> Result<SettlementReport, SettlementError> {
        let mut participant_reader: AsyncReader<_, Participant> =
            open_reader(&input.participants).await?;
        let participants = participant_reader.read_all(self.config.batch_size).await;
        tracing::debug!(count = participants.len(), "Participants loaded");

        let accumulator = Arc::new(AsyncBalanceAccumulator::new(&participants));
        let processor = BatchProcessor::new(
            Arc::clone(&accumulator),
            self.config.max_concurrent_batches,
        );
        let mut checker = IntegrityChecker::new(&participants);

        let mut expense_reader: AsyncReader<_, Expense> = open_reader(&input.expenses).await?;
        let mut applied = 0usize;
        loop {
            let batch = expense_reader.read_batch(self.config.batch_size).await;
            if batch.is_empty() {
                break;
            }

            for expense in &batch {
                checker.inspect(expense);
            }
            applied += processor.process_batch(batch).await?;
        }
        tracing::debug!(count = applied, "Expenses applied");

        Ok(SettlementReport::from_balances(
            accumulator.balances(),
            checker.finish(),
        ))
    }
}

/// Open a CSV file for async reading
async fn open_reader<T: CsvFormat>(
    path: &Path,
) -> Result<AsyncReader<Compat<tokio::fs::File>, T>, SettlementError> {
    let file = tokio::fs::File::open(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SettlementError::file_not_found(path),
        _ => SettlementError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })?;

    // csv-async reads through the futures AsyncRead traits
    Ok(AsyncReader::new(file.compat()))
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process the input files on a dedicated multi-threaded runtime
    ///
    /// # Errors
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Malformed rows are logged and skipped.
    fn process(
        &self,
        input: &InputFiles,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<SettlementReport, SettlementError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| SettlementError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        let settlement = runtime.block_on(self.run(input))?;
        write_report(&settlement, report, output)?;

        Ok(settlement)
    }
}

//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete settlement pipelines,
//! encompassing CSV parsing, balance computation, settlement and report
//! output. This allows different processing implementations (synchronous,
//! asynchronous batch) to be selected at runtime.

use crate::cli::{ReportKind, StrategyType};
use crate::core::SettlementReport;
use crate::types::SettlementError;
use std::io::Write;
use std::path::PathBuf;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// The two input files a run reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    /// `id,name` rows
    pub participants: PathBuf,
    /// `id,description,amount,payer,beneficiaries,date` rows
    pub expenses: PathBuf,
}

impl InputFiles {
    pub fn new(participants: impl Into<PathBuf>, expenses: impl Into<PathBuf>) -> Self {
        Self {
            participants: participants.into(),
            expenses: expenses.into(),
        }
    }
}

/// Processing strategy trait for complete settlement pipelines
///
/// Each strategy reads participants and expenses, computes balances and the
/// settlement, writes the requested report sections to `output` and returns
/// the full report so callers can inspect its warnings.
pub trait ProcessingStrategy: Send + Sync {
    /// Process the input files and write the report
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - The async runtime fails
    ///
    /// Malformed rows are logged and skipped; they never cause an error here.
    fn process(
        &self,
        input: &InputFiles,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<SettlementReport, SettlementError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` only applies to the async strategy; `None` selects defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}

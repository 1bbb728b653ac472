//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Balance computation to `BalanceCalculator`
//! - Reference diagnostics to `IntegrityChecker`
//! - Settlement to `SettlementReport::from_balances`
//! - CSV output to `csv_format::write_report`
//!
//! # Memory Efficiency
//!
//! Participants are loaded up front since every expense is resolved against
//! them. Expenses are streamed one row at a time, so memory usage is
//! O(participants), not O(expenses).

use crate::cli::ReportKind;
use crate::core::{BalanceCalculator, IntegrityChecker, SettlementReport};
use crate::io::csv_format::write_report;
use crate::io::sync_reader::{read_all, SyncReader};
use crate::strategy::{InputFiles, ProcessingStrategy};
use crate::types::{Expense, Participant, SettlementError};
use std::io::Write;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_settlement_engine::cli::ReportKind;
/// use rust_settlement_engine::strategy::{InputFiles, ProcessingStrategy, SyncProcessingStrategy};
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let input = InputFiles::new("participants.csv", "expenses.csv");
///
/// strategy
///     .process(&input, ReportKind::All, &mut io::stdout())
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input: &InputFiles,
        report: ReportKind,
        output: &mut dyn Write,
    ) -> Result<SettlementReport, SettlementError> {
        let participants = read_all::<Participant>(&input.participants)?;
        tracing::debug!(count = participants.len(), "Participants loaded");

        let mut calculator = BalanceCalculator::new(&participants);
        let mut checker = IntegrityChecker::new(&participants);

        let mut applied = 0usize;
        for result in SyncReader::<Expense>::new(&input.expenses)? {
            match result {
                Ok(expense) => {
                    checker.inspect(&expense);
                    calculator.apply(&expense);
                    applied += 1;
                }
                Err(e) => tracing::warn!(error = %e, "Skipping malformed expense"),
            }
        }
        tracing::debug!(count = applied, "Expenses applied");

        let settlement = SettlementReport::from_balances(calculator.balances(), checker.finish());
        write_report(&settlement, report, output)?;

        Ok(settlement)
    }
}

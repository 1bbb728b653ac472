//! Settlement report
//!
//! Bundles balances, the settlement transfers and any integrity warnings
//! produced along the way. Strategies and the ledger both hand out this type.

use crate::core::balance_calculator::compute_balances;
use crate::core::integrity::{check_balances, check_integrity, IntegrityWarning};
use crate::core::money::SETTLEMENT_EPSILON;
use crate::core::settlement::settle;
use crate::types::{Balance, Expense, Participant, SettlementError, Transaction};

/// Balances, transfers and diagnostics for one snapshot of the group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementReport {
    pub balances: Vec<Balance>,
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<IntegrityWarning>,
}

impl SettlementReport {
    /// Settle already computed balances
    ///
    /// `warnings` carries whatever the input checks found; balance and
    /// settlement diagnostics are appended to it. A leftover of at most one
    /// cent is rounding and is not reported.
    pub fn from_balances(balances: Vec<Balance>, mut warnings: Vec<IntegrityWarning>) -> Self {
        warnings.extend(check_balances(&balances));

        let settlement = settle(&balances);
        warnings.extend(
            settlement
                .unsettled
                .into_iter()
                .filter(|residual| residual.amount.abs() > SETTLEMENT_EPSILON)
                .map(IntegrityWarning::from),
        );

        for warning in &warnings {
            tracing::warn!(%warning, "Integrity warning");
        }
        tracing::info!(
            participants = balances.len(),
            transactions = settlement.transactions.len(),
            warnings = warnings.len(),
            "Settlement computed"
        );

        SettlementReport {
            balances,
            transactions: settlement.transactions,
            warnings,
        }
    }

    /// Whether no integrity warnings were raised
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Fail when any integrity warning was raised
    pub fn ensure_clean(&self) -> Result<(), SettlementError> {
        match self.warnings.first() {
            None => Ok(()),
            Some(first) => Err(SettlementError::IntegrityViolation {
                count: self.warnings.len(),
                first: first.to_string(),
            }),
        }
    }
}

/// Compute balances and settlement for participants and expenses
pub fn build_report(participants: &[Participant], expenses: &[Expense]) -> SettlementReport {
    let warnings = check_integrity(participants, expenses);
    let balances = compute_balances(participants, expenses);
    SettlementReport::from_balances(balances, warnings)
}

//! Expense types for the settlement engine
//!
//! This module defines the Expense structure (a recorded payment event) and
//! the NewExpense draft accepted by the ledger before an id and timestamp
//! are assigned.

use super::participant::ParticipantId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense identifier
pub type ExpenseId = String;

/// A single payment event
///
/// One payer covered `amount` on behalf of the beneficiaries, who split it
/// equally. Expenses are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier
    pub id: ExpenseId,

    /// Free-form description ("dinner", "train tickets", ...)
    pub description: String,

    /// Amount paid, expected to be positive
    pub amount: Decimal,

    /// Participant who paid
    pub payer_id: ParticipantId,

    /// Participants sharing the cost
    ///
    /// Duplicates collapse to a single share when balances are computed.
    pub beneficiary_ids: Vec<ParticipantId>,

    /// When the expense was recorded
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Beneficiary ids with duplicates removed, first occurrence kept
    pub fn unique_beneficiaries(&self) -> Vec<&ParticipantId> {
        let mut seen: Vec<&ParticipantId> = Vec::with_capacity(self.beneficiary_ids.len());
        for id in &self.beneficiary_ids {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }

    /// Whether the participant pays for or benefits from this expense
    pub fn references(&self, participant_id: &str) -> bool {
        self.payer_id == participant_id
            || self.beneficiary_ids.iter().any(|id| id == participant_id)
    }
}

/// Expense draft submitted to the ledger
///
/// The ledger validates it and assigns the id and, when absent, the date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Decimal,
    pub payer_id: ParticipantId,
    pub beneficiary_ids: Vec<ParticipantId>,
    pub date: Option<DateTime<Utc>>,
}

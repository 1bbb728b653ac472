//! Group ledger
//!
//! In-memory participant and expense stores for a single group. The ledger is
//! the collaborator the settlement core relies on: it validates new expenses,
//! refuses to remove participants that expenses still reference, and hands
//! immutable snapshots to the calculator and solver.

use crate::core::balance_calculator::compute_balances;
use crate::core::money::is_accumulable;
use crate::core::report::{build_report, SettlementReport};
use crate::core::settlement::compute_settlement;
use crate::types::{
    Balance, Expense, NewExpense, Participant, SettlementError, Transaction,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Participants and expenses of one group, in insertion order
#[derive(Debug, Clone, Default)]
pub struct GroupLedger {
    participants: Vec<Participant>,
    expenses: Vec<Expense>,
}

impl GroupLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from loaded records
    ///
    /// Duplicate ids are rejected; references are not validated so that a
    /// partially broken file can still be inspected.
    pub fn from_records(
        participants: Vec<Participant>,
        expenses: Vec<Expense>,
    ) -> Result<Self, SettlementError> {
        let mut ledger = Self::new();
        for participant in participants {
            ledger.insert_participant(participant)?;
        }
        for expense in expenses {
            ledger.insert_expense(expense)?;
        }
        Ok(ledger)
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn participant(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Add a participant under a freshly generated id
    pub fn add_participant(&mut self, name: &str) -> Result<&Participant, SettlementError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettlementError::empty_field("participant name"));
        }

        let participant = Participant::new(Uuid::new_v4().to_string(), name);
        tracing::debug!(participant = %participant.id, name, "Participant added");
        self.participants.push(participant);
        Ok(&self.participants[self.participants.len() - 1])
    }

    /// Add a participant with an explicit id
    pub fn insert_participant(&mut self, participant: Participant) -> Result<(), SettlementError> {
        if self.participant(&participant.id).is_some() {
            return Err(SettlementError::duplicate_participant(&participant.id));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Remove a participant no expense refers to
    ///
    /// # Errors
    ///
    /// - `UnknownParticipant` if the id is not in the ledger
    /// - `ParticipantInUse` if any expense names the participant as payer or beneficiary
    pub fn remove_participant(&mut self, id: &str) -> Result<Participant, SettlementError> {
        let index = self
            .participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SettlementError::unknown_participant(id))?;

        let references = self.expenses.iter().filter(|e| e.references(id)).count();
        if references > 0 {
            tracing::debug!(participant = id, references, "Refusing to remove referenced participant");
            return Err(SettlementError::participant_in_use(id, references));
        }

        Ok(self.participants.remove(index))
    }

    /// Validate and record a new expense
    ///
    /// # Errors
    ///
    /// - `EmptyField` for a blank description
    /// - `InvalidAmount` for a zero, negative or out-of-range amount
    /// - `MissingBeneficiaries` when no beneficiary is given
    /// - `UnknownParticipant` when the payer or a beneficiary is not in the ledger
    pub fn add_expense(&mut self, draft: NewExpense) -> Result<&Expense, SettlementError> {
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(SettlementError::empty_field("expense description"));
        }
        if draft.amount <= Decimal::ZERO || !is_accumulable(draft.amount) {
            return Err(SettlementError::invalid_amount(
                &draft.amount.to_string(),
                description,
            ));
        }
        if draft.beneficiary_ids.is_empty() {
            return Err(SettlementError::missing_beneficiaries(description));
        }
        for id in std::iter::once(&draft.payer_id).chain(&draft.beneficiary_ids) {
            if self.participant(id).is_none() {
                return Err(SettlementError::unknown_participant(id));
            }
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            amount: draft.amount,
            payer_id: draft.payer_id,
            beneficiary_ids: draft.beneficiary_ids,
            date: draft.date.unwrap_or_else(Utc::now),
        };
        tracing::debug!(expense = %expense.id, amount = %expense.amount, "Expense added");
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Record an expense with an explicit id, without reference checks
    pub fn insert_expense(&mut self, expense: Expense) -> Result<(), SettlementError> {
        if self.expenses.iter().any(|e| e.id == expense.id) {
            return Err(SettlementError::duplicate_expense(&expense.id));
        }
        self.expenses.push(expense);
        Ok(())
    }

    /// Delete an expense
    pub fn remove_expense(&mut self, id: &str) -> Result<Expense, SettlementError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SettlementError::unknown_expense(id))?;
        Ok(self.expenses.remove(index))
    }

    /// Current balances, in participant order
    pub fn balances(&self) -> Vec<Balance> {
        compute_balances(&self.participants, &self.expenses)
    }

    /// Transfers that settle the current balances
    pub fn settlement(&self) -> Vec<Transaction> {
        compute_settlement(&self.balances())
    }

    /// Balances, settlement and integrity warnings for the current state
    pub fn report(&self) -> SettlementReport {
        build_report(&self.participants, &self.expenses)
    }
}

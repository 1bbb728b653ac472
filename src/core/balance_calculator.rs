//! Balance calculation
//!
//! Folds expenses into per-participant net balances (amount paid minus amount
//! owed). Balances are recomputed from scratch on every query.
//!
//! The calculator is lenient by contract:
//! - an expense without beneficiaries contributes nothing
//! - an unknown payer leaves the amount uncredited but the shares are still split
//! - unknown beneficiaries are skipped, their share is not reassigned
//!
//! Accumulation is exact; amounts are rounded to cents only in the final pass.

use crate::core::money::{is_accumulable, round_cents};
use crate::types::{Balance, Expense, Participant, ParticipantId};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// Unrounded running totals for one participant
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Totals {
    pub paid: Decimal,
    pub share: Decimal,
}

impl Totals {
    /// Round the totals into a balance row
    pub fn finalize(&self, participant_id: &str, participant_name: &str) -> Balance {
        Balance {
            participant_id: participant_id.to_string(),
            participant_name: participant_name.to_string(),
            paid: round_cents(self.paid),
            share: round_cents(self.share),
            balance: round_cents(self.paid.saturating_sub(self.share)),
        }
    }
}

/// Equal split of a single expense
#[derive(Debug, PartialEq)]
pub(crate) struct ExpenseSplit<'a> {
    pub payer_id: &'a str,
    pub amount: Decimal,
    pub per_beneficiary: Decimal,
    pub beneficiaries: Vec<&'a ParticipantId>,
}

/// Split an expense equally among its distinct beneficiaries
///
/// Returns `None` for an expense without beneficiaries or with an amount
/// beyond [`MAX_EXPENSE_AMOUNT`](crate::core::money::MAX_EXPENSE_AMOUNT).
pub(crate) fn split_expense(expense: &Expense) -> Option<ExpenseSplit<'_>> {
    if !is_accumulable(expense.amount) {
        tracing::warn!(
            expense = %expense.id,
            amount = %expense.amount,
            "Skipping expense with out-of-range amount"
        );
        return None;
    }

    let beneficiaries = expense.unique_beneficiaries();
    if beneficiaries.is_empty() {
        tracing::debug!(expense = %expense.id, "Skipping expense without beneficiaries");
        return None;
    }

    let per_beneficiary = expense.amount / Decimal::from(beneficiaries.len());

    Some(ExpenseSplit {
        payer_id: &expense.payer_id,
        amount: expense.amount,
        per_beneficiary,
        beneficiaries,
    })
}

/// Streaming balance calculator
///
/// Holds one entry per participant in participant order. Expenses are applied
/// one at a time, so the calculator can be fed straight from a reader.
#[derive(Debug, Clone)]
pub struct BalanceCalculator {
    entries: IndexMap<ParticipantId, (String, Totals)>,
}

impl BalanceCalculator {
    /// Create a calculator with a zero entry per participant
    ///
    /// When two participants share an id, the first one wins.
    pub fn new(participants: &[Participant]) -> Self {
        let mut entries = IndexMap::with_capacity(participants.len());
        for participant in participants {
            entries
                .entry(participant.id.clone())
                .or_insert_with(|| (participant.name.clone(), Totals::default()));
        }

        BalanceCalculator { entries }
    }

    /// Apply one expense to the running totals
    ///
    /// The expense is applied in full or not at all: if any total would
    /// overflow, nothing changes and the expense is skipped.
    pub fn apply(&mut self, expense: &Expense) {
        let Some(split) = split_expense(expense) else {
            return;
        };

        // Beneficiaries are distinct, so each total takes at most one addition
        if !self.fits(&split) {
            log_overflow(expense);
            return;
        }

        match self.entries.get_mut(split.payer_id) {
            Some((_, totals)) => totals.paid += split.amount,
            None => tracing::debug!(
                expense = %expense.id,
                payer = split.payer_id,
                "Payer not found, amount left uncredited"
            ),
        }

        for beneficiary in split.beneficiaries {
            match self.entries.get_mut(beneficiary.as_str()) {
                Some((_, totals)) => totals.share += split.per_beneficiary,
                None => tracing::debug!(
                    expense = %expense.id,
                    beneficiary = %beneficiary,
                    "Beneficiary not found, share skipped"
                ),
            }
        }
    }

    fn fits(&self, split: &ExpenseSplit<'_>) -> bool {
        let paid_fits = self
            .entries
            .get(split.payer_id)
            .is_none_or(|(_, totals)| totals.paid.checked_add(split.amount).is_some());

        paid_fits
            && split.beneficiaries.iter().all(|beneficiary| {
                self.entries
                    .get(beneficiary.as_str())
                    .is_none_or(|(_, totals)| totals.share.checked_add(split.per_beneficiary).is_some())
            })
    }

    /// Round the totals and return balances in participant order
    pub fn balances(&self) -> Vec<Balance> {
        self.entries
            .iter()
            .map(|(id, (name, totals))| totals.finalize(id, name))
            .collect()
    }
}

pub(crate) fn log_overflow(expense: &Expense) {
    tracing::warn!(
        expense = %expense.id,
        amount = %expense.amount,
        "Skipping expense, running totals would overflow"
    );
}

/// Compute every participant's net balance
///
/// Output order equals participant order. Never fails; dangling references
/// and empty beneficiary sets are skipped as described in the module docs.
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Vec<Balance> {
    let mut calculator = BalanceCalculator::new(participants);
    for expense in expenses {
        calculator.apply(expense);
    }
    calculator.balances()
}

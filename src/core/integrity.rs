//! Integrity diagnostics
//!
//! The balance calculator silently skips malformed references. This module
//! reports those same conditions as warnings so callers can surface them or,
//! in strict mode, refuse the input. Checking never changes the computed
//! balances.

use crate::core::money::{is_accumulable, SETTLEMENT_EPSILON, MAX_EXPENSE_AMOUNT};
use crate::core::settlement::Residual;
use crate::types::{Balance, Expense, ExpenseId, Participant, ParticipantId};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;

/// A condition that makes the balances incomplete or suspicious
#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityWarning {
    /// Two participants share an id; only the first is used
    DuplicateParticipant { participant_id: ParticipantId },

    /// Expense has no beneficiaries and contributes nothing
    EmptyBeneficiaries { expense_id: ExpenseId },

    /// Payer does not resolve to a participant; the amount is uncredited
    UnknownPayer {
        expense_id: ExpenseId,
        payer_id: ParticipantId,
    },

    /// Beneficiary does not resolve to a participant; the share is dropped
    UnknownBeneficiary {
        expense_id: ExpenseId,
        beneficiary_id: ParticipantId,
    },

    /// Beneficiary listed more than once; counted once
    DuplicateBeneficiary {
        expense_id: ExpenseId,
        beneficiary_id: ParticipantId,
    },

    /// Expense amount is zero or negative
    NonPositiveAmount {
        expense_id: ExpenseId,
        amount: Decimal,
    },

    /// Expense amount exceeds `MAX_EXPENSE_AMOUNT`; the expense is skipped
    AmountOutOfRange {
        expense_id: ExpenseId,
        amount: Decimal,
    },

    /// Balances do not sum to zero
    Imbalance { residual: Decimal },

    /// Settlement ended with this position unmatched
    SettlementResidual { name: String, amount: Decimal },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::DuplicateParticipant { participant_id } => {
                write!(f, "participant id {} is used more than once", participant_id)
            }
            IntegrityWarning::EmptyBeneficiaries { expense_id } => {
                write!(f, "expense {} has no beneficiaries", expense_id)
            }
            IntegrityWarning::UnknownPayer {
                expense_id,
                payer_id,
            } => write!(f, "expense {} is paid by unknown participant {}", expense_id, payer_id),
            IntegrityWarning::UnknownBeneficiary {
                expense_id,
                beneficiary_id,
            } => write!(
                f,
                "expense {} is shared with unknown participant {}",
                expense_id, beneficiary_id
            ),
            IntegrityWarning::DuplicateBeneficiary {
                expense_id,
                beneficiary_id,
            } => write!(
                f,
                "expense {} lists beneficiary {} more than once",
                expense_id, beneficiary_id
            ),
            IntegrityWarning::NonPositiveAmount { expense_id, amount } => {
                write!(f, "expense {} has non-positive amount {}", expense_id, amount)
            }
            IntegrityWarning::AmountOutOfRange { expense_id, amount } => write!(
                f,
                "expense {} amount {} exceeds the limit of {}",
                expense_id, amount, MAX_EXPENSE_AMOUNT
            ),
            IntegrityWarning::Imbalance { residual } => {
                write!(f, "balances sum to {} instead of zero", residual)
            }
            IntegrityWarning::SettlementResidual { name, amount } => {
                write!(f, "{} is left with {} after settlement", name, amount)
            }
        }
    }
}

impl From<Residual> for IntegrityWarning {
    fn from(residual: Residual) -> Self {
        IntegrityWarning::SettlementResidual {
            name: residual.name,
            amount: residual.amount,
        }
    }
}

/// Streaming integrity checker
///
/// Mirrors the skip rules of the balance calculator, one expense at a time.
#[derive(Debug, Clone)]
pub struct IntegrityChecker {
    known: HashSet<ParticipantId>,
    warnings: Vec<IntegrityWarning>,
}

impl IntegrityChecker {
    pub fn new(participants: &[Participant]) -> Self {
        let mut known = HashSet::with_capacity(participants.len());
        let mut warnings = Vec::new();

        for participant in participants {
            if !known.insert(participant.id.clone()) {
                warnings.push(IntegrityWarning::DuplicateParticipant {
                    participant_id: participant.id.clone(),
                });
            }
        }

        IntegrityChecker { known, warnings }
    }

    pub fn inspect(&mut self, expense: &Expense) {
        if expense.amount <= Decimal::ZERO {
            self.warnings.push(IntegrityWarning::NonPositiveAmount {
                expense_id: expense.id.clone(),
                amount: expense.amount,
            });
        }

        if !is_accumulable(expense.amount) {
            self.warnings.push(IntegrityWarning::AmountOutOfRange {
                expense_id: expense.id.clone(),
                amount: expense.amount,
            });
            return;
        }

        if expense.beneficiary_ids.is_empty() {
            self.warnings.push(IntegrityWarning::EmptyBeneficiaries {
                expense_id: expense.id.clone(),
            });
            return;
        }

        if !self.known.contains(&expense.payer_id) {
            self.warnings.push(IntegrityWarning::UnknownPayer {
                expense_id: expense.id.clone(),
                payer_id: expense.payer_id.clone(),
            });
        }

        let mut seen = HashSet::with_capacity(expense.beneficiary_ids.len());
        for beneficiary in &expense.beneficiary_ids {
            if !seen.insert(beneficiary) {
                self.warnings.push(IntegrityWarning::DuplicateBeneficiary {
                    expense_id: expense.id.clone(),
                    beneficiary_id: beneficiary.clone(),
                });
                continue;
            }
            if !self.known.contains(beneficiary) {
                self.warnings.push(IntegrityWarning::UnknownBeneficiary {
                    expense_id: expense.id.clone(),
                    beneficiary_id: beneficiary.clone(),
                });
            }
        }
    }

    pub fn finish(self) -> Vec<IntegrityWarning> {
        self.warnings
    }
}

/// Check participants and expenses for references the calculator would skip
pub fn check_integrity(participants: &[Participant], expenses: &[Expense]) -> Vec<IntegrityWarning> {
    let mut checker = IntegrityChecker::new(participants);
    for expense in expenses {
        checker.inspect(expense);
    }
    checker.finish()
}

/// Check that balances net to zero within one cent
///
/// A sum too large to represent is reported as a residual of `Decimal::MAX`.
pub fn check_balances(balances: &[Balance]) -> Option<IntegrityWarning> {
    let Some(residual) = balances
        .iter()
        .try_fold(Decimal::ZERO, |sum, b| sum.checked_add(b.balance))
    else {
        tracing::warn!(participants = balances.len(), "Balance sum overflowed");
        return Some(IntegrityWarning::Imbalance {
            residual: Decimal::MAX,
        });
    };

    if residual.abs() > SETTLEMENT_EPSILON {
        Some(IntegrityWarning::Imbalance { residual })
    } else {
        None
    }
}

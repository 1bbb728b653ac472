//! Thread-safe balance accumulation for async batch processing
//!
//! The `AsyncBalanceAccumulator` keeps the participant order in a plain vector
//! and the running totals in a `DashMap`, so tasks folding different expenses
//! only contend on the entries they actually touch.

use crate::core::balance_calculator::{log_overflow, split_expense, Totals};
use crate::types::{Balance, Expense, Participant, ParticipantId};
use dashmap::DashMap;

/// Concurrent counterpart of `BalanceCalculator`
///
/// Applies the same skip rules and produces identical balances.
#[derive(Debug)]
pub struct AsyncBalanceAccumulator {
    /// Participants in output order, first occurrence of each id
    order: Vec<(ParticipantId, String)>,

    /// Unrounded totals by participant id
    totals: DashMap<ParticipantId, Totals>,
}

impl AsyncBalanceAccumulator {
    /// Create an accumulator with a zero entry per participant
    pub fn new(participants: &[Participant]) -> Self {
        let totals = DashMap::new();
        let mut order = Vec::with_capacity(participants.len());

        for participant in participants {
            if totals.contains_key(&participant.id) {
                continue;
            }
            totals.insert(participant.id.clone(), Totals::default());
            order.push((participant.id.clone(), participant.name.clone()));
        }

        Self { order, totals }
    }

    /// Apply one expense
    ///
    /// Safe to call from many tasks at once. A total that would overflow is
    /// left unchanged.
    pub fn apply(&self, expense: &Expense) {
        let Some(split) = split_expense(expense) else {
            return;
        };

        match self.totals.get_mut(split.payer_id) {
            Some(mut totals) => match totals.paid.checked_add(split.amount) {
                Some(paid) => totals.paid = paid,
                None => log_overflow(expense),
            },
            None => tracing::debug!(
                expense = %expense.id,
                payer = split.payer_id,
                "Payer not found, amount left uncredited"
            ),
        }

        for beneficiary in split.beneficiaries {
            match self.totals.get_mut(beneficiary.as_str()) {
                Some(mut totals) => match totals.share.checked_add(split.per_beneficiary) {
                    Some(share) => totals.share = share,
                    None => log_overflow(expense),
                },
                None => tracing::debug!(
                    expense = %expense.id,
                    beneficiary = %beneficiary,
                    "Beneficiary not found, share skipped"
                ),
            }
        }
    }

    /// Snapshot of the rounded balances in participant order
    pub fn balances(&self) -> Vec<Balance> {
        self.order
            .iter()
            .map(|(id, name)| {
                let totals = self
                    .totals
                    .get(id.as_str())
                    .map(|entry| entry.value().clone())
                    .unwrap_or_default();
                totals.finalize(id, name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance_calculator::compute_balances;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn expense(id: &str, amount: Decimal, payer: &str, beneficiaries: &[&str]) -> Expense {
        Expense {
            id: id.to_string(),
            description: "test".to_string(),
            amount,
            payer_id: payer.to_string(),
            beneficiary_ids: beneficiaries.iter().map(|s| s.to_string()).collect(),
            date: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn people() -> Vec<Participant> {
        vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("c", "C"),
        ]
    }

    #[test]
    fn test_matches_sync_calculator() {
        let expenses = vec![
            expense("1", dec!(90), "a", &["a", "b", "c"]),
            expense("2", dec!(30), "b", &["b", "c"]),
            expense("3", dec!(10), "ghost", &["a", "nobody"]),
            expense("4", dec!(99), "c", &[]),
        ];

        let accumulator = AsyncBalanceAccumulator::new(&people());
        for expense in &expenses {
            accumulator.apply(expense);
        }

        assert_eq!(accumulator.balances(), compute_balances(&people(), &expenses));
    }

    #[test]
    fn test_out_of_range_amounts_are_skipped() {
        let expenses = vec![
            expense("1", dec!(50000000000000000000000000000), "a", &["b"]),
            expense("2", dec!(50000000000000000000000000000), "a", &["b"]),
            expense("3", dec!(30), "c", &["a", "b", "c"]),
        ];

        let accumulator = AsyncBalanceAccumulator::new(&people());
        for expense in &expenses {
            accumulator.apply(expense);
        }

        assert_eq!(accumulator.balances(), compute_balances(&people(), &expenses));
        assert_eq!(accumulator.balances()[0].balance, dec!(-10));
    }

    #[test]
    fn test_overflowing_total_is_left_unchanged() {
        let accumulator = AsyncBalanceAccumulator::new(&people());
        if let Some(mut totals) = accumulator.totals.get_mut("a") {
            totals.paid = Decimal::MAX;
        }

        accumulator.apply(&expense("1", dec!(10), "a", &["b"]));

        let balances = accumulator.balances();
        assert_eq!(balances[0].paid, Decimal::MAX);
        assert_eq!(balances[1].share, dec!(10));
    }

    #[test]
    fn test_new_accumulator_is_zero() {
        let accumulator = AsyncBalanceAccumulator::new(&people());
        let balances = accumulator.balances();

        assert_eq!(balances.len(), 3);
        assert!(balances.iter().all(|b| b.balance.is_zero()));
    }

    #[test]
    fn test_duplicate_participants_first_wins() {
        let participants = vec![Participant::new("a", "First"), Participant::new("a", "Second")];
        let accumulator = AsyncBalanceAccumulator::new(&participants);

        let balances = accumulator.balances();
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].participant_name, "First");
    }

    #[test]
    fn test_concurrent_apply() {
        let accumulator = Arc::new(AsyncBalanceAccumulator::new(&people()));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let accumulator = Arc::clone(&accumulator);
                std::thread::spawn(move || {
                    for j in 0..25 {
                        accumulator.apply(&expense(
                            &format!("{}-{}", i, j),
                            dec!(3),
                            "a",
                            &["a", "b", "c"],
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let balances = accumulator.balances();
        // 200 expenses of 3.00, one unit each
        assert_eq!(balances[0].paid, dec!(600));
        assert_eq!(balances[0].balance, dec!(400));
        assert_eq!(balances[1].balance, dec!(-200));
        assert_eq!(balances[2].balance, dec!(-200));
    }
}

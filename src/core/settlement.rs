//! Settlement solver
//!
//! Turns signed balances into a short list of point-to-point transfers using a
//! greedy largest-debtor-to-largest-creditor matching:
//!
//! 1. Positions within one cent of zero are already settled and dropped.
//! 2. Debtors are stably sorted most negative first, creditors largest first.
//! 3. Two cursors walk the lists; each step transfers the smaller of the two
//!    residuals (rounded to cents) and advances whichever side is settled.
//! 4. The walk stops as soon as either list is exhausted.
//!
//! Every step advances at least one cursor: both residuals are at least one
//! cent, so the rounded transfer is within half a cent of the smaller one.
//! The result has at most `positions - 1` transfers.

use crate::core::money::{is_settled, round_cents, SETTLEMENT_EPSILON};
use crate::core::traits::SignedBalance;
use crate::types::Transaction;
use rust_decimal::Decimal;

/// A position still waiting to be settled
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    /// Display name of the position holder
    pub name: String,

    /// Amount left over after matching (negative for debtors)
    pub amount: Decimal,
}

/// Result of running the solver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settlement {
    /// Transfers in the order they were matched
    pub transactions: Vec<Transaction>,

    /// Positions left unmatched because the other side ran out
    ///
    /// Always empty when the input balances net to zero.
    pub unsettled: Vec<Residual>,
}

struct Position<'a> {
    name: &'a str,
    residual: Decimal,
}

/// Settle the balances and report anything left over
pub fn settle<B: SignedBalance>(balances: &[B]) -> Settlement {
    let mut debtors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.net_balance() < -SETTLEMENT_EPSILON)
        .map(|b| Position {
            name: b.display_name(),
            residual: b.net_balance(),
        })
        .collect();
    let mut creditors: Vec<Position<'_>> = balances
        .iter()
        .filter(|b| b.net_balance() > SETTLEMENT_EPSILON)
        .map(|b| Position {
            name: b.display_name(),
            residual: b.net_balance(),
        })
        .collect();

    // sort_by is stable: ties keep input order
    debtors.sort_by(|a, b| a.residual.cmp(&b.residual));
    creditors.sort_by(|a, b| b.residual.cmp(&a.residual));

    let mut transactions = Vec::with_capacity(debtors.len() + creditors.len());
    let mut debtor_index = 0;
    let mut creditor_index = 0;

    while debtor_index < debtors.len() && creditor_index < creditors.len() {
        let debtor = &mut debtors[debtor_index];
        let creditor = &mut creditors[creditor_index];
        let amount = round_cents(debtor.residual.abs().min(creditor.residual));

        if amount > Decimal::ZERO {
            transactions.push(Transaction::new(debtor.name, creditor.name, amount));
        }

        debtor.residual += amount;
        creditor.residual -= amount;

        if is_settled(debtor.residual) {
            debtor_index += 1;
        }
        if is_settled(creditor.residual) {
            creditor_index += 1;
        }
    }

    let unsettled: Vec<Residual> = debtors[debtor_index..]
        .iter()
        .chain(&creditors[creditor_index..])
        .map(|p| Residual {
            name: p.name.to_string(),
            amount: p.residual,
        })
        .collect();

    if !unsettled.is_empty() {
        tracing::debug!(
            unsettled = unsettled.len(),
            transactions = transactions.len(),
            "Settlement stopped with unmatched positions"
        );
    }

    Settlement {
        transactions,
        unsettled,
    }
}

/// Compute the transfers that settle every balance
///
/// Output order is the order in which debtors and creditors were matched.
/// Never fails; if the balances do not net to zero the leftover positions are
/// simply not addressed (use [`settle`] to see them).
pub fn compute_settlement<B: SignedBalance>(balances: &[B]) -> Vec<Transaction> {
    settle(balances).transactions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn positions(entries: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
        entries
            .iter()
            .map(|(name, amount)| (name.to_string(), *amount))
            .collect()
    }

    fn tx(from: &str, to: &str, amount: Decimal) -> Transaction {
        Transaction::new(from, to, amount)
    }

    #[rstest]
    #[case::three_way_scenario(
        &[("A", dec!(60)), ("B", dec!(-15)), ("C", dec!(-45))],
        vec![tx("C", "A", dec!(45)), tx("B", "A", dec!(15))]
    )]
    #[case::simple_pair(
        &[("A", dec!(-100)), ("B", dec!(100))],
        vec![tx("A", "B", dec!(100))]
    )]
    #[case::one_debtor_many_creditors(
        &[("A", dec!(30)), ("B", dec!(-50)), ("C", dec!(20))],
        vec![tx("B", "A", dec!(30)), tx("B", "C", dec!(20))]
    )]
    #[case::chain_of_partial_matches(
        &[("A", dec!(-70)), ("B", dec!(-30)), ("C", dec!(60)), ("D", dec!(40))],
        vec![tx("A", "C", dec!(60)), tx("A", "D", dec!(10)), tx("B", "D", dec!(30))]
    )]
    #[case::all_settled(&[("A", Decimal::ZERO), ("B", Decimal::ZERO)], vec![])]
    #[case::within_epsilon_ignored(&[("A", dec!(0.01)), ("B", dec!(-0.01))], vec![])]
    #[case::empty(&[], vec![])]
    #[case::cents(
        &[("A", dec!(66.67)), ("B", dec!(-33.33)), ("C", dec!(-33.34))],
        vec![tx("C", "A", dec!(33.34)), tx("B", "A", dec!(33.33))]
    )]
    fn test_settlement_cases(
        #[case] entries: &[(&str, Decimal)],
        #[case] expected: Vec<Transaction>,
    ) {
        assert_eq!(compute_settlement(&positions(entries)), expected);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let balances = positions(&[
            ("D1", dec!(-10)),
            ("C1", dec!(10)),
            ("D2", dec!(-10)),
            ("C2", dec!(10)),
        ]);

        let first = compute_settlement(&balances);
        let second = compute_settlement(&balances);

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![tx("D1", "C1", dec!(10)), tx("D2", "C2", dec!(10))]
        );
    }

    #[test]
    fn test_imbalanced_input_stops_without_panicking() {
        let balances = positions(&[("A", dec!(50)), ("B", dec!(-20))]);

        let settlement = settle(&balances);

        assert_eq!(settlement.transactions, vec![tx("B", "A", dec!(20))]);
        assert_eq!(
            settlement.unsettled,
            vec![Residual {
                name: "A".to_string(),
                amount: dec!(30)
            }]
        );
    }

    #[test]
    fn test_only_debtors_produces_nothing() {
        let balances = positions(&[("A", dec!(-5)), ("B", dec!(-7))]);

        let settlement = settle(&balances);

        assert!(settlement.transactions.is_empty());
        assert_eq!(settlement.unsettled.len(), 2);
        assert_eq!(settlement.unsettled[0].name, "B");
    }

    #[test]
    fn test_sub_cent_precision_terminates() {
        let balances = positions(&[("A", dec!(0.0149)), ("B", dec!(-0.0149))]);

        let settlement = settle(&balances);

        assert_eq!(settlement.transactions, vec![tx("B", "A", dec!(0.01))]);
        assert!(settlement.unsettled.is_empty());
    }

    #[test]
    fn test_transfer_count_bounded_by_positions() {
        let balances = positions(&[
            ("A", dec!(12.5)),
            ("B", dec!(-3.25)),
            ("C", dec!(7.75)),
            ("D", dec!(-9)),
            ("E", dec!(-8)),
        ]);

        let transactions = compute_settlement(&balances);

        assert!(transactions.len() <= balances.len() - 1);
        assert!(transactions.iter().all(|t| t.amount > Decimal::ZERO));
    }
}

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_settlement_engine::core::money::SETTLEMENT_EPSILON;
use rust_settlement_engine::core::AsyncBalanceAccumulator;
use rust_settlement_engine::{compute_balances, compute_settlement, Expense, Participant};
use std::collections::HashMap;

fn participants(count: usize) -> Vec<Participant> {
    (0..count)
        .map(|idx| Participant::new(format!("p{}", idx), format!("Person {}", idx)))
        .collect()
}

fn expenses(
    member_count: usize,
    amounts: &[u64],
    payer_indexes: &[usize],
    beneficiary_masks: &[usize],
) -> Vec<Expense> {
    let full_mask = (1usize << member_count) - 1;
    amounts
        .iter()
        .enumerate()
        .map(|(idx, cents)| {
            let payer_idx = payer_indexes.get(idx).copied().unwrap_or(0) % member_count;
            let mask = match beneficiary_masks.get(idx).copied().unwrap_or(0) & full_mask {
                0 => 1 << payer_idx,
                mask => mask,
            };
            Expense {
                id: idx.to_string(),
                description: "generated".to_string(),
                amount: Decimal::new(*cents as i64, 2),
                payer_id: format!("p{}", payer_idx),
                beneficiary_ids: (0..member_count)
                    .filter(|bit| mask & (1 << bit) != 0)
                    .map(|bit| format!("p{}", bit))
                    .collect(),
                date: DateTime::<Utc>::UNIX_EPOCH,
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn balances_sum_to_zero_within_rounding(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1u64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        beneficiary_masks in prop::collection::vec(0usize..=63, 0..=30),
    ) {
        let people = participants(member_count);
        let expenses = expenses(member_count, &amounts, &payer_indexes, &beneficiary_masks);

        let balances = compute_balances(&people, &expenses);
        let total: Decimal = balances.iter().map(|b| b.balance).sum();

        // Each balance is rounded once, by at most half a cent
        let tolerance = Decimal::new(5, 3) * Decimal::from(member_count);
        prop_assert!(total.abs() <= tolerance, "total {} exceeds {}", total, tolerance);

        let paid: Decimal = balances.iter().map(|b| b.paid).sum();
        let expected_paid: Decimal = expenses.iter().map(|e| e.amount).sum();
        prop_assert_eq!(paid, expected_paid);
    }
}

proptest! {
    #[test]
    fn settlement_transfers_settle_every_debtor(
        member_count in 1usize..=6,
        amounts in prop::collection::vec(1u64..=1_000_000, 0..=30),
        payer_indexes in prop::collection::vec(0usize..=5, 0..=30),
        beneficiary_masks in prop::collection::vec(0usize..=63, 0..=30),
    ) {
        let people = participants(member_count);
        let expenses = expenses(member_count, &amounts, &payer_indexes, &beneficiary_masks);
        let balances = compute_balances(&people, &expenses);

        let transactions = compute_settlement(&balances);

        let open_positions = balances
            .iter()
            .filter(|b| b.balance.abs() > SETTLEMENT_EPSILON)
            .count();
        prop_assert!(transactions.len() <= open_positions.saturating_sub(1));

        let mut residuals: HashMap<&str, Decimal> = balances
            .iter()
            .map(|b| (b.participant_name.as_str(), b.balance))
            .collect();
        for transaction in &transactions {
            prop_assert!(transaction.amount > Decimal::ZERO);
            prop_assert!(transaction.amount.scale() <= 2);
            prop_assert_ne!(&transaction.from, &transaction.to);

            *residuals.get_mut(transaction.from.as_str()).unwrap() += transaction.amount;
            *residuals.get_mut(transaction.to.as_str()).unwrap() -= transaction.amount;
        }

        for balance in &balances {
            let residual = residuals[balance.participant_name.as_str()];
            // Nobody pays past zero or receives past zero
            prop_assert!(residual.is_sign_negative() == balance.balance.is_sign_negative() || residual.is_zero());
            prop_assert!(residual.abs() <= balance.balance.abs());
            prop_assert!(residual.abs() <= Decimal::new(2, 2) * Decimal::from(member_count));
        }
    }
}

// Splits of one, two or four people divide exactly, so reordering cannot
// change the unrounded sums.
const EXACT_SPLITS: [&[usize]; 7] = [&[0], &[1, 2], &[0, 3], &[0, 1, 2, 3], &[2], &[1, 3], &[3]];

proptest! {
    #[test]
    fn balances_ignore_expense_order(
        amounts in prop::collection::vec(1u64..=1_000_000, 1..=30),
        payer_indexes in prop::collection::vec(0usize..4, 30),
        splits in prop::collection::vec(0usize..EXACT_SPLITS.len(), 30),
        rotation in 0usize..30,
    ) {
        let people = participants(4);
        let masks: Vec<usize> = splits
            .iter()
            .map(|split| EXACT_SPLITS[*split].iter().fold(0, |mask, bit| mask | (1 << bit)))
            .collect();
        let expenses = expenses(4, &amounts, &payer_indexes, &masks);

        let mut reordered = expenses.clone();
        reordered.reverse();
        let len = reordered.len();
        reordered.rotate_left(rotation % len);

        let balances = compute_balances(&people, &expenses);
        prop_assert_eq!(&balances, &compute_balances(&people, &reordered));
        prop_assert_eq!(&balances, &compute_balances(&people, &expenses));

        let accumulator = AsyncBalanceAccumulator::new(&people);
        for expense in &reordered {
            accumulator.apply(expense);
        }
        prop_assert_eq!(&balances, &accumulator.balances());
    }
}

//! Currency rounding shared by the balance calculator and the settlement solver
//!
//! Amounts are fixed-point `Decimal` values. Rounding to cents happens once,
//! after accumulation, using round-half-away-from-zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places in the currency unit
pub const CENT_SCALE: u32 = 2;

/// Tolerance below which a balance counts as settled (one cent)
pub const SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, CENT_SCALE);

/// Largest expense amount the calculator accepts (one quadrillion)
///
/// Larger amounts are skipped. Keeps running totals far from the `Decimal`
/// range limit.
pub const MAX_EXPENSE_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Round an amount to the nearest cent, halves away from zero
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether an expense amount is small enough to be accumulated
pub fn is_accumulable(amount: Decimal) -> bool {
    amount.abs() <= MAX_EXPENSE_AMOUNT
}

/// Whether the amount is within one cent of zero
pub fn is_settled(amount: Decimal) -> bool {
    amount.abs() < SETTLEMENT_EPSILON
}

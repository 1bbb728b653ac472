//! Core traits shared by the settlement components
//!
//! The settlement solver only needs a display name and a signed amount per
//! position, so it is written against `SignedBalance` rather than against
//! `Balance` or expenses directly. Any source of signed balances can be settled.

use crate::types::Balance;
use rust_decimal::Decimal;

/// A named, signed net position
///
/// Positive means the holder is owed money, negative means the holder owes.
pub trait SignedBalance {
    /// Name shown in settlement transactions
    fn display_name(&self) -> &str;

    /// Signed net amount
    fn net_balance(&self) -> Decimal;
}

impl SignedBalance for Balance {
    fn display_name(&self) -> &str {
        &self.participant_name
    }

    fn net_balance(&self) -> Decimal {
        self.balance
    }
}

impl<S: AsRef<str>> SignedBalance for (S, Decimal) {
    fn display_name(&self) -> &str {
        self.0.as_ref()
    }

    fn net_balance(&self) -> Decimal {
        self.1
    }
}

impl<T: SignedBalance + ?Sized> SignedBalance for &T {
    fn display_name(&self) -> &str {
        (**self).display_name()
    }

    fn net_balance(&self) -> Decimal {
        (**self).net_balance()
    }
}

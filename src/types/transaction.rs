//! Settlement transaction type

use rust_decimal::Decimal;
use serde::Serialize;

/// A transfer that moves money from a debtor to a creditor
///
/// Produced by the settlement solver; the amount is always positive and
/// rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Debtor display name
    pub from: String,

    /// Creditor display name
    pub to: String,

    /// Amount to transfer
    pub amount: Decimal,
}

impl Transaction {
    /// Create a transfer of `amount` from `from` to `to`
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Decimal) -> Self {
        Transaction {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {:.2}", self.from, self.to, self.amount)
    }
}

//! Balance types for the settlement engine
//!
//! Balances are derived from participants and expenses on every query and are
//! never persisted or updated incrementally.

use super::participant::ParticipantId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A participant's net position
///
/// All three amounts are rounded to cents. `balance` is positive when the
/// group owes the participant money and negative when the participant owes
/// the group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    /// The participant this balance belongs to
    pub participant_id: ParticipantId,

    /// The participant's display name
    pub participant_name: String,

    /// Sum of amounts the participant paid
    pub paid: Decimal,

    /// Sum of the participant's equal shares across expenses
    pub share: Decimal,

    /// paid - share
    pub balance: Decimal,
}

impl Balance {
    /// Create a zero balance for the participant
    pub fn new(participant_id: impl Into<ParticipantId>, participant_name: impl Into<String>) -> Self {
        Balance {
            participant_id: participant_id.into(),
            participant_name: participant_name.into(),
            paid: Decimal::ZERO,
            share: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}

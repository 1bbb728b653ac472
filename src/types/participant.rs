//! Participant types for the settlement engine
//!
//! A participant is anyone who can pay for or benefit from an expense.

use serde::{Deserialize, Serialize};

/// Participant identifier
///
/// Opaque, unique and stable. Ids generated by the ledger are UUID v4 strings,
/// ids loaded from files are taken verbatim.
pub type ParticipantId = String;

/// A member of the group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique participant identifier
    pub id: ParticipantId,

    /// Display name used in balance rows and settlement transactions
    pub name: String,
}

impl Participant {
    /// Create a participant from an id and a display name
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

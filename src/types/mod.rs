//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `participant`: Group members and their identifiers
//! - `expense`: Payment events split among beneficiaries
//! - `balance`: Derived per-participant net positions
//! - `transaction`: Derived settlement transfers
//! - `error`: Error types for the settlement engine

pub mod balance;
pub mod error;
pub mod expense;
pub mod participant;
pub mod transaction;

pub use balance::Balance;
pub use error::SettlementError;
pub use expense::{Expense, ExpenseId, NewExpense};
pub use participant::{Participant, ParticipantId};
pub use transaction::Transaction;

//! Rust Settlement Engine Library
//! # Overview
//!
//! This library computes shared-expense balances for a group and the list of
//! transfers that settles them. Input is streamed from CSV with either a sync
//! or an async batch strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Participant, Expense, Balance, Transaction)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::balance_calculator`] - Expenses to net balances
//!   - [`core::settlement`] - Greedy debtor/creditor matching
//!   - [`core::integrity`] - Diagnostics for skipped references
//!   - [`core::ledger`] - In-memory group stores with a deletion guard
//! - [`io`] - CSV reading and report output
//! - [`strategy`] - Sync and async processing pipelines
//!
//! # Balances
//!
//! For each participant:
//! - `paid`: Sum of the amounts of expenses they paid
//! - `share`: Sum of their equal shares of expenses they benefited from
//! - `balance`: `paid - share`, rounded to cents once at the end
//!
//! A positive balance means the group owes the participant money.
//!
//! # Example
//!
//! ```
//! use rust_settlement_engine::{compute_balances, compute_settlement, Expense, Participant};
//! use rust_decimal::Decimal;
//! use chrono::{DateTime, Utc};
//!
//! let people = vec![Participant::new("a", "Alice"), Participant::new("b", "Bob")];
//! let expenses = vec![Expense {
//!     id: "1".to_string(),
//!     description: "Lunch".to_string(),
//!     amount: Decimal::new(2000, 2),
//!     payer_id: "a".to_string(),
//!     beneficiary_ids: vec!["a".to_string(), "b".to_string()],
//!     date: DateTime::<Utc>::UNIX_EPOCH,
//! }];
//!
//! let transfers = compute_settlement(&compute_balances(&people, &expenses));
//! assert_eq!(transfers[0].to_string(), "Bob pays Alice 10.00");
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{
    build_report, compute_balances, compute_settlement, settle, GroupLedger, IntegrityWarning,
    SettlementReport,
};
pub use io::write_report;
pub use types::{
    Balance, Expense, ExpenseId, NewExpense, Participant, ParticipantId, SettlementError,
    Transaction,
};

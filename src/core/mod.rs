//! Core business logic module
//!
//! This module contains the settlement components:
//! - `money` - Cent rounding and the settlement epsilon
//! - `traits` - The `SignedBalance` seam between calculator and solver
//! - `balance_calculator` - Expenses to per-participant net balances
//! - `settlement` - Greedy debtor/creditor matching
//! - `integrity` - Diagnostics for references the calculator skips
//! - `report` - Balances, transfers and warnings bundled together
//! - `ledger` - In-memory participant and expense stores with deletion guard
//! - `async` - Concurrent balance accumulation for batch processing

pub mod r#async;
pub mod balance_calculator;
pub mod integrity;
pub mod ledger;
pub mod money;
pub mod report;
pub mod settlement;
pub mod traits;

pub use balance_calculator::{compute_balances, BalanceCalculator};
pub use integrity::{check_balances, check_integrity, IntegrityChecker, IntegrityWarning};
pub use ledger::GroupLedger;
pub use r#async::{AsyncBalanceAccumulator, BatchProcessor};
pub use report::{build_report, SettlementReport};
pub use settlement::{compute_settlement, settle, Residual, Settlement};
pub use traits::SignedBalance;

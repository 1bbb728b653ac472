//! Asynchronous implementations of core components
//!
//! This module provides a thread-safe balance accumulator and a batch
//! processor that folds expenses into it from concurrent tokio tasks.
//!
//! # Architecture
//!
//! - **AsyncBalanceAccumulator**: Per-participant running totals in a DashMap
//! - **BatchProcessor**: Splits a batch of expenses into chunks and folds
//!   each chunk on its own task
//!
//! Balances are plain sums, so the order in which chunks land does not
//! change the result. Rounding still happens once, when balances are read.

pub mod balance_accumulator;
pub mod batch_processor;

pub use balance_accumulator::AsyncBalanceAccumulator;
pub use batch_processor::BatchProcessor;

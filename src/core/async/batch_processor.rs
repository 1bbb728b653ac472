//! Batch processing of expenses for async balance accumulation
//!
//! This module provides the `BatchProcessor` struct, which splits a batch of
//! expenses into chunks and folds each chunk into a shared
//! `AsyncBalanceAccumulator` on its own tokio task.
//!
//! # Architecture
//!
//! ```text
//! BatchProcessor
//!     ├── Arc<AsyncBalanceAccumulator>  (shared running totals)
//!     └── workers                       (chunks per batch)
//! ```
//!
//! # Ordering
//!
//! Expenses are independent of each other: each one only adds to totals.
//! Unlike account transactions there is no per-key ordering to preserve, so a
//! batch can be cut into contiguous chunks of any size.

use std::sync::Arc;

use super::AsyncBalanceAccumulator;
use crate::types::{Expense, SettlementError};

/// Batch processor with chunk-based fan-out
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared accumulator the chunks fold into
    accumulator: Arc<AsyncBalanceAccumulator>,

    /// Number of chunks a batch is split into
    workers: usize,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// A `workers` value of zero is treated as one.
    pub fn new(accumulator: Arc<AsyncBalanceAccumulator>, workers: usize) -> Self {
        Self {
            accumulator,
            workers: workers.max(1),
        }
    }

    /// Split a batch into at most `workers` contiguous chunks
    ///
    /// # Guarantees
    ///
    /// - Each expense appears in exactly one chunk
    /// - Chunks keep the original relative order
    /// - No chunk is empty
    pub fn partition(&self, batch: Vec<Expense>) -> Vec<Vec<Expense>> {
        if batch.is_empty() {
            return Vec::new();
        }

        let chunk_size = batch.len().div_ceil(self.workers);
        let mut chunks = Vec::with_capacity(self.workers);
        let mut iter = batch.into_iter().peekable();
        while iter.peek().is_some() {
            chunks.push(iter.by_ref().take(chunk_size).collect());
        }
        chunks
    }

    /// Fold one chunk into the accumulator
    ///
    /// Returns the number of expenses applied.
    pub fn process_chunk(&self, chunk: &[Expense]) -> usize {
        for expense in chunk {
            self.accumulator.apply(expense);
        }
        chunk.len()
    }

    /// Process a batch of expenses concurrently
    ///
    /// Spawns one task per chunk and waits for all of them. Returns the number
    /// of expenses applied.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError` if a task panicked or was cancelled. Chunks
    /// that completed before the failure stay applied.
    pub async fn process_batch(&self, batch: Vec<Expense>) -> Result<usize, SettlementError> {
        let mut tasks = Vec::new();
        for chunk in self.partition(batch) {
            let processor = self.clone();
            tasks.push(tokio::spawn(
                async move { processor.process_chunk(&chunk) },
            ));
        }

        let mut applied = 0;
        for task in tasks {
            applied += task
                .await
                .map_err(|e| SettlementError::runtime(format!("Batch task failed: {}", e)))?;
        }

        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::balance_calculator::compute_balances;
    use crate::types::Participant;
    use chrono::{DateTime, Utc};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn people() -> Vec<Participant> {
        vec![
            Participant::new("a", "A"),
            Participant::new("b", "B"),
            Participant::new("c", "C"),
        ]
    }

    fn expenses(count: usize) -> Vec<Expense> {
        let ids = ["a", "b", "c"];
        (0..count)
            .map(|i| Expense {
                id: i.to_string(),
                description: "test".to_string(),
                amount: Decimal::new(1000 + i as i64 * 7, 2),
                payer_id: ids[i % 3].to_string(),
                beneficiary_ids: ids[..=(i % 3)].iter().map(|s| s.to_string()).collect(),
                date: DateTime::<Utc>::UNIX_EPOCH,
            })
            .collect()
    }

    fn processor(workers: usize) -> BatchProcessor {
        BatchProcessor::new(Arc::new(AsyncBalanceAccumulator::new(&people())), workers)
    }

    #[rstest]
    #[case::even_split(10, 2, vec![5, 5])]
    #[case::uneven_split(10, 3, vec![4, 4, 2])]
    #[case::more_workers_than_items(2, 8, vec![1, 1])]
    #[case::single_worker(5, 1, vec![5])]
    #[case::empty(0, 4, vec![])]
    fn test_partition(
        #[case] count: usize,
        #[case] workers: usize,
        #[case] expected_sizes: Vec<usize>,
    ) {
        let batch = expenses(count);
        let chunks = processor(workers).partition(batch.clone());

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, expected_sizes);

        let flattened: Vec<Expense> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, batch);
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let chunks = processor(0).partition(expenses(3));
        assert_eq!(chunks.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_matches_sync_calculator() {
        let accumulator = Arc::new(AsyncBalanceAccumulator::new(&people()));
        let processor = BatchProcessor::new(Arc::clone(&accumulator), 4);
        let batch = expenses(101);

        let applied = processor.process_batch(batch.clone()).await.unwrap();

        assert_eq!(applied, 101);
        assert_eq!(accumulator.balances(), compute_balances(&people(), &batch));
    }

    #[tokio::test]
    async fn test_process_empty_batch() {
        let applied = processor(4).process_batch(Vec::new()).await.unwrap();
        assert_eq!(applied, 0);
    }
}

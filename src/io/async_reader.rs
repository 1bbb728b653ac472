//! Asynchronous CSV reader with stream interface
//!
//! Provides a streaming interface over participant or expense records from a
//! CSV file. Supports batch reading for efficient async processing.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio for async runtime and concurrency primitives
//! - Batch reading for efficient processing
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader<T> → Batches of T
//!                  ↓
//!           csv_format module
//!           (CsvFormat::from_csv_record)
//! ```

use crate::io::csv_format::CsvFormat;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use std::marker::PhantomData;

/// Asynchronous CSV reader
///
/// Provides batch reading interface over records of type `T`.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin, T> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    line_num: usize,
    _record: PhantomData<fn() -> T>,
}

impl<R, T> AsyncReader<R, T>
where
    R: AsyncRead + Unpin + Send + 'static,
    T: CsvFormat,
{
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self {
            csv_reader,
            line_num: 0,
            _record: PhantomData,
        }
    }

    /// Read a batch of records
    ///
    /// Reads up to `batch_size` rows. Invalid rows are logged and skipped, so
    /// the batch may be shorter than the number of rows consumed.
    ///
    /// Returns an empty vector when the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<T> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<T::Record>();

        while batch.len() < batch_size {
            let Some(next) = records.next().await else {
                break;
            };
            self.line_num += 1;
            // +1 for the header row
            let line = self.line_num + 1;

            match next {
                Ok(csv_record) => match T::from_csv_record(csv_record) {
                    Ok(record) => batch.push(record),
                    Err(e) => tracing::warn!(line, error = %e, "Record conversion error"),
                },
                Err(e) => tracing::warn!(line, error = %e, "CSV parse error"),
            }
        }

        batch
    }

    /// Read every remaining record
    pub async fn read_all(&mut self, batch_size: usize) -> Vec<T> {
        let mut records = Vec::new();
        loop {
            let batch = self.read_batch(batch_size).await;
            if batch.is_empty() {
                break;
            }
            records.extend(batch);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Expense, Participant};
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    const EXPENSE_HEADER: &str = "id,description,amount,payer,beneficiaries,date\n";

    fn expense_reader(rows: &str) -> AsyncReader<Cursor<Vec<u8>>, Expense> {
        let content = format!("{}{}", EXPENSE_HEADER, rows);
        AsyncReader::new(Cursor::new(content.into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut reader = expense_reader(
            "e1,Dinner,90,a,a;b;c,\n\
             e2,Taxi,30,b,b;c,\n\
             e3,Coffee,4.50,c,c,\n",
        );

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "e1");
        assert_eq!(batch[1].id, "e2");

        let batch = reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].amount, Decimal::new(450, 2));

        assert!(reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut reader = expense_reader("");
        assert!(reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let mut reader = expense_reader(
            "e1,Broken,abc,a,a,\n\
             e2,Negative,-5,a,a,\n\
             e3,Lunch,15,a,a;b,\n",
        );

        let batch = reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "e3");
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let content = "id,name\n  p1  ,  Alice  \n";
        let mut reader: AsyncReader<_, Participant> =
            AsyncReader::new(Cursor::new(content.as_bytes()));

        let batch = reader.read_batch(10).await;
        assert_eq!(batch, vec![Participant::new("p1", "Alice")]);
    }

    #[tokio::test]
    async fn test_async_reader_read_all_spans_batches() {
        let rows: String = (1..=7)
            .map(|i| format!("e{},Item,{},a,a;b,\n", i, i))
            .collect();
        let mut reader = expense_reader(&rows);

        let all = reader.read_all(3).await;

        assert_eq!(all.len(), 7);
        assert_eq!(all[6].id, "e7");
    }
}

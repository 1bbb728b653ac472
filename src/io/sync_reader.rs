//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over participant or expense records from a
//! CSV file. Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! `SyncReader<T>` implements the Iterator trait, yielding `Result<T, String>`
//! for each CSV row:
//!
//! ```no_run
//! use rust_settlement_engine::io::sync_reader::SyncReader;
//! use rust_settlement_engine::types::Expense;
//! use std::path::Path;
//!
//! let reader = SyncReader::<Expense>::new(Path::new("expenses.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(expense) => println!("Expense: {:?}", expense),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging

use crate::io::csv_format::CsvFormat;
use crate::types::SettlementError;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::marker::PhantomData;
use std::path::Path;

/// Synchronous CSV reader
///
/// Reads one row at a time; memory use does not grow with the file size.
#[derive(Debug)]
pub struct SyncReader<T> {
    reader: csv::Reader<File>,
    line_num: usize,
    _record: PhantomData<fn() -> T>,
}

impl<T: CsvFormat> SyncReader<T> {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be omitted)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the path does not exist
    /// - `IoError` for any other failure to open the file
    pub fn new(path: &Path) -> Result<Self, SettlementError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SettlementError::file_not_found(path),
            _ => SettlementError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
            _record: PhantomData,
        })
    }
}

impl<T: CsvFormat> Iterator for SyncReader<T> {
    type Item = Result<T, String>;

    /// Get the next record from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(T))` - Successfully parsed record
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<T::Record>();

        let next = deserializer.next()?;
        self.line_num += 1;
        // +1 for the header row
        let line = self.line_num + 1;

        Some(match next {
            Ok(record) => T::from_csv_record(record).map_err(|e| format!("Line {}: {}", line, e)),
            Err(e) => Err(format!("Line {}: CSV parse error: {}", line, e)),
        })
    }
}

/// Read every valid record from a file
///
/// Invalid rows are logged and skipped; only failing to open the file is fatal.
pub fn read_all<T: CsvFormat>(path: &Path) -> Result<Vec<T>, SettlementError> {
    let mut records = Vec::new();
    for result in SyncReader::<T>::new(path)? {
        match result {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "Skipping malformed record"),
        }
    }
    Ok(records)
}

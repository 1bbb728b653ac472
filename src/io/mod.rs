//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, report serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_expense_record, convert_participant_record, write_balances_csv, write_report,
    write_transactions_csv, CsvFormat, ExpenseCsvRecord, ParticipantCsvRecord,
};
pub use sync_reader::{read_all, SyncReader};

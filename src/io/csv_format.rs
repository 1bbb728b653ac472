//! CSV format handling for participant/expense records and report output
//!
//! This module centralizes all CSV format concerns, providing:
//! - Raw record structures for deserialization
//! - Conversion from raw records to domain types
//! - Balance and settlement serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Input formats
//!
//! ```text
//! id,name
//! p1,Alice
//!
//! id,description,amount,payer,beneficiaries,date
//! e1,Dinner,90.00,p1,p1;p2;p3,2024-05-01T19:30:00Z
//! ```

use crate::cli::ReportKind;
use crate::core::money::is_accumulable;
use crate::core::SettlementReport;
use crate::types::{Balance, Expense, Participant, SettlementError, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Separator between ids in the `beneficiaries` column
pub const BENEFICIARY_SEPARATOR: char = ';';

/// Participant row: `id,name`
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParticipantCsvRecord {
    pub id: String,
    pub name: String,
}

/// Expense row: `id,description,amount,payer,beneficiaries,date`
///
/// Amount is read as a string so malformed values produce a readable error
/// instead of a generic deserialization failure.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExpenseCsvRecord {
    pub id: String,
    pub description: String,
    pub amount: String,
    pub payer: String,
    #[serde(default)]
    pub beneficiaries: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// A domain type that can be read from a CSV row
pub trait CsvFormat: Sized {
    /// Raw row shape
    type Record: DeserializeOwned + Send + 'static;

    /// Validate and convert a raw row
    fn from_csv_record(record: Self::Record) -> Result<Self, String>;
}

impl CsvFormat for Participant {
    type Record = ParticipantCsvRecord;

    fn from_csv_record(record: Self::Record) -> Result<Self, String> {
        convert_participant_record(record)
    }
}

impl CsvFormat for Expense {
    type Record = ExpenseCsvRecord;

    fn from_csv_record(record: Self::Record) -> Result<Self, String> {
        convert_expense_record(record)
    }
}

/// Convert a ParticipantCsvRecord to a Participant
///
/// Both id and name must be non-blank.
pub fn convert_participant_record(record: ParticipantCsvRecord) -> Result<Participant, String> {
    let id = record.id.trim();
    if id.is_empty() {
        return Err(SettlementError::empty_field("participant id").to_string());
    }

    let name = record.name.trim();
    if name.is_empty() {
        return Err(format!("Participant {} has an empty name", id));
    }

    Ok(Participant::new(id, name))
}

/// Convert an ExpenseCsvRecord to an Expense
///
/// This function:
/// - Parses the amount into a Decimal and requires it to be positive
/// - Splits the beneficiary list on `;`, dropping blank entries
/// - Parses the date as RFC 3339, defaulting to the Unix epoch when blank
///
/// An empty beneficiary list is accepted here; the balance calculator skips
/// such expenses and the integrity checker reports them.
pub fn convert_expense_record(record: ExpenseCsvRecord) -> Result<Expense, String> {
    let id = record.id.trim();
    if id.is_empty() {
        return Err(SettlementError::empty_field("expense id").to_string());
    }

    let amount_str = record.amount.trim();
    let amount = match Decimal::from_str(amount_str) {
        Ok(amount) if amount > Decimal::ZERO && is_accumulable(amount) => amount,
        _ => return Err(SettlementError::invalid_amount(&record.amount, id).to_string()),
    };

    let payer = record.payer.trim();
    if payer.is_empty() {
        return Err(format!("Expense {} has no payer", id));
    }

    let beneficiary_ids = record
        .beneficiaries
        .as_deref()
        .unwrap_or_default()
        .split(BENEFICIARY_SEPARATOR)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();

    let date = match record.date.as_deref().map(str::trim) {
        None | Some("") => DateTime::<Utc>::UNIX_EPOCH,
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(|_| SettlementError::invalid_date(raw, id).to_string())?,
    };

    Ok(Expense {
        id: id.to_string(),
        description: record.description.trim().to_string(),
        amount,
        payer_id: payer.to_string(),
        beneficiary_ids,
        date,
    })
}

/// Write balances in CSV format
///
/// Columns: participant, name, paid, share, balance. Rows keep the order of
/// the input slice (participant order).
pub fn write_balances_csv(balances: &[Balance], output: &mut dyn Write) -> Result<(), SettlementError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["participant", "name", "paid", "share", "balance"])?;
    for balance in balances {
        writer.write_record(&[
            balance.participant_id.clone(),
            balance.participant_name.clone(),
            format!("{:.2}", balance.paid),
            format!("{:.2}", balance.share),
            format!("{:.2}", balance.balance),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write settlement transactions in CSV format
///
/// Columns: from, to, amount. Rows keep the order the solver matched them in.
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["from", "to", "amount"])?;
    for transaction in transactions {
        writer.write_record(&[
            transaction.from.clone(),
            transaction.to.clone(),
            format!("{:.2}", transaction.amount),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the requested sections of a report
///
/// In `All` mode the balances table comes first, then one empty line, then
/// the settlement table.
pub fn write_report(
    report: &SettlementReport,
    kind: ReportKind,
    output: &mut dyn Write,
) -> Result<(), SettlementError> {
    match kind {
        ReportKind::Balances => write_balances_csv(&report.balances, output),
        ReportKind::Settlement => write_transactions_csv(&report.transactions, output),
        ReportKind::All => {
            write_balances_csv(&report.balances, output)?;
            writeln!(output)?;
            write_transactions_csv(&report.transactions, output)
        }
    }
}

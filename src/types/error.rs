//! Error types for the Rust Settlement Engine
//!
//! This module defines all error types that can occur around the settlement core.
//! The core computations themselves are total and never fail; errors come from
//! loading input files, validating ledger operations and writing reports.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid amounts or dates, etc.
//! - **Ledger Errors**: Unknown or duplicate ids, participant still referenced, etc.
//! - **Integrity Errors**: Warnings promoted to failures in strict mode

use thiserror::Error;

/// Main error type for the settlement engine
///
/// Each variant includes the context needed to find the offending record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettlementError {
    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents processing from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Invalid amount value (non-positive or malformed)
    #[error("Invalid amount '{amount}' for expense {expense}")]
    InvalidAmount {
        /// The invalid amount string
        amount: String,
        /// Expense ID
        expense: String,
    },

    /// Invalid date value
    #[error("Invalid date '{date}' for expense {expense}")]
    InvalidDate {
        /// The invalid date string
        date: String,
        /// Expense ID
        expense: String,
    },

    /// A required text field was blank
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the blank field
        field: String,
    },

    /// An expense was submitted without beneficiaries
    #[error("Expense '{description}' has no beneficiaries")]
    MissingBeneficiaries {
        /// Description of the rejected expense
        description: String,
    },

    /// A referenced participant does not exist
    #[error("Unknown participant {participant}")]
    UnknownParticipant {
        /// Participant ID that was not found
        participant: String,
    },

    /// A referenced expense does not exist
    #[error("Unknown expense {expense}")]
    UnknownExpense {
        /// Expense ID that was not found
        expense: String,
    },

    /// Participant ID already present in the ledger
    #[error("Duplicate participant ID {participant}")]
    DuplicateParticipant {
        /// Participant ID that is duplicated
        participant: String,
    },

    /// Expense ID already present in the ledger
    #[error("Duplicate expense ID {expense}")]
    DuplicateExpense {
        /// Expense ID that is duplicated
        expense: String,
    },

    /// Participant cannot be removed while expenses reference it
    #[error("Participant {participant} is referenced by {expenses} expense(s)")]
    ParticipantInUse {
        /// Participant ID
        participant: String,
        /// Number of expenses referencing the participant
        expenses: usize,
    },

    /// Integrity warnings found while running in strict mode
    #[error("Input failed integrity checks with {count} warning(s); first: {first}")]
    IntegrityViolation {
        /// Number of warnings
        count: usize,
        /// Rendered first warning
        first: String,
    },

    /// The async runtime could not be created or a task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },
}

// Conversion from io::Error to SettlementError
impl From<std::io::Error> for SettlementError {
    fn from(error: std::io::Error) -> Self {
        SettlementError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to SettlementError
impl From<csv::Error> for SettlementError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        SettlementError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Conversion from csv_async::Error to SettlementError
impl From<csv_async::Error> for SettlementError {
    fn from(error: csv_async::Error) -> Self {
        SettlementError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SettlementError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        SettlementError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str, expense: &str) -> Self {
        SettlementError::InvalidAmount {
            amount: amount.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(date: &str, expense: &str) -> Self {
        SettlementError::InvalidDate {
            date: date.to_string(),
            expense: expense.to_string(),
        }
    }

    /// Create an EmptyField error
    pub fn empty_field(field: &str) -> Self {
        SettlementError::EmptyField {
            field: field.to_string(),
        }
    }

    /// Create a MissingBeneficiaries error
    pub fn missing_beneficiaries(description: &str) -> Self {
        SettlementError::MissingBeneficiaries {
            description: description.to_string(),
        }
    }

    /// Create an UnknownParticipant error
    pub fn unknown_participant(participant: &str) -> Self {
        SettlementError::UnknownParticipant {
            participant: participant.to_string(),
        }
    }

    /// Create an UnknownExpense error
    pub fn unknown_expense(expense: &str) -> Self {
        SettlementError::UnknownExpense {
            expense: expense.to_string(),
        }
    }

    /// Create a DuplicateParticipant error
    pub fn duplicate_participant(participant: &str) -> Self {
        SettlementError::DuplicateParticipant {
            participant: participant.to_string(),
        }
    }

    /// Create a DuplicateExpense error
    pub fn duplicate_expense(expense: &str) -> Self {
        SettlementError::DuplicateExpense {
            expense: expense.to_string(),
        }
    }

    /// Create a ParticipantInUse error
    pub fn participant_in_use(participant: &str, expenses: usize) -> Self {
        SettlementError::ParticipantInUse {
            participant: participant.to_string(),
            expenses,
        }
    }

    /// Create a RuntimeError error
    pub fn runtime(message: impl std::fmt::Display) -> Self {
        SettlementError::RuntimeError {
            message: message.to_string(),
        }
    }
}

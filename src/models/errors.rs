use std::error::Error as _;

use thiserror::Error;

use crate::models::RawTransaction;
use crate::sgml::StructuralParseError;
use crate::types::{AmountError, DateError};

/// A transaction lacks a required field or carries one that cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Transaction [{fitid}] at line {line} is missing required field {field}")]
    MissingField {
        field: &'static str,
        fitid: String,
        line: usize
    },
    #[error("Transaction [{fitid}] at line {line} has an invalid TRNAMT")]
    InvalidAmount {
        fitid: String,
        line: usize,
        #[source]
        source: AmountError
    },
    #[error("Transaction [{fitid}] at line {line} has an invalid DTPOSTED")]
    InvalidDate {
        fitid: String,
        line: usize,
        #[source]
        source: DateError
    }
}

impl FieldError {
    pub fn missing_field(tx: &RawTransaction, field: &'static str) -> Self {
        Self::MissingField {
            field,
            fitid: tx.label().to_string(),
            line: tx.line
        }
    }

    pub fn invalid_amount(tx: &RawTransaction, source: AmountError) -> Self {
        Self::InvalidAmount {
            fitid: tx.label().to_string(),
            line: tx.line,
            source
        }
    }

    pub fn invalid_date(tx: &RawTransaction, source: DateError) -> Self {
        Self::InvalidDate {
            fitid: tx.label().to_string(),
            line: tx.line,
            source
        }
    }
}

/// Everything that can stop one document from being imported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error(transparent)]
    Structural(#[from] StructuralParseError),
    #[error(transparent)]
    Field(#[from] FieldError)
}

impl ImportError {
    /// The full cause chain on one line, for logs and batch error events.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();

        if let Self::Structural(_) = self {
            //NOTE: StructuralParseError already renders its cause inline
            source = None;
        }

        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        message
    }
}

/// The single error kind of the single-file import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse OFX file")]
pub struct ValidationError {
    #[from]
    pub cause: ImportError
}

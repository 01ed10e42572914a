mod errors;
mod raw_transaction;
mod transaction;

use serde::Serialize;
use std::convert::Infallible;
use std::str::FromStr;

pub use errors::{FieldError, ImportError, ValidationError};
pub use raw_transaction::RawTransaction;
pub use transaction::{BatchParsedTransaction, ParsedTransaction};

/// Category assigned to a record by the single-file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Expense,
    Income
}

/// Category assigned to a record by the batch import, which keeps zero amounts apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchTransactionType {
    Expense,
    Income,
    Zero
}

/// OFX `TRNTYPE` codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Credit,
    Debit,
    Int,
    Div,
    Fee,
    SrvChg,
    Dep,
    Atm,
    Pos,
    Xfer,
    Check,
    Payment,
    Cash,
    DirectDep,
    DirectDebit,
    RepeatPmt,
    Hold,
    Other,
    /// A code outside the OFX vocabulary, kept verbatim.
    Unknown(String)
}

impl FromStr for TransactionKind {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let kind = match value.trim().to_ascii_uppercase().as_str() {
            "CREDIT" => Self::Credit,
            "DEBIT" => Self::Debit,
            "INT" => Self::Int,
            "DIV" => Self::Div,
            "FEE" => Self::Fee,
            "SRVCHG" => Self::SrvChg,
            "DEP" => Self::Dep,
            "ATM" => Self::Atm,
            "POS" => Self::Pos,
            "XFER" => Self::Xfer,
            "CHECK" => Self::Check,
            "PAYMENT" => Self::Payment,
            "CASH" => Self::Cash,
            "DIRECTDEP" => Self::DirectDep,
            "DIRECTDEBIT" => Self::DirectDebit,
            "REPEATPMT" => Self::RepeatPmt,
            "HOLD" => Self::Hold,
            "OTHER" => Self::Other,
            _ => Self::Unknown(value.trim().to_string())
        };

        Ok(kind)
    }
}

/// OFX `CORRECTACTION`: how a record amends the one named by `CORRECTFITID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CorrectAction {
    Delete,
    Replace
}

impl FromStr for CorrectAction {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DELETE" => Ok(Self::Delete),
            "REPLACE" => Ok(Self::Replace),
            other => Err(format!("Unknown correction action '{other}'"))
        }
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BatchTransactionType, TransactionType};
use crate::types::FileIndex;

/// A statement transaction after decoding and classification.
///
/// The sign of the source amount lives only in `transaction_type`; `amount` is always
/// non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTransaction<K = TransactionType> {
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub description: String,
    pub fitid: String,
    #[serde(rename = "type")]
    pub transaction_type: K
}

/// A transaction produced by the batch import, tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchParsedTransaction {
    pub file_index: FileIndex,
    pub filename: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub transaction_type: BatchTransactionType,
    pub amount: Decimal,
    pub description: String,
    pub fitid: String
}

impl BatchParsedTransaction {
    pub fn new(transaction: ParsedTransaction<BatchTransactionType>, file_index: FileIndex, filename: &str) -> Self {
        Self {
            file_index,
            filename: filename.to_string(),
            date: transaction.date,
            transaction_type: transaction.transaction_type,
            amount: transaction.amount,
            description: transaction.description,
            fitid: transaction.fitid
        }
    }
}

mod extractor;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::RawTransaction;

pub use extractor::{extract_statements, extract_transactions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Bank,
    CreditCard
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerBalance {
    pub amount: Decimal,
    pub as_of: Option<DateTime<Utc>>
}

/// One statement response (`STMTRS` or `CCSTMTRS`) and its transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub kind: StatementKind,
    pub currency: Option<String>,
    pub account_id: Option<String>,
    pub bank_id: Option<String>,
    pub account_type: Option<String>,
    pub ledger_balance: Option<LedgerBalance>,
    pub transactions: Vec<RawTransaction>
}

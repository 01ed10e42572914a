use rust_decimal::Decimal;

use crate::models::{BatchTransactionType, TransactionType};

/// Maps a signed statement amount to a category.
pub trait ClassificationPolicy {
    type Category: Copy;

    fn classify(&self, amount: &Decimal) -> Self::Category;
}

/// Rule of the single-file import: anything not negative is income, zero included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleFilePolicy;

impl ClassificationPolicy for SingleFilePolicy {
    type Category = TransactionType;

    fn classify(&self, amount: &Decimal) -> TransactionType {
        if !amount.is_zero() && amount.is_sign_negative() {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }
}

/// Rule of the batch import: zero amounts get their own category.
//TODO: Settle with product whether single-file imports should also report zero amounts apart
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchPolicy;

impl ClassificationPolicy for BatchPolicy {
    type Category = BatchTransactionType;

    fn classify(&self, amount: &Decimal) -> BatchTransactionType {
        if amount.is_zero() {
            BatchTransactionType::Zero
        } else if amount.is_sign_negative() {
            BatchTransactionType::Expense
        } else {
            BatchTransactionType::Income
        }
    }
}

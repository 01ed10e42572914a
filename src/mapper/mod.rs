mod classifier;
mod mapping;
#[cfg(test)]
mod tests;
mod text;

pub use classifier::{BatchPolicy, ClassificationPolicy, SingleFilePolicy};
pub use mapping::{describe, map_transaction, map_transactions, NO_DESCRIPTION};
pub use text::normalize_text;

/// What to do with a transaction that lacks `DTPOSTED`, `TRNAMT` or `FITID`, or whose
/// date or amount cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFieldPolicy {
    /// Reject the whole document.
    #[default]
    FailFile,
    /// Drop the record with a warning and keep the rest.
    SkipRecord
}

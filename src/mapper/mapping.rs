use tracing::{debug, warn};

use crate::mapper::{normalize_text, ClassificationPolicy, MissingFieldPolicy};
use crate::models::{FieldError, ParsedTransaction, RawTransaction};
use crate::types::{decode_date, parse_amount};

/// Description used when a transaction carries neither `MEMO` nor `NAME`.
pub const NO_DESCRIPTION: &str = "No description";

/// Decodes and classifies one raw transaction.
///
/// # Errors
/// Returns `FieldError` if `FITID`, `TRNAMT` or `DTPOSTED` is absent, or if the amount or
/// date cannot be decoded.
pub fn map_transaction<P: ClassificationPolicy>(raw: &RawTransaction, policy: &P) -> Result<ParsedTransaction<P::Category>, FieldError> {
    let Some(fitid) = raw.fitid.as_deref() else {
        return Err(FieldError::missing_field(raw, "FITID"));
    };

    let Some(amount) = raw.amount.as_deref() else {
        return Err(FieldError::missing_field(raw, "TRNAMT"));
    };

    let Some(date) = raw.date_posted.as_deref() else {
        return Err(FieldError::missing_field(raw, "DTPOSTED"));
    };

    let signed = parse_amount(amount).map_err(|error| FieldError::invalid_amount(raw, error))?;
    let date = decode_date(date).map_err(|error| FieldError::invalid_date(raw, error))?;

    Ok(ParsedTransaction {
        amount: signed.abs().normalize(),
        date,
        description: describe(raw),
        fitid: fitid.trim().to_string(),
        transaction_type: policy.classify(&signed)
    })
}

/// Maps every raw transaction, in order, applying `missing` to records that fail.
///
/// # Errors
/// Returns the first `FieldError` under [`MissingFieldPolicy::FailFile`].
pub fn map_transactions<P: ClassificationPolicy>(
    raws: &[RawTransaction],
    policy: &P,
    missing: MissingFieldPolicy
) -> Result<Vec<ParsedTransaction<P::Category>>, FieldError> {
    let mut transactions = Vec::with_capacity(raws.len());

    for raw in raws {
        match map_transaction(raw, policy) {
            Ok(transaction) => transactions.push(transaction),
            Err(error) if missing == MissingFieldPolicy::SkipRecord => {
                warn!("Skipping transaction: {error}");
            }
            Err(error) => return Err(error)
        }
    }

    debug!("Mapped {} of {} transactions", transactions.len(), raws.len());

    Ok(transactions)
}

/// `MEMO`, else `NAME`, else [`NO_DESCRIPTION`]. A value that normalizes to nothing counts
/// as absent.
pub fn describe(raw: &RawTransaction) -> String {
    [raw.memo.as_deref(), raw.name.as_deref()]
        .into_iter()
        .flatten()
        .map(normalize_text)
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

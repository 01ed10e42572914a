mod amount;
mod errors;
mod instant;

pub use amount::parse_amount;
pub use errors::{AmountError, DateError};
pub use instant::{decode_date, DecodedInstant, ZoneOffset};

/// Zero-based position of a file within a batch.
pub type FileIndex = usize;

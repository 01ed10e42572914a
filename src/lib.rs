//! Ingestion of OFX bank and credit card statement exports.
//!
//! Raw text is read into a lenient tag tree ([`sgml`]), the statement transactions are
//! located ([`statement`]), decoded and classified ([`mapper`]), and handed back either as
//! a list for a single file or as an ordered event stream for a batch of files
//! ([`engine`]).

pub mod engine;
pub mod mapper;
pub mod models;
pub mod sgml;
pub mod statement;
pub mod types;

#[cfg(test)]
mod fixtures;

pub use engine::{collect_transactions, collect_transactions_with_progress, stream_batch, BatchEngine, BatchStream};
pub use engine::{parse, parse_bytes, parse_statements, parse_with_options};
pub use engine::{BatchEvent, BatchFile, BatchIterator, ImportOptions};
pub use mapper::MissingFieldPolicy;
pub use models::{BatchParsedTransaction, BatchTransactionType, ParsedTransaction, TransactionType, ValidationError};

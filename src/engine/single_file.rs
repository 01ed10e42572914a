use tracing::debug;

use crate::engine::pipeline::import_document;
use crate::engine::ImportOptions;
use crate::mapper::SingleFilePolicy;
use crate::models::{ImportError, ParsedTransaction, ValidationError};
use crate::sgml::{decode_bytes, ParsedDocument};
use crate::statement::{extract_statements, Statement};

/// Parses one OFX export into its transactions, in document order.
///
/// Zero amounts are classified as income.
///
/// # Errors
/// Every failure surfaces as `ValidationError` ("Failed to parse OFX file") with the
/// underlying cause as its source.
pub fn parse(content: &str) -> Result<Vec<ParsedTransaction>, ValidationError> {
    parse_with_options(content, &ImportOptions::default())
}

pub fn parse_with_options(content: &str, options: &ImportOptions) -> Result<Vec<ParsedTransaction>, ValidationError> {
    let transactions = import_document(content, &SingleFilePolicy, options)?;

    debug!("Parsed {} transactions", transactions.len());

    Ok(transactions)
}

/// Like [`parse`], for a raw file buffer in UTF-8 or Windows-1252.
pub fn parse_bytes(buffer: &[u8]) -> Result<Vec<ParsedTransaction>, ValidationError> {
    parse(&decode_bytes(buffer))
}

/// The statements of one export with their account details and raw transactions.
pub fn parse_statements(content: &str) -> Result<Vec<Statement>, ValidationError> {
    let document = ParsedDocument::parse(content).map_err(ImportError::from)?;
    let statements = extract_statements(&document).map_err(ImportError::from)?;

    Ok(statements)
}

use crate::engine::ImportOptions;
use crate::mapper::{map_transactions, ClassificationPolicy};
use crate::models::{ImportError, ParsedTransaction};
use crate::sgml::ParsedDocument;
use crate::statement::extract_transactions;

/// Parses one document and maps its transactions under `policy`.
pub(crate) fn import_document<P: ClassificationPolicy>(
    content: &str,
    policy: &P,
    options: &ImportOptions
) -> Result<Vec<ParsedTransaction<P::Category>>, ImportError> {
    let document = ParsedDocument::parse(content)?;
    let raws = extract_transactions(&document)?;
    let transactions = map_transactions(&raws, policy, options.missing_field_policy)?;

    Ok(transactions)
}

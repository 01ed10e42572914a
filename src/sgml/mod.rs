mod decode;
mod errors;
mod header;
mod tokenizer;
mod tree;

use serde::Serialize;

pub use decode::decode_bytes;
pub use errors::{StructuralParseError, SyntaxError};
pub use header::{Dialect, Header};
pub use tree::RawElement;

/// A header plus the element tree rooted at the document's single top-level element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub header: Header,
    pub root: RawElement
}

impl ParsedDocument {
    /// Parses the full text of an OFX export, SGML or XML flavoured.
    ///
    /// # Errors
    /// Returns `StructuralParseError` when the body holds no element, a tag is cut off, or
    /// an end tag closes nothing that was opened.
    pub fn parse(content: &str) -> Result<Self, StructuralParseError> {
        let (header, body) = header::split_header(content);
        let root = tree::build_tree(body).map_err(StructuralParseError::malformed_document)?;

        Ok(Self { header, root })
    }
}

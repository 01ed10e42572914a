use thiserror::Error;

/// Low-level cause of a structural failure, pointing at the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Document contains no root element")]
    NoRootElement,
    #[error("Tag opened at line {line} is never terminated by '>'")]
    UnterminatedTag {
        line: usize
    },
    #[error("Comment or declaration opened at line {line} is never terminated")]
    UnterminatedMarkup {
        line: usize
    },
    #[error("Empty tag name at line {line}")]
    EmptyTagName {
        line: usize
    },
    #[error("Invalid tag name '{name}' at line {line}")]
    InvalidTagName {
        name: String,
        line: usize
    },
    #[error("Closing tag </{name}> at line {line} appears before any root element")]
    EndTagBeforeRoot {
        name: String,
        line: usize
    },
    #[error("Closing tag </{name}> at line {line} does not match any open element")]
    UnmatchedEndTag {
        name: String,
        line: usize
    },
    #[error("Expected root element <{expected}> but found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String
    },
    #[error("Element <{parent}> at line {line} has no <{child}> element")]
    MissingElement {
        parent: String,
        child: &'static str,
        line: usize
    },
    #[error("Document contains no statement response")]
    NoStatementResponse
}

/// Raised when a document cannot be read as a tag tree or lacks the statement structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {cause}")]
pub struct StructuralParseError {
    pub message: String,
    #[source]
    pub cause: SyntaxError
}

impl StructuralParseError {
    pub fn malformed_document(cause: SyntaxError) -> Self {
        Self { message: "Malformed OFX document".to_string(), cause }
    }

    pub fn missing_statement(cause: SyntaxError) -> Self {
        Self { message: "OFX document has no readable statement".to_string(), cause }
    }
}

use crate::sgml::errors::SyntaxError;
use crate::sgml::tokenizer::{Token, Tokenizer};
use serde::Serialize;
use tracing::{debug, warn};

/// OFX elements that only ever carry a value. An empty one must not adopt the tags that follow it.
const DATA_ELEMENTS: &[&str] = &[
    // STMTTRN
    "TRNTYPE", "DTPOSTED", "DTUSER", "DTAVAIL", "TRNAMT", "FITID", "CORRECTFITID", "CORRECTACTION",
    "SRVRTID", "CHECKNUM", "REFNUM", "SIC", "PAYEEID", "NAME", "EXTDNAME", "MEMO", "CURSYM", "CURRATE",
    // PAYEE
    "ADDR1", "ADDR2", "ADDR3", "CITY", "STATE", "POSTALCODE", "COUNTRY", "PHONE",
    // Statement and account
    "CURDEF", "BANKID", "BRANCHID", "ACCTID", "ACCTTYPE", "ACCTKEY", "BALAMT", "DTASOF", "DTSTART", "DTEND",
    "MKTGINFO",
    // Signon and response status
    "TRNUID", "CLTCOOKIE", "CODE", "SEVERITY", "MESSAGE", "DTSERVER", "LANGUAGE", "DTPROFUP", "DTACCTUP",
    "ORG", "FID"
];

/// One element of the tag tree.
///
/// Data elements carry `text` and never have children; aggregates carry children in
/// document order, repeated names included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawElement {
    pub name: String,
    pub text: Option<String>,
    pub children: Vec<RawElement>,
    /// Line of the start tag, 1-based within the tag body.
    pub line: usize
}

impl RawElement {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
            line
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&RawElement> {
        self.children.iter().find(|child| child.is_named(name))
    }

    /// All direct children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawElement> + 'a {
        self.children.iter().filter(move |child| child.is_named(name))
    }

    /// Text of the first direct child with the given name. A present but empty element
    /// yields `Some("")`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.child(name).map(|child| child.text.as_deref().unwrap_or_default())
    }

    /// Follows a chain of first-match children.
    pub fn find_path(&self, path: &[&str]) -> Option<&RawElement> {
        path.iter().try_fold(self, |element, name| element.child(name))
    }
}

/// Builds the element tree from the tag body, closing elements implicitly where the
/// SGML dialect leaves end tags out.
pub(crate) fn build_tree(body: &str) -> Result<RawElement, SyntaxError> {
    let mut stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;

    for token in Tokenizer::new(body) {
        let token = token?;

        if let Some(root) = &root {
            warn!("Ignoring content after the closing of root element <{}>", root.name);
            break;
        }

        match token {
            Token::Start { name, line } => {
                let name = name.to_ascii_uppercase();

                //NOTE: A data element ends where the next tag begins, even when left blank
                if stack.last().is_some_and(|top| top.text.is_some() || is_blank_data_element(top)) {
                    let top = stack.len() - 1;
                    close_from(&mut stack, top, &mut root);
                }

                //NOTE: A repeated aggregate closes its open predecessor and anything left inside it
                if let Some(position) = stack.iter().rposition(|open| open.name == name) {
                    close_from(&mut stack, position, &mut root);
                }

                if root.is_some() {
                    warn!("Ignoring element <{name}> at line {line} opened after the root element closed");
                    break;
                }

                stack.push(RawElement::new(name, line));
            }
            Token::End { name, line } => {
                let name = name.to_ascii_uppercase();

                match stack.iter().rposition(|open| open.name == name) {
                    Some(position) => close_from(&mut stack, position, &mut root),
                    None if stack.is_empty() => return Err(SyntaxError::EndTagBeforeRoot { name, line }),
                    None if closes_previous_sibling(&stack, &name) => {
                        debug!("Explicit </{name}> at line {line} for an implicitly closed element");
                    }
                    None => return Err(SyntaxError::UnmatchedEndTag { name, line })
                }
            }
            Token::Text { value, line } => match stack.last_mut() {
                Some(top) if top.children.is_empty() => {
                    let text = match top.text.take() {
                        Some(existing) => format!("{existing} {value}"),
                        None => value.to_string()
                    };
                    top.text = Some(text);
                }
                Some(top) => debug!("Ignoring text at line {line} trailing the children of <{}>", top.name),
                None => debug!("Ignoring text at line {line} outside of the root element")
            }
        }
    }

    if !stack.is_empty() {
        close_from(&mut stack, 0, &mut root);
    }

    root.ok_or(SyntaxError::NoRootElement)
}

fn close_from(stack: &mut Vec<RawElement>, position: usize, root: &mut Option<RawElement>) {
    while stack.len() > position {
        let Some(element) = stack.pop() else {
            break;
        };

        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None => *root = Some(element)
        }
    }
}

fn is_blank_data_element(element: &RawElement) -> bool {
    element.children.is_empty() && DATA_ELEMENTS.contains(&element.name.as_str())
}

fn closes_previous_sibling(stack: &[RawElement], name: &str) -> bool {
    stack.iter()
        .filter_map(|open| open.children.last())
        .any(|closed| closed.name == name)
}

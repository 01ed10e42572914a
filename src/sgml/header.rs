use quick_xml::events::{BytesPI, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Which OFX header flavour introduced the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// OFX 1.x: colon-delimited `KEY:VALUE` lines followed by a blank line.
    Sgml,
    /// OFX 2.x: an `<?OFX KEY="VALUE" ...?>` processing instruction.
    Xml
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    pub dialect: Option<Dialect>,
    pub fields: BTreeMap<String, String>
}

impl Header {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_ascii_uppercase()).map(String::as_str)
    }
}

/// Splits the leading header block from the tag body.
///
/// The returned body starts right after the header; a document without any header is
/// returned whole with an empty [`Header`].
pub(crate) fn split_header(text: &str) -> (Header, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim_start().starts_with('<') {
        split_xml_header(text)
    } else {
        split_sgml_header(text)
    }
}

fn split_sgml_header(text: &str) -> (Header, &str) {
    let mut header = Header::default();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            offset += line.len();

            if !header.fields.is_empty() {
                break;
            }

            continue;
        }

        let Some((key, value)) = trimmed.split_once(':').filter(|(key, _)| is_header_key(key)) else {
            break;
        };

        header.fields.insert(key.to_ascii_uppercase(), value.trim().to_string());
        offset += line.len();
    }

    if !header.fields.is_empty() {
        header.dialect = Some(Dialect::Sgml);
    }

    (header, &text[offset..])
}

fn split_xml_header(text: &str) -> (Header, &str) {
    let mut header = Header::default();
    let mut reader = Reader::from_str(text);
    let mut body_start = 0;

    loop {
        match reader.read_event() {
            Ok(Event::Decl(_)) => header.dialect = Some(Dialect::Xml),
            Ok(Event::PI(instruction)) if instruction.target().eq_ignore_ascii_case(b"OFX") => {
                header.fields.extend(read_attributes(&instruction));
                header.dialect = Some(Dialect::Xml);
            }
            Ok(Event::PI(_) | Event::Comment(_) | Event::DocType(_)) => {}
            Ok(Event::Text(gap)) if gap.iter().all(u8::is_ascii_whitespace) => {}
            Ok(_) => break,
            Err(error) => {
                debug!("Stopping header scan at byte {body_start}: {error}");
                break;
            }
        }

        body_start = reader.buffer_position() as usize;
    }

    (header, &text[body_start..])
}

fn is_header_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

fn read_attributes(instruction: &BytesPI) -> Vec<(String, String)> {
    instruction.attributes()
        .filter_map(|attribute| attribute.inspect_err(|error| debug!("Skipping header attribute: {error}")).ok())
        .filter_map(|attribute| {
            let key = String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_uppercase();
            let value = attribute.unescape_value().ok()?.into_owned();

            is_header_key(&key).then_some((key, value))
        })
        .collect()
}

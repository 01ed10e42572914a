use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// Windows-1252 code points for bytes 0x80..=0x9F; the undefined slots fall back to Latin-1.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}',
];

/// Turns a raw export buffer into text.
///
/// OFX1 files are frequently declared `CHARSET:1252` while OFX2 files are UTF-8. Valid UTF-8
/// is borrowed as-is, anything else is read as Windows-1252.
pub fn decode_bytes(buffer: &[u8]) -> Cow<'_, str> {
    let buffer = buffer.strip_prefix(UTF8_BOM).unwrap_or(buffer);

    match std::str::from_utf8(buffer) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(buffer.iter().map(|&byte| windows_1252_char(byte)).collect())
    }
}

fn windows_1252_char(byte: u8) -> char {
    match byte {
        0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
        _ => char::from(byte)
    }
}

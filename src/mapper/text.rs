/// Cleans free text taken from `MEMO`/`NAME` elements.
///
/// Decodes SGML character references, turns control characters and non-breaking spaces
/// into plain spaces, collapses whitespace runs and trims the result.
pub fn normalize_text(value: &str) -> String {
    let decoded = decode_entities(value);

    decoded
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

const MAX_ENTITY_LENGTH: usize = 10;

fn decode_entities(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find('&') {
        output.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest[1..]
            .find(';')
            .filter(|end| *end <= MAX_ENTITY_LENGTH)
            .and_then(|end| decode_entity(&rest[1..end + 1]).map(|c| (c, end + 2)));

        match decoded {
            Some((c, consumed)) => {
                output.push(c);
                rest = &rest[consumed..];
            }
            None => {
                output.push('&');
                rest = &rest[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = entity.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

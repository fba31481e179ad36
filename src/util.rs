//! XML text helpers shared by the package reader and writer.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::{Error, Result};

/// Decode bytes of an XML part to a string.
///
/// The encoding is chosen from:
/// 1. A byte order mark (UTF-8 or UTF-16)
/// 2. A declared non-Unicode label (from `<?xml encoding="..."?>`)
/// 3. UTF-8 otherwise
///
/// Bytes that are not valid in the chosen encoding are an error rather than
/// replacement characters, since the text is written back.
///
/// Returns the decoded text and whether it came from something other than
/// UTF-8, in which case the XML declaration must be rewritten on output.
pub fn decode_text<'a>(
    bytes: &'a [u8],
    hint_encoding: Option<&str>,
) -> Result<(Cow<'a, str>, bool)> {
    let (text, encoding, malformed) = match Encoding::for_bom(bytes) {
        Some((encoding, _)) => {
            let (text, malformed) = encoding.decode_with_bom_removal(bytes);
            (text, encoding, malformed)
        }
        None => {
            let encoding = hint_encoding
                .and_then(|name| Encoding::for_label(name.as_bytes()))
                .filter(|e| ![UTF_8, UTF_16LE, UTF_16BE].contains(e))
                .unwrap_or(UTF_8);
            let (text, malformed) = encoding.decode_without_bom_handling(bytes);
            (text, encoding, malformed)
        }
    };

    if malformed {
        return Err(Error::Malformed(format!(
            "main part is not valid {}",
            encoding.name()
        )));
    }
    Ok((text, encoding != UTF_8))
}

/// Pull the `encoding="..."` pseudo-attribute out of an XML declaration.
///
/// Only the first 200 bytes are examined; declarations are always at the
/// very start of a part.
pub fn sniff_xml_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(200)];
    let head = String::from_utf8_lossy(head);
    let decl_end = head.find("?>")?;
    let decl = &head[..decl_end];
    let start = decl.find("encoding=")? + "encoding=".len();
    let quote = decl[start..].chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &decl[start + 1..];
    let end = rest.find(quote)?;
    Some(rest[..end].to_string())
}

/// Rewrite the declared encoding of an XML part to UTF-8.
///
/// Used when a part was decoded from another encoding but is written back as
/// UTF-8 bytes.
pub fn declare_utf8(xml: &str) -> Cow<'_, str> {
    let Some(decl_end) = xml.find("?>") else {
        return Cow::Borrowed(xml);
    };
    let decl = &xml[..decl_end];
    let Some(pos) = decl.find("encoding=") else {
        return Cow::Borrowed(xml);
    };
    let value_start = pos + "encoding=".len() + 1;
    let Some(quote) = decl[value_start - 1..].chars().next() else {
        return Cow::Borrowed(xml);
    };
    let Some(len) = decl[value_start..].find(quote) else {
        return Cow::Borrowed(xml);
    };

    let mut out = String::with_capacity(xml.len());
    out.push_str(&xml[..value_start]);
    out.push_str("UTF-8");
    out.push_str(&xml[value_start + len..]);
    Cow::Owned(out)
}

/// Strip the namespace prefix from a qualified XML name.
pub fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

/// Resolve an XML entity reference (without the surrounding `&` and `;`).
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

/// Escape text content for inclusion in an XML element.
///
/// Carriage returns are written as `&#13;` so parsers do not fold them into
/// line feeds. Characters XML 1.0 does not allow are dropped.
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(|c| matches!(c, '&' | '<' | '>' | '\r') || !is_xml_char(c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    Cow::Owned(out)
}

/// Whether `c` matches the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}'
    )
}

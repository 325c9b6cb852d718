/// XML helpers shared by the package writer and reader.
///
/// Every part is built as a string, so escaping lives here once instead of in each
/// writer module.
use quick_xml::events::BytesStart;

/// Escape XML special characters for use in text content and attribute values.
///
/// Characters XML 1.0 cannot carry at all (most C0 controls, U+FFFE, U+FFFF)
/// are dropped.
pub fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            _ if !is_xml_char(ch) => {},
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Whether `ch` may appear in an XML 1.0 document.
#[inline]
pub fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}

/// Unescaped value of the attribute whose local name is `name`.
///
/// Namespace prefixes are ignored, so `b"val"` matches `w:val`.
pub fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == name {
            let raw = String::from_utf8_lossy(&attr.value);
            Some(unescape_str(&raw))
        } else {
            None
        }
    })
}

/// Resolve the entity and character references in `raw`.
///
/// Unknown references are kept verbatim.
pub fn unescape_str(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        match tail.find(';') {
            Some(end) => match resolve_entity(&tail[..end]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &tail[end + 1..];
                },
                None => {
                    out.push('&');
                    rest = tail;
                },
            },
            None => {
                out.push('&');
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    out
}

/// Character for a predefined entity name (`amp`) or character reference (`#38`, `#x26`).
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_xml(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_xml("−18°C"), "−18°C");
        assert_eq!(escape_xml("bell\u{7}\u{FFFF}"), "bell");
    }

    #[test]
    fn test_unescape_str() {
        assert_eq!(unescape_str("a &lt; b &amp; c"), "a < b & c");
        assert_eq!(unescape_str("&#x41;&#66;"), "AB");
        assert_eq!(unescape_str("fish & chips"), "fish & chips");
        assert_eq!(unescape_str("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_escape_round_trip() {
        let text = "Tom's \"R&D\" <notes>";
        assert_eq!(unescape_str(&escape_xml(text)), text);
    }
}

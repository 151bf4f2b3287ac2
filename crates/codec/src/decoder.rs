//! Reference to character decoding

use charref_tables::{Level, MAX_CODEPOINT, REPLACEMENT_CHARACTER};

use crate::matcher::TokenMatcher;
use crate::options::DecodeScope;
use crate::table::ReferenceTable;
use crate::text::{Sink, Text};

/// C1 control range subject to the legacy numeric remap
const C1_START: u32 = 0x80;
const C1_END: u32 = 0x9F;

/// What a reference decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolved<'a> {
    Text(&'a str),
    Codepoint(u32),
}

impl Resolved<'_> {
    fn push_to<S: Sink>(self, out: &mut S) {
        match self {
            Resolved::Text(text) => out.push_str(text),
            Resolved::Codepoint(codepoint) => out.push_codepoint(codepoint),
        }
    }
}

/// Replace every resolvable reference in `text`; everything else is copied
pub(crate) fn decode<T, R>(text: &T, level: Level, scope: DecodeScope, table: &R) -> T::Buf
where
    T: Text + ?Sized,
    R: ReferenceTable + ?Sized,
{
    let matcher = TokenMatcher::select(level, scope);
    let level = level.resolve();

    let mut out = T::Buf::with_capacity(text.len());
    let mut copied = 0;
    let mut cursor = 0;
    while let Some(amp) = text.find_ampersand(cursor) {
        let Some(end) = matcher.match_at(text, amp, table) else {
            cursor = amp + 1;
            continue;
        };

        let token = text.ascii(amp..end);
        match resolve_token(&token, level, scope, table) {
            Some(resolved) => {
                text.copy_to(copied..amp, &mut out);
                resolved.push_to(&mut out);
                copied = end;
            }
            None => log::trace!("Leaving unresolved reference {:?}", token),
        }
        cursor = end;
    }
    text.copy_to(copied..text.len(), &mut out);
    out
}

/// Decode a single isolated token, returning it unchanged when unresolved
pub(crate) fn decode_entity<R>(token: &str, level: Level, table: &R) -> String
where
    R: ReferenceTable + ?Sized,
{
    let mut out = String::new();
    match resolve_reference(token, level.resolve(), table) {
        Some(resolved) => resolved.push_to(&mut out),
        None => out.push_str(token),
    }
    out
}

fn resolve_token<'t, R>(token: &str, level: Level, scope: DecodeScope, table: &'t R) -> Option<Resolved<'t>>
where
    R: ReferenceTable + ?Sized,
{
    match scope {
        DecodeScope::Attribute if token.ends_with('=') => None,
        DecodeScope::Strict if !token.ends_with(';') => None,
        _ => resolve_reference(token, level, table),
    }
}

fn resolve_reference<'t, R>(token: &str, level: Level, table: &'t R) -> Option<Resolved<'t>>
where
    R: ReferenceTable + ?Sized,
{
    let body = token.strip_prefix('&')?;
    let (name, terminated) = match body.strip_suffix(';') {
        Some(name) => (name, true),
        None => (body, false),
    };

    if let Some(digits) = name.strip_prefix('#') {
        let codepoint = parse_numeric(digits)?;
        return Some(Resolved::Codepoint(numeric_codepoint(codepoint, table)));
    }

    if !terminated && !table.allows_unterminated(level, name) {
        return None;
    }
    table.forward(level, name).map(Resolved::Text)
}

/// Parse `digits` or `x`/`X` hex digits; overflow saturates past the Unicode range
fn parse_numeric(digits: &str) -> Option<u32> {
    let (digits, radix) = match digits.strip_prefix(|c: char| c == 'x' || c == 'X') {
        Some(hex) => (hex, 16),
        None => (digits, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    Some(u32::from_str_radix(digits, radix).unwrap_or(u32::MAX))
}

fn numeric_codepoint<R: ReferenceTable + ?Sized>(codepoint: u32, table: &R) -> u32 {
    if codepoint > MAX_CODEPOINT {
        u32::from(REPLACEMENT_CHARACTER)
    } else if (C1_START..=C1_END).contains(&codepoint) {
        table.remap_numeric(codepoint).unwrap_or(codepoint)
    } else {
        codepoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fake::FakeTable;
    use crate::table::StandardTables;

    fn decode_str(text: &str, level: Level, scope: DecodeScope) -> String {
        decode(text, level, scope, &StandardTables)
    }

    fn body(text: &str) -> String {
        decode_str(text, Level::Html5, DecodeScope::Body)
    }

    #[test]
    fn test_named_references() {
        assert_eq!(body("&lt;p&gt; &amp;amp; &copy;"), "<p> &amp; \u{00A9}");
        assert_eq!(body("&hellip;&NotEqualTilde;"), "\u{2026}\u{2242}\u{0338}");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(body("&#60;&#x3C;&#X3c;&#x3c"), "<<<<");
        assert_eq!(body("&#128512;"), "\u{1F600}");
        assert_eq!(body("&#0065x"), "Ax");
    }

    #[test]
    fn test_c1_remap() {
        assert_eq!(body("&#128;"), "\u{20AC}");
        assert_eq!(body("&#x9F;"), "\u{0178}");
        assert_eq!(body("&#129;"), "\u{81}");
    }

    #[test]
    fn test_out_of_range_numeric() {
        assert_eq!(body("&#9999999;"), "\u{FFFD}");
        assert_eq!(body("&#x110000;"), "\u{FFFD}");
        assert_eq!(body("&#99999999999999999999;"), "\u{FFFD}");
        assert_eq!(body("&#x10FFFF;"), "\u{10FFFF}");
    }

    #[test]
    fn test_surrogate_numeric_in_string() {
        assert_eq!(body("&#xD83D;"), "\u{FFFD}");
    }

    #[test]
    fn test_unknown_entity_unchanged() {
        assert_eq!(body("&notarealentity;"), "&notarealentity;");
        assert_eq!(body("a & b"), "a & b");
        assert_eq!(body("&#;&#x;"), "&#;&#x;");
    }

    #[test]
    fn test_attribute_scope() {
        let attribute = |text| decode_str(text, Level::Html5, DecodeScope::Attribute);
        assert_eq!(attribute("&amp="), "&amp=");
        assert_eq!(attribute("?a=1&amp;b=2"), "?a=1&b=2");
        assert_eq!(attribute("&copy 2024"), "\u{00A9} 2024");
        assert_eq!(attribute("&copyright"), "&copyright");
        assert_eq!(body("&amp="), "&=");
    }

    #[test]
    fn test_attribute_scope_numeric_equals() {
        assert_eq!(decode_str("&#38=", Level::Html5, DecodeScope::Attribute), "&#38=");
        assert_eq!(decode_str("&#x26=", Level::Html5, DecodeScope::Attribute), "&#x26=");
        assert_eq!(decode_str("&#38;=", Level::Html5, DecodeScope::Attribute), "&=");
        assert_eq!(body("&#38="), "&=");
    }

    #[test]
    fn test_attribute_scope_html4() {
        let attribute = |text| decode_str(text, Level::Html4, DecodeScope::Attribute);
        assert_eq!(attribute("&eacute="), "&eacute=");
        assert_eq!(attribute("&eacute "), "\u{00E9} ");
        assert_eq!(attribute("&hellip&amp;"), "\u{2026}&");
        assert_eq!(attribute("&apos "), "&apos ");
    }

    #[test]
    fn test_strict_scope() {
        assert_eq!(decode_str("&amp", Level::Xml, DecodeScope::Strict), "&amp");
        assert_eq!(decode_str("&amp;", Level::Xml, DecodeScope::Strict), "&");
        assert_eq!(decode_str("&#65", Level::Html5, DecodeScope::Strict), "&#65");
        assert_eq!(body("&amp"), "&");
    }

    #[test]
    fn test_level_tables() {
        assert_eq!(decode_str("&eacute;", Level::Xml, DecodeScope::Strict), "&eacute;");
        assert_eq!(decode_str("&apos;", Level::Html4, DecodeScope::Body), "&apos;");
        assert_eq!(decode_str("&apos;", Level::All, DecodeScope::Body), "'");
        assert_eq!(decode_str("&eacute", Level::Html4, DecodeScope::Body), "\u{00E9}");
    }

    #[test]
    fn test_legacy_prefix_in_body() {
        assert_eq!(body("&copyright"), "\u{00A9}right");
        assert_eq!(body("&notin;"), "\u{2209}");
        assert_eq!(body("&centerdot;"), "\u{00B7}");
        assert_eq!(body("&hellip"), "&hellip");
    }

    #[test]
    fn test_no_ampersand_is_identity() {
        let text = "plain <text> \"quoted\" \u{00E9}\u{1F600};#x41";
        for level in [Level::Xml, Level::Html4, Level::Html5, Level::All] {
            for scope in [DecodeScope::Strict, DecodeScope::Body, DecodeScope::Attribute] {
                assert_eq!(decode_str(text, level, scope), text);
            }
        }
    }

    #[test]
    fn test_utf16_numeric_astral() {
        let units: Vec<u16> = "&#x1F600;".encode_utf16().collect();
        let decoded = decode(units.as_slice(), Level::Html5, DecodeScope::Body, &StandardTables);
        assert_eq!(decoded, vec![0xD83D, 0xDE00]);
    }

    #[test]
    fn test_utf16_lone_surrogate_reference() {
        let units: Vec<u16> = "x&#55357;y".encode_utf16().collect();
        let decoded = decode(units.as_slice(), Level::Html5, DecodeScope::Body, &StandardTables);
        assert_eq!(decoded, vec![0x78, 0xD83D, 0x79]);
    }

    #[test]
    fn test_utf16_keeps_surrounding_text() {
        let units: Vec<u16> = "\u{1F600}&eacute;\u{00E9}".encode_utf16().collect();
        let decoded = decode(units.as_slice(), Level::All, DecodeScope::Body, &StandardTables);
        assert_eq!(String::from_utf16_lossy(&decoded), "\u{1F600}\u{00E9}\u{00E9}");
    }

    #[test]
    fn test_injected_table() {
        let decoded = decode("&star; &smile; &not &#128; &copy;", Level::Html5, DecodeScope::Body, &FakeTable);
        assert_eq!(decoded, "\u{2605} \u{1F600} \u{00AC} \u{20AC} &copy;");
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("&amp;", Level::Html5, &StandardTables), "&");
        assert_eq!(decode_entity("&amp", Level::Html5, &StandardTables), "&");
        assert_eq!(decode_entity("&amp", Level::Xml, &StandardTables), "&amp");
        assert_eq!(decode_entity("&#x26;", Level::Xml, &StandardTables), "&");
        assert_eq!(decode_entity("&#9999999;", Level::Html4, &StandardTables), "\u{FFFD}");
        assert_eq!(decode_entity("&bogus;", Level::Html5, &StandardTables), "&bogus;");
        assert_eq!(decode_entity("amp;", Level::Html5, &StandardTables), "amp;");
        assert_eq!(decode_entity("&amp;x", Level::Html5, &StandardTables), "&amp;x");
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("60"), Some(60));
        assert_eq!(parse_numeric("x3c"), Some(0x3C));
        assert_eq!(parse_numeric("XFF"), Some(0xFF));
        assert_eq!(parse_numeric("x"), None);
        assert_eq!(parse_numeric("1a"), None);
        assert_eq!(parse_numeric("4294967296"), Some(u32::MAX));
    }
}

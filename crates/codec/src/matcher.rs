//! Character classes for encoding and token matchers for decoding

use charref_tables::Level;

use crate::options::{DecodeScope, EncodeMode};
use crate::table::ReferenceTable;
use crate::text::{Scalar, Text};

/// Longest prefix tried when matching a name without its `;`
const MAX_NAME_LEN: usize = 32;

/// The set of scalars an encode mode replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    Special,
    NonAscii,
    NonAsciiPrintable,
    NonAsciiPrintableOnly,
    Extensive,
}

impl CharClass {
    pub(crate) fn for_mode(mode: EncodeMode) -> CharClass {
        match mode {
            EncodeMode::SpecialChars => CharClass::Special,
            EncodeMode::NonAscii => CharClass::NonAscii,
            EncodeMode::NonAsciiPrintable => CharClass::NonAsciiPrintable,
            EncodeMode::NonAsciiPrintableOnly => CharClass::NonAsciiPrintableOnly,
            EncodeMode::Extensive => CharClass::Extensive,
        }
    }

    pub(crate) fn matches(self, scalar: Scalar) -> bool {
        let cp = scalar.codepoint();
        match self {
            CharClass::Special => is_special(cp),
            CharClass::NonAscii => is_special(cp) || cp >= 0x80,
            CharClass::NonAsciiPrintable => is_special(cp) || is_control(cp) || cp >= 0x7F,
            CharClass::NonAsciiPrintableOnly => is_control(cp) || cp >= 0x7F,
            CharClass::Extensive => {
                matches!(
                    cp,
                    0x01..=0x0C
                        | 0x0E..=0x1F
                        | 0x21..=0x2C
                        | 0x2E..=0x2F
                        | 0x3A..=0x40
                        | 0x5B..=0x60
                        | 0x7B..=0x7D
                ) || cp >= 0x7F
            }
        }
    }
}

fn is_special(cp: u32) -> bool {
    matches!(cp, 0x22 | 0x26 | 0x27 | 0x3C | 0x3E)
}

// Tab, newlines and a few other controls count as printable
fn is_control(cp: u32) -> bool {
    matches!(cp, 0x01..=0x08 | 0x11..=0x15 | 0x17..=0x1F)
}

/// Recognizes candidate reference tokens starting at an `&`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenMatcher {
    /// `;` required
    Strict,
    /// Optional trailing `;` or `=`
    Attribute,
    /// Browser body text rules for the given level
    Body(Level),
}

impl TokenMatcher {
    pub(crate) fn select(level: Level, scope: DecodeScope) -> TokenMatcher {
        match scope {
            DecodeScope::Strict => TokenMatcher::Strict,
            DecodeScope::Attribute => TokenMatcher::Attribute,
            DecodeScope::Body => TokenMatcher::Body(level.resolve()),
        }
    }

    /// End (exclusive) of the token whose `&` is at `amp`
    pub(crate) fn match_at<T, R>(self, text: &T, amp: usize, table: &R) -> Option<usize>
    where
        T: Text + ?Sized,
        R: ReferenceTable + ?Sized,
    {
        let start = amp + 1;
        match self {
            TokenMatcher::Strict => {
                let end = numeric_end(text, start).or_else(|| name_end(text, start))?;
                text.is_ascii_at(end, b';').then_some(end + 1)
            }
            TokenMatcher::Attribute => {
                let end = numeric_end(text, start).or_else(|| name_end(text, start))?;
                if text.is_ascii_at(end, b';') || text.is_ascii_at(end, b'=') {
                    Some(end + 1)
                } else {
                    Some(end)
                }
            }
            TokenMatcher::Body(level) => {
                if let Some(end) = numeric_end(text, start) {
                    return Some(if text.is_ascii_at(end, b';') { end + 1 } else { end });
                }
                let run_end = name_end(text, start)?;
                if text.is_ascii_at(run_end, b';') {
                    return Some(run_end + 1);
                }
                legacy_prefix_end(text, start, run_end, level, table)
            }
        }
    }
}

/// End of `#digits` or `#x` hex digits, if at least one digit follows
fn numeric_end<T: Text + ?Sized>(text: &T, start: usize) -> Option<usize> {
    if !text.is_ascii_at(start, b'#') {
        return None;
    }
    let hex = text.is_ascii_at(start + 1, b'x') || text.is_ascii_at(start + 1, b'X');
    let digits_start = if hex { start + 2 } else { start + 1 };
    let radix = if hex { 16 } else { 10 };
    let end = scan_while(text, digits_start, |c| c.is_digit(radix));
    (end > digits_start).then_some(end)
}

/// End of a non-empty run of ASCII alphanumerics
fn name_end<T: Text + ?Sized>(text: &T, start: usize) -> Option<usize> {
    let end = scan_while(text, start, |c| c.is_ascii_alphanumeric());
    (end > start).then_some(end)
}

fn scan_while<T, F>(text: &T, start: usize, accept: F) -> usize
where
    T: Text + ?Sized,
    F: Fn(char) -> bool,
{
    let mut end = start;
    while end < text.len() && char::from_u32(text.unit(end)).is_some_and(&accept) {
        end += 1;
    }
    end
}

/// Longest prefix of the run that is a known name usable without `;`
fn legacy_prefix_end<T, R>(text: &T, start: usize, run_end: usize, level: Level, table: &R) -> Option<usize>
where
    T: Text + ?Sized,
    R: ReferenceTable + ?Sized,
{
    let longest = (run_end - start).min(MAX_NAME_LEN);
    (1..=longest).rev().map(|len| start + len).find(|&end| {
        let name = text.ascii(start..end);
        table.allows_unterminated(level, &name) && table.forward(level, &name).is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::fake::FakeTable;
    use crate::table::StandardTables;

    fn token(matcher: TokenMatcher, text: &str) -> Option<&str> {
        let amp = text.find('&')?;
        matcher.match_at(text, amp, &FakeTable).map(|end| &text[amp..end])
    }

    fn class_matches(class: CharClass, c: char) -> bool {
        class.matches(Scalar::Char(c))
    }

    #[test]
    fn test_special_class() {
        for c in ['<', '>', '"', '\'', '&'] {
            assert!(class_matches(CharClass::Special, c));
        }
        assert!(!class_matches(CharClass::Special, 'a'));
        assert!(!class_matches(CharClass::Special, '\u{00E9}'));
    }

    #[test]
    fn test_non_ascii_classes() {
        assert!(class_matches(CharClass::NonAscii, '\u{00E9}'));
        assert!(class_matches(CharClass::NonAscii, '<'));
        assert!(!class_matches(CharClass::NonAscii, '\u{7F}'));
        assert!(!class_matches(CharClass::NonAscii, '\u{01}'));

        assert!(class_matches(CharClass::NonAsciiPrintable, '\u{7F}'));
        assert!(class_matches(CharClass::NonAsciiPrintable, '\u{01}'));
        assert!(class_matches(CharClass::NonAsciiPrintable, '&'));
        assert!(!class_matches(CharClass::NonAsciiPrintable, '\t'));
        assert!(!class_matches(CharClass::NonAsciiPrintable, '\n'));

        assert!(class_matches(CharClass::NonAsciiPrintableOnly, '\u{00E9}'));
        assert!(!class_matches(CharClass::NonAsciiPrintableOnly, '<'));
    }

    #[test]
    fn test_extensive_class() {
        for c in ['!', ',', '/', ':', '@', '[', '`', '{', '}', '\u{01}', '\u{2026}'] {
            assert!(class_matches(CharClass::Extensive, c), "{:?}", c);
        }
        for c in [' ', '-', 'a', 'Z', '0', '~', '\r'] {
            assert!(!class_matches(CharClass::Extensive, c), "{:?}", c);
        }
    }

    #[test]
    fn test_lone_surrogate_is_non_ascii() {
        assert!(CharClass::NonAscii.matches(Scalar::Lone(0xD83D)));
        assert!(!CharClass::Special.matches(Scalar::Lone(0xD83D)));
    }

    #[test]
    fn test_select() {
        assert_eq!(TokenMatcher::select(Level::All, DecodeScope::Body), TokenMatcher::Body(Level::Html5));
        assert_eq!(TokenMatcher::select(Level::Xml, DecodeScope::Strict), TokenMatcher::Strict);
        assert_eq!(TokenMatcher::select(Level::Html4, DecodeScope::Attribute), TokenMatcher::Attribute);
    }

    #[test]
    fn test_strict_tokens() {
        assert_eq!(token(TokenMatcher::Strict, "a&amp;b"), Some("&amp;"));
        assert_eq!(token(TokenMatcher::Strict, "&#60;"), Some("&#60;"));
        assert_eq!(token(TokenMatcher::Strict, "&#X3c;"), Some("&#X3c;"));
        assert_eq!(token(TokenMatcher::Strict, "&amp"), None);
        assert_eq!(token(TokenMatcher::Strict, "&#x;"), None);
        assert_eq!(token(TokenMatcher::Strict, "& x"), None);
    }

    #[test]
    fn test_attribute_tokens() {
        assert_eq!(token(TokenMatcher::Attribute, "&amp=1"), Some("&amp="));
        assert_eq!(token(TokenMatcher::Attribute, "&amp;1"), Some("&amp;"));
        assert_eq!(token(TokenMatcher::Attribute, "&amp 1"), Some("&amp"));
        assert_eq!(token(TokenMatcher::Attribute, "&#38"), Some("&#38"));
    }

    #[test]
    fn test_body_numeric_tokens() {
        let body = TokenMatcher::Body(Level::Html5);
        assert_eq!(token(body, "&#38;x"), Some("&#38;"));
        assert_eq!(token(body, "&#38x"), Some("&#38"));
        assert_eq!(token(body, "&#xffz"), Some("&#xff"));
        assert_eq!(token(body, "&#"), None);
    }

    #[test]
    fn test_body_named_tokens() {
        let body = TokenMatcher::Body(Level::Html5);
        assert_eq!(token(body, "&notin;"), Some("&notin;"));
        assert_eq!(token(body, "&unknown;"), Some("&unknown;"));
        assert_eq!(token(body, "&notit"), Some("&not"));
        assert_eq!(token(body, "&amp="), Some("&amp"));
        assert_eq!(token(body, "&star"), None);
        assert_eq!(token(body, "&zzz"), None);
    }

    #[test]
    fn test_body_standard_legacy_prefix() {
        let body = TokenMatcher::Body(Level::Html5);
        let text = "&copyright";
        assert_eq!(body.match_at(text, 0, &StandardTables), Some(5));
        let xml = TokenMatcher::Body(Level::Xml);
        assert_eq!(xml.match_at("&amp", 0, &StandardTables), None);
    }

    /// Accepts every name, with or without `;`
    struct AnyName;

    impl ReferenceTable for AnyName {
        fn forward(&self, _level: Level, _name: &str) -> Option<&str> {
            Some("?")
        }

        fn reverse(&self, _level: Level, _text: &str) -> Option<&str> {
            None
        }

        fn allows_unterminated(&self, _level: Level, _name: &str) -> bool {
            true
        }

        fn remap_numeric(&self, _codepoint: u32) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_unterminated_name_length_limit() {
        let body = TokenMatcher::Body(Level::Html5);
        let text = format!("&{}", "a".repeat(40));
        assert_eq!(body.match_at(text.as_str(), 0, &AnyName), Some(1 + MAX_NAME_LEN));

        let terminated = format!("{};", text);
        assert_eq!(body.match_at(terminated.as_str(), 0, &AnyName), Some(42));

        let long_run = format!("&not{}", "x".repeat(40));
        assert_eq!(body.match_at(long_run.as_str(), 0, &FakeTable), Some(4));
    }

    #[test]
    fn test_utf16_tokens() {
        let units: Vec<u16> = "\u{00E9}&#x41;".encode_utf16().collect();
        assert_eq!(TokenMatcher::Strict.match_at(units.as_slice(), 1, &FakeTable), Some(7));
    }
}

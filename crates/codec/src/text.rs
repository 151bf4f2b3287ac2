//! Text representations the codec scans and produces
//!
//! The scanners run over `str` (UTF-8) and `[u16]` (UTF-16) alike. Entity
//! tokens are pure ASCII, so a token occupies the same number of units in
//! both, and unmatched spans are copied without re-encoding.

use std::borrow::Cow;
use std::ops::Range;

use charref_tables::{MAX_CODEPOINT, REPLACEMENT_CHARACTER};

use crate::surrogate::{codepoint_at, to_surrogate_pair};

/// One scanned unit of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scalar {
    /// A Unicode scalar value (in UTF-16, possibly a surrogate pair)
    Char(char),
    /// A UTF-16 surrogate with no partner
    Lone(u16),
}

impl Scalar {
    pub(crate) fn codepoint(self) -> u32 {
        match self {
            Scalar::Char(c) => u32::from(c),
            Scalar::Lone(unit) => u32::from(unit),
        }
    }
}

/// Input text, indexed in its native code units
pub(crate) trait Text {
    type Buf: Sink;

    /// Length in code units
    fn len(&self) -> usize;

    /// Code unit at `index`, widened
    fn unit(&self, index: usize) -> u32;

    /// Scalar starting at `index` and its width in code units
    fn scalar_at(&self, index: usize) -> (Scalar, usize);

    /// Append the units in `range` to `out` unchanged
    fn copy_to(&self, range: Range<usize>, out: &mut Self::Buf);

    /// View an all-ASCII range as a string
    fn ascii(&self, range: Range<usize>) -> Cow<'_, str>;

    fn is_ascii_at(&self, index: usize, byte: u8) -> bool {
        index < self.len() && self.unit(index) == u32::from(byte)
    }

    /// Position of the next `&` at or after `from`
    fn find_ampersand(&self, from: usize) -> Option<usize> {
        (from..self.len()).find(|&i| self.unit(i) == u32::from(b'&'))
    }
}

/// Output buffer
pub(crate) trait Sink {
    fn with_capacity(capacity: usize) -> Self;

    fn push_str(&mut self, s: &str);

    /// Append a decoded codepoint, which may be a surrogate
    fn push_codepoint(&mut self, codepoint: u32);
}

impl Text for str {
    type Buf = String;

    fn len(&self) -> usize {
        str::len(self)
    }

    fn unit(&self, index: usize) -> u32 {
        u32::from(self.as_bytes()[index])
    }

    fn scalar_at(&self, index: usize) -> (Scalar, usize) {
        match self[index..].chars().next() {
            Some(c) => (Scalar::Char(c), c.len_utf8()),
            None => (Scalar::Char(REPLACEMENT_CHARACTER), 1),
        }
    }

    fn copy_to(&self, range: Range<usize>, out: &mut String) {
        out.push_str(&self[range]);
    }

    fn ascii(&self, range: Range<usize>) -> Cow<'_, str> {
        Cow::Borrowed(&self[range])
    }

    fn find_ampersand(&self, from: usize) -> Option<usize> {
        self.as_bytes()[from..].iter().position(|&b| b == b'&').map(|i| from + i)
    }
}

impl Text for [u16] {
    type Buf = Vec<u16>;

    fn len(&self) -> usize {
        <[u16]>::len(self)
    }

    fn unit(&self, index: usize) -> u32 {
        u32::from(self[index])
    }

    fn scalar_at(&self, index: usize) -> (Scalar, usize) {
        let unit = self[index];
        let codepoint = codepoint_at(self, index).unwrap_or(u32::from(unit));
        match char::from_u32(codepoint) {
            Some(c) => (Scalar::Char(c), c.len_utf16()),
            None => (Scalar::Lone(unit), 1),
        }
    }

    fn copy_to(&self, range: Range<usize>, out: &mut Vec<u16>) {
        out.extend_from_slice(&self[range]);
    }

    fn ascii(&self, range: Range<usize>) -> Cow<'_, str> {
        Cow::Owned(
            self[range]
                .iter()
                .map(|&unit| char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT_CHARACTER))
                .collect(),
        )
    }
}

impl Sink for String {
    fn with_capacity(capacity: usize) -> Self {
        String::with_capacity(capacity)
    }

    fn push_str(&mut self, s: &str) {
        String::push_str(self, s);
    }

    // Surrogates cannot live in a `String`
    fn push_codepoint(&mut self, codepoint: u32) {
        self.push(char::from_u32(codepoint).unwrap_or(REPLACEMENT_CHARACTER));
    }
}

impl Sink for Vec<u16> {
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }

    fn push_str(&mut self, s: &str) {
        self.extend(s.encode_utf16());
    }

    fn push_codepoint(&mut self, codepoint: u32) {
        if codepoint > MAX_CODEPOINT {
            self.push(REPLACEMENT_CHARACTER as u16);
        } else if codepoint > 0xFFFF {
            let (high, low) = to_surrogate_pair(codepoint);
            self.push(high);
            self.push(low);
        } else {
            // Lone surrogates are representable here
            self.push(codepoint as u16);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_str_scalars() {
        let text = "a\u{00E9}\u{1F600}";
        assert_eq!(text.scalar_at(0), (Scalar::Char('a'), 1));
        assert_eq!(text.scalar_at(1), (Scalar::Char('\u{00E9}'), 2));
        assert_eq!(text.scalar_at(3), (Scalar::Char('\u{1F600}'), 4));
    }

    #[test]
    fn test_utf16_scalars() {
        let units = utf16("a\u{1F600}");
        let units = units.as_slice();
        assert_eq!(units.scalar_at(0), (Scalar::Char('a'), 1));
        assert_eq!(units.scalar_at(1), (Scalar::Char('\u{1F600}'), 2));
    }

    #[test]
    fn test_utf16_lone_surrogates() {
        let units: &[u16] = &[0xD83D, 0x0041, 0xDE00];
        assert_eq!(units.scalar_at(0), (Scalar::Lone(0xD83D), 1));
        assert_eq!(units.scalar_at(1), (Scalar::Char('A'), 1));
        assert_eq!(units.scalar_at(2), (Scalar::Lone(0xDE00), 1));
        assert_eq!(Scalar::Lone(0xDE00).codepoint(), 0xDE00);
    }

    #[test]
    fn test_find_ampersand() {
        let text = "a&b&c";
        assert_eq!(text.find_ampersand(0), Some(1));
        assert_eq!(text.find_ampersand(2), Some(3));
        assert_eq!(text.find_ampersand(4), None);

        let units = utf16("\u{00E9}&x");
        assert_eq!(units.as_slice().find_ampersand(0), Some(1));
    }

    #[test]
    fn test_ascii_views() {
        assert_eq!("x&amp;y".ascii(1..6), "&amp;");
        let units = utf16("x&amp;y");
        assert_eq!(units.as_slice().ascii(1..6), "&amp;");
    }

    #[test]
    fn test_string_sink() {
        let mut out = String::new();
        out.push_codepoint(0x1F600);
        out.push_codepoint(0xD800);
        Sink::push_str(&mut out, "!");
        assert_eq!(out, "\u{1F600}\u{FFFD}!");
    }

    #[test]
    fn test_utf16_sink() {
        let mut out: Vec<u16> = Vec::new();
        out.push_codepoint(0x1F600);
        out.push_codepoint(0xD800);
        out.push_codepoint(0x41);
        out.push_codepoint(0x110000);
        Sink::push_str(&mut out, "\u{00E9}");
        assert_eq!(out, vec![0xD83D, 0xDE00, 0xD800, 0x41, 0xFFFD, 0xE9]);
    }
}

//! Public encode/decode entry points

use charref_tables::Level;

use crate::decoder;
use crate::encoder;
use crate::options::{DecodeOptions, EncodeOptions};
use crate::table::{ReferenceTable, StandardTables};

/// Character reference codec over a reference table
///
/// The free functions [`encode`], [`decode`] and friends use a shared
/// `Codec<StandardTables>`. Build a `Codec` directly to decode against a
/// different [`ReferenceTable`].
#[derive(Debug, Clone, Default)]
pub struct Codec<T = StandardTables> {
    table: T,
}

static STANDARD: Codec = Codec::standard();

impl Codec<StandardTables> {
    /// Codec over the bundled XML, HTML 4.01 and HTML5 tables
    pub const fn standard() -> Self {
        Codec { table: StandardTables }
    }
}

impl<T: ReferenceTable> Codec<T> {
    pub fn new(table: T) -> Self {
        Codec { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Replace characters selected by `options.mode` with references
    pub fn encode<'a>(&self, text: impl Into<Option<&'a str>>, options: EncodeOptions) -> String {
        match text.into() {
            Some(text) if !text.is_empty() => encoder::encode(text, options, &self.table),
            _ => String::new(),
        }
    }

    /// Replace references with the text they stand for
    pub fn decode<'a>(&self, text: impl Into<Option<&'a str>>, options: DecodeOptions) -> String {
        match text.into() {
            Some(text) if !text.is_empty() => {
                decoder::decode(text, options.level, options.effective_scope(), &self.table)
            }
            _ => String::new(),
        }
    }

    /// Decode one reference such as `&amp;` or `&#x41;`, with no scope rules
    pub fn decode_entity<'a>(&self, token: impl Into<Option<&'a str>>, level: Level) -> String {
        match token.into() {
            Some(token) if !token.is_empty() => decoder::decode_entity(token, level, &self.table),
            _ => String::new(),
        }
    }

    /// [`Codec::encode`] over UTF-16 code units. Unpaired surrogates are
    /// encoded as numeric references to their own value.
    pub fn encode_utf16<'a>(&self, text: impl Into<Option<&'a [u16]>>, options: EncodeOptions) -> Vec<u16> {
        match text.into() {
            Some(text) if !text.is_empty() => encoder::encode(text, options, &self.table),
            _ => Vec::new(),
        }
    }

    /// [`Codec::decode`] over UTF-16 code units. Numeric references to
    /// surrogates decode to the lone code unit.
    pub fn decode_utf16<'a>(&self, text: impl Into<Option<&'a [u16]>>, options: DecodeOptions) -> Vec<u16> {
        match text.into() {
            Some(text) if !text.is_empty() => {
                decoder::decode(text, options.level, options.effective_scope(), &self.table)
            }
            _ => Vec::new(),
        }
    }
}

/// Encode `text` with the bundled tables
pub fn encode<'a>(text: impl Into<Option<&'a str>>, options: EncodeOptions) -> String {
    STANDARD.encode(text, options)
}

/// Decode `text` with the bundled tables
pub fn decode<'a>(text: impl Into<Option<&'a str>>, options: DecodeOptions) -> String {
    STANDARD.decode(text, options)
}

/// Decode a single reference with the bundled tables
pub fn decode_entity<'a>(token: impl Into<Option<&'a str>>, level: Level) -> String {
    STANDARD.decode_entity(token, level)
}

/// Encode UTF-16 `text` with the bundled tables
pub fn encode_utf16<'a>(text: impl Into<Option<&'a [u16]>>, options: EncodeOptions) -> Vec<u16> {
    STANDARD.encode_utf16(text, options)
}

/// Decode UTF-16 `text` with the bundled tables
pub fn decode_utf16<'a>(text: impl Into<Option<&'a [u16]>>, options: DecodeOptions) -> Vec<u16> {
    STANDARD.decode_utf16(text, options)
}

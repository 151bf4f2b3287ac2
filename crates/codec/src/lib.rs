//! Charref Codec
//!
//! Encodes text into HTML/XML character references and decodes references
//! back into text, for XML, HTML 4.01 and HTML5 reference tables.

mod codec;
mod decoder;
mod encoder;
mod error;
mod matcher;
mod options;
mod surrogate;
mod table;
mod text;

pub use charref_tables::Level;
pub use codec::{decode, decode_entity, decode_utf16, encode, encode_utf16, Codec};
pub use error::{CodecError, CodecResult};
pub use options::{DecodeOptions, DecodeScope, EncodeMode, EncodeOptions, NumericFormat};
pub use surrogate::{
    codepoint_at, combine_surrogates, is_high_surrogate, is_low_surrogate, is_surrogate, to_surrogate_pair,
};
pub use table::{ReferenceTable, StandardTables};

//! Encode and decode options

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use charref_tables::Level;

use crate::error::CodecError;

/// Which characters the encoder replaces with references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum EncodeMode {
    /// Only `<`, `>`, `'`, `"` and `&`
    #[default]
    SpecialChars,
    /// Special characters and everything outside ASCII
    NonAscii,
    /// [`EncodeMode::NonAscii`] plus non-printable control characters
    NonAsciiPrintable,
    /// Non-ASCII and control characters, leaving special characters alone
    NonAsciiPrintableOnly,
    /// Nearly all punctuation, controls and non-ASCII
    Extensive,
}

impl EncodeMode {
    const ALL: [EncodeMode; 5] = [
        EncodeMode::SpecialChars,
        EncodeMode::NonAscii,
        EncodeMode::NonAsciiPrintable,
        EncodeMode::NonAsciiPrintableOnly,
        EncodeMode::Extensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EncodeMode::SpecialChars => "specialChars",
            EncodeMode::NonAscii => "nonAscii",
            EncodeMode::NonAsciiPrintable => "nonAsciiPrintable",
            EncodeMode::NonAsciiPrintableOnly => "nonAsciiPrintableOnly",
            EncodeMode::Extensive => "extensive",
        }
    }
}

impl fmt::Display for EncodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodeMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::UnknownEncodeMode(s.to_string()))
    }
}

/// Textual form of numeric references emitted by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum NumericFormat {
    /// `&#60;`
    #[default]
    Decimal,
    /// `&#x3c;`
    Hexadecimal,
}

impl NumericFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            NumericFormat::Decimal => "decimal",
            NumericFormat::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for NumericFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [NumericFormat::Decimal, NumericFormat::Hexadecimal]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::UnknownNumericFormat(s.to_string()))
    }
}

/// Context the decoded text comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "camelCase"))]
pub enum DecodeScope {
    /// Only `;`-terminated references are decoded
    Strict,
    /// HTML body text: legacy names may omit the `;`
    Body,
    /// Attribute values: like `Body`, but `&name=` stays literal
    Attribute,
}

impl DecodeScope {
    /// Scope used when none is given: `Strict` for XML, `Body` otherwise
    pub fn default_for(level: Level) -> DecodeScope {
        match level {
            Level::Xml => DecodeScope::Strict,
            Level::Html4 | Level::Html5 | Level::All => DecodeScope::Body,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DecodeScope::Strict => "strict",
            DecodeScope::Body => "body",
            DecodeScope::Attribute => "attribute",
        }
    }
}

impl fmt::Display for DecodeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeScope {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [DecodeScope::Strict, DecodeScope::Body, DecodeScope::Attribute]
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CodecError::UnknownDecodeScope(s.to_string()))
    }
}

/// Encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EncodeOptions {
    pub mode: EncodeMode,
    pub numeric: NumericFormat,
    pub level: Level,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: EncodeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_numeric(mut self, numeric: NumericFormat) -> Self {
        self.numeric = numeric;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DecodeOptions {
    pub level: Level,
    /// Falls back to [`DecodeScope::default_for`] the level when unset
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub scope: Option<DecodeScope>,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_scope(mut self, scope: DecodeScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// The scope decoding actually runs with
    pub fn effective_scope(&self) -> DecodeScope {
        self.scope.unwrap_or_else(|| DecodeScope::default_for(self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_defaults() {
        let options = EncodeOptions::default();
        assert_eq!(options.mode, EncodeMode::SpecialChars);
        assert_eq!(options.numeric, NumericFormat::Decimal);
        assert_eq!(options.level, Level::All);
    }

    #[test]
    fn test_encode_builder() {
        let options = EncodeOptions::new()
            .with_mode(EncodeMode::Extensive)
            .with_numeric(NumericFormat::Hexadecimal)
            .with_level(Level::Xml);
        assert_eq!(options.mode, EncodeMode::Extensive);
        assert_eq!(options.numeric, NumericFormat::Hexadecimal);
        assert_eq!(options.level, Level::Xml);
    }

    #[test]
    fn test_default_scope_per_level() {
        assert_eq!(DecodeScope::default_for(Level::Xml), DecodeScope::Strict);
        assert_eq!(DecodeScope::default_for(Level::Html4), DecodeScope::Body);
        assert_eq!(DecodeScope::default_for(Level::Html5), DecodeScope::Body);
        assert_eq!(DecodeScope::default_for(Level::All), DecodeScope::Body);
    }

    #[test]
    fn test_effective_scope() {
        assert_eq!(DecodeOptions::default().effective_scope(), DecodeScope::Body);
        let xml = DecodeOptions::new().with_level(Level::Xml);
        assert_eq!(xml.effective_scope(), DecodeScope::Strict);
        let explicit = xml.with_scope(DecodeScope::Attribute);
        assert_eq!(explicit.effective_scope(), DecodeScope::Attribute);
    }

    #[test]
    fn test_parse_encode_mode() {
        assert_eq!("specialChars".parse(), Ok(EncodeMode::SpecialChars));
        assert_eq!("nonAscii".parse(), Ok(EncodeMode::NonAscii));
        assert_eq!("nonasciiprintable".parse(), Ok(EncodeMode::NonAsciiPrintable));
        assert_eq!("nonAsciiPrintableOnly".parse(), Ok(EncodeMode::NonAsciiPrintableOnly));
        assert_eq!("extensive".parse(), Ok(EncodeMode::Extensive));
        assert_eq!(
            "all".parse::<EncodeMode>(),
            Err(CodecError::UnknownEncodeMode("all".to_string()))
        );
    }

    #[test]
    fn test_parse_numeric_and_scope() {
        assert_eq!("hexadecimal".parse(), Ok(NumericFormat::Hexadecimal));
        assert_eq!("Decimal".parse(), Ok(NumericFormat::Decimal));
        assert!("octal".parse::<NumericFormat>().is_err());

        assert_eq!("attribute".parse(), Ok(DecodeScope::Attribute));
        assert_eq!("strict".parse(), Ok(DecodeScope::Strict));
        assert_eq!(
            "cdata".parse::<DecodeScope>(),
            Err(CodecError::UnknownDecodeScope("cdata".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for mode in EncodeMode::ALL {
            assert_eq!(mode.to_string().parse::<EncodeMode>(), Ok(mode));
        }
        for scope in [DecodeScope::Strict, DecodeScope::Body, DecodeScope::Attribute] {
            assert_eq!(scope.to_string().parse::<DecodeScope>(), Ok(scope));
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_from_json() {
        let options: EncodeOptions =
            serde_json::from_str(r#"{"mode":"nonAsciiPrintable","numeric":"hexadecimal"}"#).unwrap();
        assert_eq!(options.mode, EncodeMode::NonAsciiPrintable);
        assert_eq!(options.numeric, NumericFormat::Hexadecimal);
        assert_eq!(options.level, Level::All);

        let options: DecodeOptions = serde_json::from_str(r#"{"level":"xml"}"#).unwrap();
        assert_eq!(options.scope, None);
        assert_eq!(options.effective_scope(), DecodeScope::Strict);

        let json = serde_json::to_string(&DecodeOptions::new().with_scope(DecodeScope::Attribute)).unwrap();
        assert_eq!(json, r#"{"level":"all","scope":"attribute"}"#);
    }
}

//! Character to reference encoding

use charref_tables::Level;

use crate::matcher::CharClass;
use crate::options::{EncodeOptions, NumericFormat};
use crate::table::ReferenceTable;
use crate::text::{Scalar, Sink, Text};

/// Replace every scalar in the mode's class with a named or numeric reference
pub(crate) fn encode<T, R>(text: &T, options: EncodeOptions, table: &R) -> T::Buf
where
    T: Text + ?Sized,
    R: ReferenceTable + ?Sized,
{
    let class = CharClass::for_mode(options.mode);
    let level = options.level.resolve();

    let mut out = T::Buf::with_capacity(text.len());
    let mut copied = 0;
    let mut index = 0;
    while index < text.len() {
        let (scalar, width) = text.scalar_at(index);
        if class.matches(scalar) {
            text.copy_to(copied..index, &mut out);
            push_reference(&mut out, scalar, options.numeric, level, table);
            copied = index + width;
        }
        index += width;
    }
    text.copy_to(copied..text.len(), &mut out);
    out
}

fn push_reference<S, R>(out: &mut S, scalar: Scalar, numeric: NumericFormat, level: Level, table: &R)
where
    S: Sink,
    R: ReferenceTable + ?Sized,
{
    if let Scalar::Char(c) = scalar {
        let mut buf = [0u8; 4];
        if let Some(name) = table.reverse(level, c.encode_utf8(&mut buf)) {
            out.push_str("&");
            out.push_str(name);
            out.push_str(";");
            return;
        }
    }

    let reference = match numeric {
        NumericFormat::Decimal => format!("&#{};", scalar.codepoint()),
        NumericFormat::Hexadecimal => format!("&#x{:x};", scalar.codepoint()),
    };
    out.push_str(&reference);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EncodeMode;
    use crate::table::fake::FakeTable;
    use crate::table::StandardTables;

    fn encode_str(text: &str, options: EncodeOptions) -> String {
        encode(text, options, &StandardTables)
    }

    fn mode(mode: EncodeMode) -> EncodeOptions {
        EncodeOptions::new().with_mode(mode)
    }

    #[test]
    fn test_special_chars_all_levels() {
        let text = "<a href=\"x\">'&'</a>";
        assert_eq!(
            encode_str(text, EncodeOptions::default()),
            "&#60;a href=&#34;x&#34;&#62;&#39;&amp;&#39;&#60;/a&#62;"
        );
        assert_eq!(
            encode_str(text, EncodeOptions::new().with_level(Level::Html4)),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(
            encode_str(text, EncodeOptions::new().with_level(Level::Xml)),
            "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_html4_apostrophe_is_numeric() {
        assert_eq!(encode_str("'", EncodeOptions::new().with_level(Level::Html4)), "&#39;");
    }

    #[test]
    fn test_non_ascii_named_and_numeric() {
        let options = mode(EncodeMode::NonAscii);
        assert_eq!(encode_str("caf\u{00E9} \u{2026}", options), "caf&eacute; &hellip;");
        assert_eq!(encode_str("\u{4E2D}", options), "&#20013;");
        assert_eq!(
            encode_str("\u{4E2D}", options.with_numeric(NumericFormat::Hexadecimal)),
            "&#x4e2d;"
        );
    }

    #[test]
    fn test_xml_falls_back_to_numeric() {
        let options = mode(EncodeMode::NonAscii).with_level(Level::Xml);
        assert_eq!(encode_str("\u{00E9}", options), "&#233;");
    }

    #[test]
    fn test_printable_only_keeps_markup() {
        let options = mode(EncodeMode::NonAsciiPrintableOnly);
        assert_eq!(encode_str("<b>\u{01}\u{7F}\n</b>", options), "<b>&#1;&#127;\n</b>");
    }

    #[test]
    fn test_extensive() {
        let options = mode(EncodeMode::Extensive).with_level(Level::Html5);
        assert_eq!(encode_str("a, b!", options), "a&comma; b&excl;");
    }

    #[test]
    fn test_astral_char() {
        let options = mode(EncodeMode::NonAscii);
        assert_eq!(encode_str("\u{1F600}", options), "&#128512;");
        assert_eq!(encode("\u{1F600}", options, &FakeTable), "&smile;");
    }

    #[test]
    fn test_utf16_surrogates() {
        let options = mode(EncodeMode::NonAscii);
        let pair: &[u16] = &[0xD83D, 0xDE00];
        let encoded: Vec<u16> = encode(pair, options, &StandardTables);
        assert_eq!(String::from_utf16_lossy(&encoded), "&#128512;");

        let lone: &[u16] = &[0x61, 0xD83D, 0x62];
        let encoded = encode(lone, options, &StandardTables);
        assert_eq!(String::from_utf16_lossy(&encoded), "a&#55357;b");

        let hex = options.with_numeric(NumericFormat::Hexadecimal);
        let encoded = encode(lone, hex, &StandardTables);
        assert_eq!(String::from_utf16_lossy(&encoded), "a&#xd83d;b");
    }

    #[test]
    fn test_unmatched_text_is_copied() {
        assert_eq!(encode_str("plain text", EncodeOptions::default()), "plain text");
        assert_eq!(encode_str("", EncodeOptions::default()), "");
    }

    #[test]
    fn test_injected_table() {
        let options = mode(EncodeMode::NonAscii);
        assert_eq!(encode("\u{2605}\u{00E9}", options, &FakeTable), "&star;&#233;");
    }
}

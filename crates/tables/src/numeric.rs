//! Numeric character reference remapping

/// Largest Unicode scalar value
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// U+FFFD, substituted for references outside the Unicode range
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Map a numeric reference in the C1 control range to the character
/// Windows-1252 assigns to that byte.
///
/// Returns `None` for codepoints the HTML standard leaves unchanged
/// (0x81, 0x8D, 0x8F, 0x90, 0x9D and everything outside 0x80–0x9F).
pub fn legacy_numeric(codepoint: u32) -> Option<u32> {
    let mapped = match codepoint {
        0x80 => 0x20AC, // EURO SIGN
        0x82 => 0x201A, // SINGLE LOW-9 QUOTATION MARK
        0x83 => 0x0192, // LATIN SMALL LETTER F WITH HOOK
        0x84 => 0x201E, // DOUBLE LOW-9 QUOTATION MARK
        0x85 => 0x2026, // HORIZONTAL ELLIPSIS
        0x86 => 0x2020, // DAGGER
        0x87 => 0x2021, // DOUBLE DAGGER
        0x88 => 0x02C6, // MODIFIER LETTER CIRCUMFLEX ACCENT
        0x89 => 0x2030, // PER MILLE SIGN
        0x8A => 0x0160, // LATIN CAPITAL LETTER S WITH CARON
        0x8B => 0x2039, // SINGLE LEFT-POINTING ANGLE QUOTATION MARK
        0x8C => 0x0152, // LATIN CAPITAL LIGATURE OE
        0x8E => 0x017D, // LATIN CAPITAL LETTER Z WITH CARON
        0x91 => 0x2018, // LEFT SINGLE QUOTATION MARK
        0x92 => 0x2019, // RIGHT SINGLE QUOTATION MARK
        0x93 => 0x201C, // LEFT DOUBLE QUOTATION MARK
        0x94 => 0x201D, // RIGHT DOUBLE QUOTATION MARK
        0x95 => 0x2022, // BULLET
        0x96 => 0x2013, // EN DASH
        0x97 => 0x2014, // EM DASH
        0x98 => 0x02DC, // SMALL TILDE
        0x99 => 0x2122, // TRADE MARK SIGN
        0x9A => 0x0161, // LATIN SMALL LETTER S WITH CARON
        0x9B => 0x203A, // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK
        0x9C => 0x0153, // LATIN SMALL LIGATURE OE
        0x9E => 0x017E, // LATIN SMALL LETTER Z WITH CARON
        0x9F => 0x0178, // LATIN CAPITAL LETTER Y WITH DIAERESIS
        _ => return None,
    };
    Some(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_1252_replacements() {
        assert_eq!(legacy_numeric(0x80), Some(0x20AC));
        assert_eq!(legacy_numeric(0x91), Some(0x2018));
        assert_eq!(legacy_numeric(0x92), Some(0x2019));
        assert_eq!(legacy_numeric(0x9F), Some(0x0178));
    }

    #[test]
    fn test_unassigned_bytes_pass_through() {
        for cp in [0x81, 0x8D, 0x8F, 0x90, 0x9D] {
            assert_eq!(legacy_numeric(cp), None);
        }
    }

    #[test]
    fn test_outside_c1_range() {
        assert_eq!(legacy_numeric(0x7F), None);
        assert_eq!(legacy_numeric(0xA0), None);
        assert_eq!(legacy_numeric(0x20AC), None);
    }

    #[test]
    fn test_remap_covers_27_codepoints() {
        let mapped = (0x80..=0x9F).filter(|&cp| legacy_numeric(cp).is_some()).count();
        assert_eq!(mapped, 27);
    }
}

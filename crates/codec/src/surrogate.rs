//! UTF-16 surrogate pair arithmetic

const HIGH_START: u32 = 0xD800;
const HIGH_END: u32 = 0xDBFF;
const LOW_START: u32 = 0xDC00;
const LOW_END: u32 = 0xDFFF;
const SUPPLEMENTARY_START: u32 = 0x10000;
const HALF_SHIFT: u32 = 0x400;

/// Check whether a code unit is a leading (high) surrogate
pub fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_START..=HIGH_END).contains(&u32::from(unit))
}

/// Check whether a code unit is a trailing (low) surrogate
pub fn is_low_surrogate(unit: u16) -> bool {
    (LOW_START..=LOW_END).contains(&u32::from(unit))
}

/// Check whether a codepoint falls in the surrogate range
pub fn is_surrogate(codepoint: u32) -> bool {
    (HIGH_START..=LOW_END).contains(&codepoint)
}

/// Combine a high and a low surrogate into the codepoint they encode
pub fn combine_surrogates(high: u16, low: u16) -> u32 {
    (u32::from(high) - HIGH_START) * HALF_SHIFT + (u32::from(low) - LOW_START) + SUPPLEMENTARY_START
}

/// Codepoint starting at `index` in a UTF-16 sequence.
///
/// A high surrogate followed by a low surrogate yields the combined
/// supplementary codepoint. Any other unit, including an unpaired
/// surrogate, yields its own value.
pub fn codepoint_at(units: &[u16], index: usize) -> Option<u32> {
    let unit = *units.get(index)?;
    if is_high_surrogate(unit) {
        if let Some(&low) = units.get(index + 1) {
            if is_low_surrogate(low) {
                return Some(combine_surrogates(unit, low));
            }
        }
    }
    Some(u32::from(unit))
}

/// Split a supplementary codepoint (above U+FFFF) into its surrogate pair
pub fn to_surrogate_pair(codepoint: u32) -> (u16, u16) {
    debug_assert!(codepoint >= SUPPLEMENTARY_START && codepoint <= 0x10FFFF);
    let offset = codepoint - SUPPLEMENTARY_START;
    let high = offset / HALF_SHIFT + HIGH_START;
    let low = offset % HALF_SHIFT + LOW_START;
    (high as u16, low as u16)
}

//! Reference table access
//!
//! The codec reads named references through [`ReferenceTable`] so that the
//! scanning logic does not depend on the size or origin of the tables.

use charref_tables::{legacy_numeric, named_references, Level};

/// Read-only lookups into the named reference tables of each level
pub trait ReferenceTable: Send + Sync {
    /// Text for an entity name given without `&` and `;`
    fn forward(&self, level: Level, name: &str) -> Option<&str>;

    /// Canonical entity name (without `&` and `;`) for a character
    fn reverse(&self, level: Level, text: &str) -> Option<&str>;

    /// Whether `&name` is a complete reference without its `;`
    ///
    /// In body text only the first 32 characters of an unterminated name
    /// are offered, so longer names are never matched without their `;`.
    fn allows_unterminated(&self, level: Level, name: &str) -> bool;

    /// Replacement for a numeric reference in the C1 control range
    fn remap_numeric(&self, codepoint: u32) -> Option<u32>;
}

/// Tables shipped with `charref-tables`
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTables;

impl ReferenceTable for StandardTables {
    fn forward(&self, level: Level, name: &str) -> Option<&str> {
        named_references(level).entity(name)
    }

    fn reverse(&self, level: Level, text: &str) -> Option<&str> {
        named_references(level).name_for(text)
    }

    fn allows_unterminated(&self, level: Level, name: &str) -> bool {
        named_references(level).allows_unterminated(name)
    }

    fn remap_numeric(&self, codepoint: u32) -> Option<u32> {
        legacy_numeric(codepoint)
    }
}

impl<T: ReferenceTable + ?Sized> ReferenceTable for &T {
    fn forward(&self, level: Level, name: &str) -> Option<&str> {
        (**self).forward(level, name)
    }

    fn reverse(&self, level: Level, text: &str) -> Option<&str> {
        (**self).reverse(level, text)
    }

    fn allows_unterminated(&self, level: Level, name: &str) -> bool {
        (**self).allows_unterminated(level, name)
    }

    fn remap_numeric(&self, codepoint: u32) -> Option<u32> {
        (**self).remap_numeric(codepoint)
    }
}

/// A tiny table for exercising the scanners without the full data set
#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// Knows `amp`, `lt`, `gt`, `quot`, `star` (★), `not` (¬), `notin` (∉)
    /// and `smile` (😀) at every level. `amp` and `not` may omit the `;`,
    /// and only 0x80 has a numeric remap.
    pub(crate) struct FakeTable;

    const ENTRIES: &[(&str, &str)] = &[
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("star", "\u{2605}"),
        ("not", "\u{00AC}"),
        ("notin", "\u{2209}"),
        ("smile", "\u{1F600}"),
    ];

    impl ReferenceTable for FakeTable {
        fn forward(&self, _level: Level, name: &str) -> Option<&str> {
            ENTRIES.iter().find(|(n, _)| *n == name).map(|&(_, text)| text)
        }

        fn reverse(&self, _level: Level, text: &str) -> Option<&str> {
            ENTRIES.iter().find(|(_, t)| *t == text).map(|&(name, _)| name)
        }

        fn allows_unterminated(&self, _level: Level, name: &str) -> bool {
            name == "amp" || name == "not"
        }

        fn remap_numeric(&self, codepoint: u32) -> Option<u32> {
            (codepoint == 0x80).then_some(0x20AC)
        }
    }
}

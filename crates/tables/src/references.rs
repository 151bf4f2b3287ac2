//! Named reference maps
//!
//! Each level gets a forward map (entity name to text), a reverse map
//! (single character to its canonical name) and the set of names that may
//! appear without a trailing `;`. Maps are built on first use.

use std::sync::LazyLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::data::{
    HTML4_ANGLE_BRACKETS, HTML4_LATIN1, HTML4_SPECIAL, HTML4_SYMBOLS, HTML5_ADDITIONS,
    HTML5_APOS, HTML5_LEGACY, HTML5_MATH_LETTERS, HTML5_NUMERIC_ONLY, XML_PREDEFINED,
};
use crate::level::Level;

type Group = &'static [(&'static str, &'static str)];

const XML_GROUPS: &[Group] = &[XML_PREDEFINED];

const HTML4_GROUPS: &[Group] = &[HTML4_SPECIAL, HTML4_LATIN1, HTML4_SYMBOLS, HTML4_ANGLE_BRACKETS];

const HTML5_GROUPS: &[Group] = &[
    HTML4_SPECIAL,
    HTML5_APOS,
    HTML4_LATIN1,
    HTML4_SYMBOLS,
    HTML5_ADDITIONS,
    HTML5_MATH_LETTERS,
];

static XML: LazyLock<NamedReferences> = LazyLock::new(|| {
    NamedReferences::build(Level::Xml, XML_GROUPS, &[], std::iter::empty())
});

// HTML 4 user agents accepted every entity name without its semicolon.
static HTML4: LazyLock<NamedReferences> = LazyLock::new(|| {
    let unterminated = HTML4_GROUPS.iter().flat_map(|group| group.iter().map(|&(name, _)| name));
    NamedReferences::build(Level::Html4, HTML4_GROUPS, &[], unterminated)
});

static HTML5: LazyLock<NamedReferences> = LazyLock::new(|| {
    NamedReferences::build(
        Level::Html5,
        HTML5_GROUPS,
        HTML5_NUMERIC_ONLY,
        HTML5_LEGACY.iter().copied(),
    )
});

/// Get the reference maps for a level
pub fn named_references(level: Level) -> &'static NamedReferences {
    match level.resolve() {
        Level::Xml => &XML,
        Level::Html4 => &HTML4,
        Level::Html5 | Level::All => &HTML5,
    }
}

/// Forward and reverse named reference maps for one level
#[derive(Debug)]
pub struct NamedReferences {
    level: Level,
    entities: FxHashMap<&'static str, &'static str>,
    characters: FxHashMap<&'static str, &'static str>,
    unterminated: FxHashSet<&'static str>,
}

impl NamedReferences {
    fn build(
        level: Level,
        groups: &[Group],
        numeric_only: &[&str],
        unterminated: impl Iterator<Item = &'static str>,
    ) -> Self {
        let mut entities = FxHashMap::default();
        let mut characters = FxHashMap::default();

        for &(name, text) in groups.iter().flat_map(|group| group.iter()) {
            entities.insert(name, text);
            if is_single_scalar(text) && !numeric_only.contains(&text) {
                characters.entry(text).or_insert(name);
            }
        }

        let unterminated: FxHashSet<_> = unterminated.collect();

        log::debug!(
            "Built {} reference table: {} names, {} reverse entries, {} unterminated",
            level,
            entities.len(),
            characters.len(),
            unterminated.len()
        );

        Self {
            level,
            entities,
            characters,
            unterminated,
        }
    }

    /// The level these maps belong to
    pub fn level(&self) -> Level {
        self.level
    }

    /// Resolve an entity name (without `&` and `;`) to its text
    pub fn entity(&self, name: &str) -> Option<&'static str> {
        self.entities.get(name).copied()
    }

    /// Canonical entity name (without `&` and `;`) for a character
    pub fn name_for(&self, text: &str) -> Option<&'static str> {
        self.characters.get(text).copied()
    }

    /// Whether `&name` is a valid reference without the trailing `;`
    pub fn allows_unterminated(&self, name: &str) -> bool {
        self.unterminated.contains(name)
    }

    /// Number of entity names
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over `(name, text)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entities.iter().map(|(&name, &text)| (name, text))
    }
}

fn is_single_scalar(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some() && chars.next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(named_references(Level::Xml).len(), 5);
        assert_eq!(named_references(Level::Html4).len(), 252);
        assert_eq!(named_references(Level::Html5).len(), 2125);
    }

    #[test]
    fn test_all_shares_html5_table() {
        assert!(std::ptr::eq(
            named_references(Level::All),
            named_references(Level::Html5)
        ));
        assert_eq!(named_references(Level::All).level(), Level::Html5);
    }

    #[test]
    fn test_essential_entities() {
        for level in [Level::Xml, Level::Html4, Level::Html5] {
            let refs = named_references(level);
            assert_eq!(refs.entity("amp"), Some("&"));
            assert_eq!(refs.entity("lt"), Some("<"));
            assert_eq!(refs.entity("gt"), Some(">"));
            assert_eq!(refs.entity("quot"), Some("\""));
        }
    }

    #[test]
    fn test_apos_not_in_html4() {
        assert_eq!(named_references(Level::Xml).entity("apos"), Some("'"));
        assert_eq!(named_references(Level::Html4).entity("apos"), None);
        assert_eq!(named_references(Level::Html5).entity("apos"), Some("'"));
    }

    #[test]
    fn test_xml_is_subset_of_html5() {
        let html5 = named_references(Level::Html5);
        for (name, text) in named_references(Level::Xml).iter() {
            assert_eq!(html5.entity(name), Some(text), "missing {}", name);
        }
        assert!(html5.len() > named_references(Level::Xml).len());
    }

    #[test]
    fn test_html4_names_survive_in_html5() {
        let html5 = named_references(Level::Html5);
        for (name, text) in named_references(Level::Html4).iter() {
            if name == "lang" || name == "rang" {
                continue;
            }
            assert_eq!(html5.entity(name), Some(text), "missing {}", name);
        }
    }

    #[test]
    fn test_angle_brackets_differ_between_levels() {
        assert_eq!(named_references(Level::Html4).entity("lang"), Some("\u{2329}"));
        assert_eq!(named_references(Level::Html5).entity("lang"), Some("\u{27E8}"));
        assert_eq!(named_references(Level::Html5).entity("rang"), Some("\u{27E9}"));
    }

    #[test]
    fn test_html5_additions() {
        let html5 = named_references(Level::Html5);
        assert_eq!(html5.entity("hellip"), Some("\u{2026}"));
        assert_eq!(html5.entity("NewLine"), Some("\n"));
        assert_eq!(html5.entity("bsol"), Some("\\"));
        assert_eq!(html5.entity("notinva"), Some("\u{2209}"));
        assert_eq!(html5.entity("centerdot"), Some("\u{00B7}"));
        assert_eq!(html5.entity("Copf"), Some("\u{2102}"));
        assert_eq!(html5.entity("Aopf"), Some("\u{1D538}"));
        assert_eq!(html5.entity("zscr"), Some("\u{1D4CF}"));
        assert_eq!(html5.entity("fjlig"), Some("fj"));
        assert_eq!(html5.entity("nvlt"), Some("<\u{20D2}"));
    }

    #[test]
    fn test_whatwg_blocks() {
        let html5 = named_references(Level::Html5);
        let samples = [
            // Arrows
            ("Uarrocir", "\u{2949}"),
            ("lurdshar", "\u{294A}"),
            ("rdldhar", "\u{2969}"),
            ("DownLeftTeeVector", "\u{295E}"),
            // Miscellaneous mathematical symbols B
            ("angmsdaa", "\u{29A8}"),
            ("bemptyv", "\u{29B0}"),
            ("ohbar", "\u{29B5}"),
            ("vzigzag", "\u{299A}"),
            // Supplemental mathematical operators
            ("lesdoto", "\u{2A81}"),
            ("Otimes", "\u{2A37}"),
            ("Colone", "\u{2A74}"),
            // Negated relations with combining marks
            ("NotLessLess", "\u{226A}\u{0338}"),
            ("NotSquareSubset", "\u{228F}\u{0338}"),
            // Relations and box drawing
            ("Barv", "\u{2AE7}"),
            ("boxDL", "\u{2557}"),
            // Mathematical alphanumerics
            ("afr", "\u{1D51E}"),
            ("Zopf", "\u{2124}"),
        ];
        for (name, text) in samples {
            assert_eq!(html5.entity(name), Some(text), "{}", name);
        }
    }

    #[test]
    fn test_non_whatwg_names_absent() {
        let html5 = named_references(Level::Html5);
        assert_eq!(html5.entity("Coprod"), None);
        assert_eq!(html5.entity("Coproduct"), Some("\u{2210}"));
    }

    #[test]
    fn test_unknown_entity() {
        let html5 = named_references(Level::Html5);
        assert_eq!(html5.entity("notanentity"), None);
        assert_eq!(html5.entity(""), None);
        assert_eq!(html5.entity("AMP;"), None);
    }

    #[test]
    fn test_reverse_prefers_canonical_name() {
        let html5 = named_references(Level::Html5);
        assert_eq!(html5.name_for("\u{00A0}"), Some("nbsp"));
        assert_eq!(html5.name_for("\u{00A9}"), Some("copy"));
        assert_eq!(html5.name_for("\u{2192}"), Some("rarr"));
        assert_eq!(html5.name_for("\u{27E8}"), Some("lang"));
        assert_eq!(html5.name_for("&"), Some("amp"));
    }

    #[test]
    fn test_reverse_markup_delimiters() {
        let html5 = named_references(Level::Html5);
        for delimiter in ["<", ">", "\"", "'"] {
            assert_eq!(html5.name_for(delimiter), None);
        }

        let html4 = named_references(Level::Html4);
        assert_eq!(html4.name_for("<"), Some("lt"));
        assert_eq!(html4.name_for("\""), Some("quot"));
        assert_eq!(html4.name_for("'"), None);

        let xml = named_references(Level::Xml);
        assert_eq!(xml.name_for("'"), Some("apos"));
        assert_eq!(xml.name_for(">"), Some("gt"));
    }

    #[test]
    fn test_reverse_skips_multi_codepoint_values() {
        let html5 = named_references(Level::Html5);
        assert_eq!(html5.name_for("fj"), None);
        assert_eq!(html5.name_for("<\u{20D2}"), None);
    }

    #[test]
    fn test_reverse_entries_resolve_forward() {
        for level in [Level::Xml, Level::Html4, Level::Html5] {
            let refs = named_references(level);
            for (_, text) in refs.iter() {
                if let Some(name) = refs.name_for(text) {
                    assert_eq!(refs.entity(name), Some(text));
                }
            }
        }
    }

    #[test]
    fn test_unterminated_names() {
        let html5 = named_references(Level::Html5);
        assert!(html5.allows_unterminated("amp"));
        assert!(html5.allows_unterminated("AMP"));
        assert!(html5.allows_unterminated("not"));
        assert!(html5.allows_unterminated("yuml"));
        assert!(!html5.allows_unterminated("hellip"));
        assert!(!html5.allows_unterminated("apos"));

        let html4 = named_references(Level::Html4);
        assert!(html4.allows_unterminated("hellip"));
        assert!(html4.allows_unterminated("amp"));

        let xml = named_references(Level::Xml);
        assert!(!xml.allows_unterminated("amp"));
    }

    #[test]
    fn test_legacy_names_resolve() {
        let html5 = named_references(Level::Html5);
        for &name in HTML5_LEGACY {
            assert!(html5.entity(name).is_some(), "legacy name {} has no entity", name);
        }
        assert_eq!(HTML5_LEGACY.len(), 106);
    }
}

use lazy_static::lazy_static;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::models::group::{
    GroupColors, GroupDefinition, GroupKey, TextStyle, DEFAULT_GROUP_COLORS, GROUP_DEFINITIONS,
};

/// Checked against the slug before any keyword scan. Order is precedence.
const SHORT_FORMS: [(&str, GroupKey); 3] = [
    ("bla", GroupKey::Bla),
    ("rod", GroupKey::Rod),
    ("red", GroupKey::Rod),
];

/// Words that only say "this is a group" and carry no identity.
const FILLER_WORDS: [&str; 4] = ["gruppe", "gruppa", "gruppen", "group"];

/// UTF-8 bytes of Norwegian letters that were decoded as Windows-1252.
const UTF8_AS_LATIN1: [(&str, &str); 6] = [
    ("Ã¥", "å"),
    ("Ã¸", "ø"),
    ("Ã¦", "æ"),
    ("Ã…", "Å"),
    ("Ã˜", "Ø"),
    ("Ã†", "Æ"),
];

struct KeywordMatcher {
    /// Only set for keywords that are purely alphabetic once folded, so that
    /// "ra,d" never matches a slug like "radio".
    slug: Option<String>,
    folded: String,
}

struct KeywordIndex {
    key: GroupKey,
    keywords: Vec<KeywordMatcher>,
}

lazy_static! {
    static ref KEYWORD_INDEX: Vec<KeywordIndex> = GROUP_DEFINITIONS
        .iter()
        .map(|def| KeywordIndex {
            key: def.key,
            keywords: def
                .keywords
                .iter()
                .map(|kw| {
                    let folded = fold(kw);
                    let slug = folded
                        .chars()
                        .all(|c| c.is_ascii_lowercase())
                        .then(|| folded.clone());
                    KeywordMatcher { slug, folded }
                })
                .collect(),
        })
        .collect();
}

/// Either an already-resolved key or free text still to be resolved.
#[derive(Debug, Clone, Copy)]
pub enum GroupRef<'a> {
    Key(GroupKey),
    Text(&'a str),
}

impl From<GroupKey> for GroupRef<'_> {
    fn from(key: GroupKey) -> Self {
        GroupRef::Key(key)
    }
}

impl<'a> From<&'a str> for GroupRef<'a> {
    fn from(text: &'a str) -> Self {
        GroupRef::Text(text)
    }
}

impl<'a> From<&'a String> for GroupRef<'a> {
    fn from(text: &'a String) -> Self {
        GroupRef::Text(text.as_str())
    }
}

impl<'a> From<Option<&'a str>> for GroupRef<'a> {
    fn from(text: Option<&'a str>) -> Self {
        GroupRef::Text(text.unwrap_or_default())
    }
}

pub struct GroupService;

impl GroupService {
    /// Lowercase, accent-free, letters-only form of a group label with filler
    /// words ("gruppe", "group") dropped. Empty input gives an empty slug.
    pub fn normalize(input: &str) -> String {
        slug_of(&fold(input))
    }

    /// Canonical key for a free-text label, or `None` when it is out of taxonomy.
    ///
    /// Short forms win over the keyword table, and the table is scanned in
    /// declaration order. Matching is substring containment, nothing fuzzier.
    pub fn resolve_key(input: &str) -> Option<GroupKey> {
        if input.trim().is_empty() {
            return None;
        }
        let folded = fold(input);
        let slug = slug_of(&folded);

        if let Some((_, key)) = SHORT_FORMS.iter().find(|(short, _)| slug.contains(short)) {
            return Some(*key);
        }

        KEYWORD_INDEX
            .iter()
            .find(|entry| {
                entry.keywords.iter().any(|kw| {
                    kw.slug.as_deref().is_some_and(|s| slug.contains(s))
                        || folded.contains(kw.folded.as_str())
                })
            })
            .map(|entry| entry.key)
    }

    pub fn theme(input: &str) -> GroupColors {
        Self::resolve_key(input)
            .map(|key| key.colors())
            .unwrap_or(DEFAULT_GROUP_COLORS)
    }

    pub fn text_style(input: &str) -> TextStyle {
        TextStyle { color: Self::theme(input).text }
    }

    /// Display name, or `""` when the group is unknown. Callers must read the
    /// empty string as "leave out of group-specific UI", never as a label.
    pub fn display_name<'a>(group: impl Into<GroupRef<'a>>) -> &'static str {
        let key = match group.into() {
            GroupRef::Key(key) => Some(key),
            GroupRef::Text(text) => Self::resolve_key(text),
        };
        key.map(|k| k.display_name()).unwrap_or("")
    }

    pub fn is_valid(input: &str) -> bool {
        Self::resolve_key(input).is_some()
    }

    pub fn list_all() -> &'static [GroupDefinition] {
        &GROUP_DEFINITIONS
    }

    /// Label written to storage: the display name when the group resolves,
    /// otherwise the trimmed input, so unknown groups survive untouched.
    pub fn canonical_label(input: &str) -> String {
        match Self::resolve_key(input) {
            Some(key) => key.display_name().to_string(),
            None => {
                let raw = input.trim();
                if !raw.is_empty() {
                    tracing::debug!(group = raw, "group label outside taxonomy kept as-is");
                }
                raw.to_string()
            }
        }
    }

    /// Same group regardless of spelling. Two unknown labels are compared as
    /// trimmed lowercase text.
    pub fn groups_equal(a: &str, b: &str) -> bool {
        match (Self::resolve_key(a), Self::resolve_key(b)) {
            (Some(x), Some(y)) => x == y,
            (None, None) => a.trim().to_lowercase() == b.trim().to_lowercase(),
            _ => false,
        }
    }
}

fn repair_encoding(input: &str) -> String {
    let mut repaired = input.to_string();
    if repaired.contains('Ã') {
        for (broken, fixed) in UTF8_AS_LATIN1 {
            repaired = repaired.replace(broken, fixed);
        }
    }
    // Latin-1 å/ø/æ read as Windows-1250.
    repaired
        .chars()
        .map(|c| match c {
            'ĺ' => 'å',
            'Ĺ' => 'Å',
            'ř' => 'ø',
            'Ř' => 'Ø',
            'ć' => 'æ',
            'Ć' => 'Æ',
            other => other,
        })
        .collect()
}

/// Repaired, lowercased, marks stripped, ligatures spelled out. Punctuation and
/// spacing are kept.
fn fold(input: &str) -> String {
    let lower = repair_encoding(input).to_lowercase();
    let mut out = String::with_capacity(lower.len());
    for c in lower.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'ø' => out.push('o'),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            'đ' => out.push('d'),
            'ł' => out.push('l'),
            'þ' => out.push_str("th"),
            other => out.push(other),
        }
    }
    out
}

fn slug_of(folded: &str) -> String {
    folded
        .split(|c: char| !c.is_ascii_lowercase())
        .filter(|word| !word.is_empty() && !FILLER_WORDS.contains(word))
        .collect()
}

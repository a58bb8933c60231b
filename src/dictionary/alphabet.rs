//! Alphabet index: which file holds the words starting with a given letter.
//!
//! # Design Decisions
//! - The table is an ordered value, built once and never mutated
//! - Order of the table is the order of `list_alphabets` and of full scans
//! - A term resolves to the longest key it starts with, so two-code-point
//!   letters (consonant + nukta) are reachable

/// Bengali-script letters used as bucket keys, in dictionary order.
const BISHNUPRIYA_ALPHABET: [&str; 50] = [
    "অ", "আ", "ই", "ঈ", "উ", "ঊ", "ঋ", "এ", "ঐ", "ও", "ঔ",
    "ক", "খ", "গ", "ঘ", "ঙ",
    "চ", "ছ", "জ", "ঝ", "ঞ",
    "ট", "ঠ", "ড", "ঢ", "ণ",
    "ত", "থ", "দ", "ধ", "ন",
    "প", "ফ", "ব", "ভ", "ম",
    "য", "র", "ল", "শ", "ষ",
    "স", "হ", "ড\u{9bc}", "ঢ\u{9bc}", "য\u{9bc}",
    "ৎ", "ং", "ঃ", "ঁ",
];

/// Precomposed nukta letters and their decomposed equivalents.
const NUKTA_COMPOSITES: [(char, &str); 3] = [
    ('\u{9dc}', "ড\u{9bc}"),
    ('\u{9dd}', "ঢ\u{9bc}"),
    ('\u{9df}', "য\u{9bc}"),
];

/// One row of the alphabet index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetEntry {
    /// Bucket key (one letter, possibly more than one code point).
    pub grapheme: String,

    /// File name inside the alphabets directory.
    pub file_name: String,
}

/// Immutable mapping from first letter to alphabet file.
#[derive(Debug, Clone)]
pub struct AlphabetIndex {
    entries: Vec<AlphabetEntry>,
}

impl AlphabetIndex {
    /// Build an index from `(grapheme, file name)` pairs. Later duplicates of a
    /// grapheme are ignored.
    pub fn new<G, F>(pairs: impl IntoIterator<Item = (G, F)>) -> Self
    where
        G: Into<String>,
        F: Into<String>,
    {
        let mut entries: Vec<AlphabetEntry> = Vec::new();
        for (grapheme, file_name) in pairs {
            let grapheme = grapheme.into();
            if grapheme.is_empty() || entries.iter().any(|e| e.grapheme == grapheme) {
                continue;
            }
            entries.push(AlphabetEntry {
                grapheme,
                file_name: file_name.into(),
            });
        }
        Self { entries }
    }

    /// The Bishnupriya Manipuri alphabet, each letter stored in `<letter>.json`.
    pub fn bishnupriya() -> Self {
        Self::new(
            BISHNUPRIYA_ALPHABET
                .iter()
                .map(|g| (*g, format!("{g}.json"))),
        )
    }

    /// All rows in table order.
    pub fn entries(&self) -> &[AlphabetEntry] {
        &self.entries
    }

    /// All bucket keys in table order.
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.grapheme.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of an exact bucket key.
    pub fn position(&self, letter: &str) -> Option<usize> {
        let letter = normalize_nukta(letter);
        self.entries.iter().position(|e| e.grapheme == letter)
    }

    /// Position of the bucket a word belongs to: the longest key the word
    /// starts with.
    pub fn resolve(&self, term: &str) -> Option<usize> {
        let term = normalize_nukta(term);
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| term.starts_with(e.grapheme.as_str()))
            .max_by_key(|(_, e)| e.grapheme.len())
            .map(|(i, _)| i)
    }
}

impl Default for AlphabetIndex {
    fn default() -> Self {
        Self::bishnupriya()
    }
}

/// Rewrite a leading precomposed nukta letter into the decomposed form used
/// by the index keys.
fn normalize_nukta(term: &str) -> std::borrow::Cow<'_, str> {
    let mut chars = term.chars();
    let Some(first) = chars.next() else {
        return term.into();
    };
    match NUKTA_COMPOSITES.iter().find(|(c, _)| *c == first) {
        Some((_, decomposed)) => format!("{decomposed}{}", chars.as_str()).into(),
        None => term.into(),
    }
}

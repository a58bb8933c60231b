//! In-memory word store.
//!
//! # Responsibilities
//! - Load every alphabet file once at startup
//! - Answer list, id, alphabet and search queries from memory
//! - Keep track of buckets that failed to load
//!
//! # Design Decisions
//! - Read-only after construction, shared as `Arc<WordStore>` without locks
//! - Scans follow alphabet table order, so "first match" is well defined
//! - Matching is case-insensitive substring containment, nothing fuzzier

use std::path::Path;

use crate::dictionary::alphabet::{AlphabetEntry, AlphabetIndex};
use crate::dictionary::entry::{Language, WordEntry};
use crate::dictionary::error::{StoreError, StoreResult};
use crate::dictionary::loader::load_alphabet_file;

/// Load outcome of one alphabet file.
#[derive(Debug, Clone)]
enum BucketState {
    Loaded(Vec<WordEntry>),
    Missing,
    Failed(String),
}

#[derive(Debug, Clone)]
struct Bucket {
    entry: AlphabetEntry,
    state: BucketState,
}

impl Bucket {
    fn words(&self) -> StoreResult<&[WordEntry]> {
        match &self.state {
            BucketState::Loaded(words) => Ok(words),
            BucketState::Missing => Ok(&[]),
            BucketState::Failed(reason) => Err(StoreError::Unavailable {
                file_name: self.entry.file_name.clone(),
                reason: reason.clone(),
            }),
        }
    }
}

/// Words grouped by first letter, held in memory.
#[derive(Debug, Clone)]
pub struct WordStore {
    index: AlphabetIndex,
    buckets: Vec<Bucket>,
}

impl WordStore {
    /// Load every file named by `index` from `dir`.
    ///
    /// Never fails as a whole: unreadable files are recorded as failed
    /// buckets and reported through [`WordStore::load_failures`].
    pub fn load(dir: &Path, index: AlphabetIndex) -> Self {
        let buckets = index
            .entries()
            .iter()
            .map(|entry| {
                let state = match load_alphabet_file(dir, &entry.file_name) {
                    Ok(Some(words)) => BucketState::Loaded(words),
                    Ok(None) => BucketState::Missing,
                    Err(e) => {
                        tracing::error!(
                            grapheme = %entry.grapheme,
                            file = %entry.file_name,
                            error = %e,
                            "Failed to load alphabet file"
                        );
                        BucketState::Failed(e.to_string())
                    }
                };
                Bucket {
                    entry: entry.clone(),
                    state,
                }
            })
            .collect();

        let store = Self { index, buckets };
        tracing::info!(
            dir = %dir.display(),
            alphabets = store.index.len(),
            words = store.word_count(),
            missing = store.missing_count(),
            failed = store.load_failures().count(),
            "Word store loaded"
        );
        store
    }

    /// Build a store from already parsed buckets, in index order.
    /// Graphemes without words get an empty bucket.
    pub fn from_words(index: AlphabetIndex, mut words: Vec<(String, Vec<WordEntry>)>) -> Self {
        let buckets = index
            .entries()
            .iter()
            .map(|entry| {
                let state = match words.iter().position(|(g, _)| *g == entry.grapheme) {
                    Some(i) => BucketState::Loaded(words.swap_remove(i).1),
                    None => BucketState::Missing,
                };
                Bucket {
                    entry: entry.clone(),
                    state,
                }
            })
            .collect();
        Self { index, buckets }
    }

    /// Number of words held in loaded buckets.
    pub fn word_count(&self) -> usize {
        self.buckets
            .iter()
            .map(|b| match &b.state {
                BucketState::Loaded(words) => words.len(),
                _ => 0,
            })
            .sum()
    }

    fn missing_count(&self) -> usize {
        self.buckets
            .iter()
            .filter(|b| matches!(b.state, BucketState::Missing))
            .count()
    }

    /// `(file name, reason)` for every bucket that failed to load.
    pub fn load_failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buckets.iter().filter_map(|b| match &b.state {
            BucketState::Failed(reason) => Some((b.entry.file_name.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Every word from every file, in alphabet order.
    pub fn list_all(&self) -> StoreResult<Vec<&WordEntry>> {
        let mut all = Vec::with_capacity(self.word_count());
        for bucket in &self.buckets {
            all.extend(bucket.words()?);
        }
        Ok(all)
    }

    /// First word carrying `id`, scanning files in alphabet order.
    pub fn get_by_id(&self, id: &str) -> StoreResult<Option<&WordEntry>> {
        for bucket in &self.buckets {
            if let Some(word) = bucket.words()?.iter().find(|w| w.id == id) {
                return Ok(Some(word));
            }
        }
        Ok(None)
    }

    /// Case-insensitive substring search.
    ///
    /// Bishnupriya terms are looked up only in the bucket of their first
    /// letter; an unmapped first letter gives no results. Bengali and English
    /// terms are looked up in every bucket.
    pub fn search(&self, term: &str, language: Language) -> StoreResult<Vec<&WordEntry>> {
        let needle = term.to_lowercase();
        let matches = |word: &&WordEntry| word.term(language).to_lowercase().contains(&needle);

        let results: Vec<&WordEntry> = match language {
            Language::Bpy => {
                let Some(pos) = self.index.resolve(term) else {
                    tracing::debug!(term = %term, "No alphabet file for first letter");
                    return Ok(Vec::new());
                };
                let bucket = &self.buckets[pos];
                tracing::debug!(
                    term = %term,
                    file = %bucket.entry.file_name,
                    "Searching single alphabet file"
                );
                bucket.words()?.iter().filter(matches).collect()
            }
            Language::Bn | Language::En => {
                let mut results = Vec::new();
                for bucket in &self.buckets {
                    results.extend(bucket.words()?.iter().filter(matches));
                }
                results
            }
        };

        tracing::debug!(
            term = %term,
            language = %language,
            results = results.len(),
            "Search complete"
        );
        Ok(results)
    }

    /// Bucket keys in alphabet order.
    pub fn list_alphabets(&self) -> Vec<&str> {
        self.index.graphemes().collect()
    }

    /// Every word in the file for `letter`, as stored. Unmapped letters give
    /// an empty slice.
    pub fn get_by_alphabet(&self, letter: &str) -> StoreResult<&[WordEntry]> {
        match self.index.position(letter) {
            Some(pos) => self.buckets[pos].words(),
            None => Ok(&[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("ক.json"),
            r#"[{"id": "kitab", "bpy": "কিতাব", "bn": "বই", "en": "Book"},
                {"bpy": "কাম", "bn": "কাজ", "en": "Work"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("প.json"),
            r#"{"words": [{"id": "pani", "bpy": "পানি", "bn": "পানি", "en": "Water"},
                          {"bpy": "পড়ানি", "bn": "পড়া", "en": "Study"}]}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("ঘ.json"),
            r#"[{"id": "ghor", "bpy": "ঘর", "bn": "ঘর", "en": "House"},
                {"id": "misplaced", "bpy": "পানিফল", "bn": "পানিফল", "en": "Water chestnut"}]"#,
        )
        .unwrap();
        dir
    }

    fn store() -> (tempfile::TempDir, WordStore) {
        let dir = fixture_dir();
        let store = WordStore::load(dir.path(), AlphabetIndex::bishnupriya());
        (dir, store)
    }

    #[test]
    fn test_list_all_in_alphabet_order() {
        let (_dir, store) = store();
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(store.word_count(), 6);
        // ক < ঘ < প in the table
        let order: Vec<_> = all.iter().map(|w| w.bpy.as_str()).collect();
        assert_eq!(order, ["কিতাব", "কাম", "ঘর", "পানিফল", "পানি", "পড়ানি"]);
        assert_eq!(store.load_failures().count(), 0);
    }

    #[test]
    fn test_every_listed_id_resolves() {
        let (_dir, store) = store();
        for word in store.list_all().unwrap() {
            assert_eq!(store.get_by_id(&word.id).unwrap(), Some(word));
        }
        assert!(store.get_by_id("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_search_bpy_single_bucket() {
        let (_dir, store) = store();

        let results = store.search("পানি", Language::Bpy).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "pani");

        // "পানিফল" lives in ঘ.json, so the প bucket never sees it
        let results = store.search("পানিফল", Language::Bpy).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_search_bpy_unmapped_letter() {
        let (_dir, store) = store();
        assert!(store.search("water", Language::Bpy).unwrap().is_empty());
        assert!(store.search("", Language::Bpy).unwrap().is_empty());
    }

    #[test]
    fn test_search_other_languages_scan_everything() {
        let (_dir, store) = store();

        let results = store.search("WATER", Language::En).unwrap();
        let ids: Vec<_> = results.iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, ["misplaced", "pani"]);

        let results = store.search("পানি", Language::Bn).unwrap();
        assert_eq!(results.len(), 2);

        assert!(store.search("zebra", Language::En).unwrap().is_empty());
    }

    #[test]
    fn test_get_by_alphabet() {
        let (_dir, store) = store();

        let words = store.get_by_alphabet("ক").unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|w| w.bpy.starts_with('ক')));

        assert!(store.get_by_alphabet("খ").unwrap().is_empty());
        assert!(store.get_by_alphabet("x").unwrap().is_empty());
        assert_eq!(store.list_alphabets().len(), 50);
    }

    #[test]
    fn test_failed_bucket_is_reported() {
        let dir = fixture_dir();
        fs::write(dir.path().join("খ.json"), "[{").unwrap();
        let store = WordStore::load(dir.path(), AlphabetIndex::bishnupriya());

        let failures: Vec<_> = store.load_failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "খ.json");

        assert!(matches!(
            store.get_by_alphabet("খ"),
            Err(StoreError::Unavailable { .. })
        ));
        assert!(store.list_all().is_err());
        assert!(store.search("Book", Language::En).is_err());

        // Reads that stay clear of the broken bucket still work
        assert_eq!(store.get_by_alphabet("ক").unwrap().len(), 2);
        assert_eq!(store.search("কিতাব", Language::Bpy).unwrap().len(), 1);
        assert!(store.get_by_id("kitab").unwrap().is_some());
    }

    #[test]
    fn test_from_words() {
        let store = WordStore::from_words(
            AlphabetIndex::bishnupriya(),
            vec![("ক".to_string(), vec![WordEntry::new("কিতাব", "বই", "Book")])],
        );
        assert_eq!(store.word_count(), 1);
        assert_eq!(store.get_by_alphabet("ক").unwrap()[0].en, "Book");
    }

    #[test]
    fn test_precomposed_nukta_lookup() {
        let store = WordStore::from_words(
            AlphabetIndex::bishnupriya(),
            vec![("য\u{9bc}".to_string(), vec![WordEntry::new("\u{9df}াত", "যাত", "Go")])],
        );

        assert_eq!(store.get_by_alphabet("\u{9df}").unwrap().len(), 1);
        assert_eq!(store.get_by_alphabet("য\u{9bc}").unwrap().len(), 1);

        let results = store.search("\u{9df}াত", Language::Bpy).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].en, "Go");
    }

    #[test]
    fn test_loose_record_keeps_bucket_available() {
        let dir = fixture_dir();
        fs::write(
            dir.path().join("খ.json"),
            r#"[{"id": "k1", "bpy": "খা", "en": "Eat", "synonyms": null, "pronunciation": "kha"}]"#,
        )
        .unwrap();
        let store = WordStore::load(dir.path(), AlphabetIndex::bishnupriya());

        assert_eq!(store.load_failures().count(), 0);
        assert_eq!(store.search("eat", Language::En).unwrap().len(), 1);
        assert_eq!(store.list_all().unwrap().len(), 7);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::load(&dir.path().join("nope"), AlphabetIndex::bishnupriya());
        assert_eq!(store.word_count(), 0);
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(store.load_failures().count(), 0);
    }
}

//! Word entry model and search languages.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// A dictionary record as stored in an alphabet file.
///
/// Fields the model does not know about are kept in `extra` and written back
/// out unchanged. So are known metadata fields whose value has an unexpected
/// shape: a record is never rejected for its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct WordEntry {
    /// Stable identifier. Empty until the loader assigns one.
    pub id: String,

    /// Bishnupriya Manipuri term.
    pub bpy: String,

    /// Bengali equivalent.
    pub bn: String,

    /// English equivalent.
    pub en: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<Pronunciation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub example_sentences: Vec<ExampleSentence>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub similar_words: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar: Option<GrammarInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WordEntry {
    /// Create an entry with only the three terms set.
    pub fn new(bpy: impl Into<String>, bn: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            bpy: bpy.into(),
            bn: bn.into(),
            en: en.into(),
            category: None,
            part_of_speech: None,
            pronunciation: None,
            example_sentences: Vec::new(),
            similar_words: Vec::new(),
            synonyms: Vec::new(),
            antonyms: Vec::new(),
            grammar: None,
            audio_url: None,
            extra: Map::new(),
        }
    }

    /// The term in the given language.
    pub fn term(&self, language: Language) -> &str {
        match language {
            Language::Bpy => &self.bpy,
            Language::Bn => &self.bn,
            Language::En => &self.en,
        }
    }
}

/// Pronunciation guide per language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pronunciation {
    #[serde(default, alias = "bishnupriya", skip_serializing_if = "Option::is_none")]
    pub bpy: Option<String>,
    #[serde(default, alias = "bengali", skip_serializing_if = "Option::is_none")]
    pub bn: Option<String>,
    #[serde(default, alias = "english", skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

/// A usage example in all three languages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSentence {
    #[serde(default, alias = "bishnupriya", deserialize_with = "string_or_empty")]
    pub bpy: String,
    #[serde(default, alias = "bengali", deserialize_with = "string_or_empty")]
    pub bn: String,
    #[serde(default, alias = "english", deserialize_with = "string_or_empty")]
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conjugations: Vec<Conjugation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conjugation {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub tense: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub form: String,
}

impl From<Map<String, Value>> for WordEntry {
    fn from(mut fields: Map<String, Value>) -> Self {
        let mut entry = WordEntry::new(
            take_term(&mut fields, "bpy", "bishnupriya"),
            take_term(&mut fields, "bn", "bengali"),
            take_term(&mut fields, "en", "english"),
        );
        // Only string ids are honored; anything else is treated as absent.
        if let Some(Value::String(id)) = fields.remove("id") {
            entry.id = id;
        }

        entry.category = take_field(&mut fields, "category");
        entry.part_of_speech = take_field(&mut fields, "partOfSpeech");
        entry.pronunciation = take_field(&mut fields, "pronunciation");
        entry.example_sentences = take_field(&mut fields, "exampleSentences").unwrap_or_default();
        entry.similar_words = take_field(&mut fields, "similarWords").unwrap_or_default();
        entry.synonyms = take_field(&mut fields, "synonyms").unwrap_or_default();
        entry.antonyms = take_field(&mut fields, "antonyms").unwrap_or_default();
        entry.grammar = take_field(&mut fields, "grammar");
        entry.audio_url = take_field(&mut fields, "audioUrl");

        entry.extra = fields;
        entry
    }
}

/// Remove a term under its short or long key. Null and non-string values
/// read as empty.
fn take_term(fields: &mut Map<String, Value>, key: &str, alias: &str) -> String {
    [fields.remove(key), fields.remove(alias)]
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(s) => Some(s),
            _ => None,
        })
        .unwrap_or_default()
}

/// Remove `key` and convert it. A value of another shape goes back into
/// `fields` untouched; null is dropped.
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    match fields.remove(key)? {
        Value::Null => None,
        raw => match T::deserialize(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(field = key, error = %e, "Keeping metadata field as raw JSON");
                fields.insert(key.to_owned(), raw);
                None
            }
        },
    }
}

/// Null and non-string values read as empty.
fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

/// Language a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Bishnupriya Manipuri (native script, bucketed by first letter).
    Bpy,
    /// Bengali.
    Bn,
    /// English.
    En,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Bpy, Language::Bn, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Bpy => "bpy",
            Language::Bn => "bn",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Language must be one of: bpy, bn, en")]
pub struct ParseLanguageError;

impl FromStr for Language {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or(ParseLanguageError)
    }
}

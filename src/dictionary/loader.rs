//! Alphabet file loading.
//!
//! # Responsibilities
//! - Read one alphabet file from disk
//! - Accept either a bare array or an object with a `words` array
//! - Assign derived ids to records without one
//!
//! # Design Decisions
//! - A missing file is `Ok(None)`, not an error
//! - Records are read leniently; only a file or record that is not JSON of
//!   the expected layout is an error
//! - Normalization happens once here; the rest of the crate only sees
//!   `Vec<WordEntry>`

use serde::de::Error as _;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::dictionary::entry::WordEntry;
use crate::dictionary::error::{StoreError, StoreResult};
use crate::dictionary::id::{derive_id, id_seed};

/// Parse alphabet file contents and assign missing ids.
///
/// Accepts a bare array of records or an object whose `words` field holds
/// one. Errors name the offending record or field.
pub fn parse_alphabet_file(
    content: &str,
    file_name: &str,
) -> Result<Vec<WordEntry>, serde_json::Error> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let records = match serde_json::from_str::<Value>(content)? {
        Value::Array(records) => records,
        Value::Object(mut file) => match file.remove("words") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "`words` must be an array, found {}",
                    kind(&other)
                )))
            }
        },
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected an array of words or an object with a `words` array, found {}",
                kind(&other)
            )))
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| parse_record(record, file_name, position))
        .collect()
}

fn parse_record(
    record: Value,
    file_name: &str,
    position: usize,
) -> Result<WordEntry, serde_json::Error> {
    let fields = match record {
        Value::Object(fields) => fields,
        other => {
            return Err(serde_json::Error::custom(format!(
                "record {position}: expected an object, found {}",
                kind(&other)
            )))
        }
    };
    let seed = id_seed(&fields, file_name, position);
    let mut entry = WordEntry::from(fields);
    if entry.id.is_empty() {
        entry.id = derive_id(&seed);
    }
    Ok(entry)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load `file_name` from `dir`. Returns `Ok(None)` when the file does not exist.
pub fn load_alphabet_file(dir: &Path, file_name: &str) -> StoreResult<Option<Vec<WordEntry>>> {
    let path = dir.join(file_name);

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Alphabet file not found");
            return Ok(None);
        }
        Err(source) => return Err(StoreError::Io { path, source }),
    };

    let words = parse_alphabet_file(&content, file_name)
        .map_err(|source| StoreError::Parse { path: path.clone(), source })?;

    tracing::debug!(path = %path.display(), words = words.len(), "Loaded alphabet file");
    Ok(Some(words))
}

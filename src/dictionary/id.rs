//! Deterministic ids for records that do not carry one.

use serde_json::{Map, Value};
use sha1::{Digest, Sha1};

/// Number of hex characters kept from the digest.
pub const ID_LEN: usize = 12;

/// Derive an id from a seed: SHA-1, lowercase hex, first 12 characters.
///
/// Pure: the same seed always yields the same id. Collisions are possible
/// but not expected at dictionary scale.
pub fn derive_id(seed: &str) -> String {
    let digest = Sha1::digest(seed.as_bytes());
    let mut hex = format!("{digest:x}");
    hex.truncate(ID_LEN);
    hex
}

/// Seed for the raw record at `position` inside `file_name`.
///
/// Only the short `bpy`/`bn`/`en` keys take part, so a record spelled with
/// `bishnupriya`/`bengali`/`english` seeds with empty terms. Absent and
/// non-string values count as empty.
pub fn id_seed(record: &Map<String, Value>, file_name: &str, position: usize) -> String {
    let term = |key: &str| record.get(key).and_then(Value::as_str).unwrap_or("");
    format!(
        "{}|{}|{}|{}|{}",
        term("bpy"),
        term("bn"),
        term("en"),
        file_name,
        position
    )
}

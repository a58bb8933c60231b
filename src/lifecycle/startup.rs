//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the word store from the configured directory
//! - Enforce `data.fail_on_load_error`
//! - Publish store gauges

use std::path::Path;
use thiserror::Error;

use crate::config::DictionaryConfig;
use crate::dictionary::{AlphabetIndex, WordStore};
use crate::observability::metrics;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{count} alphabet file(s) failed to load: {files}")]
    AlphabetFiles { count: usize, files: String },
}

/// Load the word store described by `config`.
pub fn load_store(config: &DictionaryConfig) -> Result<WordStore, StartupError> {
    let dir = Path::new(&config.data.alphabets_dir);
    if !dir.is_dir() {
        tracing::warn!(
            dir = %dir.display(),
            "Alphabets directory does not exist; serving an empty dictionary"
        );
    }

    let store = WordStore::load(dir, AlphabetIndex::bishnupriya());
    metrics::record_store(&store);

    let failed: Vec<&str> = store.load_failures().map(|(file, _)| file).collect();
    if config.data.fail_on_load_error && !failed.is_empty() {
        return Err(StartupError::AlphabetFiles {
            count: failed.len(),
            files: failed.join(", "),
        });
    }

    Ok(store)
}

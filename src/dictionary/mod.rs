//! Word store subsystem.
//!
//! # Data Flow
//! ```text
//! data/alphabets/<grapheme>.json   (one file per first letter)
//!     → loader.rs (read, accept bare array or {"words": [...]})
//!     → id.rs (derive stable ids for records without one)
//!     → store.rs (WordStore: immutable in-memory buckets)
//!     → shared via Arc to request handlers
//!
//! Query:
//!     search(term, bpy)   → alphabet.rs resolves the bucket → scan one bucket
//!     search(term, bn|en) → scan every bucket
//! ```
//!
//! # Design Decisions
//! - Files are read once at startup; nothing is written back
//! - A missing file is an empty bucket, a corrupt file is a failed bucket
//! - Reads that touch a failed bucket return `StoreError::Unavailable`

pub mod alphabet;
pub mod entry;
pub mod error;
pub mod id;
pub mod loader;
pub mod store;

pub use alphabet::{AlphabetEntry, AlphabetIndex};
pub use entry::{Language, ParseLanguageError, WordEntry};
pub use error::{StoreError, StoreResult};
pub use id::derive_id;
pub use store::WordStore;

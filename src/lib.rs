//! Bishnupriya Manipuri Dictionary Library
//!
//! Serves Bishnupriya Manipuri, Bengali and English word entries, grouped in
//! one JSON file per first letter, over a small JSON API.

pub mod config;
pub mod dictionary;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::DictionaryConfig;
pub use dictionary::{AlphabetIndex, Language, WordEntry, WordStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;

//! Error types for lexicon loading.
//!
//! The extraction pipeline itself never fails: unresolved fields are `None`
//! in the output. The only fallible operation in this crate is loading a
//! canonicalization table from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a lexicon file
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("failed to read lexicon file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("lexicon file {} contains no entries", path.display())]
    Empty { path: PathBuf },
}

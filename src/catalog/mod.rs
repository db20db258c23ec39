//! Persistent catalogs for letters, words, and sentences.
//!
//! Three independent JSON-object files, each mapping caller-assigned string
//! IDs to records. Records are only ever added or overwritten by ID; the
//! core never deletes.

pub mod model;
pub mod store;

pub use model::{LetterRecord, SentencePart, SentenceRecord, WordRecord, now_timestamp};
pub use store::{CatalogStore, next_numeric_id};

use miette::Diagnostic;
use thiserror::Error;

/// Errors from catalog persistence.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("catalog I/O error at {path}")]
    #[diagnostic(
        code(stelae::catalog::io),
        help(
            "A filesystem operation on a catalog file failed. Check that the \
             data directory exists, has correct permissions, and that the \
             disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog file {path}: {message}")]
    #[diagnostic(
        code(stelae::catalog::malformed),
        help(
            "The catalog file is not a valid JSON object of records. Restore \
             it from a backup or fix the offending entry by hand; the store \
             never writes partial files, so this usually means external edits."
        )
    )]
    Malformed { path: String, message: String },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

//! XDG-compliant path resolution for stelae.
//!
//! All three catalog files and the default reference corpus live under a
//! single data directory, `$XDG_DATA_HOME/stelae/` by default, overridable
//! with `--data-dir`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(stelae::paths::no_home),
        help("Set the HOME environment variable, or pass --data-dir explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(stelae::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Data-directory layout for the three catalogs and the reference corpus.
#[derive(Debug, Clone)]
pub struct StelaePaths {
    /// `$XDG_DATA_HOME/stelae/` (or the `--data-dir` override).
    pub data_dir: PathBuf,
}

impl StelaePaths {
    /// Resolve from the environment with the standard XDG fallback.
    pub fn resolve() -> PathResult<Self> {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                std::env::var("HOME")
                    .map(|home| PathBuf::from(home).join(".local/share"))
                    .map_err(|_| PathError::NoHome)
            })?
            .join("stelae");
        Ok(Self { data_dir })
    }

    /// Use an explicit directory instead of the XDG layout.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create the data directory. Idempotent.
    pub fn ensure_dirs(&self) -> PathResult<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| PathError::CreateDir {
            path: self.data_dir.display().to_string(),
            source: e,
        })
    }

    /// Path to the letter catalog.
    pub fn letters_file(&self) -> PathBuf {
        self.data_dir.join("letters.json")
    }

    /// Path to the word catalog.
    pub fn words_file(&self) -> PathBuf {
        self.data_dir.join("words.json")
    }

    /// Path to the sentence catalog.
    pub fn sentences_file(&self) -> PathBuf {
        self.data_dir.join("sentences.json")
    }

    /// Default location of the reference corpus.
    pub fn reference_file(&self) -> PathBuf {
        self.data_dir.join("english_sample.txt")
    }
}

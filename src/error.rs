//! Rich diagnostic error types for stelae.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text; this module wraps them into
//! one top-level type for callers that cross subsystem boundaries.

use miette::Diagnostic;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::catalog::CatalogError;
use crate::glyph::GlyphError;
use crate::paths::PathError;

/// Top-level error type for the stelae toolkit.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text, sources) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum StelaeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Glyph(#[from] GlyphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] PathError),
}

/// Convenience alias for functions returning stelae results.
pub type StelaeResult<T> = std::result::Result<T, StelaeError>;

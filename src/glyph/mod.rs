//! Glyph model for the engraved script.
//!
//! A glyph is a set of active stroke components drawn from a fixed 13-item
//! vocabulary split across an upper and a lower band around a shared
//! baseline. Glyphs render deterministically to an abstract vector
//! [`Drawing`]; ordered sequences of glyphs form a [`Chain`] (the visual form
//! of a word).
//!
//! ## Components
//!
//! - [`component`] — the closed `Component` vocabulary and band partition
//! - [`glyph`] — the activation table and set-equality semantics
//! - [`geometry`] — stroke primitives, layout constants, glyph rendering
//! - [`chain`] — shared-baseline rendering of glyph sequences

pub mod chain;
pub mod component;
pub mod geometry;
#[allow(clippy::module_inception)]
pub mod glyph;

pub use chain::Chain;
pub use component::{Band, Component};
pub use geometry::{Drawing, Point, Stroke, render_glyph};
pub use glyph::Glyph;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur during glyph operations.
#[derive(Debug, Error, Diagnostic)]
pub enum GlyphError {
    #[error("unknown component: '{name}'")]
    #[diagnostic(
        code(stelae::glyph::unknown_component),
        help(
            "The component vocabulary is fixed at 13 strokes. \
             Run `stelae components` to list the valid names."
        )
    )]
    UnknownComponent { name: String },
}

/// Result type for glyph operations.
pub type GlyphResult<T> = Result<T, GlyphError>;

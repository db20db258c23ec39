//! # stelae
//!
//! A cataloging and decipherment toolkit for an unknown engraved script.
//! Glyphs are composed from a fixed 13-stroke vocabulary, grouped into words
//! and sentences, deduplicated against the catalog before saving, and
//! analyzed by symbol frequency against a reference natural-language corpus
//! to suggest translations.
//!
//! ## Architecture
//!
//! - **Glyph model** (`glyph`): closed component vocabulary, activation
//!   sets, deterministic vector rendering, shared-baseline chains
//! - **Catalogs** (`catalog`): letters, words, and sentences as JSON-object
//!   files with whole-file read-modify-write persistence
//! - **Identity** (`identity`): canonical comparison keys and duplicate
//!   detection for letters and words
//! - **Analysis** (`analysis`): frequency histograms and rank-aligned
//!   translation suggestion
//!
//! ## Library usage
//!
//! ```
//! use stelae::glyph::{Component, Glyph, render_glyph};
//!
//! let mut glyph = Glyph::new();
//! glyph.activate(Component::UpperCenterVertical);
//! glyph.activate_lower_diamond();
//! let drawing = render_glyph(&glyph);
//! assert!(!drawing.strokes.is_empty());
//! ```

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod glyph;
pub mod identity;
pub mod paths;

pub use error::{StelaeError, StelaeResult};

//! Duplicate detection for letters and words.
//!
//! Before a new catalog entry is saved, the candidate is compared against the
//! existing records by canonical key: an unordered active-component set for
//! letters, an ordered sequence of such sets for words. Finding no duplicate
//! is the common case and is not an error; these functions never mutate the
//! catalogs.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::catalog::{LetterRecord, WordRecord};
use crate::glyph::{Component, Glyph};

/// The comparison key of a single glyph.
pub type ComponentSet = BTreeSet<Component>;

/// The comparison key of a word: one component set per letter slot, in
/// order.
pub type WordShape = Vec<ComponentSet>;

/// Find an existing letter with the same active-component set as the
/// candidate glyph. Activation order and inactive components are irrelevant.
pub fn find_duplicate_letter(
    candidate: &Glyph,
    letters: &BTreeMap<String, LetterRecord>,
) -> Option<String> {
    let key = candidate.active_set();
    letters
        .iter()
        .find(|(_, letter)| letter.component_set() == key)
        .map(|(id, _)| id.clone())
}

/// A candidate word in either supported representation.
#[derive(Debug, Clone)]
pub enum WordCandidate<'a> {
    /// Ordered letter IDs (canonical schema).
    LetterIds(&'a [String]),
    /// Ordered embedded component lists (legacy schema).
    Components(&'a [Vec<Component>]),
}

impl WordCandidate<'_> {
    /// Normalize to the order-significant comparison key.
    ///
    /// Dangling letter IDs keep their slot as an empty set, mirroring
    /// [`WordRecord::shape`], so both sides of a comparison degrade the same
    /// way.
    pub fn shape(&self, letters: &BTreeMap<String, LetterRecord>) -> WordShape {
        match self {
            WordCandidate::LetterIds(ids) => ids
                .iter()
                .map(|id| match letters.get(id) {
                    Some(letter) => letter.component_set(),
                    None => {
                        warn!(letter = %id, "dangling letter reference in candidate word");
                        BTreeSet::new()
                    }
                })
                .collect(),
            WordCandidate::Components(slots) => slots
                .iter()
                .map(|slot| slot.iter().copied().collect())
                .collect(),
        }
    }
}

/// Find an existing word whose letter sequence matches the candidate's,
/// position by position. Order matters: `[A, B]` and `[B, A]` are distinct
/// words. Stored words in either schema are normalized before comparison, so
/// a word stored one way is detected as a duplicate of a candidate expressed
/// the other way.
pub fn find_duplicate_word(
    candidate: &WordCandidate<'_>,
    words: &BTreeMap<String, WordRecord>,
    letters: &BTreeMap<String, LetterRecord>,
) -> Option<String> {
    let key = candidate.shape(letters);
    words
        .iter()
        .find(|(_, word)| word.shape(letters) == key)
        .map(|(id, _)| id.clone())
}

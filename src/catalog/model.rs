//! Persistent record types for the three catalogs.
//!
//! Letters, words, and sentences each live in their own JSON-object file
//! keyed by a caller-assigned string ID. Words exist in two on-disk schemas:
//! the canonical form references letter records by ID, while the legacy form
//! embeds one component list per letter slot. Both deserialize; only the
//! canonical form is written for new records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::glyph::{Chain, Component, Glyph};

/// RFC 3339 timestamp for `date_added` fields.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// A cataloged letter: one glyph plus field notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterRecord {
    pub id: String,
    /// Active components of the glyph, canonical names.
    pub components: Vec<Component>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub location_found: String,
    #[serde(default)]
    pub date_added: String,
}

impl LetterRecord {
    /// Reconstruct the glyph from the stored active-component list.
    pub fn glyph(&self) -> Glyph {
        Glyph::from_components(self.components.iter().copied())
    }

    /// The letter's comparison key: its unordered active-component set.
    pub fn component_set(&self) -> BTreeSet<Component> {
        self.components.iter().copied().collect()
    }
}

/// A cataloged word: an ordered letter sequence plus field notes.
///
/// `letter_ids` is the canonical schema. `components` carries the legacy
/// embedded schema (one component list per slot) and is only ever read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: String,
    #[serde(default)]
    pub letter_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<Vec<Component>>>,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub location_found: String,
    #[serde(default)]
    pub date_added: String,
}

impl WordRecord {
    /// Normalize either schema to the word's identity key: the ordered
    /// sequence of active-component sets, one per letter slot.
    ///
    /// A dangling letter ID keeps its slot position but normalizes to an
    /// empty set, with a warning.
    pub fn shape(&self, letters: &BTreeMap<String, LetterRecord>) -> Vec<BTreeSet<Component>> {
        if let Some(slots) = &self.components {
            return slots
                .iter()
                .map(|slot| slot.iter().copied().collect())
                .collect();
        }
        self.letter_ids
            .iter()
            .map(|letter_id| match letters.get(letter_id) {
                Some(letter) => letter.component_set(),
                None => {
                    warn!(word = %self.id, letter = %letter_id, "dangling letter reference");
                    BTreeSet::new()
                }
            })
            .collect()
    }

    /// Resolve the word to renderable glyphs, skipping dangling letter
    /// references (render what can be resolved rather than aborting).
    pub fn glyphs(&self, letters: &BTreeMap<String, LetterRecord>) -> Vec<Glyph> {
        if let Some(slots) = &self.components {
            return slots
                .iter()
                .map(|slot| Glyph::from_components(slot.iter().copied()))
                .collect();
        }
        self.letter_ids
            .iter()
            .filter_map(|letter_id| match letters.get(letter_id) {
                Some(letter) => Some(letter.glyph()),
                None => {
                    warn!(word = %self.id, letter = %letter_id, "skipping unresolvable letter");
                    None
                }
            })
            .collect()
    }

    /// The word as a renderable chain.
    pub fn chain(&self, letters: &BTreeMap<String, LetterRecord>) -> Chain {
        Chain::new(self.glyphs(letters))
    }
}

/// One element of a sentence: a cataloged word reference, literal text, or
/// punctuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SentencePart {
    /// `content` is a word ID.
    Word { content: String },
    /// `content` is literal display text.
    Text { content: String },
    /// `content` is a punctuation mark.
    Punct { content: String },
}

impl SentencePart {
    pub fn content(&self) -> &str {
        match self {
            SentencePart::Word { content }
            | SentencePart::Text { content }
            | SentencePart::Punct { content } => content,
        }
    }
}

/// A cataloged sentence: an ordered mix of word references, text, and
/// punctuation. Sentences are unique by ID only; no content-level dedup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub id: String,
    pub components: Vec<SentencePart>,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub location_found: String,
    #[serde(default)]
    pub date_added: String,
}

impl SentenceRecord {
    /// Whether this sentence counts toward frequency statistics. By catalog
    /// convention, real entries carry purely numeric IDs; anything else is a
    /// test or manual entry.
    pub fn is_cataloged(&self) -> bool {
        !self.id.is_empty() && self.id.chars().all(|c| c.is_ascii_digit())
    }

    /// Display line joining word translations (falling back to the word ID)
    /// with literal text and punctuation.
    pub fn preview(&self, words: &BTreeMap<String, WordRecord>) -> String {
        self.components
            .iter()
            .map(|part| match part {
                SentencePart::Word { content } => match words.get(content) {
                    Some(word) if !word.translation.is_empty() => word.translation.clone(),
                    _ => content.clone(),
                },
                SentencePart::Text { content } | SentencePart::Punct { content } => {
                    content.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(id: &str, components: &[Component]) -> LetterRecord {
        LetterRecord {
            id: id.to_string(),
            components: components.to_vec(),
            notes: String::new(),
            location_found: String::new(),
            date_added: now_timestamp(),
        }
    }

    #[test]
    fn letter_glyph_round_trips_components() {
        let rec = letter("1", &[Component::UpperLeftVertical, Component::LowerCircle]);
        let glyph = rec.glyph();
        assert_eq!(glyph.active_components(), rec.components);
    }

    #[test]
    fn word_shape_normalizes_both_schemas() {
        let mut letters = BTreeMap::new();
        letters.insert("a".to_string(), letter("a", &[Component::UpperLeftVertical]));
        letters.insert("b".to_string(), letter("b", &[Component::LowerCircle]));

        let by_ids = WordRecord {
            id: "w1".into(),
            letter_ids: vec!["a".into(), "b".into()],
            components: None,
            translation: String::new(),
            notes: String::new(),
            location_found: String::new(),
            date_added: String::new(),
        };
        let embedded = WordRecord {
            id: "w2".into(),
            letter_ids: Vec::new(),
            components: Some(vec![
                vec![Component::UpperLeftVertical],
                vec![Component::LowerCircle],
            ]),
            ..by_ids.clone()
        };

        assert_eq!(by_ids.shape(&letters), embedded.shape(&letters));
    }

    #[test]
    fn dangling_letter_keeps_slot_in_shape_but_not_in_glyphs() {
        let mut letters = BTreeMap::new();
        letters.insert("a".to_string(), letter("a", &[Component::UpperLeftVertical]));

        let word = WordRecord {
            id: "w".into(),
            letter_ids: vec!["a".into(), "missing".into()],
            components: None,
            translation: String::new(),
            notes: String::new(),
            location_found: String::new(),
            date_added: String::new(),
        };

        assert_eq!(word.shape(&letters).len(), 2);
        assert!(word.shape(&letters)[1].is_empty());
        assert_eq!(word.glyphs(&letters).len(), 1);
    }

    #[test]
    fn sentence_part_json_shape() {
        let part = SentencePart::Word { content: "W1".into() };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["type"], "word");
        assert_eq!(json["content"], "W1");

        let punct: SentencePart =
            serde_json::from_str(r#"{"type":"punct","content":"."}"#).unwrap();
        assert_eq!(punct, SentencePart::Punct { content: ".".into() });
    }

    #[test]
    fn cataloged_ids_are_purely_numeric() {
        let mut s = SentenceRecord {
            id: "42".into(),
            components: Vec::new(),
            translation: String::new(),
            notes: String::new(),
            location_found: String::new(),
            date_added: String::new(),
        };
        assert!(s.is_cataloged());
        s.id = "abc_test".into();
        assert!(!s.is_cataloged());
        s.id = "".into();
        assert!(!s.is_cataloged());
    }

    #[test]
    fn preview_prefers_translations() {
        let mut words = BTreeMap::new();
        words.insert(
            "W1".to_string(),
            WordRecord {
                id: "W1".into(),
                letter_ids: Vec::new(),
                components: None,
                translation: "river".into(),
                notes: String::new(),
                location_found: String::new(),
                date_added: String::new(),
            },
        );

        let sentence = SentenceRecord {
            id: "1".into(),
            components: vec![
                SentencePart::Word { content: "W1".into() },
                SentencePart::Word { content: "W2".into() },
                SentencePart::Punct { content: ".".into() },
            ],
            translation: String::new(),
            notes: String::new(),
            location_found: String::new(),
            date_added: String::new(),
        };

        assert_eq!(sentence.preview(&words), "river W2 .");
    }

    #[test]
    fn legacy_word_json_deserializes() {
        let json = r#"{
            "id": "w9",
            "components": [["UPPER_LEFT_VERTICAL"], ["LOWER_CIRCLE"]],
            "translation": "",
            "notes": "",
            "location_found": "",
            "date_added": ""
        }"#;
        let word: WordRecord = serde_json::from_str(json).unwrap();
        assert!(word.letter_ids.is_empty());
        assert_eq!(word.components.as_ref().unwrap().len(), 2);
    }
}

//! Frequency analysis and rank-aligned translation suggestion.
//!
//! The corpus of cataloged sentences yields empirical word- and letter-ID
//! histograms. Cross-referencing the word histogram against a reference
//! natural-language frequency table suggests a translation per word. The
//! alignment is a heuristic, not a proof: it assumes the reference corpus's
//! rank-frequency curve approximates the unknown language's. That structural
//! assumption is documented here, not validated.
//!
//! Tie-breaking between symbols with equal counts is implementation-defined:
//! counting accumulates into a `BTreeMap` and the descending-by-count sort is
//! stable, so equal-count symbols order ascending by symbol string.

use std::collections::BTreeMap;
use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::{
    CatalogError, CatalogStore, LetterRecord, SentencePart, SentenceRecord, WordRecord,
};

/// Errors from frequency analysis.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalysisError {
    #[error("reference corpus not found: {path}")]
    #[diagnostic(
        code(stelae::analysis::reference_missing),
        help(
            "Translation suggestion needs a plain-text sample of the target \
             language. Place one at the path above (default: \
             english_sample.txt in the data directory) or point at one with \
             --reference."
        )
    )]
    ReferenceCorpusMissing { path: String },

    #[error("failed to read reference corpus {path}")]
    #[diagnostic(
        code(stelae::analysis::reference_unreadable),
        help("Check that the file is readable UTF-8 text.")
    )]
    ReferenceCorpusUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// A symbol → occurrence-count histogram, stored ascending by symbol.
/// Counts exactly equal bag occurrence counts; this is a histogram, not a
/// probability distribution.
pub type Histogram = Vec<(String, u64)>;

/// Word- and letter-ID histograms over the cataloged sentence corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyDistribution {
    /// Word-ID occurrences across all cataloged sentences.
    pub words: Histogram,
    /// Letter-ID occurrences, one set per word occurrence.
    pub letters: Histogram,
}

impl FrequencyDistribution {
    /// Word histogram sorted descending by count (stable; equal counts keep
    /// ascending symbol order).
    pub fn words_by_count(&self) -> Histogram {
        sort_descending(self.words.clone())
    }

    /// Letter histogram sorted descending by count.
    pub fn letters_by_count(&self) -> Histogram {
        sort_descending(self.letters.clone())
    }
}

fn sort_descending(mut histogram: Histogram) -> Histogram {
    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
}

fn count(bag: &[String]) -> Histogram {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for symbol in bag {
        *counts.entry(symbol.clone()).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Build word- and letter-ID histograms from the sentence corpus.
///
/// Only sentences with purely numeric IDs contribute (non-numeric IDs mark
/// test or manual entries and are silently excluded). Word occurrences are
/// collected in sentence-then-part order with repeats counted; each word
/// occurrence contributes its resolved letter IDs. A dangling word or letter
/// reference is omitted from the bag entirely, with a warning, so a ghost ID
/// never enters the ranking.
pub fn compute_frequency_distribution(
    letters: &BTreeMap<String, LetterRecord>,
    words: &BTreeMap<String, WordRecord>,
    sentences: &BTreeMap<String, SentenceRecord>,
) -> FrequencyDistribution {
    let mut word_bag: Vec<String> = Vec::new();
    let mut letter_bag: Vec<String> = Vec::new();
    for sentence in sentences.values() {
        if !sentence.is_cataloged() {
            debug!(sentence = %sentence.id, "excluding non-numeric sentence from statistics");
            continue;
        }
        for part in &sentence.components {
            let SentencePart::Word { content } = part else {
                continue;
            };
            let Some(word) = words.get(content) else {
                warn!(sentence = %sentence.id, word = %content, "sentence references unknown word, skipping");
                continue;
            };
            word_bag.push(content.clone());
            for letter_id in &word.letter_ids {
                if letters.contains_key(letter_id) {
                    letter_bag.push(letter_id.clone());
                } else {
                    warn!(word = %content, letter = %letter_id, "word references unknown letter, skipping");
                }
            }
        }
    }

    FrequencyDistribution {
        words: count(&word_bag),
        letters: count(&letter_bag),
    }
}

/// Load the reference natural-language frequency table from a plain-text
/// file: tokenize on whitespace, lowercase, discard tokens containing ASCII
/// punctuation, count, sort descending by count.
pub fn load_reference_frequencies(path: &Path) -> AnalysisResult<Histogram> {
    if !path.exists() {
        return Err(AnalysisError::ReferenceCorpusMissing {
            path: path.display().to_string(),
        });
    }
    let text =
        std::fs::read_to_string(path).map_err(|e| AnalysisError::ReferenceCorpusUnreadable {
            path: path.display().to_string(),
            source: e,
        })?;

    let bag: Vec<String> = text
        .split_whitespace()
        .map(|token| token.to_lowercase())
        .filter(|token| !token.chars().any(|c| c.is_ascii_punctuation()))
        .collect();

    let ranked = sort_descending(count(&bag));
    if let Some((top, top_count)) = ranked.first() {
        debug!(word = %top, count = top_count, "most common reference word");
    }
    Ok(ranked)
}

/// One translation assignment produced by [`suggest_translations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub word_id: String,
    pub translation: String,
    /// Occurrence count of the word in the cataloged corpus.
    pub count: u64,
}

/// Suggest translations by walking the catalog's word ranking and the
/// reference ranking in lockstep.
///
/// The candidate for the i-th catalog word is `reference[i - offset]`. Words
/// whose notes contain `marker` keep their stored translation and bump the
/// offset by one, so manually confirmed words do not consume a reference
/// slot. Other words get the candidate written to their `translation` field;
/// when `commit` is given, each updated record is persisted immediately.
/// Assignment stops with a warning if the reference list runs out.
pub fn suggest_translations(
    letters: &BTreeMap<String, LetterRecord>,
    words: &mut BTreeMap<String, WordRecord>,
    sentences: &BTreeMap<String, SentenceRecord>,
    reference: &[(String, u64)],
    marker: &str,
    commit: Option<&CatalogStore<WordRecord>>,
) -> AnalysisResult<Vec<Suggestion>> {
    let distribution = compute_frequency_distribution(letters, words, sentences);
    let ranked = distribution.words_by_count();

    let mut suggestions = Vec::new();
    let mut offset = 0usize;

    for (i, (word_id, count)) in ranked.iter().enumerate() {
        let index = i - offset;
        let Some((candidate, _)) = reference.get(index) else {
            warn!(remaining = ranked.len() - i, "reference corpus exhausted, stopping");
            break;
        };

        let Some(word) = words.get_mut(word_id) else {
            warn!(word = %word_id, "ranked word missing from catalog, skipping");
            continue;
        };

        if word.notes.contains(marker) {
            info!(
                word = %word_id,
                suggested = %candidate,
                known = %word.translation,
                "translation already confirmed, shifting alignment"
            );
            offset += 1;
            continue;
        }

        info!(word = %word_id, translation = %candidate, count, "suggesting translation");
        word.translation = candidate.clone();
        if let Some(store) = commit {
            store.put(word_id, word.clone())?;
        }
        suggestions.push(Suggestion {
            word_id: word_id.clone(),
            translation: candidate.clone(),
            count: *count,
        });
    }

    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Component;

    fn letter(id: &str) -> (String, LetterRecord) {
        (
            id.to_string(),
            LetterRecord {
                id: id.to_string(),
                components: vec![Component::UpperLeftVertical],
                notes: String::new(),
                location_found: String::new(),
                date_added: String::new(),
            },
        )
    }

    fn word(id: &str, letter_ids: &[&str], notes: &str) -> (String, WordRecord) {
        (
            id.to_string(),
            WordRecord {
                id: id.to_string(),
                letter_ids: letter_ids.iter().map(|s| s.to_string()).collect(),
                components: None,
                translation: String::new(),
                notes: notes.to_string(),
                location_found: String::new(),
                date_added: String::new(),
            },
        )
    }

    fn sentence(id: &str, word_ids: &[&str]) -> (String, SentenceRecord) {
        (
            id.to_string(),
            SentenceRecord {
                id: id.to_string(),
                components: word_ids
                    .iter()
                    .map(|w| SentencePart::Word {
                        content: w.to_string(),
                    })
                    .collect(),
                translation: String::new(),
                notes: String::new(),
                location_found: String::new(),
                date_added: String::new(),
            },
        )
    }

    fn get(histogram: &Histogram, symbol: &str) -> Option<u64> {
        histogram
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, c)| *c)
    }

    #[test]
    fn non_numeric_sentence_ids_are_excluded() {
        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let words: BTreeMap<_, _> = [word("W1", &["a"], ""), word("W2", &["a"], "")]
            .into_iter()
            .collect();
        let sentences: BTreeMap<_, _> = [
            sentence("1", &["W1", "W1"]),
            sentence("abc_test", &["W2"]),
        ]
        .into_iter()
        .collect();

        let dist = compute_frequency_distribution(&letters, &words, &sentences);
        assert_eq!(get(&dist.words, "W1"), Some(2));
        assert_eq!(get(&dist.words, "W2"), None);
        // Both W1 occurrences contribute their letter.
        assert_eq!(get(&dist.letters, "a"), Some(2));
    }

    #[test]
    fn dangling_references_are_skipped_not_fatal() {
        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let words: BTreeMap<_, _> = [word("W1", &["a", "ghost"], "")].into_iter().collect();
        let sentences: BTreeMap<_, _> = [sentence("1", &["W1", "W_missing"])]
            .into_iter()
            .collect();

        let dist = compute_frequency_distribution(&letters, &words, &sentences);
        // The dangling word is omitted from the bag entirely; the dangling
        // letter is dropped from its word's contribution.
        assert_eq!(get(&dist.words, "W_missing"), None);
        assert_eq!(get(&dist.words, "W1"), Some(1));
        assert_eq!(get(&dist.letters, "a"), Some(1));
        assert_eq!(get(&dist.letters, "ghost"), None);
    }

    #[test]
    fn unknown_word_does_not_consume_a_reference_slot() {
        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let mut words: BTreeMap<_, _> = [word("W1", &["a"], "")].into_iter().collect();
        // A ghost word outranks the cataloged one by raw occurrence count.
        let sentences: BTreeMap<_, _> = [sentence(
            "1",
            &["W_ghost", "W_ghost", "W_ghost", "W_ghost", "W_ghost", "W1"],
        )]
        .into_iter()
        .collect();

        let reference = vec![("r1".to_string(), 9), ("r2".to_string(), 4)];
        let suggestions =
            suggest_translations(&letters, &mut words, &sentences, &reference, "known", None)
                .unwrap();

        // The ghost never enters the ranking, so the top reference word goes
        // to the top cataloged word.
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word_id, "W1");
        assert_eq!(suggestions[0].translation, "r1");
        assert_eq!(words["W1"].translation, "r1");
    }

    #[test]
    fn missing_reference_corpus_is_fatal() {
        let err = load_reference_frequencies(Path::new("/nonexistent/english_sample.txt"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ReferenceCorpusMissing { .. }));
    }

    #[test]
    fn reference_loading_lowercases_and_drops_punctuated_tokens() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("english_sample.txt");
        std::fs::write(&path, "The the THE cat cat don't stop.").unwrap();

        let ranked = load_reference_frequencies(&path).unwrap();
        // "don't" and "stop." contain punctuation and are discarded.
        assert_eq!(ranked, vec![("the".to_string(), 3), ("cat".to_string(), 2)]);
    }

    #[test]
    fn equal_counts_order_ascending_by_symbol() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "zebra apple zebra apple").unwrap();

        let ranked = load_reference_frequencies(&path).unwrap();
        assert_eq!(
            ranked,
            vec![("apple".to_string(), 2), ("zebra".to_string(), 2)],
        );
    }

    #[test]
    fn known_marker_shifts_alignment_by_one() {
        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let mut words: BTreeMap<_, _> = [
            word("W1", &["a"], "known: confirmed on stele"),
            word("W2", &["a"], ""),
            word("W3", &["a"], ""),
        ]
        .into_iter()
        .collect();
        // Frequencies: W1 x5, W2 x3, W3 x1.
        let sentences: BTreeMap<_, _> = [
            sentence("1", &["W1", "W1", "W1", "W1", "W1"]),
            sentence("2", &["W2", "W2", "W2"]),
            sentence("3", &["W3"]),
        ]
        .into_iter()
        .collect();

        let reference = vec![
            ("r1".to_string(), 100),
            ("r2".to_string(), 50),
            ("r3".to_string(), 10),
        ];

        let suggestions =
            suggest_translations(&letters, &mut words, &sentences, &reference, "known", None)
                .unwrap();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].word_id, "W2");
        assert_eq!(suggestions[0].translation, "r1");
        assert_eq!(suggestions[1].word_id, "W3");
        assert_eq!(suggestions[1].translation, "r2");

        // W1 keeps its stored translation untouched.
        assert_eq!(words["W1"].translation, "");
        assert_eq!(words["W2"].translation, "r1");
        assert_eq!(words["W3"].translation, "r2");
    }

    #[test]
    fn reference_exhaustion_stops_assignment() {
        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let mut words: BTreeMap<_, _> = [word("W1", &["a"], ""), word("W2", &["a"], "")]
            .into_iter()
            .collect();
        let sentences: BTreeMap<_, _> = [sentence("1", &["W1", "W1", "W2"])]
            .into_iter()
            .collect();

        let reference = vec![("r1".to_string(), 9)];
        let suggestions =
            suggest_translations(&letters, &mut words, &sentences, &reference, "known", None)
                .unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].word_id, "W1");
        assert_eq!(words["W2"].translation, "");
    }

    #[test]
    fn commit_persists_each_assignment() {
        let dir = tempfile::TempDir::new().unwrap();
        let store: CatalogStore<WordRecord> = CatalogStore::new(dir.path().join("words.json"));

        let letters: BTreeMap<_, _> = [letter("a")].into_iter().collect();
        let mut words: BTreeMap<_, _> = [word("W1", &["a"], "")].into_iter().collect();
        for (id, rec) in &words {
            store.put(id, rec.clone()).unwrap();
        }
        let sentences: BTreeMap<_, _> = [sentence("1", &["W1"])].into_iter().collect();
        let reference = vec![("river".to_string(), 4)];

        suggest_translations(
            &letters,
            &mut words,
            &sentences,
            &reference,
            "known",
            Some(&store),
        )
        .unwrap();

        let persisted = store.load().unwrap();
        assert_eq!(persisted["W1"].translation, "river");
    }
}

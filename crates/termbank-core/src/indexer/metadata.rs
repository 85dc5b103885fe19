//! Dictionary-wide metadata aggregation.
//!
//! One forward pass over every entry in source order builds the cross-entry
//! indices that term building and reference resolution depend on. Once
//! [`Metadata::build`] returns, the aggregate is read-only.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::info;

use crate::indexer::headword::{extract_headwords, Headword};
use crate::models::{Entry, HeadwordHash, Sequence};

/// Identifies one sense of one entry. Sense numbers start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SenseId {
    pub sequence: Sequence,
    pub number: usize,
}

/// A lookup hash recorded for an entry, with the priority of its headword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHash {
    pub hash: HeadwordHash,
    pub is_priority: bool,
}

/// The aggregate built over a whole structured lexicon.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// ISO-639-2 code of the target language.
    pub language: String,
    /// Emit forms terms next to sense terms.
    pub extra_mode: bool,
    pub seq_to_sense_count: HashMap<Sequence, usize>,
    pub headword_hash_to_seqs: HashMap<HeadwordHash, Vec<Sequence>>,
    pub exp_hash_to_readings: HashMap<HeadwordHash, Vec<String>>,
    pub seq_to_main_headword: HashMap<Sequence, Headword>,
    pub entry_depth: HashMap<Sequence, i64>,
    pub has_multiple_forms: HashMap<Sequence, bool>,
    pub condensed_glosses: HashMap<SenseId, String>,
    /// Every cross-reference and antonym string, in encounter order.
    pub references: Vec<String>,
    /// Per entry, the deduplicated (pair, expression, reading) hashes of its
    /// headwords. A hash's position here is its search index.
    pub seq_to_search_hashes: IndexMap<Sequence, Vec<SearchHash>>,
    pub reference_to_seq: HashMap<String, Sequence>,
    pub max_sense_count: usize,
}

impl Metadata {
    pub fn new(language: &str, extra_mode: bool) -> Self {
        Self {
            language: language.to_string(),
            extra_mode,
            ..Self::default()
        }
    }

    /// Aggregate every entry, then resolve the collected references.
    pub fn build(entries: &[Entry], language: &str, extra_mode: bool) -> Self {
        let mut meta = Self::new(language, extra_mode);
        for entry in entries {
            meta.add_entry(entry);
        }
        meta.resolve_references();
        meta.max_sense_count = meta.seq_to_sense_count.values().copied().max().unwrap_or(0);
        info!(
            "Aggregated {} entries, {} references, max sense count {}",
            entries.len(),
            meta.references.len(),
            meta.max_sense_count
        );
        meta
    }

    /// Fold one entry into the aggregate. Entries must arrive in source order.
    pub fn add_entry(&mut self, entry: &Entry) {
        let headwords = extract_headwords(entry);
        let mut form_count = 0;
        for headword in &headwords {
            self.add_headword(headword, entry);
            if !headword.is_search_only {
                form_count += 1;
            }
        }
        self.calculate_entry_depth(&headwords, entry.sequence);
        self.has_multiple_forms.insert(entry.sequence, form_count > 1);
    }

    /// Number of senses of `entry` with at least one target-language gloss.
    fn sense_count(&self, entry: &Entry) -> usize {
        entry
            .senses
            .iter()
            .filter(|s| s.has_language(&self.language))
            .count()
    }

    pub fn add_headword(&mut self, headword: &Headword, entry: &Entry) {
        let seq = entry.sequence;
        if !self.seq_to_sense_count.contains_key(&seq) {
            let count = self.sense_count(entry);
            self.seq_to_sense_count.insert(seq, count);
        }
        if self.seq_to_sense_count.get(&seq).copied().unwrap_or(0) == 0 {
            return;
        }

        self.seq_to_main_headword
            .entry(seq)
            .or_insert_with(|| headword.clone());

        let pair_hash = headword.hash();
        let seqs = self.headword_hash_to_seqs.entry(pair_hash).or_default();
        if !seqs.contains(&seq) {
            seqs.push(seq);
        }

        let exp_hash = headword.exp_hash();
        let readings = self.exp_hash_to_readings.entry(exp_hash).or_default();
        if !readings.contains(&headword.reading) {
            readings.push(headword.reading.clone());
        }

        let search_hashes = self.seq_to_search_hashes.entry(seq).or_default();
        for hash in [pair_hash, exp_hash, headword.reading_hash()] {
            let search_hash = SearchHash {
                hash,
                is_priority: headword.is_priority,
            };
            if !search_hashes.contains(&search_hash) {
                search_hashes.push(search_hash);
            }
        }

        let mut sense_number = 0;
        for sense in &entry.senses {
            if !sense.has_language(&self.language) {
                continue;
            }
            sense_number += 1;
            if !sense.applies_to(&headword.expression, &headword.reading) {
                continue;
            }

            self.references.extend(sense.references.iter().cloned());
            self.references.extend(sense.antonyms.iter().cloned());

            let id = SenseId {
                sequence: seq,
                number: sense_number,
            };
            let language = &self.language;
            let condensed = self.condensed_glosses.entry(id).or_default();
            if condensed.is_empty() {
                *condensed = sense
                    .glosses
                    .iter()
                    .filter(|g| g.is_language(language) && g.kind.is_none())
                    .map(|g| g.content.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
            }
        }
    }

    /// Depth is one more than the deepest earlier entry sharing a pair hash
    /// with this one; unseen depths count as 1.
    pub fn calculate_entry_depth(&mut self, headwords: &[Headword], sequence: Sequence) {
        let mut max_depth = 1;
        for headword in headwords {
            let Some(seqs) = self.headword_hash_to_seqs.get(&headword.hash()) else {
                continue;
            };
            for &other in seqs {
                if other == sequence {
                    continue;
                }
                let depth = *self.entry_depth.entry(other).or_insert(1);
                max_depth = max_depth.max(depth + 1);
            }
        }
        self.entry_depth.insert(sequence, max_depth);
    }

    pub fn sense_count_of(&self, sequence: Sequence) -> usize {
        self.seq_to_sense_count.get(&sequence).copied().unwrap_or(0)
    }

    pub fn depth_of(&self, sequence: Sequence) -> i64 {
        self.entry_depth.get(&sequence).copied().unwrap_or(1)
    }

    /// Whether the pair of `headword` occurs in more than one entry.
    pub fn is_shared_headword(&self, headword: &Headword) -> bool {
        self.headword_hash_to_seqs
            .get(&headword.hash())
            .is_some_and(|seqs| seqs.len() > 1)
    }

    /// Whether `expression` has more than one reading across the dictionary.
    pub fn has_ambiguous_reading(&self, headword: &Headword) -> bool {
        self.exp_hash_to_readings
            .get(&headword.exp_hash())
            .is_some_and(|readings| readings.len() > 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gloss, KanjiForm, ReadingForm, Sense};

    fn make_sense(glosses: &[&str]) -> Sense {
        Sense {
            glosses: glosses.iter().map(|g| Gloss::new(*g)).collect(),
            ..Sense::default()
        }
    }

    fn make_entry(sequence: Sequence, kanji: &[&str], readings: &[&str], senses: Vec<Sense>) -> Entry {
        Entry {
            sequence,
            kanji: kanji
                .iter()
                .map(|k| KanjiForm {
                    expression: k.to_string(),
                    ..KanjiForm::default()
                })
                .collect(),
            readings: readings
                .iter()
                .map(|r| ReadingForm {
                    reading: r.to_string(),
                    ..ReadingForm::default()
                })
                .collect(),
            senses,
        }
    }

    #[test]
    fn test_sense_count_and_condensed_glosses() {
        let mut typed = make_sense(&["book", "volume"]);
        typed.glosses.push(Gloss {
            kind: Some("lit".to_string()),
            ..Gloss::new("literal")
        });
        let german = Sense {
            glosses: vec![Gloss {
                language: Some("ger".to_string()),
                ..Gloss::new("Buch")
            }],
            ..Sense::default()
        };
        let entry = make_entry(100, &["本"], &["ほん"], vec![typed, german, make_sense(&["main"])]);
        let meta = Metadata::build(&[entry], "eng", false);

        assert_eq!(meta.sense_count_of(100), 2);
        let first = SenseId { sequence: 100, number: 1 };
        let second = SenseId { sequence: 100, number: 2 };
        assert_eq!(meta.condensed_glosses[&first], "book; volume");
        assert_eq!(meta.condensed_glosses[&second], "main");
        assert_eq!(meta.max_sense_count, 2);
    }

    #[test]
    fn test_entries_without_target_language_are_skipped() {
        let entry = Entry {
            senses: vec![Sense {
                glosses: vec![Gloss {
                    language: Some("fre".to_string()),
                    ..Gloss::new("livre")
                }],
                ..Sense::default()
            }],
            ..make_entry(7, &["本"], &["ほん"], vec![])
        };
        let meta = Metadata::build(&[entry], "eng", false);
        assert_eq!(meta.sense_count_of(7), 0);
        assert!(meta.seq_to_main_headword.is_empty());
        assert!(meta.headword_hash_to_seqs.is_empty());
    }

    #[test]
    fn test_main_headword_and_hash_indices() {
        let a = make_entry(1, &["本"], &["ほん", "もと"], vec![make_sense(&["book"])]);
        let b = make_entry(2, &["本"], &["もと"], vec![make_sense(&["origin"])]);
        let meta = Metadata::build(&[a, b], "eng", false);

        assert_eq!(meta.seq_to_main_headword[&1].reading, "ほん");
        let shared = Headword::plain("本", "もと");
        assert_eq!(meta.headword_hash_to_seqs[&shared.hash()], vec![1, 2]);
        assert!(meta.is_shared_headword(&shared));
        assert!(!meta.is_shared_headword(&Headword::plain("本", "ほん")));
        assert!(meta.has_ambiguous_reading(&shared));
        assert_eq!(meta.exp_hash_to_readings[&shared.exp_hash()], vec!["ほん", "もと"]);
    }

    #[test]
    fn test_search_hash_order_and_dedup() {
        let entry = make_entry(3, &["本"], &["ほん"], vec![make_sense(&["book"])]);
        let meta = Metadata::build(&[entry], "eng", false);
        let hashes: Vec<HeadwordHash> = meta.seq_to_search_hashes[&3].iter().map(|s| s.hash).collect();
        let pair = Headword::plain("本", "ほん");
        assert_eq!(hashes, vec![pair.hash(), pair.exp_hash(), pair.reading_hash()]);

        // a kana-only headword's three hashes coincide
        let kana = make_entry(4, &[], &["ほん"], vec![make_sense(&["book"])]);
        let meta = Metadata::build(&[kana], "eng", false);
        assert_eq!(meta.seq_to_search_hashes[&4].len(), 1);
    }

    #[test]
    fn test_restricted_senses_keep_numbering() {
        let mut restricted = make_sense(&["origin"]);
        restricted.restricted_readings = Some(vec!["もと".to_string()]);
        let entry = make_entry(
            4,
            &["元"],
            &["げん", "もと"],
            vec![restricted, make_sense(&["yuan"])],
        );
        let meta = Metadata::build(&[entry], "eng", false);
        let first = SenseId { sequence: 4, number: 1 };
        let second = SenseId { sequence: 4, number: 2 };
        assert_eq!(meta.condensed_glosses[&first], "origin");
        assert_eq!(meta.condensed_glosses[&second], "yuan");
    }

    #[test]
    fn test_entry_depth_forward_pass() {
        let a = make_entry(10, &["本"], &["ほん"], vec![make_sense(&["book"])]);
        let b = make_entry(20, &["本"], &["ほん"], vec![make_sense(&["main"])]);
        let c = make_entry(30, &["本"], &["ほん"], vec![make_sense(&["this"])]);
        let d = make_entry(40, &["犬"], &["いぬ"], vec![make_sense(&["dog"])]);
        let meta = Metadata::build(&[a, b, c, d], "eng", false);
        assert_eq!(meta.depth_of(10), 1);
        assert_eq!(meta.depth_of(20), 2);
        assert_eq!(meta.depth_of(30), 3);
        assert_eq!(meta.depth_of(40), 1);
    }

    #[test]
    fn test_has_multiple_forms() {
        let single = make_entry(1, &[], &["ラグ"], vec![make_sense(&["rug"])]);
        let multi = make_entry(2, &["本"], &["ほん", "もと"], vec![make_sense(&["book"])]);
        let meta = Metadata::build(&[single, multi], "eng", false);
        assert!(!meta.has_multiple_forms[&1]);
        assert!(meta.has_multiple_forms[&2]);
    }

    #[test]
    fn test_references_collected() {
        let mut sense = make_sense(&["picture book"]);
        sense.references = vec!["本・ほん・1".to_string()];
        sense.antonyms = vec!["雑誌".to_string()];
        let entry = make_entry(5, &["絵本"], &["えほん"], vec![sense]);
        let meta = Metadata::build(&[entry], "eng", false);
        assert_eq!(meta.references, vec!["本・ほん・1", "雑誌"]);
    }
}

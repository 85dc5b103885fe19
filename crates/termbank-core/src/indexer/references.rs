//! Cross-reference resolution.
//!
//! Reference strings name a headword and optionally a sense, e.g. `本・ほん・2`.
//! Each one is resolved to the sequence of the entry that best matches it,
//! or left unresolved when no entry does.

use std::collections::HashMap;

use tracing::warn;

use crate::errors::{TermbankError, TermbankResult};
use crate::indexer::headword::Headword;
use crate::indexer::metadata::Metadata;
use crate::models::{HeadwordHash, Sequence};

const REFERENCE_SEPARATOR: &str = "・";

/// A reference split into the headword it names and the sense it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    pub headword: Headword,
    pub sense_number: usize,
}

/// Split a reference string into (expression, reading, sense number).
///
/// `A` names A with itself as reading, `A・n` names sense n of A, `A・B` names
/// the pair (A, B), and `A・B・n` names sense n of that pair.
pub fn parse_reference(reference: &str) -> TermbankResult<ParsedReference> {
    let parts: Vec<&str> = reference.split(REFERENCE_SEPARATOR).collect();
    let (expression, reading, sense_number) = match parts.as_slice() {
        [only] => (*only, *only, 1),
        [first, second] => match second.trim().parse::<usize>() {
            Ok(n) => (*first, *first, n),
            Err(_) => (*first, *second, 1),
        },
        [first, second, third] => match third.trim().parse::<usize>() {
            Ok(n) => (*first, *second, n),
            Err(_) => {
                return Err(TermbankError::Parse(format!(
                    "Unexpected sense number in reference {}",
                    reference
                )))
            }
        },
        _ => {
            return Err(TermbankError::Parse(format!(
                "Unexpected reference format {}",
                reference
            )))
        }
    };
    Ok(ParsedReference {
        headword: Headword::plain(expression, reading),
        sense_number,
    })
}

/// One place a hash occurs: the entry, the hash's position in that entry's
/// search list, and whether the headword behind it is a priority form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchValue {
    pub sequence: Sequence,
    pub index: usize,
    pub is_priority: bool,
}

/// Invert the per-entry search hash lists.
pub fn hash_to_search_values(meta: &Metadata) -> HashMap<HeadwordHash, Vec<SearchValue>> {
    let mut values: HashMap<HeadwordHash, Vec<SearchValue>> = HashMap::new();
    for (&sequence, hashes) in &meta.seq_to_search_hashes {
        for (index, search_hash) in hashes.iter().enumerate() {
            values.entry(search_hash.hash).or_default().push(SearchValue {
                sequence,
                index,
                is_priority: search_hash.is_priority,
            });
        }
    }
    values
}

/// Pick the entry a parsed reference most plausibly targets.
///
/// Candidates need at least as many senses as the reference names. Among
/// those, the lowest search index wins, then priority, then the lowest
/// sequence.
pub fn find_best_sequence(
    meta: &Metadata,
    search_values: &HashMap<HeadwordHash, Vec<SearchValue>>,
    reference: &ParsedReference,
) -> Option<Sequence> {
    search_values
        .get(&reference.headword.hash())?
        .iter()
        .filter(|v| meta.sense_count_of(v.sequence) >= reference.sense_number)
        .min_by_key(|v| (v.index, !v.is_priority, v.sequence))
        .map(|v| v.sequence)
}

impl Metadata {
    /// Fill `reference_to_seq` for every collected reference that resolves.
    ///
    /// Runs after the whole dictionary has been aggregated. Running it twice
    /// yields the same map.
    pub fn resolve_references(&mut self) {
        let search_values = hash_to_search_values(self);
        let mut resolved = HashMap::new();
        for reference in &self.references {
            if resolved.contains_key(reference) {
                continue;
            }
            let parsed = match parse_reference(reference) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!("Skipping reference: {}", e);
                    continue;
                }
            };
            match find_best_sequence(self, &search_values, &parsed) {
                Some(sequence) => {
                    resolved.insert(reference.clone(), sequence);
                }
                None => warn!("Unable to convert reference to sequence number: {}", reference),
            }
        }
        self.reference_to_seq = resolved;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Gloss, KanjiForm, ReadingForm, Sense};

    fn make_entry(sequence: Sequence, kanji: &[&str], readings: &[&str], senses: usize) -> Entry {
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
            senses: (0..senses)
                .map(|i| Sense {
                    glosses: vec![Gloss::new(format!("gloss {}", i + 1))],
                    ..Sense::default()
                })
                .collect(),
        }
    }

    fn referencing_entry(sequence: Sequence, references: &[&str]) -> Entry {
        let mut entry = make_entry(sequence, &["参照"], &["さんしょう"], 1);
        entry.senses[0].references = references.iter().map(|r| r.to_string()).collect();
        entry
    }

    #[test]
    fn test_parse_reference_shapes() {
        let parsed = parse_reference("本").unwrap();
        assert_eq!(parsed.headword, Headword::plain("本", "本"));
        assert_eq!(parsed.sense_number, 1);

        let parsed = parse_reference("本・2").unwrap();
        assert_eq!(parsed.headword, Headword::plain("本", "本"));
        assert_eq!(parsed.sense_number, 2);

        let parsed = parse_reference("本・ほん").unwrap();
        assert_eq!(parsed.headword, Headword::plain("本", "ほん"));
        assert_eq!(parsed.sense_number, 1);

        let parsed = parse_reference("本・ほん・3").unwrap();
        assert_eq!(parsed.headword, Headword::plain("本", "ほん"));
        assert_eq!(parsed.sense_number, 3);
    }

    #[test]
    fn test_parse_reference_malformed() {
        assert!(parse_reference("本・ほん・x").is_err());
        assert!(parse_reference("a・b・c・d").is_err());
    }

    #[test]
    fn test_lowest_index_wins_over_lower_sequence() {
        // 本 sits at search index 4 in the first entry and at 1 in the second
        let first = make_entry(100, &["元", "本"], &["もと"], 1);
        let second = make_entry(200, &["本"], &["ほん"], 1);
        let source = referencing_entry(300, &["本"]);
        let meta = Metadata::build(&[first, second, source], "eng", false);
        assert_eq!(meta.reference_to_seq.get("本"), Some(&200));
    }

    #[test]
    fn test_sense_number_filters_candidates() {
        let short = make_entry(100, &["本"], &["ほん"], 1);
        let long = make_entry(200, &["本"], &["ほん"], 3);
        let source = referencing_entry(300, &["本・ほん・2", "本・ほん"]);
        let meta = Metadata::build(&[short, long, source], "eng", false);
        assert_eq!(meta.reference_to_seq.get("本・ほん・2"), Some(&200));
        assert_eq!(meta.reference_to_seq.get("本・ほん"), Some(&100));
    }

    #[test]
    fn test_priority_breaks_index_ties() {
        let plain = make_entry(100, &["本"], &["ほん"], 1);
        let mut popular = make_entry(200, &["本"], &["ほん"], 1);
        popular.kanji[0].priorities = vec!["ichi1".to_string()];
        popular.readings[0].priorities = vec!["ichi1".to_string()];
        let source = referencing_entry(300, &["本・ほん"]);
        let meta = Metadata::build(&[plain, popular, source], "eng", false);
        assert_eq!(meta.reference_to_seq.get("本・ほん"), Some(&200));
    }

    #[test]
    fn test_unresolved_and_malformed_references_are_absent() {
        let source = referencing_entry(300, &["無い", "本・ほん・x"]);
        let meta = Metadata::build(&[source], "eng", false);
        assert!(meta.reference_to_seq.is_empty());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let first = make_entry(100, &["元", "本"], &["もと"], 2);
        let second = make_entry(200, &["本"], &["ほん"], 1);
        let source = referencing_entry(300, &["本", "元・もと・2", "本・ほん"]);
        let mut meta = Metadata::build(&[first, second, source], "eng", false);
        let once = meta.reference_to_seq.clone();
        meta.resolve_references();
        assert_eq!(meta.reference_to_seq, once);
        assert_eq!(once.len(), 3);
    }
}

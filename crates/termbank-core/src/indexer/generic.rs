//! Proper-name term building and generic-name collapsing.
//!
//! Many name entries only say "this is a surname read Satō". Rather than
//! emitting one term per spelling, such translation groups are pooled by
//! (expression, name type) and emitted once per pool with a freshly
//! allocated sequence.

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::info;

use crate::indexer::headword::{name_headwords, Headword};
use crate::indexer::kana::is_transliteration;
use crate::indexer::terms::calculate_term_score;
use crate::models::{Definition, NameEntry, Sequence, Term};

// ---------------------------------------------------------------------------
// Sequence allocation
// ---------------------------------------------------------------------------

/// Hands out sequence numbers that no emitted entry is using.
#[derive(Debug, Clone)]
pub struct SequenceAllocator {
    used: HashSet<Sequence>,
    next: Sequence,
}

impl Default for SequenceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self {
            used: HashSet::new(),
            next: 1,
        }
    }

    pub fn mark_used(&mut self, sequence: Sequence) {
        self.used.insert(sequence);
    }

    pub fn is_used(&self, sequence: Sequence) -> bool {
        self.used.contains(&sequence)
    }

    /// The lowest positive sequence not yet used. It is marked used.
    pub fn allocate(&mut self) -> Sequence {
        while self.used.contains(&self.next) {
            self.next += 1;
        }
        let sequence = self.next;
        self.used.insert(sequence);
        self.next += 1;
        sequence
    }
}

// ---------------------------------------------------------------------------
// Collapsing
// ---------------------------------------------------------------------------

/// A name headword is generic when every translation just spells out its
/// reading in romaji. A translation group with no text counts as generic.
pub fn is_generic_name(headword: &Headword, translations: &[String]) -> bool {
    if headword.is_kana_only() {
        return false;
    }
    translations
        .iter()
        .all(|t| is_transliteration(t, &headword.reading))
}

/// Readings pooled by expression, then by name type, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct GenericTermCollapser {
    pools: IndexMap<String, IndexMap<String, Vec<String>>>,
}

impl GenericTermCollapser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_glosses(&mut self, expression: &str, name_types: &[String], reading: &str) {
        let by_type = self.pools.entry(expression.to_string()).or_default();
        for name_type in name_types {
            let readings = by_type.entry(name_type.clone()).or_default();
            if !readings.iter().any(|r| r == reading) {
                readings.push(reading.to_string());
            }
        }
    }

    /// One term per (expression, name type), sharing a fresh sequence per
    /// expression. The readings become the glossary.
    pub fn terms(&self, allocator: &mut SequenceAllocator) -> Vec<Term> {
        let mut terms = Vec::new();
        for (expression, by_type) in &self.pools {
            let sequence = allocator.allocate();
            for (name_type, readings) in by_type {
                terms.push(Term {
                    expression: expression.clone(),
                    sequence,
                    glossary: readings.iter().map(|r| Definition::Text(r.clone())).collect(),
                    definition_tags: vec![name_type.clone()],
                    ..Term::default()
                });
            }
        }
        terms
    }
}

// ---------------------------------------------------------------------------
// Name lexicon terms
// ---------------------------------------------------------------------------

/// Every term of a proper-name lexicon: specific translations first, in
/// source order, then the collapsed generic terms.
pub fn name_terms(entries: &[NameEntry]) -> Vec<Term> {
    let mut allocator = SequenceAllocator::new();
    let mut collapser = GenericTermCollapser::new();
    let mut terms = Vec::new();

    for entry in entries {
        for headword in name_headwords(&entry.kanji, &entry.readings) {
            for (index, translation) in entry.translations.iter().enumerate() {
                if is_generic_name(&headword, &translation.translations) {
                    collapser.add_glosses(&headword.expression, &translation.name_types, &headword.reading);
                    continue;
                }
                allocator.mark_used(entry.sequence);
                let mut term = Term {
                    expression: headword.expression.clone(),
                    reading: headword.reading.clone(),
                    sequence: entry.sequence,
                    glossary: translation
                        .translations
                        .iter()
                        .map(|t| Definition::Text(t.clone()))
                        .collect(),
                    ..Term::default()
                };
                term.add_definition_tags(&translation.name_types);
                term.score = calculate_term_score(index + 1, &headword);
                terms.push(term);
            }
        }
    }

    let specific = terms.len();
    terms.extend(collapser.terms(&mut allocator));
    info!(
        "Built {} name terms ({} collapsed generic terms)",
        terms.len(),
        terms.len() - specific
    );
    terms
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Term building for structured lexicons: sense terms, forms terms and
//! search redirects, plus the shared scoring formula.

use tracing::info;

use crate::content::{self, Attr};
use crate::indexer::forms::base_forms_term;
use crate::indexer::glossary::create_glossary;
use crate::indexer::headword::{extract_headwords, Headword};
use crate::indexer::metadata::Metadata;
use crate::langs;
use crate::models::{Definition, Entry, Sense, Term};

// ---------------------------------------------------------------------------
// Rules and scores
// ---------------------------------------------------------------------------

/// Deinflection rule tags implied by parts of speech.
pub fn grammar_rules(parts_of_speech: &[String]) -> Vec<String> {
    let mut rules: Vec<String> = Vec::new();
    for pos in parts_of_speech {
        let rule = match pos.as_str() {
            "adj-i" | "vk" | "vz" => pos.as_str(),
            p if p.starts_with("v5") => "v5",
            p if p.starts_with("v1") => "v1",
            p if p.starts_with("vs-") => "vs",
            _ => continue,
        };
        if !rules.iter().any(|r| r == rule) {
            rules.push(rule.to_string());
        }
    }
    rules
}

/// Rank of a term within lookup results; higher sorts first.
///
/// Headword status dominates, then headword position, then sense order.
pub fn calculate_term_score(sense_number: usize, headword: &Headword) -> i64 {
    let mut score = -(sense_number as i64 - 1);
    score -= headword.index as i64 * 100;
    score += headword.score() * 10_000;
    score
}

// ---------------------------------------------------------------------------
// Term constructors
// ---------------------------------------------------------------------------

/// The term for sense `sense_number` of `entry` under `headword`, if the
/// sense applies to it.
pub fn sense_term(
    meta: &Metadata,
    entry: &Entry,
    headword: &Headword,
    sense: &Sense,
    sense_number: usize,
) -> Option<Term> {
    if !sense.applies_to(&headword.expression, &headword.reading) {
        return None;
    }

    let mut term = Term {
        expression: headword.expression.clone(),
        reading: headword.reading.clone(),
        sequence: entry.sequence,
        ..Term::default()
    };
    if meta.sense_count_of(entry.sequence) > 1 || meta.is_shared_headword(headword) {
        term.add_definition_tags(&[sense_number.to_string()]);
    }
    term.add_definition_tags(&sense.parts_of_speech);
    term.add_definition_tags(&sense.fields);
    term.add_definition_tags(&sense.misc);
    term.add_definition_tags(&sense.dialects);
    term.add_rules(&grammar_rules(&sense.parts_of_speech));
    term.add_term_tags(&headword.term_tags);
    term.score = calculate_term_score(sense_number, headword);
    term.glossary = create_glossary(meta, sense);
    Some(term)
}

/// A redirect from a search-only form to the entry's main headword.
///
/// Redirects carry the negated sequence so they never merge with the
/// entry's own terms.
pub fn redirect_term(meta: &Metadata, entry: &Entry, headword: &Headword) -> Option<Term> {
    let main = meta.seq_to_main_headword.get(&entry.sequence)?;
    if main.hash() == headword.hash() {
        return None;
    }

    let mut term = Term {
        expression: headword.expression.clone(),
        reading: headword.reading.clone(),
        sequence: -entry.sequence,
        ..Term::default()
    };
    for sense in &entry.senses {
        term.add_rules(&grammar_rules(&sense.parts_of_speech));
    }
    term.add_term_tags(&headword.term_tags);
    term.score = calculate_term_score(1, headword);

    let link = main.to_internal_link(meta.has_ambiguous_reading(main));
    term.glossary = vec![Definition::Structured(content::span(
        Attr::default(),
        vec!["⟶".into(), link],
    ))];
    Some(term)
}

/// A forms term ranked after every sense of the entry.
pub fn forms_term(meta: &Metadata, entry: &Entry, headword: &Headword, base: &Term) -> Term {
    let mut term = base.clone();
    term.expression = headword.expression.clone();
    term.reading = headword.reading.clone();
    term.add_term_tags(&headword.term_tags);
    term.add_definition_tags(&[langs::FORMS_TAG.to_string()]);
    let sense_number = meta.sense_count_of(entry.sequence) + 1;
    term.score = calculate_term_score(sense_number, headword);
    term
}

// ---------------------------------------------------------------------------
// Dictionary-wide builders
// ---------------------------------------------------------------------------

/// Every term of a structured lexicon, entry by entry in source order.
pub fn jmdict_terms(entries: &[Entry], meta: &Metadata) -> Vec<Term> {
    let mut terms = Vec::new();
    for entry in entries {
        if meta.sense_count_of(entry.sequence) == 0 {
            continue;
        }
        let headwords = extract_headwords(entry);
        let base_forms = meta
            .extra_mode
            .then(|| base_forms_term(entry, &headwords));
        let multiple_forms = meta
            .has_multiple_forms
            .get(&entry.sequence)
            .copied()
            .unwrap_or(false);

        for headword in &headwords {
            if headword.is_search_only {
                if meta.language == "eng" {
                    terms.extend(redirect_term(meta, entry, headword));
                }
                continue;
            }

            let mut sense_number = 1;
            for sense in &entry.senses {
                if !sense.has_language(&meta.language) {
                    continue;
                }
                terms.extend(sense_term(meta, entry, headword, sense, sense_number));
                sense_number += 1;
            }

            if let Some(base) = &base_forms {
                if multiple_forms || meta.is_shared_headword(headword) {
                    terms.push(forms_term(meta, entry, headword, base));
                }
            }
        }
    }
    info!("Built {} terms from {} entries", terms.len(), entries.len());
    terms
}

/// The forms dictionary: one term per form, glossed by its entry's forms.
pub fn forms_dictionary_terms(entries: &[Entry], meta: &Metadata) -> Vec<Term> {
    let mut terms = Vec::new();
    for entry in entries {
        let headwords = extract_headwords(entry);
        let base = base_forms_term(entry, &headwords);
        for headword in &headwords {
            if headword.is_search_only {
                terms.extend(redirect_term(meta, entry, headword));
                continue;
            }
            let mut term = base.clone();
            term.expression = headword.expression.clone();
            term.reading = headword.reading.clone();
            term.add_term_tags(&headword.term_tags);
            term.score = calculate_term_score(1, headword);
            terms.push(term);
        }
    }
    info!("Built {} forms terms from {} entries", terms.len(), entries.len());
    terms
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gloss, KanjiForm, ReadingForm};

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn make_sense(pos: &[&str], glosses: &[&str]) -> Sense {
        Sense {
            parts_of_speech: tags(pos),
            glosses: glosses.iter().map(|g| Gloss::new(*g)).collect(),
            ..Sense::default()
        }
    }

    fn make_entry(sequence: i64, kanji: &[&str], readings: &[&str], senses: Vec<Sense>) -> Entry {
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
    fn test_grammar_rules() {
        let rules = grammar_rules(&tags(&["v5k", "vt", "v5k-s", "adj-i", "vs-i", "v1-s", "n"]));
        assert_eq!(rules, tags(&["v5", "adj-i", "vs", "v1"]));
        assert!(grammar_rules(&tags(&["vs"])).is_empty());
    }

    #[test]
    fn test_score_ordering() {
        let mut priority = Headword::plain("本", "ほん");
        priority.is_priority = true;
        let plain = Headword::plain("本", "ほん");

        let best = calculate_term_score(1, &priority);
        let second = calculate_term_score(1, &plain);
        let third = calculate_term_score(2, &plain);
        assert!(best > second);
        assert!(second > third);
        assert_eq!(best, 10_000);
        assert_eq!(third, -1);
    }

    #[test]
    fn test_score_index() {
        let mut later = Headword::plain("本", "もと");
        later.index = 2;
        assert_eq!(calculate_term_score(1, &later), -200);
        assert_eq!(calculate_term_score(3, &later), -202);
    }

    #[test]
    fn test_later_priority_entry_outranks_earlier_plain_one() {
        let plain = make_entry(1, &["本"], &["ほん"], vec![make_sense(&["n"], &["book"])]);
        let mut priority = make_entry(2, &["本"], &["ほん"], vec![make_sense(&["n"], &["main"])]);
        priority.kanji[0].priorities = tags(&["ichi1"]);
        priority.readings[0].priorities = tags(&["ichi1"]);
        let entries = vec![plain, priority];

        let meta = Metadata::build(&entries, "eng", false);
        assert_eq!(meta.depth_of(2), 2);
        let terms = jmdict_terms(&entries, &meta);
        let score_of = |seq: i64| terms.iter().find(|t| t.sequence == seq).unwrap().score;
        assert_eq!(score_of(1), 0);
        assert_eq!(score_of(2), 10_000);
        assert!(score_of(2) > score_of(1));
    }

    #[test]
    fn test_sense_terms_and_numbering() {
        let mut restricted = make_sense(&["n"], &["origin"]);
        restricted.restricted_readings = Some(tags(&["もと"]));
        let entry = make_entry(
            1,
            &["本"],
            &["ほん", "もと"],
            vec![make_sense(&["n"], &["book"]), restricted],
        );
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", false);
        let terms = jmdict_terms(&[entry], &meta);

        let summary: Vec<(&str, &str, &str)> = terms
            .iter()
            .map(|t| (t.reading.as_str(), t.definition_tags[0].as_str(), t.definition_tags[1].as_str()))
            .collect();
        assert_eq!(summary, vec![("ほん", "1", "n"), ("もと", "1", "n"), ("もと", "2", "n")]);
        assert_eq!(terms[0].glossary, vec![Definition::from("book")]);
        assert_eq!(terms[2].score, -101);
    }

    #[test]
    fn test_single_sense_has_no_number_tag() {
        let entry = make_entry(1, &["犬"], &["いぬ"], vec![make_sense(&["n"], &["dog"])]);
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", false);
        let terms = jmdict_terms(&[entry], &meta);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].definition_tags, tags(&["n"]));
    }

    #[test]
    fn test_search_only_redirect() {
        let mut entry = make_entry(
            42,
            &["本", "夲"],
            &["ほん"],
            vec![make_sense(&["n"], &["book"])],
        );
        entry.kanji[1].information = tags(&["sK"]);
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", false);
        let terms = jmdict_terms(&[entry], &meta);
        assert_eq!(terms.len(), 2);
        let redirect = &terms[1];
        assert_eq!(redirect.expression, "夲");
        assert_eq!(redirect.reading, "");
        assert_eq!(redirect.sequence, -42);
        assert_eq!(redirect.score, -50_100);
        let value = redirect.glossary[0].to_value();
        assert_eq!(value["type"], "structured-content");
        assert_eq!(value["content"]["content"][0], "⟶");
        assert_eq!(value["content"]["content"][1]["content"], "本");
    }

    #[test]
    fn test_redirects_only_for_english() {
        let mut entry = make_entry(
            42,
            &["本", "夲"],
            &["ほん"],
            vec![Sense {
                glosses: vec![Gloss {
                    language: Some("ger".to_string()),
                    ..Gloss::new("Buch")
                }],
                ..Sense::default()
            }],
        );
        entry.kanji[1].information = tags(&["sK"]);
        let meta = Metadata::build(std::slice::from_ref(&entry), "ger", false);
        let terms = jmdict_terms(&[entry], &meta);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].glossary, vec![Definition::from("Buch")]);
    }

    #[test]
    fn test_extra_mode_forms_terms() {
        let entry = make_entry(
            7,
            &["本"],
            &["ほん", "もと"],
            vec![make_sense(&["n"], &["book"])],
        );
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", true);
        let terms = jmdict_terms(&[entry], &meta);
        let forms: Vec<&Term> = terms
            .iter()
            .filter(|t| t.definition_tags.iter().any(|d| d == "forms"))
            .collect();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].score, -1);
        assert!(matches!(forms[0].glossary[0], Definition::Structured(_)));
    }

    #[test]
    fn test_forms_dictionary_terms() {
        let mut entry = make_entry(
            9,
            &["本", "夲"],
            &["ほん"],
            vec![make_sense(&["n"], &["book"])],
        );
        entry.kanji[1].information = tags(&["sK"]);
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", false);
        let terms = forms_dictionary_terms(&[entry], &meta);
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].glossary, vec![Definition::from("本")]);
        assert_eq!(terms[0].sequence, 9);
        assert_eq!(terms[1].sequence, -9);
    }

    #[test]
    fn test_forms_dictionary_terms_carry_rules() {
        let entry = make_entry(
            1000100,
            &["書く"],
            &["かく"],
            vec![make_sense(&["v5k", "vt"], &["to write"])],
        );
        let meta = Metadata::build(std::slice::from_ref(&entry), "eng", true);
        let terms = forms_dictionary_terms(std::slice::from_ref(&entry), &meta);
        assert_eq!(terms[0].rules, tags(&["v5"]));

        let extra = jmdict_terms(&[entry], &meta);
        assert!(extra.iter().all(|t| t.rules == tags(&["v5"])));
    }
}

//! Forms glossaries: every surface form of an entry with its status symbols,
//! as a kanji x reading table or a flat list.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::content::{self, Attr, ContainerTag, ContentNode};
use crate::indexer::headword::Headword;
use crate::indexer::kana::katakana_to_hiragana;
use crate::indexer::terms::grammar_rules;
use crate::langs;
use crate::models::{Definition, Entry, Term};

const KANA_ONLY_COLUMN: &str = "∅";

/// Status symbols of a headword joined by ` | `, empty when it has none.
pub fn info_symbols(headword: &Headword) -> String {
    let mut symbols = Vec::new();
    if headword.is_priority {
        symbols.push(langs::PRIORITY_SYMBOL);
    }
    if headword.is_rare_kanji {
        symbols.push(langs::RARE_KANJI_SYMBOL);
    }
    if headword.is_irregular {
        symbols.push(langs::IRREGULAR_SYMBOL);
    }
    if headword.is_outdated {
        symbols.push(langs::OUTDATED_SYMBOL);
    }
    symbols.join(" | ")
}

fn bracketed(text: &str) -> String {
    format!("〈{}〉", text)
}

/// A table pays off once there are gikun forms or several distinct readings.
pub fn needs_form_table(headwords: &[Headword]) -> bool {
    if headwords.iter().any(|h| h.is_gikun) {
        return true;
    }
    let readings: HashSet<String> = headwords
        .iter()
        .filter(|h| !h.is_search_only && !h.is_kana_only())
        .map(|h| katakana_to_hiragana(&h.reading))
        .collect();
    readings.len() > 1
}

/// Kanji forms across, readings down, status symbols in each cell. Header
/// brackets come from the headword that introduced the column or row.
pub fn forms_table(headwords: &[Headword]) -> ContentNode {
    let mut columns: IndexMap<String, bool> = IndexMap::new();
    let mut rows: IndexMap<String, bool> = IndexMap::new();
    let mut cells: HashMap<(String, String), String> = HashMap::new();

    for headword in headwords.iter().filter(|h| !h.is_search_only) {
        let column = if headword.is_kana_only() {
            KANA_ONLY_COLUMN.to_string()
        } else {
            headword.expression.clone()
        };
        columns.entry(column.clone()).or_insert(headword.is_ateji);
        rows.entry(headword.reading.clone()).or_insert(headword.is_gikun);

        let symbols = info_symbols(headword);
        let cell = if symbols.is_empty() {
            langs::DEFAULT_SYMBOL.to_string()
        } else {
            symbols
        };
        cells.insert((headword.reading.clone(), column), cell);
    }

    let centered = || Attr::text_align("center");

    let mut header = vec![content::container(ContainerTag::TableHeadCell, Attr::default(), vec![])];
    for (column, &ateji) in &columns {
        let label = if ateji { bracketed(column) } else { column.clone() };
        header.push(content::container(ContainerTag::TableHeadCell, centered(), vec![label.into()]));
    }

    let mut table_rows = vec![content::container(ContainerTag::TableRow, Attr::default(), header)];
    for (reading, &gikun) in &rows {
        let label = if gikun { bracketed(reading) } else { reading.clone() };
        let mut row = vec![content::container(
            ContainerTag::TableHeadCell,
            Attr::text_align("left"),
            vec![label.into()],
        )];
        for column in columns.keys() {
            let cell = cells
                .get(&(reading.clone(), column.clone()))
                .map(|symbols| vec![ContentNode::from(symbols.as_str())])
                .unwrap_or_default();
            row.push(content::container(ContainerTag::TableCell, centered(), cell));
        }
        table_rows.push(content::container(ContainerTag::TableRow, Attr::default(), row));
    }

    content::container(ContainerTag::Table, Attr::data_content("formsTable"), table_rows)
}

/// One line per form: the expression and, when present, its symbols.
pub fn forms_list(headwords: &[Headword]) -> Vec<Definition> {
    headwords
        .iter()
        .filter(|h| !h.is_search_only)
        .map(|h| {
            let expression = if h.is_ateji {
                bracketed(&h.expression)
            } else {
                h.expression.clone()
            };
            let symbols = info_symbols(h);
            if symbols.is_empty() {
                Definition::Text(expression)
            } else {
                Definition::Text(format!("{}（{}）", expression, symbols))
            }
        })
        .collect()
}

pub fn forms_glossary(headwords: &[Headword]) -> Vec<Definition> {
    if needs_form_table(headwords) {
        vec![Definition::Structured(forms_table(headwords))]
    } else {
        forms_list(headwords)
    }
}

/// The entry-wide part of every forms term: sequence, glossary and the
/// rules of every sense.
pub fn base_forms_term(entry: &Entry, headwords: &[Headword]) -> Term {
    let mut term = Term {
        sequence: entry.sequence,
        glossary: forms_glossary(headwords),
        ..Term::default()
    };
    for sense in &entry.senses {
        term.add_rules(&grammar_rules(&sense.parts_of_speech));
    }
    term
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

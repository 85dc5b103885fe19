//! Sense glossary rendering.
//!
//! Plain senses become a list of gloss strings. Senses with anything beyond
//! untyped glosses become one structured-content definition holding a run of
//! labelled lists.

use tracing::warn;

use crate::content::{self, Attr, ContentNode};
use crate::indexer::metadata::{Metadata, SenseId};
use crate::indexer::references::parse_reference;
use crate::langs;
use crate::models::{Definition, Example, Gloss, Sense, SourceLanguage};

/// Whether `sense` carries anything a plain gloss list would drop.
pub fn needs_structured(sense: &Sense, language: &str) -> bool {
    sense
        .glosses
        .iter()
        .any(|g| g.is_language(language) && g.kind.is_some())
        || !sense.source_languages.is_empty()
        || !sense.information.is_empty()
        || !sense.antonyms.is_empty()
        || !sense.references.is_empty()
        || !sense.examples.is_empty()
}

/// Glossary of one sense in the aggregate's target language.
pub fn create_glossary(meta: &Metadata, sense: &Sense) -> Vec<Definition> {
    let language = meta.language.as_str();
    if !needs_structured(sense, language) {
        return sense
            .glosses
            .iter()
            .filter(|g| g.is_language(language))
            .map(|g| Definition::Text(g.content.clone()))
            .collect();
    }

    let (plain, typed): (Vec<&Gloss>, Vec<&Gloss>) = sense
        .glosses
        .iter()
        .filter(|g| g.is_language(language))
        .partition(|g| g.kind.is_none());

    let mut lists = Vec::new();
    if !plain.is_empty() {
        lists.push(gloss_list(language, &plain));
    }
    if !typed.is_empty() {
        lists.push(info_gloss_list(language, &typed));
    }
    if !sense.source_languages.is_empty() {
        lists.push(source_language_list(language, &sense.source_languages));
    }
    if !sense.information.is_empty() {
        let items = sense
            .information
            .iter()
            .map(|note| content::list_item(Attr::default(), vec![note.as_str().into()]))
            .collect();
        lists.push(marked_list(langs::NOTE_MARKER, "notes", langs::iso_to_html("jpn"), items));
    }
    if !sense.antonyms.is_empty() {
        let hint = langs::reference_hint(language, "ant");
        let items = sense
            .antonyms
            .iter()
            .map(|r| reference_item(meta, r, hint))
            .collect();
        lists.push(marked_list(langs::ANTONYM_MARKER, "antonyms", target_html(language), items));
    }
    if !sense.references.is_empty() {
        let hint = langs::reference_hint(language, "xref");
        let items = sense
            .references
            .iter()
            .map(|r| reference_item(meta, r, hint))
            .collect();
        lists.push(marked_list(langs::REF_MARKER, "references", target_html(language), items));
    }
    if !sense.examples.is_empty() {
        lists.push(example_list(&sense.examples));
    }

    vec![Definition::Structured(content::reduce(lists))]
}

fn target_html(language: &str) -> Option<&'static str> {
    langs::iso_to_html(language)
}

fn marked_list(
    marker: &str,
    data_content: &str,
    lang: Option<&str>,
    items: Vec<ContentNode>,
) -> ContentNode {
    let mut attr = Attr::data_content(data_content);
    attr.lang = lang.map(str::to_string);
    attr.style.list_style_type = Some(marker.to_string());
    content::unordered_list(attr, items)
}

// ---------------------------------------------------------------------------
// Gloss lists
// ---------------------------------------------------------------------------

fn gloss_list(language: &str, glosses: &[&Gloss]) -> ContentNode {
    let items = glosses
        .iter()
        .map(|g| content::list_item(Attr::default(), vec![g.content.as_str().into()]))
        .collect();
    marked_list("circle", "glossary", target_html(language), items)
}

fn info_gloss_list(language: &str, glosses: &[&Gloss]) -> ContentNode {
    let items = glosses
        .iter()
        .map(|g| {
            let code = g.kind.as_deref().unwrap_or_default();
            let mut contents: Vec<ContentNode> = Vec::new();
            match langs::gloss_type_name(language, code) {
                Some("") => {}
                Some(name) => {
                    contents.push(content::span(Attr::italic(), vec![format!("({})", name).into()]));
                    contents.push(" ".into());
                }
                None => {
                    warn!("Unknown gloss type {} for gloss {}", code, g.content);
                    contents.push(format!("[{}] ", code).into());
                }
            }
            contents.push(g.content.as_str().into());
            content::list_item(Attr::default(), contents)
        })
        .collect();
    marked_list(langs::INFO_MARKER, "infoGlossary", target_html(language), items)
}

fn source_language_list(language: &str, sources: &[SourceLanguage]) -> ContentNode {
    let items = sources
        .iter()
        .map(|source| content::list_item(Attr::default(), source_language_item(language, source)))
        .collect();
    marked_list(langs::LANG_MARKER, "sourceLanguages", target_html(language), items)
}

fn source_language_item(language: &str, source: &SourceLanguage) -> Vec<ContentNode> {
    let code = source.language.as_deref().unwrap_or("eng");
    let name = match langs::lang_code_to_name(language, code) {
        Some(name) => name.to_string(),
        None => {
            warn!("Unknown source language code {}", code);
            code.to_string()
        }
    };

    let kind = source.kind.as_deref().map(|kind| {
        langs::source_lang_type(language, kind).map_or_else(
            || {
                warn!("Unknown source language type {}", kind);
                kind.to_string()
            },
            str::to_string,
        )
    });
    let qualifier = match (kind.filter(|k| !k.is_empty()), source.wasei) {
        (Some(kind), true) => format!(" ({}, wasei)", kind),
        (Some(kind), false) => format!(" ({})", kind),
        (None, true) => " (wasei)".to_string(),
        (None, false) => String::new(),
    };

    let mut contents: Vec<ContentNode> = vec![format!("{}{}", name, qualifier).into()];
    if !source.content.is_empty() {
        contents.push(": ".into());
        contents.push(content::span(
            Attr {
                lang: langs::iso_to_html(code).map(str::to_string),
                ..Attr::default()
            },
            vec![source.content.as_str().into()],
        ));
    }
    contents
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

/// `hint: link gloss` for a resolved reference, `hint: 【ref】` otherwise.
fn reference_item(meta: &Metadata, reference: &str, hint: &str) -> ContentNode {
    let mut contents: Vec<ContentNode> = vec![format!("{}: ", hint).into()];
    let resolved = parse_reference(reference)
        .ok()
        .and_then(|parsed| meta.reference_to_seq.get(reference).map(|&seq| (parsed, seq)));

    let Some((parsed, sequence)) = resolved else {
        contents.push(format!("【{}】", reference).into());
        return content::list_item(Attr::default(), contents);
    };

    let ambiguous = meta.has_ambiguous_reading(&parsed.headword);
    contents.push(parsed.headword.to_internal_link(ambiguous));

    let id = SenseId {
        sequence,
        number: parsed.sense_number,
    };
    let gloss = meta.condensed_glosses.get(&id).map(String::as_str).unwrap_or_default();
    let text = if meta.sense_count_of(sequence) > 1 {
        format!(" {}. {}", parsed.sense_number, gloss)
    } else {
        format!(" {}", gloss)
    };
    let mut attr = Attr::data_content("refGlosses");
    attr.style.font_size = Some("65%".to_string());
    attr.style.vertical_align = Some("middle".to_string());
    contents.push(content::span(attr, vec![text.into()]));
    content::list_item(Attr::default(), contents)
}

// ---------------------------------------------------------------------------
// Examples
// ---------------------------------------------------------------------------

fn example_list(examples: &[Example]) -> ContentNode {
    let mut items = Vec::new();
    for example in examples {
        for sentence in &example.sentences {
            let mut attr = Attr::default();
            if sentence.language != "jpn" {
                attr.lang = langs::iso_to_html(&sentence.language).map(str::to_string);
                attr.style.list_style_type = langs::iso_to_flag(&sentence.language).map(str::to_string);
            }
            items.push(content::list_item(attr, vec![sentence.text.as_str().into()]));
        }
    }
    let marker = langs::iso_to_flag("jpn").unwrap_or("disc");
    marked_list(marker, "examples", langs::iso_to_html("jpn"), items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

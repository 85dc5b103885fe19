//! Conversion orchestration: extract, aggregate, build rows, write the
//! archive. One function per source family, plus [`convert`] which picks the
//! family from the options or the input path.

use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::config::{ConvertOptions, Format};
use crate::errors::TermbankResult;
use crate::extract::frequency::FrequencyExtractor;
use crate::extract::jmdict::JmdictExtractor;
use crate::extract::jmnedict::JmnedictExtractor;
use crate::extract::kanjidic::KanjidicExtractor;
use crate::extract::rikai::RikaiExtractor;
use crate::extract::{detect_format, Extracted, Extractor};
use crate::indexer::generic::name_terms;
use crate::indexer::metadata::Metadata;
use crate::indexer::terms::{forms_dictionary_terms, jmdict_terms};
use crate::langs::EDRDG_ATTRIBUTION;
use crate::models::{Entry, Kanji, Meta, NameEntry, Tag, Term};
use crate::store::bank::{Archive, BankKind};
use crate::store::manifest::Manifest;
use crate::taxonomy;

const FREQUENCY_REVISION: &str = "frequency1";
const RIKAI_REVISION: &str = "rikai1";
/// Forms are always built from the English senses.
const FORMS_LANGUAGE: &str = "eng";

/// Row counts of a finished conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub terms: usize,
    pub tags: usize,
    pub kanji: usize,
    pub meta: usize,
}

impl ConvertStats {
    fn of(archive: &Archive) -> Self {
        Self {
            terms: archive.rows(BankKind::Term).len(),
            tags: archive.rows(BankKind::Tag).len(),
            kanji: archive.rows(BankKind::Kanji).len(),
            meta: archive.rows(BankKind::TermMeta).len() + archive.rows(BankKind::KanjiMeta).len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

fn add_terms(archive: &mut Archive, terms: &[Term]) {
    archive.add_rows(BankKind::Term, terms.iter().map(Term::to_row));
}

fn add_tags(archive: &mut Archive, tags: &[Tag]) {
    archive.add_rows(BankKind::Tag, tags.iter().map(Tag::to_row));
}

fn edrdg_manifest(title: String, extracted_revision: String) -> Manifest {
    Manifest::new(title, extracted_revision, true).with_attribution(EDRDG_ATTRIBUTION)
}

// ---------------------------------------------------------------------------
// Per-family archives
// ---------------------------------------------------------------------------

/// Structured lexicon archive, sense terms plus forms terms in extra mode.
pub fn jmdict_archive(
    extracted: &Extracted<Entry>,
    title: String,
    language: &str,
    extra_mode: bool,
) -> Archive {
    let meta = Metadata::build(&extracted.records, language, extra_mode);
    let terms = jmdict_terms(&extracted.records, &meta);

    let mut archive = Archive::new(edrdg_manifest(title, extracted.revision("JMdict")));
    add_terms(&mut archive, &terms);
    add_tags(
        &mut archive,
        &taxonomy::jmdict_tags(&extracted.entities, meta.max_sense_count),
    );
    archive
}

/// Forms dictionary archive: one forms glossary per headword.
pub fn forms_archive(extracted: &Extracted<Entry>, title: String) -> Archive {
    let meta = Metadata::build(&extracted.records, FORMS_LANGUAGE, false);
    let terms = forms_dictionary_terms(&extracted.records, &meta);

    let mut archive = Archive::new(edrdg_manifest(title, extracted.revision("JMdict")));
    add_terms(&mut archive, &terms);
    let mut tags = taxonomy::entity_tags(&extracted.entities);
    tags.extend(taxonomy::news_frequency_tags());
    tags.extend(taxonomy::custom_tags());
    add_tags(&mut archive, &tags);
    archive
}

pub fn jmnedict_archive(extracted: &Extracted<NameEntry>, title: String) -> Archive {
    let terms = name_terms(&extracted.records);

    let mut archive = Archive::new(edrdg_manifest(title, extracted.revision("JMnedict")));
    add_terms(&mut archive, &terms);
    add_tags(&mut archive, &taxonomy::entity_tags(&extracted.entities));
    archive
}

pub fn kanjidic_archive(extracted: &Extracted<Kanji>, title: String) -> Archive {
    let references: Vec<String> = extracted.entities.keys().cloned().collect();

    let manifest = Manifest::new(title, extracted.revision("KANJIDIC2"), false)
        .with_attribution(EDRDG_ATTRIBUTION);
    let mut archive = Archive::new(manifest);
    archive.add_rows(BankKind::Kanji, extracted.records.iter().map(Kanji::to_row));
    add_tags(&mut archive, &taxonomy::kanji_tags(&references));
    archive
}

/// Frequency archive; `kind` picks the term or kanji meta bank.
pub fn frequency_archive(extracted: &Extracted<Meta>, title: String, kind: BankKind) -> Archive {
    let mut archive = Archive::new(Manifest::new(title, FREQUENCY_REVISION, false));
    archive.add_rows(kind, extracted.records.iter().map(Meta::to_row));
    archive
}

pub fn rikai_archive(extracted: &Extracted<Term>, title: String) -> Archive {
    let mut archive = Archive::new(Manifest::new(title, RIKAI_REVISION, false));
    add_terms(&mut archive, &extracted.records);
    add_tags(&mut archive, &taxonomy::known_entity_tags());
    archive
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Convert `input` into a dictionary archive at `output`.
///
/// Options are validated before the input is opened, and the archive is only
/// written once every stage succeeded.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> TermbankResult<ConvertStats> {
    options.validate()?;
    let format = match options.format {
        Some(format) => format,
        None => detect_format(input)?,
    };
    let title = options.title_for(format);
    let language = options.language_code()?;
    let start = Instant::now();
    info!("Converting {} as {} ({})", input.display(), format, language);

    let archive = match format {
        Format::Jmdict => {
            let extracted = JmdictExtractor.extract(input)?;
            jmdict_archive(&extracted, title, language, options.extra_mode())
        }
        Format::JmdictForms => forms_archive(&JmdictExtractor.extract(input)?, title),
        Format::Jmnedict => jmnedict_archive(&JmnedictExtractor.extract(input)?, title),
        Format::Kanjidic => {
            kanjidic_archive(&KanjidicExtractor::new(language).extract(input)?, title)
        }
        Format::TermFreq => {
            frequency_archive(&FrequencyExtractor.extract(input)?, title, BankKind::TermMeta)
        }
        Format::KanjiFreq => {
            frequency_archive(&FrequencyExtractor.extract(input)?, title, BankKind::KanjiMeta)
        }
        Format::Rikai => rikai_archive(&RikaiExtractor.extract(input)?, title),
    };

    archive.write(output, options.stride, options.pretty)?;
    let stats = ConvertStats::of(&archive);
    info!(
        "Converted {} in {:.2?}: {} terms, {} tags, {} kanji, {} meta rows",
        input.display(),
        start.elapsed(),
        stats.terms,
        stats.tags,
        stats.kanji,
        stats.meta
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

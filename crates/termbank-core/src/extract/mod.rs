//! Extractors: turn one source file into normalized records plus the
//! source's own tag glossary.
//!
//! Every source family implements [`Extractor`]. [`detect_format`] maps an
//! input path onto a family through the detection registry below.

pub mod frequency;
pub mod jmdict;
pub mod jmnedict;
pub mod kanjidic;
pub mod rikai;
pub mod xml;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::Format;
use crate::errors::{TermbankError, TermbankResult};
use crate::models::TagGlossary;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

/// What an extractor read from its source.
#[derive(Debug, Clone, Default)]
pub struct Extracted<T> {
    pub records: Vec<T>,
    /// Source-declared tag names and their notes.
    pub entities: TagGlossary,
    /// Publication date of the source, `YYYY-MM-DD`.
    pub publication_date: Option<String>,
}

impl<T> Extracted<T> {
    /// Revision string `<prefix>.<date>`, with `unknown` for a missing date.
    pub fn revision(&self, prefix: &str) -> String {
        format!(
            "{}.{}",
            prefix,
            self.publication_date.as_deref().unwrap_or("unknown")
        )
    }
}

/// One source family reader.
pub trait Extractor {
    type Record;

    fn name(&self) -> &'static str;

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<Self::Record>>;
}

/// First `YYYY-MM-DD` in `text`.
pub fn find_date(text: &str) -> Option<String> {
    DATE_RE.find(text).map(|m| m.as_str().to_string())
}

// ---------------------------------------------------------------------------
// Detection registry
// ---------------------------------------------------------------------------

enum Rule {
    Extension(&'static str),
    FileName(&'static str),
}

static DETECTION_RULES: &[(Rule, Format)] = &[
    (Rule::Extension("sqlite"), Format::Rikai),
    (Rule::Extension("kanjifreq"), Format::KanjiFreq),
    (Rule::Extension("termfreq"), Format::TermFreq),
    (Rule::FileName("JMdict"), Format::Jmdict),
    (Rule::FileName("JMdict.xml"), Format::Jmdict),
    (Rule::FileName("JMdict_e"), Format::Jmdict),
    (Rule::FileName("JMdict_e.xml"), Format::Jmdict),
    (Rule::FileName("JMnedict"), Format::Jmnedict),
    (Rule::FileName("JMnedict.xml"), Format::Jmnedict),
    (Rule::FileName("kanjidic2"), Format::Kanjidic),
    (Rule::FileName("kanjidic2.xml"), Format::Kanjidic),
];

/// Source family of `path`, judged by its extension, then its file name.
pub fn detect_format(path: &Path) -> TermbankResult<Format> {
    let extension = path.extension().and_then(|e| e.to_str());
    let file_name = path.file_name().and_then(|n| n.to_str());

    for (rule, format) in DETECTION_RULES {
        let matched = match rule {
            Rule::Extension(ext) => extension == Some(*ext),
            Rule::FileName(name) => file_name == Some(*name),
        };
        if matched {
            debug!("Detected format {} for {}", format, path.display());
            return Ok(*format);
        }
    }
    Err(TermbankError::UnknownFormat(path.display().to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        let cases = [
            ("dicts/rikai.sqlite", Format::Rikai),
            ("a.kanjifreq", Format::KanjiFreq),
            ("wiki.termfreq", Format::TermFreq),
            ("/data/JMdict_e", Format::Jmdict),
            ("JMdict.xml", Format::Jmdict),
            ("JMnedict.xml", Format::Jmnedict),
            ("kanjidic2.xml", Format::Kanjidic),
        ];
        for (path, expected) in cases {
            assert_eq!(detect_format(Path::new(path)).unwrap(), expected, "{}", path);
        }
    }

    #[test]
    fn test_detect_unknown_format() {
        assert!(matches!(
            detect_format(Path::new("notes.txt")),
            Err(TermbankError::UnknownFormat(_))
        ));
        assert!(detect_format(Path::new("jmdict.xml")).is_err());
    }

    #[test]
    fn test_find_date_and_revision() {
        assert_eq!(
            find_date("JMdict created: 2024-03-01").as_deref(),
            Some("2024-03-01")
        );
        assert_eq!(find_date("no date"), None);

        let extracted: Extracted<()> = Extracted::default();
        assert_eq!(extracted.revision("JMdict"), "JMdict.unknown");
    }
}

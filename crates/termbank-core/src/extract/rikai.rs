//! rikai SQLite lexicon reader.
//!
//! The lexicon is a single `dict(kanji, kana, entry)` table whose `entry`
//! column holds an EDICT-style line: `/(n,vs) (P) gloss/gloss/`. Parenthesized
//! groups in front of a gloss are tags; bare sense numbers such as `(2)` are
//! dropped.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::info;

use crate::errors::TermbankResult;
use crate::extract::{Extracted, Extractor};
use crate::models::{Definition, Term};

pub struct RikaiExtractor;

impl RikaiExtractor {
    pub fn read(&self, conn: &Connection) -> TermbankResult<Extracted<Term>> {
        let mut stmt = conn.prepare("SELECT kanji, kana, entry FROM dict")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, Option<String>>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
            ))
        })?;

        let mut terms = Vec::new();
        for row in rows {
            let (kanji, kana, entry) = row?;
            if let Some(term) = build_term(
                kanji.as_deref().unwrap_or_default(),
                kana.as_deref().unwrap_or_default(),
                entry.as_deref().unwrap_or_default(),
            ) {
                terms.push(term);
            }
        }

        info!("Read {} rikai terms", terms.len());
        Ok(Extracted {
            records: terms,
            ..Extracted::default()
        })
    }
}

impl Extractor for RikaiExtractor {
    type Record = Term;

    fn name(&self) -> &'static str {
        "rikai"
    }

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<Term>> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        self.read(&conn)
    }
}

// ---------------------------------------------------------------------------
// Entry parsing
// ---------------------------------------------------------------------------

/// Tags and glosses of one EDICT-style entry.
#[derive(Debug, Default, PartialEq)]
pub struct ParsedEntry {
    pub tags: Vec<String>,
    pub glosses: Vec<String>,
}

/// Split leading `(a,b)` groups off a gloss segment.
fn take_tags<'a>(mut segment: &'a str, tags: &mut Vec<String>) -> &'a str {
    loop {
        segment = segment.trim_start();
        let Some(rest) = segment.strip_prefix('(') else {
            return segment;
        };
        let Some(close) = rest.find(')') else {
            return segment;
        };
        for tag in rest[..close].split(',').map(str::trim) {
            if tag.is_empty() || tag.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }
        segment = &rest[close + 1..];
    }
}

pub fn parse_entry(entry: &str) -> ParsedEntry {
    let mut parsed = ParsedEntry::default();
    let body = entry.find('/').map_or("", |start| &entry[start..]);
    for segment in body.split('/') {
        if segment.trim().is_empty() || segment.starts_with("EntL") {
            continue;
        }
        let gloss = take_tags(segment, &mut parsed.tags).trim();
        if !gloss.is_empty() {
            parsed.glosses.push(gloss.to_string());
        }
    }
    parsed
}

fn term_rules(tags: &[String]) -> Vec<String> {
    let mut rules = Vec::new();
    for tag in tags {
        let rule = match tag.as_str() {
            "adj-i" | "v1" | "vk" => tag.as_str(),
            t if t.starts_with("v5") => "v5",
            t if t.starts_with("vs") => "vs",
            _ => continue,
        };
        rules.push(rule.to_string());
    }
    rules
}

fn term_score(tags: &[String]) -> i64 {
    tags.iter()
        .map(|tag| match tag.as_str() {
            "P" => 5,
            "arch" | "iK" => -1,
            _ => 0,
        })
        .sum()
}

fn build_term(kanji: &str, kana: &str, entry: &str) -> Option<Term> {
    let parsed = parse_entry(entry);
    if parsed.glosses.is_empty() {
        return None;
    }
    let expression = if kanji.is_empty() { kana } else { kanji };
    if expression.is_empty() {
        return None;
    }

    let mut term = Term {
        expression: expression.to_string(),
        reading: kana.to_string(),
        score: term_score(&parsed.tags),
        glossary: parsed.glosses.into_iter().map(Definition::Text).collect(),
        ..Term::default()
    };
    term.add_rules(&term_rules(&parsed.tags));
    term.add_definition_tags(&parsed.tags);
    Some(term)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_lexicon(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE dict (kanji TEXT, kana TEXT, entry TEXT);
             INSERT INTO dict VALUES ('食べる', 'たべる', '/(v1,vt) to eat/(P)/');
             INSERT INTO dict VALUES ('', 'ありがとう', '/(int) (1) thank you/(2) thanks/');
             INSERT INTO dict VALUES ('勉強', 'べんきょう', '/(n,vs) (arch) study/');
             INSERT INTO dict VALUES ('空', 'から', '');",
        )
        .unwrap();
    }

    #[test]
    fn test_parse_entry() {
        let parsed = parse_entry("/(n,vs) (1) study/(2) diligence/(P)/EntL1234X/");
        assert_eq!(parsed.tags, vec!["n", "vs", "P"]);
        assert_eq!(parsed.glosses, vec!["study", "diligence"]);
    }

    #[test]
    fn test_rules_and_score() {
        let tags: Vec<String> = ["v5k-s", "vs-i", "adj-i", "n", "P", "iK"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(term_rules(&tags), vec!["v5", "vs", "adj-i"]);
        assert_eq!(term_score(&tags), 4);
    }

    #[test]
    fn test_read_lexicon() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rikai.sqlite");
        make_lexicon(&path);

        let extracted = RikaiExtractor.extract(&path).unwrap();
        assert_eq!(extracted.records.len(), 3);

        let eat = &extracted.records[0];
        assert_eq!(eat.expression, "食べる");
        assert_eq!(eat.rules, vec!["v1"]);
        assert_eq!(eat.score, 5);
        assert_eq!(eat.definition_tags, vec!["v1", "vt", "P"]);

        let thanks = &extracted.records[1];
        assert_eq!(thanks.expression, "ありがとう");
        assert_eq!(
            thanks.glossary,
            vec![Definition::from("thank you"), Definition::from("thanks")]
        );

        let study = &extracted.records[2];
        assert_eq!(study.rules, vec!["vs"]);
        assert_eq!(study.score, -1);
    }
}

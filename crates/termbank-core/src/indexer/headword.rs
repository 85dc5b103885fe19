//! Headword derivation: turns an entry's kanji x reading combinations into
//! ordered, flagged display forms.
//!
//! Emission order is significant. `index` is the position in the returned
//! list and directly lowers a term's rank.

use std::sync::LazyLock;

use regex::Regex;

use crate::content::{self, ContentNode};
use crate::langs;
use crate::models::{hash_pair, Entry, HeadwordHash, KanjiForm, ReadingForm};

// ---------------------------------------------------------------------------
// Tag vocabularies
// ---------------------------------------------------------------------------

const PRIORITY_TAGS: [&str; 5] = ["ichi1", "news1", "gai1", "spec1", "spec2"];

static NEWS_FREQ_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^nf(\d\d)$").unwrap());

// ---------------------------------------------------------------------------
// Headword
// ---------------------------------------------------------------------------

/// A derived (expression, reading) display form of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headword {
    pub expression: String,
    pub reading: String,
    pub term_tags: Vec<String>,
    pub index: usize,
    pub is_priority: bool,
    pub is_irregular: bool,
    pub is_outdated: bool,
    pub is_rare_kanji: bool,
    pub is_search_only: bool,
    pub is_ateji: bool,
    pub is_gikun: bool,
}

impl Headword {
    /// Bare pair with no flags, as used by name lexicons and parsed references.
    pub fn plain(expression: &str, reading: &str) -> Self {
        Self {
            expression: expression.to_string(),
            reading: reading.to_string(),
            ..Self::default()
        }
    }

    fn from_forms(kanji: Option<&KanjiForm>, reading: Option<&ReadingForm>) -> Self {
        let (expression, reading_text, info, priorities) = match (kanji, reading) {
            (None, Some(r)) => (
                r.reading.clone(),
                r.reading.clone(),
                r.information.clone(),
                r.priorities.clone(),
            ),
            // Only search-only kanji forms stand without a reading.
            (Some(k), None) => (
                k.expression.clone(),
                String::new(),
                k.information.clone(),
                k.priorities.clone(),
            ),
            (Some(k), Some(r)) => (
                k.expression.clone(),
                r.reading.clone(),
                union(&k.information, &r.information),
                intersection(&k.priorities, &r.priorities),
            ),
            (None, None) => Default::default(),
        };
        let mut headword = Self {
            expression,
            reading: reading_text,
            ..Self::default()
        };
        headword.set_flags(&info, &priorities);
        headword.set_term_tags(&priorities);
        headword
    }

    /// Pair hash over (expression, reading).
    pub fn hash(&self) -> HeadwordHash {
        hash_pair(&self.expression, &self.reading)
    }

    /// Expression hash, blind to the reading.
    pub fn exp_hash(&self) -> HeadwordHash {
        hash_pair(&self.expression, &self.expression)
    }

    /// Reading hash, blind to the expression.
    pub fn reading_hash(&self) -> HeadwordHash {
        hash_pair(&self.reading, &self.reading)
    }

    /// True when the expression is its own reading and written only in kana.
    pub fn is_kana_only(&self) -> bool {
        if self.expression != self.reading {
            return false;
        }
        self.expression.chars().all(|c| {
            ('ぁ'..='ヿ').contains(&c) || ('･'..='ﾟ').contains(&c) || c == '〜'
        })
    }

    /// Rank contribution: +1 for priority, -5 for each demoting flag.
    pub fn score(&self) -> i64 {
        let mut score = 0;
        if self.is_priority {
            score += 1;
        }
        for flag in [
            self.is_irregular,
            self.is_outdated,
            self.is_rare_kanji,
            self.is_search_only,
        ] {
            if flag {
                score -= 5;
            }
        }
        score
    }

    pub fn set_flags(&mut self, info_tags: &[String], priority_tags: &[String]) {
        self.is_priority = priority_tags
            .iter()
            .any(|t| PRIORITY_TAGS.contains(&t.as_str()));
        for tag in info_tags {
            match tag.as_str() {
                "iK" | "ik" | "io" => self.is_irregular = true,
                "oK" | "ok" => self.is_outdated = true,
                "sK" | "sk" => self.is_search_only = true,
                "rK" => self.is_rare_kanji = true,
                "ateji" => self.is_ateji = true,
                "gikun" => self.is_gikun = true,
                _ => {}
            }
        }
        if self.is_outdated && self.is_rare_kanji {
            self.is_rare_kanji = false;
        }
    }

    pub fn set_term_tags(&mut self, priority_tags: &[String]) {
        let mut tags = Vec::new();
        if self.is_priority {
            tags.push(langs::PRIORITY_TAG.to_string());
        }
        for tag in priority_tags {
            if let Some(caps) = NEWS_FREQ_RE.captures(tag) {
                // nf01..nf48 rank in steps of 500; show them in steps of 1000
                if let Ok(rank) = caps[1].parse::<u32>() {
                    tags.push(format!("news{}k", (rank + rank % 2) / 2));
                }
            } else if tag == "news1" || tag == "news2" {
                continue;
            } else {
                let mut chars = tag.chars();
                chars.next_back();
                tags.push(chars.as_str().to_string());
            }
        }
        for (flag, name) in [
            (self.is_irregular, langs::IRREGULAR_TAG),
            (self.is_outdated, langs::OUTDATED_TAG),
            (self.is_rare_kanji, langs::RARE_KANJI_TAG),
            (self.is_ateji, langs::ATEJI_TAG),
            (self.is_gikun, langs::GIKUN_TAG),
        ] {
            if flag {
                tags.push(name.to_string());
            }
        }
        self.term_tags = tags;
    }

    /// Lookup link to this headword, with the reading in brackets when asked.
    pub fn to_internal_link(&self, include_reading: bool) -> ContentNode {
        let japanese = langs::iso_to_html("jpn");
        if !include_reading || self.expression == self.reading {
            content::internal_link(japanese, &self.expression)
        } else {
            content::span(
                content::Attr {
                    lang: japanese.map(str::to_string),
                    ..content::Attr::default()
                },
                vec![
                    content::internal_link(None, &self.expression),
                    "（".into(),
                    content::internal_link(None, &self.reading),
                    "）".into(),
                ],
            )
        }
    }
}

fn union(a: &[String], b: &[String]) -> Vec<String> {
    let mut out = a.to_vec();
    for item in b {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

fn intersection(a: &[String], b: &[String]) -> Vec<String> {
    a.iter().filter(|x| b.contains(x)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

fn all_kanji_irregular(kanji: &[KanjiForm]) -> bool {
    if kanji.is_empty() {
        return false;
    }
    kanji.iter().all(|k| {
        let h = Headword::from_forms(Some(k), None);
        h.is_rare_kanji || h.is_irregular || h.is_outdated || h.is_search_only
    })
}

fn has_tag(tags: &[String], tag: &str) -> bool {
    tags.iter().any(|t| t == tag)
}

/// Derive the ordered headword list of a structured-lexicon entry.
pub fn extract_headwords(entry: &Entry) -> Vec<Headword> {
    fn push(headwords: &mut Vec<Headword>, mut h: Headword) {
        h.index = headwords.len();
        headwords.push(h);
    }

    let mut headwords: Vec<Headword> = Vec::new();

    let irregular = all_kanji_irregular(&entry.kanji);

    // Kana forms rank first when no kanji form is in good standing.
    if irregular {
        for reading in &entry.readings {
            push(&mut headwords, Headword::from_forms(None, Some(reading)));
        }
    }

    for kanji in &entry.kanji {
        if has_tag(&kanji.information, "sK") {
            push(&mut headwords, Headword::from_forms(Some(kanji), None));
            continue;
        }
        for reading in &entry.readings {
            if reading.no_kanji || has_tag(&reading.information, "sk") {
                continue;
            }
            if let Some(restrictions) = &reading.restrictions {
                if !restrictions.contains(&kanji.expression) {
                    continue;
                }
            }
            push(&mut headwords, Headword::from_forms(Some(kanji), Some(reading)));
        }
    }

    if !irregular {
        let no_kanji_in_entry = entry.kanji.is_empty();
        for reading in &entry.readings {
            if reading.no_kanji || no_kanji_in_entry || has_tag(&reading.information, "sk") {
                push(&mut headwords, Headword::from_forms(None, Some(reading)));
            }
        }
    }

    headwords
}

/// Headwords of a proper-name entry: every reading x kanji pair, or the
/// readings alone when the entry has no kanji.
pub fn name_headwords(kanji: &[String], readings: &[String]) -> Vec<Headword> {
    let mut headwords = Vec::new();
    for reading in readings {
        for expression in kanji {
            let mut h = Headword::plain(expression, reading);
            h.index = headwords.len();
            headwords.push(h);
        }
    }
    if kanji.is_empty() {
        for reading in readings {
            let mut h = Headword::plain(reading, reading);
            h.index = headwords.len();
            headwords.push(h);
        }
    }
    headwords
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

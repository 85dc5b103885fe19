//! Shared typed models: the normalized entry shape every extractor yields and
//! the output records every bank is built from.

use indexmap::IndexMap;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

use crate::content::ContentNode;

/// Source dictionary sequence number.
pub type Sequence = i64;

/// Output format version advertised in `index.json`.
pub const DATABASE_FORMAT: i64 = 3;

// ---------------------------------------------------------------------------
// Lookup hashes
// ---------------------------------------------------------------------------

/// 64-bit lookup key over a pair of strings.
///
/// Hashes are correlation keys only. Two headwords with equal hashes are
/// treated as the same surface pair, never as the same entry.
pub type HeadwordHash = u64;

const HASH_SEPARATOR: &str = "␞";

/// Hash `left` and `right` joined by a record separator: the first eight bytes
/// of the SHA-256 digest, big endian.
pub fn hash_pair(left: &str, right: &str) -> HeadwordHash {
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(HASH_SEPARATOR.as_bytes());
    hasher.update(right.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

// ---------------------------------------------------------------------------
// Normalized entry shape
// ---------------------------------------------------------------------------

/// One kanji spelling of an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KanjiForm {
    pub expression: String,
    pub information: Vec<String>,
    pub priorities: Vec<String>,
}

/// One reading of an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadingForm {
    pub reading: String,
    /// The reading is not a true reading of any kanji form.
    pub no_kanji: bool,
    pub information: Vec<String>,
    pub priorities: Vec<String>,
    /// Kanji forms this reading applies to. `None` means all of them.
    pub restrictions: Option<Vec<String>>,
}

/// A translation. `language` is an ISO-639-2 code; `None` means English.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gloss {
    pub content: String,
    pub language: Option<String>,
    /// `lit`, `fig`, `expl`, `tm` and so on.
    pub kind: Option<String>,
}

impl Gloss {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Whether this gloss belongs to the dictionary's target language.
    pub fn is_language(&self, language: &str) -> bool {
        match &self.language {
            None => language == "eng",
            Some(code) => code == language,
        }
    }
}

/// Loanword origin note of a sense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceLanguage {
    pub content: String,
    pub language: Option<String>,
    /// `part` for partial derivations.
    pub kind: Option<String>,
    pub wasei: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleSentence {
    pub text: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Example {
    pub term: String,
    pub sentences: Vec<ExampleSentence>,
}

/// One sense block of an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sense {
    /// Kanji forms this sense applies to. `None` means all of them.
    pub restricted_kanji: Option<Vec<String>>,
    /// Readings this sense applies to. `None` means all of them.
    pub restricted_readings: Option<Vec<String>>,
    pub parts_of_speech: Vec<String>,
    pub fields: Vec<String>,
    pub misc: Vec<String>,
    pub dialects: Vec<String>,
    pub references: Vec<String>,
    pub antonyms: Vec<String>,
    pub information: Vec<String>,
    pub source_languages: Vec<SourceLanguage>,
    pub glosses: Vec<Gloss>,
    pub examples: Vec<Example>,
}

impl Sense {
    /// Whether any gloss of this sense is written in `language`.
    pub fn has_language(&self, language: &str) -> bool {
        self.glosses.iter().any(|g| g.is_language(language))
    }

    /// Whether this sense applies to the (expression, reading) pair.
    pub fn applies_to(&self, expression: &str, reading: &str) -> bool {
        if let Some(readings) = &self.restricted_readings {
            if !readings.iter().any(|r| r == reading) {
                return false;
            }
        }
        if let Some(kanji) = &self.restricted_kanji {
            if !kanji.iter().any(|k| k == expression) {
                return false;
            }
        }
        true
    }
}

/// One record of a structured lexicon. Read-only once extracted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub sequence: Sequence,
    pub kanji: Vec<KanjiForm>,
    pub readings: Vec<ReadingForm>,
    pub senses: Vec<Sense>,
}

/// One translation group of a proper-name entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameTranslation {
    pub name_types: Vec<String>,
    pub translations: Vec<String>,
}

/// One record of a proper-name lexicon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameEntry {
    pub sequence: Sequence,
    pub kanji: Vec<String>,
    pub readings: Vec<String>,
    pub translations: Vec<NameTranslation>,
}

/// Source-declared tag name to human readable notes.
pub type TagGlossary = IndexMap<String, String>;

// ---------------------------------------------------------------------------
// Output records
// ---------------------------------------------------------------------------

/// One glossary item: plain text or a structured-content tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    Text(String),
    Structured(ContentNode),
}

impl Definition {
    pub fn to_value(&self) -> Value {
        match self {
            Definition::Text(text) => Value::String(text.clone()),
            Definition::Structured(node) => json!({
                "type": "structured-content",
                "content": node.to_value(),
            }),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Definition::Text(text.clone())),
            Value::Object(map) if map.get("type") == Some(&json!("structured-content")) => {
                map.get("content").map(|c| Definition::Structured(ContentNode::from_value(c)))
            }
            _ => None,
        }
    }
}

impl From<&str> for Definition {
    fn from(text: &str) -> Self {
        Definition::Text(text.to_string())
    }
}

fn append_unique(target: &mut Vec<String>, source: &[String]) {
    for item in source {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

/// One output term row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Term {
    pub expression: String,
    pub reading: String,
    pub definition_tags: Vec<String>,
    pub rules: Vec<String>,
    pub score: i64,
    pub glossary: Vec<Definition>,
    pub sequence: Sequence,
    pub term_tags: Vec<String>,
}

impl Term {
    pub fn add_definition_tags(&mut self, tags: &[String]) {
        append_unique(&mut self.definition_tags, tags);
    }

    pub fn add_term_tags(&mut self, tags: &[String]) {
        append_unique(&mut self.term_tags, tags);
    }

    pub fn add_rules(&mut self, rules: &[String]) {
        append_unique(&mut self.rules, rules);
    }

    /// Flatten into the fixed-arity bank tuple.
    pub fn to_row(&self) -> Value {
        json!([
            self.expression,
            self.reading,
            self.definition_tags.join(" "),
            self.rules.join(" "),
            self.score,
            self.glossary.iter().map(Definition::to_value).collect::<Vec<_>>(),
            self.sequence,
            self.term_tags.join(" "),
        ])
    }

    /// Read a bank tuple back by position.
    pub fn from_row(row: &Value) -> Option<Self> {
        let fields = row.as_array()?;
        if fields.len() != 8 {
            return None;
        }
        let split = |v: &Value| -> Option<Vec<String>> {
            Some(v.as_str()?.split_whitespace().map(str::to_string).collect())
        };
        let glossary = fields[5]
            .as_array()?
            .iter()
            .map(Definition::from_value)
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            expression: fields[0].as_str()?.to_string(),
            reading: fields[1].as_str()?.to_string(),
            definition_tags: split(&fields[2])?,
            rules: split(&fields[3])?,
            score: fields[4].as_i64()?,
            glossary,
            sequence: fields[6].as_i64()?,
            term_tags: split(&fields[7])?,
        })
    }
}

/// One output kanji row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kanji {
    pub character: String,
    pub onyomi: Vec<String>,
    pub kunyomi: Vec<String>,
    pub tags: Vec<String>,
    pub meanings: Vec<String>,
    pub stats: IndexMap<String, String>,
}

impl Kanji {
    pub fn add_tags(&mut self, tags: &[String]) {
        append_unique(&mut self.tags, tags);
    }

    pub fn to_row(&self) -> Value {
        json!([
            self.character,
            self.onyomi.join(" "),
            self.kunyomi.join(" "),
            self.tags.join(" "),
            self.meanings,
            self.stats,
        ])
    }
}

/// One output tag row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub name: String,
    pub category: String,
    pub order: i64,
    pub notes: String,
    pub score: i64,
}

impl Tag {
    pub fn new(name: &str, category: &str, order: i64, score: i64) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            order,
            notes: String::new(),
            score,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn to_row(&self) -> Value {
        json!([self.name, self.category, self.order, self.notes, self.score])
    }
}

/// One frequency row for a term or kanji.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Meta {
    pub expression: String,
    pub mode: String,
    pub data: Value,
}

impl Meta {
    pub fn frequency(expression: impl Into<String>, count: i64) -> Self {
        Self {
            expression: expression.into(),
            mode: "freq".to_string(),
            data: Value::from(count),
        }
    }

    pub fn to_row(&self) -> Value {
        json!([self.expression, self.mode, self.data])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Streaming record reader over the EDRDG XML files.
//!
//! The files are large, flat lists of records. [`RecordReader`] streams the
//! document and materializes one record element at a time as a small
//! [`Element`] tree. Entity references declared in the DTD (`&n;`, `&uk;`)
//! resolve to their own names; the declared expansions are collected as the
//! source's tag glossary.

use std::collections::HashMap;
use std::io::BufRead;
use std::sync::LazyLock;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use crate::errors::TermbankResult;
use crate::models::TagGlossary;

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<!ENTITY\s+(\S+)\s+"([^"]*)"\s*>"#).unwrap());

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One materialized XML element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> TermbankResult<Self> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Text of the first child called `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text.as_str())
    }

    /// Texts of every child called `name`, in document order.
    pub fn texts(&self, name: &str) -> Vec<String> {
        self.children_named(name).map(|c| c.text.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

fn predefined_entity(name: &str) -> Option<&'static str> {
    match name {
        "lt" => Some("<"),
        "gt" => Some(">"),
        "amp" => Some("&"),
        "apos" => Some("'"),
        "quot" => Some("\""),
        _ => None,
    }
}

/// Yields every element whose name is one of `records`, fully materialized.
pub struct RecordReader<R: BufRead> {
    reader: Reader<R>,
    records: &'static [&'static str],
    entities: TagGlossary,
    entity_names: HashMap<String, String>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(source: R, records: &'static [&'static str]) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.trim_text(true);
        Self {
            reader,
            records,
            entities: TagGlossary::new(),
            entity_names: HashMap::new(),
        }
    }

    /// Entity declarations seen so far, name to expansion.
    pub fn entities(&self) -> &TagGlossary {
        &self.entities
    }

    pub fn into_entities(self) -> TagGlossary {
        self.entities
    }

    fn read_entities(&mut self, doctype: &str) {
        for caps in ENTITY_RE.captures_iter(doctype) {
            let name = caps[1].to_string();
            self.entity_names.insert(name.clone(), name.clone());
            self.entities.insert(name, caps[2].to_string());
        }
    }

    fn is_record(&self, name: &str) -> bool {
        self.records.contains(&name)
    }

    /// The next record element, or `None` at the end of the document.
    pub fn next_record(&mut self) -> TermbankResult<Option<Element>> {
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::DocType(doctype) => {
                    let doctype = String::from_utf8_lossy(&doctype).into_owned();
                    self.read_entities(&doctype);
                }
                Event::Start(start) => {
                    let element = Element::from_start(&start)?;
                    if !stack.is_empty() || self.is_record(&element.name) {
                        stack.push(element);
                    }
                }
                Event::Empty(start) => {
                    let element = Element::from_start(&start)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else if self.is_record(&element.name) {
                        return Ok(Some(element));
                    }
                }
                Event::Text(text) => {
                    if let Some(current) = stack.last_mut() {
                        let names = &self.entity_names;
                        let value = text.unescape_with(|entity| {
                            names
                                .get(entity)
                                .map(String::as_str)
                                .or_else(|| predefined_entity(entity))
                        })?;
                        current.text.push_str(&value);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::End(_) => {
                    if let Some(done) = stack.pop() {
                        match stack.last_mut() {
                            Some(parent) => parent.children.push(done),
                            None => return Ok(Some(done)),
                        }
                    }
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
            buf.clear();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMdict [
<!ELEMENT JMdict (entry*)>
<!ENTITY n "noun (common) (futsuumeishi)">
<!ENTITY uk "word usually written using kana alone">
]>
<JMdict>
<entry>
<ent_seq>1</ent_seq>
<r_ele><reb>ほん</reb><re_nokanji/></r_ele>
<sense><pos>&n;</pos><misc>&uk;</misc><gloss xml:lang="ger" g_type="lit">Buch &amp; Heft</gloss></sense>
</entry>
<entry><ent_seq>2</ent_seq></entry>
</JMdict>
"#;

    #[test]
    fn test_records_and_entities() {
        let mut reader = RecordReader::new(DOCUMENT.as_bytes(), &["entry"]);
        let first = reader.next_record().unwrap().unwrap();
        assert_eq!(first.child_text("ent_seq"), Some("1"));
        let r_ele = first.child("r_ele").unwrap();
        assert!(r_ele.has_child("re_nokanji"));
        let sense = first.child("sense").unwrap();
        assert_eq!(sense.texts("pos"), vec!["n"]);
        assert_eq!(sense.texts("misc"), vec!["uk"]);
        let gloss = sense.child("gloss").unwrap();
        assert_eq!(gloss.text, "Buch & Heft");
        assert_eq!(gloss.attr("xml:lang"), Some("ger"));
        assert_eq!(gloss.attr("g_type"), Some("lit"));

        let second = reader.next_record().unwrap().unwrap();
        assert_eq!(second.child_text("ent_seq"), Some("2"));
        assert!(reader.next_record().unwrap().is_none());

        let entities = reader.into_entities();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities["n"], "noun (common) (futsuumeishi)");
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let mut reader = RecordReader::new("<a><entry></a>".as_bytes(), &["entry"]);
        assert!(reader.next_record().is_err());
    }
}

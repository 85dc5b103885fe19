//! JMdict XML extractor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::errors::{TermbankError, TermbankResult};
use crate::extract::xml::{Element, RecordReader};
use crate::extract::{find_date, Extracted, Extractor};
use crate::models::{
    Entry, Example, ExampleSentence, Gloss, KanjiForm, ReadingForm, Sense, Sequence,
    SourceLanguage,
};

const LANG_ATTR: &str = "xml:lang";

pub struct JmdictExtractor;

impl JmdictExtractor {
    pub fn read<R: BufRead>(&self, source: R) -> TermbankResult<Extracted<Entry>> {
        let mut reader = RecordReader::new(source, &["entry"]);
        let mut entries = Vec::new();
        while let Some(element) = reader.next_record()? {
            entries.push(entry_from_element(&element)?);
        }
        let publication_date = entries
            .last()
            .and_then(|e| e.senses.first())
            .and_then(|s| s.glosses.first())
            .and_then(|g| find_date(&g.content));
        info!("Read {} JMdict entries", entries.len());
        Ok(Extracted {
            records: entries,
            entities: reader.into_entities(),
            publication_date,
        })
    }
}

impl Extractor for JmdictExtractor {
    type Record = Entry;

    fn name(&self) -> &'static str {
        "jmdict"
    }

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<Entry>> {
        self.read(BufReader::new(File::open(path)?))
    }
}

// ---------------------------------------------------------------------------
// Element mapping
// ---------------------------------------------------------------------------

pub(crate) fn parse_sequence(element: &Element) -> TermbankResult<Sequence> {
    let text = element
        .child_text("ent_seq")
        .ok_or_else(|| TermbankError::Parse("entry without ent_seq".to_string()))?;
    text.trim()
        .parse()
        .map_err(|_| TermbankError::Parse(format!("invalid ent_seq {}", text)))
}

fn restriction(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn entry_from_element(element: &Element) -> TermbankResult<Entry> {
    let sequence = parse_sequence(element)?;

    let kanji = element
        .children_named("k_ele")
        .map(|k| KanjiForm {
            expression: k.child_text("keb").unwrap_or_default().to_string(),
            information: k.texts("ke_inf"),
            priorities: k.texts("ke_pri"),
        })
        .collect();

    let readings = element
        .children_named("r_ele")
        .map(|r| ReadingForm {
            reading: r.child_text("reb").unwrap_or_default().to_string(),
            no_kanji: r.has_child("re_nokanji"),
            information: r.texts("re_inf"),
            priorities: r.texts("re_pri"),
            restrictions: restriction(r.texts("re_restr")),
        })
        .collect();

    let mut senses: Vec<Sense> = Vec::new();
    for s in element.children_named("sense") {
        let mut sense = sense_from_element(s);
        // parts of speech carry over until a sense declares its own
        if sense.parts_of_speech.is_empty() {
            if let Some(previous) = senses.last() {
                sense.parts_of_speech = previous.parts_of_speech.clone();
            }
        }
        senses.push(sense);
    }

    Ok(Entry {
        sequence,
        kanji,
        readings,
        senses,
    })
}

fn sense_from_element(element: &Element) -> Sense {
    Sense {
        restricted_kanji: restriction(element.texts("stagk")),
        restricted_readings: restriction(element.texts("stagr")),
        parts_of_speech: element.texts("pos"),
        fields: element.texts("field"),
        misc: element.texts("misc"),
        dialects: element.texts("dial"),
        references: element.texts("xref"),
        antonyms: element.texts("ant"),
        information: element.texts("s_inf"),
        source_languages: element
            .children_named("lsource")
            .map(|l| SourceLanguage {
                content: l.text.clone(),
                language: l.attr(LANG_ATTR).map(str::to_string),
                kind: l.attr("ls_type").map(str::to_string),
                wasei: l.attr("ls_wasei") == Some("y"),
            })
            .collect(),
        glosses: element
            .children_named("gloss")
            .map(|g| Gloss {
                content: g.text.clone(),
                language: g.attr(LANG_ATTR).map(str::to_string),
                kind: g.attr("g_type").map(str::to_string),
            })
            .collect(),
        examples: element
            .children_named("example")
            .map(|e| Example {
                term: e.child_text("ex_text").unwrap_or_default().to_string(),
                sentences: e
                    .children_named("ex_sent")
                    .map(|s| ExampleSentence {
                        text: s.text.clone(),
                        language: s.attr(LANG_ATTR).unwrap_or("eng").to_string(),
                    })
                    .collect(),
            })
            .collect(),
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
<!ENTITY v5k "Godan verb with 'ku' ending">
<!ENTITY vt "transitive verb">
<!ENTITY ateji "ateji (phonetic) reading">
]>
<JMdict>
<entry>
<ent_seq>1000100</ent_seq>
<k_ele><keb>書く</keb><ke_pri>ichi1</ke_pri></k_ele>
<k_ele><keb>描く</keb><ke_inf>&ateji;</ke_inf></k_ele>
<r_ele><reb>かく</reb><re_restr>書く</re_restr><re_pri>ichi1</re_pri></r_ele>
<sense>
<pos>&v5k;</pos><pos>&vt;</pos>
<xref>記す・しるす・1</xref>
<lsource xml:lang="ger" ls_type="part" ls_wasei="y">Schrift</lsource>
<gloss>to write</gloss>
<gloss xml:lang="ger">schreiben</gloss>
<example>
<ex_srce exsrc_type="tat">1</ex_srce>
<ex_text>書く</ex_text>
<ex_sent xml:lang="jpn">手紙を書く。</ex_sent>
<ex_sent xml:lang="eng">I write a letter.</ex_sent>
</example>
</sense>
<sense>
<stagk>描く</stagk>
<gloss g_type="fig">to draw</gloss>
</sense>
</entry>
<entry>
<ent_seq>9999999</ent_seq>
<r_ele><reb>ＪＭｄｉｃｔ</reb></r_ele>
<sense><gloss>JMdict created: 2024-05-17</gloss></sense>
</entry>
</JMdict>
"#;

    #[test]
    fn test_entry_mapping() {
        let extracted = JmdictExtractor.read(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(extracted.records.len(), 2);
        let entry = &extracted.records[0];
        assert_eq!(entry.sequence, 1000100);
        assert_eq!(entry.kanji[0].priorities, vec!["ichi1"]);
        assert_eq!(entry.kanji[1].information, vec!["ateji"]);
        assert_eq!(entry.readings[0].restrictions, Some(vec!["書く".to_string()]));

        let first = &entry.senses[0];
        assert_eq!(first.parts_of_speech, vec!["v5k", "vt"]);
        assert_eq!(first.references, vec!["記す・しるす・1"]);
        assert_eq!(first.source_languages[0].language.as_deref(), Some("ger"));
        assert_eq!(first.source_languages[0].kind.as_deref(), Some("part"));
        assert!(first.source_languages[0].wasei);
        assert_eq!(first.glosses[1].language.as_deref(), Some("ger"));
        assert_eq!(first.examples[0].sentences[1].language, "eng");

        let second = &entry.senses[1];
        assert_eq!(second.parts_of_speech, vec!["v5k", "vt"]);
        assert_eq!(second.restricted_kanji, Some(vec!["描く".to_string()]));
        assert_eq!(second.restricted_readings, None);
        assert_eq!(second.glosses[0].kind.as_deref(), Some("fig"));
    }

    #[test]
    fn test_entities_and_date() {
        let extracted = JmdictExtractor.read(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(extracted.entities["vt"], "transitive verb");
        assert_eq!(extracted.publication_date.as_deref(), Some("2024-05-17"));
        assert_eq!(extracted.revision("JMdict"), "JMdict.2024-05-17");
    }

    #[test]
    fn test_invalid_sequence() {
        let document = "<JMdict><entry><ent_seq>abc</ent_seq></entry></JMdict>";
        assert!(matches!(
            JmdictExtractor.read(document.as_bytes()),
            Err(TermbankError::Parse(_))
        ));
    }
}

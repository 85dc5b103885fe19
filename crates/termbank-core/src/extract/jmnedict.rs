//! JMnedict XML extractor.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::errors::TermbankResult;
use crate::extract::jmdict::parse_sequence;
use crate::extract::xml::{Element, RecordReader};
use crate::extract::{find_date, Extracted, Extractor};
use crate::models::{NameEntry, NameTranslation};

pub struct JmnedictExtractor;

impl JmnedictExtractor {
    pub fn read<R: BufRead>(&self, source: R) -> TermbankResult<Extracted<NameEntry>> {
        let mut reader = RecordReader::new(source, &["entry"]);
        let mut entries = Vec::new();
        while let Some(element) = reader.next_record()? {
            entries.push(name_entry_from_element(&element)?);
        }
        let publication_date = entries
            .last()
            .and_then(|e| e.translations.first())
            .and_then(|t| t.translations.first())
            .and_then(|t| find_date(t));
        info!("Read {} JMnedict entries", entries.len());
        Ok(Extracted {
            records: entries,
            entities: reader.into_entities(),
            publication_date,
        })
    }
}

impl Extractor for JmnedictExtractor {
    type Record = NameEntry;

    fn name(&self) -> &'static str {
        "jmnedict"
    }

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<NameEntry>> {
        self.read(BufReader::new(File::open(path)?))
    }
}

fn name_entry_from_element(element: &Element) -> TermbankResult<NameEntry> {
    Ok(NameEntry {
        sequence: parse_sequence(element)?,
        kanji: element
            .children_named("k_ele")
            .filter_map(|k| k.child_text("keb"))
            .map(str::to_string)
            .collect(),
        readings: element
            .children_named("r_ele")
            .filter_map(|r| r.child_text("reb"))
            .map(str::to_string)
            .collect(),
        translations: element
            .children_named("trans")
            .map(|t| NameTranslation {
                name_types: t.texts("name_type"),
                translations: t.texts("trans_det"),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE JMnedict [
<!ENTITY surname "family or surname">
<!ENTITY place "place name">
]>
<JMnedict>
<entry>
<ent_seq>5000001</ent_seq>
<k_ele><keb>佐藤</keb></k_ele>
<r_ele><reb>さとう</reb></r_ele>
<trans><name_type>&surname;</name_type><trans_det>Satou</trans_det></trans>
<trans><name_type>&place;</name_type><trans_det>Satō</trans_det><trans_det>Sato</trans_det></trans>
</entry>
<entry>
<ent_seq>5999999</ent_seq>
<r_ele><reb>ＪＭｎｅｄｉｃｔ</reb></r_ele>
<trans><trans_det>JMnedict created: 2024-05-18</trans_det></trans>
</entry>
</JMnedict>
"#;

    #[test]
    fn test_name_entry_mapping() {
        let extracted = JmnedictExtractor.read(DOCUMENT.as_bytes()).unwrap();
        let entry = &extracted.records[0];
        assert_eq!(entry.sequence, 5000001);
        assert_eq!(entry.kanji, vec!["佐藤"]);
        assert_eq!(entry.readings, vec!["さとう"]);
        assert_eq!(entry.translations.len(), 2);
        assert_eq!(entry.translations[0].name_types, vec!["surname"]);
        assert_eq!(entry.translations[1].translations, vec!["Satō", "Sato"]);
        assert_eq!(extracted.entities["place"], "place name");
        assert_eq!(extracted.revision("JMnedict"), "JMnedict.2024-05-18");
    }
}

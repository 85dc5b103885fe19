//! KANJIDIC2 XML extractor. Characters map straight onto kanji rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::errors::TermbankResult;
use crate::extract::xml::{Element, RecordReader};
use crate::extract::{find_date, Extracted, Extractor};
use crate::langs;
use crate::models::{Kanji, TagGlossary};

/// Reads characters with meanings in `language` (ISO-639-2).
pub struct KanjidicExtractor {
    pub language: String,
}

impl KanjidicExtractor {
    pub fn new(language: &str) -> Self {
        Self {
            language: language.to_string(),
        }
    }

    /// Kanji rows, with the dictionary reference types seen as entities.
    pub fn read<R: BufRead>(&self, source: R) -> TermbankResult<Extracted<Kanji>> {
        let meaning_lang = langs::iso_to_html(&self.language).unwrap_or("en");
        let mut reader = RecordReader::new(source, &["header", "character"]);
        let mut characters = Vec::new();
        let mut references = TagGlossary::new();
        let mut publication_date = None;

        while let Some(element) = reader.next_record()? {
            if element.name == "header" {
                publication_date = element.child_text("date_of_creation").and_then(find_date);
                continue;
            }
            let kanji = kanji_from_element(&element, meaning_lang);
            for dic_ref in element
                .child("dic_number")
                .into_iter()
                .flat_map(|d| d.children_named("dic_ref"))
            {
                if let Some(kind) = dic_ref.attr("dr_type") {
                    references.entry(kind.to_string()).or_insert_with(|| kind.to_string());
                }
            }
            characters.push(kanji);
        }

        info!("Read {} KANJIDIC2 characters", characters.len());
        Ok(Extracted {
            records: characters,
            entities: references,
            publication_date,
        })
    }
}

impl Extractor for KanjidicExtractor {
    type Record = Kanji;

    fn name(&self) -> &'static str {
        "kanjidic"
    }

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<Kanji>> {
        self.read(BufReader::new(File::open(path)?))
    }
}

fn kanji_from_element(element: &Element, meaning_lang: &str) -> Kanji {
    let mut kanji = Kanji {
        character: element.child_text("literal").unwrap_or_default().to_string(),
        ..Kanji::default()
    };

    if let Some(misc) = element.child("misc") {
        if let Some(level) = misc.child_text("jlpt") {
            kanji.add_tags(&[format!("jlpt:{}", level)]);
            kanji.stats.insert("jlpt".to_string(), level.to_string());
        }
        if let Some(grade) = misc.child_text("grade") {
            kanji.add_tags(&[format!("grade:{}", grade)]);
            match grade.parse::<u32>() {
                Ok(1..=8) => kanji.add_tags(&["jouyou".to_string()]),
                Ok(9..=10) => kanji.add_tags(&["jinmeiyou".to_string()]),
                _ => {}
            }
            kanji.stats.insert("grade".to_string(), grade.to_string());
        }
        if let Some(freq) = misc.child_text("freq") {
            kanji.stats.insert("freq".to_string(), freq.to_string());
        }
    }

    if let Some(numbers) = element.child("dic_number") {
        for dic_ref in numbers.children_named("dic_ref") {
            let Some(kind) = dic_ref.attr("dr_type") else {
                continue;
            };
            if kind == "heisig" {
                kanji.add_tags(&[format!("heisig:{}", dic_ref.text)]);
            }
            kanji
                .stats
                .entry(kind.to_string())
                .or_insert_with(|| dic_ref.text.clone());
        }
    }

    if let Some(strokes) = element.child("misc").and_then(|m| m.child_text("stroke_count")) {
        kanji.add_tags(&[format!("strokes:{}", strokes)]);
        kanji.stats.insert("strokes".to_string(), strokes.to_string());
    }

    if let Some(reading_meaning) = element.child("reading_meaning") {
        for group in reading_meaning.children_named("rmgroup") {
            for meaning in group.children_named("meaning") {
                if meaning.attr("m_lang").unwrap_or("en") == meaning_lang {
                    kanji.meanings.push(meaning.text.clone());
                }
            }
            for reading in group.children_named("reading") {
                match reading.attr("r_type") {
                    Some("ja_on") => kanji.onyomi.push(reading.text.clone()),
                    Some("ja_kun") => kanji.kunyomi.push(reading.text.clone()),
                    _ => {}
                }
            }
        }
    }

    kanji
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kanjidic2>
<header>
<file_version>4</file_version>
<database_version>2024-139</database_version>
<date_of_creation>2024-05-18</date_of_creation>
</header>
<character>
<literal>亜</literal>
<misc><grade>8</grade><stroke_count>7</stroke_count><stroke_count>8</stroke_count><freq>1509</freq><jlpt>1</jlpt></misc>
<dic_number><dic_ref dr_type="nelson_c">43</dic_ref><dic_ref dr_type="heisig">1809</dic_ref></dic_number>
<reading_meaning>
<rmgroup>
<reading r_type="pinyin">ya4</reading>
<reading r_type="ja_on">ア</reading>
<reading r_type="ja_kun">つ.ぐ</reading>
<meaning>Asia</meaning>
<meaning>rank next</meaning>
<meaning m_lang="fr">Asie</meaning>
</rmgroup>
</reading_meaning>
</character>
</kanjidic2>
"#;

    #[test]
    fn test_character_mapping() {
        let extracted = KanjidicExtractor::new("eng").read(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(extracted.publication_date.as_deref(), Some("2024-05-18"));
        assert_eq!(extracted.entities.len(), 2);

        let kanji = &extracted.records[0];
        assert_eq!(kanji.character, "亜");
        assert_eq!(kanji.onyomi, vec!["ア"]);
        assert_eq!(kanji.kunyomi, vec!["つ.ぐ"]);
        assert_eq!(kanji.meanings, vec!["Asia", "rank next"]);
        assert_eq!(
            kanji.tags,
            vec!["jlpt:1", "grade:8", "jouyou", "heisig:1809", "strokes:7"]
        );
        assert_eq!(kanji.stats["freq"], "1509");
        assert_eq!(kanji.stats["nelson_c"], "43");

        let row = kanji.to_row();
        assert_eq!(row[1], json!("ア"));
        assert_eq!(row[3], json!("jlpt:1 grade:8 jouyou heisig:1809 strokes:7"));
    }

    #[test]
    fn test_meanings_in_target_language() {
        let extracted = KanjidicExtractor::new("fre").read(DOCUMENT.as_bytes()).unwrap();
        assert_eq!(extracted.records[0].meanings, vec!["Asie"]);
    }
}

//! Tab-separated frequency lists.
//!
//! Each line holds an expression and an occurrence count in either order.
//! `#` lines are comments; lines that do not parse are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::errors::TermbankResult;
use crate::extract::{Extracted, Extractor};
use crate::models::Meta;

pub struct FrequencyExtractor;

impl FrequencyExtractor {
    pub fn read<R: BufRead>(&self, source: R) -> TermbankResult<Extracted<Meta>> {
        let mut records = Vec::new();
        let mut skipped = 0usize;
        for line in source.lines() {
            let line = line?;
            if line.starts_with('#') {
                continue;
            }
            match parse_line(&line) {
                Some(meta) => records.push(meta),
                None => skipped += 1,
            }
        }
        info!("Read {} frequency rows ({} skipped)", records.len(), skipped);
        Ok(Extracted {
            records,
            ..Extracted::default()
        })
    }
}

impl Extractor for FrequencyExtractor {
    type Record = Meta;

    fn name(&self) -> &'static str {
        "frequency"
    }

    fn extract(&self, path: &Path) -> TermbankResult<Extracted<Meta>> {
        self.read(BufReader::new(File::open(path)?))
    }
}

fn parse_line(line: &str) -> Option<Meta> {
    let mut parts = line.split('\t');
    let first = parts.next()?;
    let second = parts.next()?;
    if let Ok(count) = second.parse::<i64>() {
        return Some(Meta::frequency(first, count));
    }
    first.parse::<i64>().ok().map(|count| Meta::frequency(second, count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_both_column_orders() {
        let list = "# wikipedia counts\nの\t5123\n42\t猫\n壊れた行\nx\ty\n";
        let extracted = FrequencyExtractor.read(list.as_bytes()).unwrap();
        assert_eq!(extracted.records.len(), 2);
        assert_eq!(extracted.records[0].to_row(), json!(["の", "freq", 5123]));
        assert_eq!(extracted.records[1].to_row(), json!(["猫", "freq", 42]));
        assert!(extracted.entities.is_empty());
        assert_eq!(extracted.publication_date, None);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let meta = parse_line("日\t7\tnoise").unwrap();
        assert_eq!(meta.expression, "日");
        assert_eq!(meta.data, json!(7));
    }
}

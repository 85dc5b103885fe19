//! Bank writer: shards row lists into `<kind>_bank_N.json` files and packs
//! them with `index.json` into one zip archive.
//!
//! The archive is assembled in memory and only touches the output path once
//! every bank serialized cleanly, so a failed conversion never leaves a
//! partial dictionary behind.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::{TermbankError, TermbankResult};
use crate::store::manifest::Manifest;

pub const INDEX_FILE: &str = "index.json";

/// Row families an archive can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankKind {
    Term,
    Tag,
    Kanji,
    TermMeta,
    KanjiMeta,
}

impl BankKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            BankKind::Term => "term",
            BankKind::Tag => "tag",
            BankKind::Kanji => "kanji",
            BankKind::TermMeta => "term_meta",
            BankKind::KanjiMeta => "kanji_meta",
        }
    }

    /// File name of the 1-based bank `number`.
    pub fn file_name(&self, number: usize) -> String {
        format!("{}_bank_{}.json", self.prefix(), number)
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> TermbankResult<Vec<u8>> {
    if !pretty {
        return Ok(serde_json::to_vec(value)?);
    }
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Archive
// ---------------------------------------------------------------------------

/// A dictionary ready to be written: its manifest plus rows per bank kind.
#[derive(Debug, Clone)]
pub struct Archive {
    pub manifest: Manifest,
    banks: IndexMap<BankKind, Vec<Value>>,
}

impl Archive {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            manifest,
            banks: IndexMap::new(),
        }
    }

    /// Append rows to the bank list of `kind`, keeping their order.
    pub fn add_rows<I>(&mut self, kind: BankKind, rows: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.banks.entry(kind).or_default().extend(rows);
    }

    pub fn rows(&self, kind: BankKind) -> &[Value] {
        self.banks.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Zip bytes with at most `stride` rows per bank file.
    pub fn to_bytes(&self, stride: usize, pretty: bool) -> TermbankResult<Vec<u8>> {
        if stride == 0 {
            return Err(TermbankError::InvalidOption(
                "stride must be at least 1".to_string(),
            ));
        }

        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for (kind, rows) in &self.banks {
            for (i, chunk) in rows.chunks(stride).enumerate() {
                let name = kind.file_name(i + 1);
                zip.start_file(name.as_str(), options)?;
                zip.write_all(&to_json(&chunk, pretty)?)?;
                debug!("Wrote {} ({} rows)", name, chunk.len());
            }
        }

        zip.start_file(INDEX_FILE, options)?;
        zip.write_all(&to_json(&self.manifest, pretty)?)?;

        Ok(zip.finish()?.into_inner())
    }

    /// Serialize the whole archive, then write it to `path`.
    pub fn write(&self, path: &Path, stride: usize, pretty: bool) -> TermbankResult<()> {
        let bytes = self.to_bytes(stride, pretty)?;
        fs::write(path, &bytes)?;
        info!(
            "Wrote {} ({} bytes, {} rows)",
            path.display(),
            bytes.len(),
            self.banks.values().map(Vec::len).sum::<usize>()
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

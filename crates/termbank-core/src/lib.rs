//! termbank core library: converts Japanese lexicon sources (JMdict,
//! JMnedict, KANJIDIC2, frequency lists, rikai) into zipped term-bank
//! dictionaries for a popup lookup client.
//!
//! The pipeline is extract, aggregate, build, write:
//! [`extract`] reads a source into normalized records, [`indexer`] derives
//! headwords and builds scored rows, and [`store`] shards them into an
//! archive. [`convert`] runs the whole thing for one input file.

pub mod config;
pub mod content;
pub mod errors;
pub mod extract;
pub mod indexer;
pub mod langs;
pub mod models;
pub mod store;
pub mod taxonomy;

pub use config::{ConvertOptions, Format};
pub use errors::{TermbankError, TermbankResult};
pub use indexer::pipeline::{convert, ConvertStats};

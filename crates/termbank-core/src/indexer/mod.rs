//! The conversion engine: headword derivation, lexicon-wide aggregation,
//! reference resolution and term building.

pub mod forms;
pub mod generic;
pub mod glossary;
pub mod headword;
pub mod kana;
pub mod metadata;
pub mod pipeline;
pub mod references;
pub mod terms;

//! `index.json` manifest of a dictionary archive.

use serde::{Deserialize, Serialize};

use crate::models::DATABASE_FORMAT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub title: String,
    pub format: i64,
    pub revision: String,
    pub sequenced: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribution: String,
}

impl Manifest {
    pub fn new(title: impl Into<String>, revision: impl Into<String>, sequenced: bool) -> Self {
        Self {
            title: title.into(),
            format: DATABASE_FORMAT,
            revision: revision.into(),
            sequenced,
            attribution: String::new(),
        }
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }
}

//! Error types for the termbank core library.

/// Top-level error enum for the termbank core library.
#[derive(Debug, thiserror::Error)]
pub enum TermbankError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unrecognized dictionary format: {0}")]
    UnknownFormat(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl From<quick_xml::events::attributes::AttrError> for TermbankError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        TermbankError::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

pub type TermbankResult<T> = Result<T, TermbankError>;

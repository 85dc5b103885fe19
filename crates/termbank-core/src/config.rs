//! Conversion options shared by the CLI and the library entry points.

use std::fmt;
use std::str::FromStr;

use crate::errors::{TermbankError, TermbankResult};
use crate::langs;

pub const DEFAULT_STRIDE: usize = 10_000;
pub const DEFAULT_LANGUAGE: &str = "english";
const EXTRA_MODE_LANGUAGE: &str = "english_extra";

/// Source dictionary family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Jmdict,
    JmdictForms,
    Jmnedict,
    Kanjidic,
    TermFreq,
    KanjiFreq,
    Rikai,
}

impl Format {
    pub const ALL: [Format; 7] = [
        Format::Jmdict,
        Format::JmdictForms,
        Format::Jmnedict,
        Format::Kanjidic,
        Format::TermFreq,
        Format::KanjiFreq,
        Format::Rikai,
    ];

    /// Name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Jmdict => "edict",
            Format::JmdictForms => "forms",
            Format::Jmnedict => "enamdict",
            Format::Kanjidic => "kanjidic",
            Format::TermFreq => "termfreq",
            Format::KanjiFreq => "kanjifreq",
            Format::Rikai => "rikai",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Format::Jmdict => "JMdict",
            Format::JmdictForms => "JMdict Forms",
            Format::Jmnedict => "JMnedict",
            Format::Kanjidic => "KANJIDIC2",
            Format::TermFreq | Format::KanjiFreq => "Frequency",
            Format::Rikai => "Rikai",
        }
    }
}

impl FromStr for Format {
    type Err = TermbankError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| TermbankError::UnknownFormat(name.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a conversion needs besides its input and output paths.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Detected from the input path when `None`.
    pub format: Option<Format>,
    /// Target language name, e.g. `english`, `german` or `english_extra`.
    pub language: String,
    /// Overrides the family's default title.
    pub title: Option<String>,
    /// Maximum rows per bank file.
    pub stride: usize,
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: None,
            language: DEFAULT_LANGUAGE.to_string(),
            title: None,
            stride: DEFAULT_STRIDE,
            pretty: false,
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> TermbankResult<()> {
        if self.stride == 0 {
            return Err(TermbankError::InvalidOption(
                "stride must be at least 1".to_string(),
            ));
        }
        self.language_code()?;
        Ok(())
    }

    /// ISO-639-2 code of the target language.
    pub fn language_code(&self) -> TermbankResult<&'static str> {
        langs::lang_name_to_code(&self.language).ok_or_else(|| {
            TermbankError::InvalidOption(format!("unsupported language {}", self.language))
        })
    }

    /// Forms terms are added next to sense terms.
    pub fn extra_mode(&self) -> bool {
        self.language == EXTRA_MODE_LANGUAGE
    }

    pub fn title_for(&self, format: Format) -> String {
        self.title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format.default_title().to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for format in Format::ALL {
            assert_eq!(format.name().parse::<Format>().unwrap(), format);
        }
        assert!(matches!(
            "epwing".parse::<Format>(),
            Err(TermbankError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert_eq!(options.stride, 10_000);
        assert_eq!(options.language_code().unwrap(), "eng");
        assert!(!options.extra_mode());
        assert!(options.validate().is_ok());
        assert_eq!(options.title_for(Format::Jmnedict), "JMnedict");
    }

    #[test]
    fn test_invalid_options() {
        let options = ConvertOptions {
            stride: 0,
            ..ConvertOptions::default()
        };
        assert!(matches!(options.validate(), Err(TermbankError::InvalidOption(_))));

        let options = ConvertOptions {
            language: "klingon".to_string(),
            ..ConvertOptions::default()
        };
        assert!(matches!(options.validate(), Err(TermbankError::InvalidOption(_))));
    }

    #[test]
    fn test_extra_mode_and_title() {
        let options = ConvertOptions {
            language: "english_extra".to_string(),
            title: Some("My JMdict".to_string()),
            ..ConvertOptions::default()
        };
        assert!(options.extra_mode());
        assert_eq!(options.language_code().unwrap(), "eng");
        assert_eq!(options.title_for(Format::Jmdict), "My JMdict");
    }
}

//! Language tables, display markers and symbols used by glossary rendering.

pub const EDRDG_ATTRIBUTION: &str = "This publication has included material from the JMdict (EDICT, etc.) dictionary files in accordance with the licence provisions of the Electronic Dictionaries Research Group. See http://www.edrdg.org/";

// Symbols inside forms glossaries
pub const PRIORITY_SYMBOL: &str = "★";
pub const RARE_KANJI_SYMBOL: &str = "🅁";
pub const IRREGULAR_SYMBOL: &str = "⚠";
pub const OUTDATED_SYMBOL: &str = "⛬";
pub const DEFAULT_SYMBOL: &str = "㊒";

// Term tag names
pub const PRIORITY_TAG: &str = "⭐";
pub const RARE_KANJI_TAG: &str = "R";
pub const IRREGULAR_TAG: &str = "⚠️";
pub const OUTDATED_TAG: &str = "⛬";
pub const ATEJI_TAG: &str = "ateji";
pub const GIKUN_TAG: &str = "gikun";
pub const FORMS_TAG: &str = "forms";

// List markers (CSS list-style-type strings)
pub const LANG_MARKER: &str = "'🌐 '";
pub const NOTE_MARKER: &str = "'📝 '";
pub const INFO_MARKER: &str = "'ℹ️ '";
pub const REF_MARKER: &str = "'➡️ '";
pub const ANTONYM_MARKER: &str = "'🔄 '";

/// Flag marker for example sentences in `code`.
pub fn iso_to_flag(code: &str) -> Option<&'static str> {
    Some(match code {
        "" | "eng" => "'🇬🇧 '",
        "dut" => "'🇳🇱 '",
        "fre" => "'🇫🇷 '",
        "ger" => "'🇩🇪 '",
        "hun" => "'🇭🇺 '",
        "ita" => "'🇮🇹 '",
        "jpn" => "'🇯🇵 '",
        "rus" => "'🇷🇺 '",
        "slv" => "'🇸🇮 '",
        "spa" => "'🇪🇸 '",
        "swe" => "'🇸🇪 '",
        _ => return None,
    })
}

/// Target language name accepted on the command line to its ISO-639-2 code.
pub fn lang_name_to_code(name: &str) -> Option<&'static str> {
    Some(match name {
        "" | "english" | "english_extra" => "eng",
        "dutch" => "dut",
        "french" => "fre",
        "german" => "ger",
        "hungarian" => "hun",
        "italian" => "ita",
        "russian" => "rus",
        "slovenian" => "slv",
        "spanish" => "spa",
        "swedish" => "swe",
        _ => return None,
    })
}

/// Label for a typed gloss. `Some("")` means the type is known but unlabelled.
pub fn gloss_type_name(language: &str, code: &str) -> Option<&'static str> {
    match (language, code) {
        ("eng", "lit") => Some("literally"),
        ("eng", "fig") => Some("figuratively"),
        ("eng", "expl") => Some(""),
        ("eng", "tm") => Some("trademark"),
        _ => None,
    }
}

/// Lead-in word for cross-reference (`xref`) and antonym (`ant`) notes.
pub fn reference_hint(language: &str, kind: &str) -> &'static str {
    match (language, kind) {
        (_, "ant") => "antonym",
        _ => "see",
    }
}

/// Display text for a source-language derivation type.
pub fn source_lang_type(language: &str, code: &str) -> Option<&'static str> {
    match (language, code) {
        ("eng", "part") => Some("partial"),
        ("eng", "") => Some(""),
        _ => None,
    }
}

/// English name of an ISO-639-2 code.
pub fn lang_code_to_name(language: &str, code: &str) -> Option<&'static str> {
    if language != "eng" {
        return None;
    }
    LANGUAGES.iter().find(|l| l.0 == code).map(|l| l.1)
}

/// HTML `lang` subtag of an ISO-639-2 code.
pub fn iso_to_html(code: &str) -> Option<&'static str> {
    LANGUAGES.iter().find(|l| l.0 == code).map(|l| l.2)
}

// (ISO-639-2, English name, IANA subtag)
static LANGUAGES: &[(&str, &str, &str)] = &[
    ("afr", "Afrikaans", "af"),
    ("ain", "Ainu", "ain"),
    ("alg", "Algonquian", "alg"),
    ("amh", "Amharic", "am"),
    ("ara", "Arabic", "ar"),
    ("arn", "Mapudungun", "arn"),
    ("bnt", "Bantu", "bnt"),
    ("bre", "Breton", "br"),
    ("bul", "Bulgarian", "bg"),
    ("bur", "Burmese", "my"),
    ("chi", "Chinese", "zh"),
    ("chn", "Chinook Jargon", "chn"),
    ("cze", "Czech", "cs"),
    ("dan", "Danish", "da"),
    ("dut", "Dutch", "nl"),
    ("eng", "English", "en"),
    ("epo", "Esperanto", "eo"),
    ("est", "Estonian", "et"),
    ("fil", "Filipino", "fil"),
    ("fin", "Finnish", "fi"),
    ("fre", "French", "fr"),
    ("geo", "Georgian", "ka"),
    ("ger", "German", "de"),
    ("glg", "Galician", "gl"),
    ("grc", "Ancient Greek", "grc"),
    ("gre", "Modern Greek", "el"),
    ("haw", "Hawaiian", "haw"),
    ("heb", "Hebrew", "he"),
    ("hin", "Hindi", "hi"),
    ("hun", "Hungarian", "hu"),
    ("ice", "Icelandic", "is"),
    ("ind", "Indonesian", "id"),
    ("ita", "Italian", "it"),
    ("jpn", "Japanese", "ja"),
    ("khm", "Khmer", "km"),
    ("kor", "Korean", "ko"),
    ("kur", "Kurdish", "ku"),
    ("lat", "Latin", "la"),
    ("mal", "Malayalam", "ml"),
    ("mao", "Maori", "mi"),
    ("may", "Malay", "ms"),
    ("mnc", "Manchu", "mnc"),
    ("mol", "Moldavian", "ro"),
    ("mon", "Mongolian", "mn"),
    ("nor", "Norwegian", "no"),
    ("per", "Persian", "fa"),
    ("pol", "Polish", "pl"),
    ("por", "Portuguese", "pt"),
    ("rum", "Romanian", "ro"),
    ("rus", "Russian", "ru"),
    ("san", "Sanskrit", "sa"),
    ("scr", "Croatian", "hr"),
    ("slo", "Slovak", "sk"),
    ("slv", "Slovenian", "sl"),
    ("som", "Somali", "so"),
    ("spa", "Spanish", "es"),
    ("swa", "Swahili", "sw"),
    ("swe", "Swedish", "sv"),
    ("tah", "Tahitian", "ty"),
    ("tam", "Tamil", "ta"),
    ("tgl", "Tagalog", "tl"),
    ("tha", "Thai", "th"),
    ("tib", "Tibetan", "bo"),
    ("tur", "Turkish", "tr"),
    ("ukr", "Ukrainian", "uk"),
    ("urd", "Urdu", "ur"),
    ("vie", "Vietnamese", "vi"),
    ("yid", "Yiddish", "yi"),
];

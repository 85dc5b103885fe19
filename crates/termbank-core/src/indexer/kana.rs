//! Kana normalization and the romaji transliteration matcher.
//!
//! A translation is a transliteration of a reading when it can be rebuilt by
//! concatenating one romanization per kana segment. Segmentation is greedy
//! leftmost-longest; the expansion keeps only candidates that are still a
//! prefix of the target text, so long readings stay tractable.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Map katakana (ァ..ヶ, ヽ..ヾ) onto hiragana; everything else is kept.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('ァ'..='ヶ').contains(&c) || ('ヽ'..='ヾ').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Expand hiragana iteration marks: さゝき -> ささき, たゞの -> ただの.
pub fn replace_iteration_marks(text: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(text.len());
    for c in text.chars() {
        let offset = match c {
            'ゝ' => 0,
            'ゞ' => 1,
            _ => {
                out.push(c);
                continue;
            }
        };
        match out.last() {
            Some(&prev) => out.push(char::from_u32(prev as u32 + offset).unwrap_or(prev)),
            None => out.push(c),
        }
    }
    out.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Segmentation
// ---------------------------------------------------------------------------

/// Split kana into romanizable segments, longest first.
///
/// Returns `None` when some position starts no known segment.
/// E.g. しょくぎょう -> [しょ, く, ぎょ, う]
pub fn kana_segments(kana: &str) -> Option<Vec<String>> {
    let hiragana = replace_iteration_marks(&katakana_to_hiragana(kana));
    let chars: Vec<char> = hiragana.chars().collect();
    let mut segments = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let mut matched = None;
        for end in (start + 1..=chars.len()).rev() {
            let candidate: String = chars[start..end].iter().collect();
            if ROMAJI.contains_key(candidate.as_str()) {
                matched = Some((candidate, end));
                break;
            }
        }
        let (segment, end) = matched?;
        segments.push(segment);
        start = end;
    }
    Some(segments)
}

/// Whether `text` is a romanization of `kana`.
///
/// Case and surrounding whitespace of `text` are ignored. A segment may not
/// romanize to nothing at the very start. Kana that cannot be segmented only
/// matches an empty text.
pub fn is_transliteration(text: &str, kana: &str) -> bool {
    let romaji = text.trim().to_lowercase();
    let prefixes: HashSet<&str> = romaji
        .char_indices()
        .map(|(i, c)| &romaji[..i + c.len_utf8()])
        .collect();
    let segments = kana_segments(kana).unwrap_or_default();

    let mut possibilities: Vec<String> = vec![String::new()];
    for segment in &segments {
        let Some(options) = ROMAJI.get(segment.as_str()) else {
            return false;
        };
        let mut next: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for partial in &possibilities {
            for option in options.iter() {
                let candidate = format!("{}{}", partial, option);
                if !prefixes.contains(candidate.as_str()) {
                    continue;
                }
                if seen.insert(candidate.clone()) {
                    next.push(candidate);
                }
            }
        }
        if next.is_empty() {
            return false;
        }
        possibilities = next;
    }
    possibilities.iter().any(|p| *p == romaji)
}

// ---------------------------------------------------------------------------
// Romanization table
// ---------------------------------------------------------------------------

static ROMAJI: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| ROMAJI_TABLE.iter().copied().collect());

static ROMAJI_TABLE: &[(&str, &[&str])] = &[
    ("ぁ", &["", "a"]),
    ("ぃ", &["", "i"]),
    ("ぅ", &["", "u"]),
    ("ぇ", &["", "e"]),
    ("ぉ", &["", "o"]),
    ("ゃ", &["ya"]),
    ("ゅ", &["yu"]),
    ("ょ", &["yo"]),
    ("ゎ", &["wa"]),
    ("っ", &["", "k", "g", "s", "z", "t", "d", "f", "h", "b", "p", "n", "m", "y", "w", "c"]),
    ("ー", &["", "a", "i", "u", "e", "o", "-"]),
    ("あ", &["", "a", "ā", "wa", "wā"]),
    ("い", &["", "i", "ī", "wi", "wī"]),
    ("う", &["", "u", "ū", "wu", "wū"]),
    ("え", &["", "e", "ē", "we", "wē"]),
    ("お", &["", "o", "ō", "wo", "wō"]),
    ("ゔ", &["vu", "vū", "bu", "bū"]),
    ("か", &["ka", "kā"]),
    ("が", &["ga", "gā"]),
    ("き", &["ki", "kī"]),
    ("ぎ", &["gi", "gī"]),
    ("く", &["ku", "kū"]),
    ("ぐ", &["gu", "gū"]),
    ("け", &["ke", "kē"]),
    ("げ", &["ge", "gē"]),
    ("こ", &["ko", "kō"]),
    ("ご", &["go", "gō"]),
    ("さ", &["sa", "sā"]),
    ("ざ", &["za", "zā"]),
    ("し", &["si", "sī", "shi", "shī"]),
    ("じ", &["zi", "zī", "ji", "jī"]),
    ("す", &["su", "sū"]),
    ("ず", &["zu", "zū"]),
    ("せ", &["se", "sē"]),
    ("ぜ", &["ze", "zē"]),
    ("そ", &["so", "sō"]),
    ("ぞ", &["zo", "zō"]),
    ("た", &["ta", "tā"]),
    ("だ", &["da", "dā"]),
    ("ち", &["ti", "tī", "chi", "chī"]),
    ("ぢ", &["di", "dī", "dhi", "dhī", "ji", "jī", "dji", "djī", "dzi", "dzī"]),
    ("つ", &["tu", "tū", "tsu", "tsū"]),
    ("づ", &["du", "dū", "dzu", "dzū", "zu", "zū"]),
    ("て", &["te", "tē"]),
    ("で", &["de", "dē"]),
    ("と", &["to", "tō"]),
    ("ど", &["do", "dō"]),
    ("な", &["na", "nā"]),
    ("に", &["ni", "nī"]),
    ("ぬ", &["nu", "nū"]),
    ("ね", &["ne", "nē"]),
    ("の", &["no", "nō"]),
    ("は", &["ha", "hā", "wa", "wā", "a", "ā"]),
    ("ば", &["ba", "bā"]),
    ("ぱ", &["pa", "pā"]),
    ("ひ", &["hi", "hī", "i", "ī"]),
    ("び", &["bi", "bī"]),
    ("ぴ", &["pi", "pī"]),
    ("ふ", &["hu", "hū", "fu", "fū", "u", "ū"]),
    ("ぶ", &["bu", "bū"]),
    ("ぷ", &["pu", "pū"]),
    ("へ", &["he", "hē", "e", "ē"]),
    ("べ", &["be", "bē"]),
    ("ぺ", &["pe", "pē"]),
    ("ほ", &["ho", "hō", "o", "ō"]),
    ("ぼ", &["bo", "bō"]),
    ("ぽ", &["po", "pō"]),
    ("ま", &["ma", "mā"]),
    ("み", &["mi", "mī"]),
    ("む", &["mu", "mū"]),
    ("め", &["me", "mē"]),
    ("も", &["mo", "mō"]),
    ("や", &["ya", "yā"]),
    ("ゆ", &["yu", "yū"]),
    ("よ", &["yo", "yō"]),
    ("ら", &["ra", "rā"]),
    ("り", &["ri", "rī"]),
    ("る", &["ru", "rū"]),
    ("れ", &["re", "rē"]),
    ("ろ", &["ro", "rō"]),
    ("わ", &["wa", "wā"]),
    ("ゐ", &["wi", "wī", "i", "ī"]),
    ("ゑ", &["we", "wē", "e", "ē"]),
    ("を", &["wo", "wō", "o", "ō"]),
    ("ん", &["n", "n'", "m"]),
    ("うぁ", &["wa", "wā", "ua", "uā"]),
    ("うぃ", &["wi", "wī", "ui", "uī"]),
    ("うぇ", &["we", "wē", "ue", "uē"]),
    ("うぉ", &["wo", "wō", "uo", "uō"]),
    ("きゃ", &["kya", "kyā"]),
    ("きゅ", &["kyu", "kyū"]),
    ("きょ", &["kyo", "kyō"]),
    ("ぎゃ", &["gya", "gyā"]),
    ("ぎゅ", &["gyu", "gyū"]),
    ("ぎょ", &["gyo", "gyō"]),
    ("くゎ", &["kwa", "kwā"]),
    ("くゅ", &["kyu", "kyū"]),
    ("しぇ", &["she", "shē", "shie", "shiē"]),
    ("しゃ", &["sha", "shā", "sya", "syā"]),
    ("しゅ", &["shu", "shū", "syu", "syū"]),
    ("しょ", &["sho", "shō", "syo", "syō"]),
    ("じぇ", &["je", "jē"]),
    ("じゃ", &["ja", "jā", "jya", "jyā"]),
    ("じゅ", &["ju", "jū", "jyu", "jyū"]),
    ("じょ", &["jo", "jō", "jyo", "jyō"]),
    ("ちぁ", &["cha", "chā", "chia", "chiā"]),
    ("ちぇ", &["che", "chē", "chie", "chiē"]),
    ("ちゃ", &["cha", "chā", "tya", "tyā"]),
    ("ちゅ", &["chu", "chū", "tyu", "tyū"]),
    ("ちょ", &["cho", "chō", "tyo", "tyō"]),
    ("ぢゃ", &["ja", "jā", "jya", "jyā", "dya", "dyā"]),
    ("ぢゅ", &["ju", "jū", "jyu", "jyū", "dyu", "dyū"]),
    ("ぢょ", &["jo", "jō", "jyo", "jyō", "dyo", "dyō"]),
    ("つぁ", &["tsa", "tsā", "tsua", "tsuā"]),
    ("つぇ", &["tse", "tsē", "tsue", "tsuē"]),
    ("てぃ", &["ti", "tī", "tei", "teī"]),
    ("でぃ", &["di", "dī", "dei", "deī"]),
    ("でゅ", &["dyu", "dyū", "deyu", "deyū"]),
    ("にゃ", &["nya", "nyā"]),
    ("にゅ", &["nyu", "nyū"]),
    ("にょ", &["nyo", "nyō"]),
    ("ひゃ", &["hya", "hyā"]),
    ("ひゅ", &["hyu", "hyū"]),
    ("ひょ", &["hyo", "hyō"]),
    ("びゃ", &["bya", "byā"]),
    ("びゅ", &["byu", "byū"]),
    ("びょ", &["byo", "byō"]),
    ("ぴゃ", &["pya", "pyā"]),
    ("ぴゅ", &["pyu", "pyū"]),
    ("ぴょ", &["pyo", "pyō"]),
    ("ふぁ", &["fa", "fā"]),
    ("ふぃ", &["fi", "fī"]),
    ("ふぇ", &["fe", "fē"]),
    ("ふぉ", &["fo", "fō"]),
    ("みゃ", &["mya", "myā"]),
    ("みゅ", &["myu", "myū"]),
    ("みょ", &["myo", "myō"]),
    ("りゃ", &["rya", "ryā"]),
    ("りゅ", &["ryu", "ryū"]),
    ("りょ", &["ryo", "ryō"]),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("バカがい"), "ばかがい");
        assert_eq!(katakana_to_hiragana("ヽヾ"), "ゝゞ");
        assert_eq!(katakana_to_hiragana("ー本"), "ー本");
    }

    #[test]
    fn test_replace_iteration_marks() {
        assert_eq!(replace_iteration_marks("さゝき"), "ささき");
        assert_eq!(replace_iteration_marks("たゞの"), "ただの");
        assert_eq!(replace_iteration_marks("ゝ"), "ゝ");
    }

    #[test]
    fn test_kana_segments() {
        assert_eq!(
            kana_segments("しょくぎょう"),
            Some(vec![
                "しょ".to_string(),
                "く".to_string(),
                "ぎょ".to_string(),
                "う".to_string()
            ])
        );
        assert_eq!(kana_segments("本"), None);
        assert_eq!(kana_segments(""), Some(vec![]));
    }

    #[test]
    fn test_russia_is_not_transliteration() {
        assert!(!is_transliteration("Russia", "ロシア"));
    }

    #[test]
    fn test_roshia_is_transliteration() {
        assert!(is_transliteration("roshia", "ろしあ"));
        assert!(is_transliteration("Roshia", "ロシア"));
    }

    #[test]
    fn test_long_vowels_and_sokuon() {
        assert!(is_transliteration("Satō", "さとう"));
        assert!(is_transliteration("Sato", "さとう"));
        assert!(is_transliteration("Hattori", "はっとり"));
        assert!(is_transliteration("Sasaki", "さゝき"));
        assert!(is_transliteration("Shinbashi", "しんばし"));
        assert!(is_transliteration("Shimbashi", "しんばし"));
        assert!(!is_transliteration("Tokyo Tower", "とうきょう"));
    }

    #[test]
    fn test_unsegmentable_reading() {
        assert!(!is_transliteration("hon", "本"));
    }
}

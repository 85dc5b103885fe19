//! Tag taxonomy: the catalogue of tag rows a bank ships so the lookup client
//! can label, order and score the tag names used by its terms.

use tracing::warn;

use crate::langs;
use crate::models::{Tag, TagGlossary};

// (name, category, order, score) of every entity the EDRDG files declare.
static KNOWN_ENTITY_TAGS: &[(&str, &str, i64, i64)] = &[
    // re_inf
    ("gikun", "", 0, 0),
    ("ik", "", 0, -5),
    ("ok", "", 0, -5),
    ("sk", "", 0, -5),
    // ke_inf
    ("ateji", "", 0, 0),
    ("iK", "", 0, -5),
    ("io", "", 0, -5),
    ("oK", "", 0, -5),
    ("rK", "", 0, -5),
    ("sK", "", 0, -5),
    // misc
    ("abbr", "", 0, 0),
    ("arch", "archaism", -4, 0),
    ("char", "name", 4, 0),
    ("chn", "", 0, 0),
    ("col", "", 0, 0),
    ("company", "name", 4, 0),
    ("creat", "name", 4, 0),
    ("dated", "archaism", -4, 0),
    ("dei", "name", 4, 0),
    ("derog", "", 0, 0),
    ("doc", "name", 4, 0),
    ("euph", "", 0, 0),
    ("ev", "name", 4, 0),
    ("fam", "", 0, 0),
    ("fem", "name", 4, 0),
    ("fict", "name", 4, 0),
    ("form", "", 0, 0),
    ("given", "name", 4, 0),
    ("group", "name", 4, 0),
    ("hist", "", 0, 0),
    ("hon", "", 0, 0),
    ("hum", "", 0, 0),
    ("id", "expression", -5, 0),
    ("joc", "", 0, 0),
    ("leg", "name", 4, 0),
    ("m-sl", "", 0, 0),
    ("male", "name", 4, 0),
    ("masc", "name", 4, 0),
    ("myth", "name", 4, 0),
    ("net-sl", "", 0, 0),
    ("obj", "name", 4, 0),
    ("obs", "archaism", -4, 0),
    ("on-mim", "", 0, 0),
    ("organization", "name", 4, 0),
    ("oth", "name", 4, 0),
    ("person", "name", 4, 0),
    ("place", "name", 4, 0),
    ("poet", "", 0, 0),
    ("pol", "", 0, 0),
    ("product", "name", 4, 0),
    ("proverb", "expression", 0, 0),
    ("quote", "expression", 0, 0),
    ("rare", "archaism", -4, 0),
    ("relig", "name", 4, 0),
    ("sens", "", 0, 0),
    ("serv", "name", 4, 0),
    ("ship", "name", 4, 0),
    ("sl", "", 0, 0),
    ("station", "name", 4, 0),
    ("surname", "name", 4, 0),
    ("uk", "", 0, 0),
    ("unclass", "name", 4, 0),
    ("vulg", "", 0, 0),
    ("work", "name", 4, 0),
    ("X", "", 0, 0),
    ("yoji", "", 0, 0),
    // pos
    ("adj-f", "partOfSpeech", -3, 0),
    ("adj-i", "partOfSpeech", -3, 0),
    ("adj-ix", "partOfSpeech", -3, 0),
    ("adj-kari", "partOfSpeech", -3, 0),
    ("adj-ku", "partOfSpeech", -3, 0),
    ("adj-na", "partOfSpeech", -3, 0),
    ("adj-nari", "partOfSpeech", -3, 0),
    ("adj-no", "partOfSpeech", -3, 0),
    ("adj-pn", "partOfSpeech", -3, 0),
    ("adj-shiku", "partOfSpeech", -3, 0),
    ("adj-t", "partOfSpeech", -3, 0),
    ("adv", "partOfSpeech", -3, 0),
    ("adv-to", "partOfSpeech", -3, 0),
    ("aux", "partOfSpeech", -3, 0),
    ("aux-adj", "partOfSpeech", -3, 0),
    ("aux-v", "partOfSpeech", -3, 0),
    ("conj", "partOfSpeech", -3, 0),
    ("cop", "partOfSpeech", -3, 0),
    ("ctr", "partOfSpeech", -3, 0),
    ("exp", "expression", -5, 0),
    ("int", "partOfSpeech", -3, 0),
    ("n", "partOfSpeech", -3, 0),
    ("n-adv", "partOfSpeech", -3, 0),
    ("n-pr", "partOfSpeech", -3, 0),
    ("n-pref", "partOfSpeech", -3, 0),
    ("n-suf", "partOfSpeech", -3, 0),
    ("n-t", "partOfSpeech", -3, 0),
    ("num", "partOfSpeech", -3, 0),
    ("pn", "partOfSpeech", -3, 0),
    ("pref", "partOfSpeech", -3, 0),
    ("prt", "partOfSpeech", -3, 0),
    ("suf", "partOfSpeech", -3, 0),
    ("unc", "partOfSpeech", -3, 0),
    ("v-unspec", "partOfSpeech", -3, 0),
    ("v1", "partOfSpeech", -3, 0),
    ("v1-s", "partOfSpeech", -3, 0),
    ("v2a-s", "partOfSpeech", -3, 0),
    ("v2b-k", "partOfSpeech", -3, 0),
    ("v2b-s", "partOfSpeech", -3, 0),
    ("v2d-k", "partOfSpeech", -3, 0),
    ("v2d-s", "partOfSpeech", -3, 0),
    ("v2g-k", "partOfSpeech", -3, 0),
    ("v2g-s", "partOfSpeech", -3, 0),
    ("v2h-k", "partOfSpeech", -3, 0),
    ("v2h-s", "partOfSpeech", -3, 0),
    ("v2k-k", "partOfSpeech", -3, 0),
    ("v2k-s", "partOfSpeech", -3, 0),
    ("v2m-k", "partOfSpeech", -3, 0),
    ("v2m-s", "partOfSpeech", -3, 0),
    ("v2n-s", "partOfSpeech", -3, 0),
    ("v2r-k", "partOfSpeech", -3, 0),
    ("v2r-s", "partOfSpeech", -3, 0),
    ("v2s-s", "partOfSpeech", -3, 0),
    ("v2t-k", "partOfSpeech", -3, 0),
    ("v2t-s", "partOfSpeech", -3, 0),
    ("v2w-s", "partOfSpeech", -3, 0),
    ("v2y-k", "partOfSpeech", -3, 0),
    ("v2y-s", "partOfSpeech", -3, 0),
    ("v2z-s", "partOfSpeech", -3, 0),
    ("v4b", "partOfSpeech", -3, 0),
    ("v4g", "partOfSpeech", -3, 0),
    ("v4h", "partOfSpeech", -3, 0),
    ("v4k", "partOfSpeech", -3, 0),
    ("v4m", "partOfSpeech", -3, 0),
    ("v4n", "partOfSpeech", -3, 0),
    ("v4r", "partOfSpeech", -3, 0),
    ("v4s", "partOfSpeech", -3, 0),
    ("v4t", "partOfSpeech", -3, 0),
    ("v5aru", "partOfSpeech", -3, 0),
    ("v5b", "partOfSpeech", -3, 0),
    ("v5g", "partOfSpeech", -3, 0),
    ("v5k", "partOfSpeech", -3, 0),
    ("v5k-s", "partOfSpeech", -3, 0),
    ("v5m", "partOfSpeech", -3, 0),
    ("v5n", "partOfSpeech", -3, 0),
    ("v5r", "partOfSpeech", -3, 0),
    ("v5r-i", "partOfSpeech", -3, 0),
    ("v5s", "partOfSpeech", -3, 0),
    ("v5t", "partOfSpeech", -3, 0),
    ("v5u", "partOfSpeech", -3, 0),
    ("v5u-s", "partOfSpeech", -3, 0),
    ("v5uru", "partOfSpeech", -3, 0),
    ("vi", "partOfSpeech", -3, 0),
    ("vk", "partOfSpeech", -3, 0),
    ("vn", "partOfSpeech", -3, 0),
    ("vr", "partOfSpeech", -3, 0),
    ("vs", "partOfSpeech", -3, 0),
    ("vs-c", "partOfSpeech", -3, 0),
    ("vs-i", "partOfSpeech", -3, 0),
    ("vs-s", "partOfSpeech", -3, 0),
    ("vt", "partOfSpeech", -3, 0),
    ("vz", "partOfSpeech", -3, 0),
    // field
    ("agric", "", 0, 0),
    ("anat", "", 0, 0),
    ("archeol", "", 0, 0),
    ("archit", "", 0, 0),
    ("art", "", 0, 0),
    ("astron", "", 0, 0),
    ("audvid", "", 0, 0),
    ("aviat", "", 0, 0),
    ("baseb", "", 0, 0),
    ("biochem", "", 0, 0),
    ("biol", "", 0, 0),
    ("bot", "", 0, 0),
    ("Buddh", "", 0, 0),
    ("bus", "", 0, 0),
    ("cards", "", 0, 0),
    ("chem", "", 0, 0),
    ("Christn", "", 0, 0),
    ("cloth", "", 0, 0),
    ("comp", "", 0, 0),
    ("cryst", "", 0, 0),
    ("dent", "", 0, 0),
    ("ecol", "", 0, 0),
    ("econ", "", 0, 0),
    ("elec", "", 0, 0),
    ("electr", "", 0, 0),
    ("embryo", "", 0, 0),
    ("engr", "", 0, 0),
    ("ent", "", 0, 0),
    ("film", "", 0, 0),
    ("finc", "", 0, 0),
    ("fish", "", 0, 0),
    ("food", "", 0, 0),
    ("gardn", "", 0, 0),
    ("genet", "", 0, 0),
    ("geogr", "", 0, 0),
    ("geol", "", 0, 0),
    ("geom", "", 0, 0),
    ("go", "", 0, 0),
    ("golf", "", 0, 0),
    ("gramm", "", 0, 0),
    ("grmyth", "", 0, 0),
    ("hanaf", "", 0, 0),
    ("horse", "", 0, 0),
    ("kabuki", "", 0, 0),
    ("law", "", 0, 0),
    ("ling", "", 0, 0),
    ("logic", "", 0, 0),
    ("MA", "", 0, 0),
    ("mahj", "", 0, 0),
    ("manga", "", 0, 0),
    ("math", "", 0, 0),
    ("mech", "", 0, 0),
    ("med", "", 0, 0),
    ("met", "", 0, 0),
    ("mil", "", 0, 0),
    ("mining", "", 0, 0),
    ("music", "", 0, 0),
    ("noh", "", 0, 0),
    ("ornith", "", 0, 0),
    ("paleo", "", 0, 0),
    ("pathol", "", 0, 0),
    ("pharm", "", 0, 0),
    ("phil", "", 0, 0),
    ("photo", "", 0, 0),
    ("physics", "", 0, 0),
    ("physiol", "", 0, 0),
    ("politics", "", 0, 0),
    ("print", "", 0, 0),
    ("psy", "", 0, 0),
    ("psyanal", "", 0, 0),
    ("psych", "", 0, 0),
    ("rail", "", 0, 0),
    ("rommyth", "", 0, 0),
    ("Shinto", "", 0, 0),
    ("shogi", "", 0, 0),
    ("ski", "", 0, 0),
    ("sports", "", 0, 0),
    ("stat", "", 0, 0),
    ("stockm", "", 0, 0),
    ("sumo", "", 0, 0),
    ("telec", "", 0, 0),
    ("tradem", "", 0, 0),
    ("tv", "", 0, 0),
    ("vidg", "", 0, 0),
    ("zool", "", 0, 0),
    // dial
    ("bra", "", 0, 0),
    ("hob", "", 0, 0),
    ("ksb", "", 0, 0),
    ("ktb", "", 0, 0),
    ("kyb", "", 0, 0),
    ("kyu", "", 0, 0),
    ("nab", "", 0, 0),
    ("osb", "", 0, 0),
    ("rkb", "", 0, 0),
    ("thb", "", 0, 0),
    ("tsb", "", 0, 0),
    ("tsug", "", 0, 0),
];

/// The static entity catalogue, without notes.
pub fn known_entity_tags() -> Vec<Tag> {
    KNOWN_ENTITY_TAGS
        .iter()
        .map(|&(name, category, order, score)| Tag::new(name, category, order, score))
        .collect()
}

/// Merge source-declared entity notes into the catalogue.
///
/// Known tags take the declared notes. Unknown tags are logged and appended
/// with no category.
pub fn entity_tags(entities: &TagGlossary) -> Vec<Tag> {
    let mut tags = known_entity_tags();
    for (name, notes) in entities {
        match tags.iter_mut().find(|t| &t.name == name) {
            Some(tag) => tag.notes = notes.clone(),
            None => {
                warn!("Unknown tag type {}: {}", name, notes);
                tags.push(Tag::new(name, "", 0, 0).with_notes(notes.as_str()));
            }
        }
    }
    tags
}

/// `news1k` .. `news24k`: rank bands of the Mainichi Shimbun frequency list.
pub fn news_frequency_tags() -> Vec<Tag> {
    (1..=24)
        .map(|i| {
            let start = if i == 1 {
                "1".to_string()
            } else {
                format!("{},000", i - 1)
            };
            let end = format!("{},000", i);
            Tag::new(&format!("news{}k", i), "frequent", -2, 0).with_notes(format!(
                "ranked between the top {} and {} words in a frequency analysis of the Mainichi Shimbun (1990s)",
                start, end
            ))
        })
        .collect()
}

/// Display tags produced by headword flags and priority lists.
pub fn custom_tags() -> Vec<Tag> {
    vec![
        Tag::new(langs::PRIORITY_TAG, "popular", -10, 10).with_notes("high priority term"),
        Tag::new(langs::RARE_KANJI_TAG, "archaism", 0, -5)
            .with_notes("rarely-used kanji form of this expression"),
        Tag::new(langs::IRREGULAR_TAG, "archaism", 0, -5).with_notes("irregular form of this expression"),
        Tag::new(langs::OUTDATED_TAG, "archaism", 0, -5).with_notes("outdated form of this expression"),
        Tag::new("ichi", "frequent", -2, 0)
            .with_notes("included in Ichimango Goi Bunruishuu (１万語語彙分類集)"),
        Tag::new("spec", "frequent", -2, 0).with_notes("specified as common by JMdict editors"),
        Tag::new("gai", "frequent", -2, 0).with_notes("common loanword (gairaigo・外来語)"),
        Tag::new(langs::FORMS_TAG, "", 0, 0).with_notes("other surface forms and readings"),
    ]
}

/// One tag per sense number, shown left of everything else.
pub fn sense_number_tags(max_sense_count: usize) -> Vec<Tag> {
    (1..=max_sense_count)
        .map(|i| Tag::new(&i.to_string(), "", -10, 0).with_notes(format!("JMdict Sense #{}", i)))
        .collect()
}

/// The full tag bank of a structured lexicon.
pub fn jmdict_tags(entities: &TagGlossary, max_sense_count: usize) -> Vec<Tag> {
    let mut tags = entity_tags(entities);
    tags.extend(sense_number_tags(max_sense_count));
    tags.extend(news_frequency_tags());
    tags.extend(custom_tags());
    tags
}

/// Tags and stat keys used by kanji rows. `dictionary_refs` are the
/// reference index types present in the source.
pub fn kanji_tags(dictionary_refs: &[String]) -> Vec<Tag> {
    let mut tags = vec![
        Tag::new("jouyou", "frequent", 0, 0).with_notes("included in list of regular-use characters"),
        Tag::new("jinmeiyou", "frequent", 0, 0)
            .with_notes("included in list of characters for use in personal names"),
        Tag::new("freq", "misc", 0, 0).with_notes("Frequency"),
        Tag::new("grade", "class", 0, 0).with_notes("School grade level"),
        Tag::new("jlpt", "class", 0, 0).with_notes("Japanese Language Proficiency Test level"),
        Tag::new("strokes", "misc", 0, 0).with_notes("Stroke count"),
    ];
    for reference in dictionary_refs {
        tags.push(Tag::new(reference, "index", 0, 0).with_notes(reference.as_str()));
    }
    tags
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

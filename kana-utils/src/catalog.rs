//! The static hiragana catalog: the gojūon table organized by learning
//! order, plus a vocabulary list restricted to the base letters (no dakuten,
//! no small kana), so every word can be unlocked by selecting letters.

use std::sync::LazyLock;

use crate::{LetterEntry, LetterGroup, WordEntry};

const LETTER_GROUPS_RAW: &[(&str, &[(&str, &str)])] = &[
    (
        "Vowels",
        &[
            ("あ", "a"),
            ("い", "i"),
            ("う", "u"),
            ("え", "e"),
            ("お", "o"),
        ],
    ),
    (
        "K-sounds",
        &[
            ("か", "ka"),
            ("き", "ki"),
            ("く", "ku"),
            ("け", "ke"),
            ("こ", "ko"),
        ],
    ),
    (
        "S-sounds",
        &[
            ("さ", "sa"),
            ("し", "shi"),
            ("す", "su"),
            ("せ", "se"),
            ("そ", "so"),
        ],
    ),
    (
        "T-sounds",
        &[
            ("た", "ta"),
            ("ち", "chi"),
            ("つ", "tsu"),
            ("て", "te"),
            ("と", "to"),
        ],
    ),
    (
        "N-sounds",
        &[
            ("な", "na"),
            ("に", "ni"),
            ("ぬ", "nu"),
            ("ね", "ne"),
            ("の", "no"),
        ],
    ),
    (
        "H-sounds",
        &[
            ("は", "ha"),
            ("ひ", "hi"),
            ("ふ", "fu"),
            ("へ", "he"),
            ("ほ", "ho"),
        ],
    ),
    (
        "M-sounds",
        &[
            ("ま", "ma"),
            ("み", "mi"),
            ("む", "mu"),
            ("め", "me"),
            ("も", "mo"),
        ],
    ),
    ("Y-sounds", &[("や", "ya"), ("ゆ", "yu"), ("よ", "yo")]),
    (
        "R-sounds",
        &[
            ("ら", "ra"),
            ("り", "ri"),
            ("る", "ru"),
            ("れ", "re"),
            ("ろ", "ro"),
        ],
    ),
    (
        "W-sounds & N",
        &[
            ("わ", "wa"),
            ("ゐ", "wi"),
            ("ゑ", "we"),
            ("を", "wo"),
            ("ん", "n"),
        ],
    ),
];

const WORDS_RAW: &[(&str, &str, &str)] = &[
    ("あい", "ai", "love"),
    ("あお", "ao", "blue"),
    ("いえ", "ie", "house"),
    ("うえ", "ue", "up"),
    ("えき", "eki", "station"),
    ("おかね", "okane", "money"),
    ("かお", "kao", "face"),
    ("かさ", "kasa", "umbrella"),
    ("きのこ", "kinoko", "mushroom"),
    ("くも", "kumo", "cloud"),
    ("こえ", "koe", "voice"),
    ("さかな", "sakana", "fish"),
    ("しろ", "shiro", "white"),
    ("すし", "sushi", "sushi"),
    ("せかい", "sekai", "world"),
    ("そら", "sora", "sky"),
    ("たこ", "tako", "octopus"),
    ("ちかてつ", "chikatetsu", "subway"),
    ("つくえ", "tsukue", "desk"),
    ("てら", "tera", "temple"),
    ("とり", "tori", "bird"),
    ("なつ", "natsu", "summer"),
    ("にく", "niku", "meat"),
    ("ぬの", "nuno", "cloth"),
    ("ねこ", "neko", "cat"),
    ("のみもの", "nomimono", "drink"),
    ("はな", "hana", "flower"),
    ("ひと", "hito", "person"),
    ("ふね", "fune", "boat"),
    ("へや", "heya", "room"),
    ("ほし", "hoshi", "star"),
    ("ほん", "hon", "book"),
    ("まち", "machi", "town"),
    ("みみ", "mimi", "ear"),
    ("むし", "mushi", "insect"),
    ("めいし", "meishi", "business card"),
    ("もり", "mori", "forest"),
    ("やま", "yama", "mountain"),
    ("ゆき", "yuki", "snow"),
    ("よる", "yoru", "night"),
    ("らいねん", "rainen", "next year"),
    ("るす", "rusu", "absence"),
    ("れきし", "rekishi", "history"),
    ("ろく", "roku", "six"),
    ("わたし", "watashi", "I"),
];

static LETTER_GROUPS: LazyLock<Vec<LetterGroup>> = LazyLock::new(|| {
    LETTER_GROUPS_RAW
        .iter()
        .map(|(group_id, letters)| LetterGroup {
            group_id: group_id.to_string(),
            letters: letters
                .iter()
                .map(|(symbol, romanization)| LetterEntry {
                    symbol: symbol.to_string(),
                    romanization: romanization.to_string(),
                    group_id: group_id.to_string(),
                })
                .collect(),
        })
        .collect()
});

static WORDS: LazyLock<Vec<WordEntry>> = LazyLock::new(|| {
    WORDS_RAW
        .iter()
        .map(|(symbol, romanization, meaning)| WordEntry {
            symbol: symbol.to_string(),
            romanization: romanization.to_string(),
            meaning: meaning.to_string(),
        })
        .collect()
});

pub fn letter_groups() -> &'static [LetterGroup] {
    &LETTER_GROUPS
}

/// All letters flattened, in learning order.
pub fn letters() -> impl Iterator<Item = &'static LetterEntry> {
    LETTER_GROUPS.iter().flat_map(|group| group.letters.iter())
}

pub fn words() -> &'static [WordEntry] {
    &WORDS
}

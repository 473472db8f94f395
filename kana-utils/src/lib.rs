pub mod catalog;
pub mod shuffle;

/// The two kinds of practice material a deck can hold.
#[derive(
    Copy,
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum ItemKind {
    Letters,
    Words,
}

impl ItemKind {
    /// Offset added to the session seed before shuffling, so the letter and
    /// word decks never share a permutation pattern for the same nominal seed.
    pub fn seed_offset(&self) -> i64 {
        match self {
            ItemKind::Letters => 0,
            ItemKind::Words => 1000,
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Letters => write!(f, "letters"),
            ItemKind::Words => write!(f, "words"),
        }
    }
}

/// A single hiragana symbol with its romanized pronunciation.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct LetterEntry {
    pub symbol: String,
    pub romanization: String,
    pub group_id: String,
}

/// A vocabulary word written entirely in hiragana.
#[derive(
    Clone,
    Debug,
    serde::Serialize,
    serde::Deserialize,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct WordEntry {
    pub symbol: String,
    pub romanization: String,
    pub meaning: String,
}

/// A row of the gojūon table, in learning order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct LetterGroup {
    pub group_id: String,
    pub letters: Vec<LetterEntry>,
}

/// The seam that lets one deck/drill implementation serve both item kinds.
pub trait DrillItem: Clone {
    /// The hiragana text shown on the front of the card.
    fn symbol(&self) -> &str;

    /// The romanization a guess is checked against.
    fn answer(&self) -> &str;

    /// What the presenter shows once the answer is revealed.
    fn answer_display(&self) -> String;

    /// An item can be practiced only when every one of its symbols is
    /// currently selected.
    fn is_available(&self, is_selected: &dyn Fn(char) -> bool) -> bool {
        self.symbol().chars().all(is_selected)
    }
}

impl DrillItem for LetterEntry {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn answer(&self) -> &str {
        &self.romanization
    }

    fn answer_display(&self) -> String {
        self.romanization.clone()
    }
}

impl DrillItem for WordEntry {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn answer(&self) -> &str {
        &self.romanization
    }

    fn answer_display(&self) -> String {
        format!("{} ({})", self.romanization, self.meaning)
    }
}

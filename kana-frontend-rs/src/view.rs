//! Render states handed to the JS presenter. These are plain data; the
//! presenter owns all DOM concerns, this module only decides what is worth
//! showing.

use kana_utils::{DrillItem, ItemKind, LetterEntry, catalog};

use crate::deck::SessionDeck;
use crate::drill::{DrillMode, DrillState, FadePhase};
use crate::selection::SelectionSet;

pub const BACKSPACE_KEY: &str = "BACKSPACE";

/// On-screen keyboard layout: alphabetical rows with backspace closing the
/// first row.
const KEYBOARD_ROWS: [&[&str]; 3] = [
    &["a", "b", "c", "d", "e", "f", "g", "h", BACKSPACE_KEY],
    &["i", "j", "k", "l", "m", "n", "o", "p", "q"],
    &["r", "s", "t", "u", "v", "w", "x", "y", "z"],
];

const EMPTY_LETTERS_MESSAGE: &str =
    "Select some letters in the Configuration tab to start practicing!";
const EMPTY_WORDS_MESSAGE: &str =
    "Select some letters in the Configuration tab to start practicing words!";

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct RenderState {
    pub seed: i64,
    pub groups: Vec<GroupView>,
    pub letters: DrillView,
    pub words: DrillView,
    pub keyboard_rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct GroupView {
    pub group_id: String,
    /// "Deselect" when the whole group is selected, otherwise "Select All".
    pub button_label: String,
    pub fully_selected: bool,
    pub letters: Vec<LetterTileView>,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct LetterTileView {
    pub entry: LetterEntry,
    pub selected: bool,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct DrillView {
    pub kind: ItemKind,
    pub mode: DrillMode,
    pub deck_len: usize,
    pub position: usize,
    /// Set instead of `card` when the filtered deck has nothing in it.
    pub empty_message: Option<String>,
    pub card: Option<CardView>,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct CardView {
    pub prompt: String,
    pub answer: String,
    pub answer_revealed: bool,
    pub choices: Vec<ChoiceView>,
    pub correct_picked: bool,
    pub try_again: bool,
    pub progress_active: bool,
    pub fade: FadePhase,
    pub typed: TypedView,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct ChoiceView {
    pub label: String,
    pub disabled: bool,
    pub marked_correct: bool,
    pub marked_wrong: bool,
}

#[derive(Clone, Debug, serde::Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
pub struct TypedView {
    pub buffer: String,
    pub matched: bool,
    pub feedback_visible: bool,
}

pub(crate) fn keyboard_rows() -> Vec<Vec<String>> {
    KEYBOARD_ROWS
        .iter()
        .map(|row| row.iter().map(|key| key.to_string()).collect())
        .collect()
}

pub(crate) fn group_views(selection: &SelectionSet) -> Vec<GroupView> {
    catalog::letter_groups()
        .iter()
        .map(|group| {
            let fully_selected = selection.is_group_fully_selected(&group.group_id);
            GroupView {
                group_id: group.group_id.clone(),
                button_label: if fully_selected {
                    "Deselect".to_string()
                } else {
                    "Select All".to_string()
                },
                fully_selected,
                letters: group
                    .letters
                    .iter()
                    .map(|entry| LetterTileView {
                        entry: entry.clone(),
                        selected: selection.contains(&entry.symbol),
                    })
                    .collect(),
            }
        })
        .collect()
}

pub(crate) fn drill_view<T: DrillItem>(deck: &SessionDeck<T>, drill: &DrillState) -> DrillView {
    let empty_message = if deck.is_empty() {
        Some(
            match deck.kind() {
                ItemKind::Letters => EMPTY_LETTERS_MESSAGE,
                ItemKind::Words => EMPTY_WORDS_MESSAGE,
            }
            .to_string(),
        )
    } else {
        None
    };

    let card = drill.prompt().map(|prompt| CardView {
        prompt: prompt.to_string(),
        answer: drill.answer_display().unwrap_or_default().to_string(),
        answer_revealed: drill.is_revealed(),
        choices: drill
            .choices()
            .iter()
            .map(|choice| ChoiceView {
                label: choice.romanization.clone(),
                disabled: drill.is_choice_disabled(choice),
                marked_correct: choice.is_correct && drill.correct_picked(),
                marked_wrong: drill.is_choice_marked_wrong(choice),
            })
            .collect(),
        correct_picked: drill.correct_picked(),
        try_again: drill.try_again_visible(),
        progress_active: drill.progress_active(),
        fade: drill.fade(),
        typed: TypedView {
            buffer: drill.typed_buffer().to_string(),
            matched: drill.typed_matched(),
            feedback_visible: drill.typed_feedback_visible(),
        },
    });

    DrillView {
        kind: deck.kind(),
        mode: drill.mode(),
        deck_len: deck.len(),
        position: deck.position(),
        empty_message,
        card,
    }
}

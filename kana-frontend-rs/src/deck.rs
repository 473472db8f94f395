//! An ordered practice sequence for one item kind, with a cursor. The deck
//! is rebuilt (filter, then deterministic shuffle) whenever the selection or
//! the seed changes; advancing only moves the cursor and never reorders.

use kana_utils::shuffle::seeded_shuffle;
use kana_utils::{DrillItem, ItemKind};

use crate::selection::SelectionSet;

#[derive(Clone, Debug)]
pub struct SessionDeck<T: DrillItem> {
    kind: ItemKind,
    ordered: Vec<T>,
    cursor: usize,
}

impl<T: DrillItem> SessionDeck<T> {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            ordered: Vec::new(),
            cursor: 0,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The only operation that changes the ordering. Keeps the items whose
    /// every symbol is selected, shuffles them with the kind's seed offset
    /// applied, and puts the cursor back at the start.
    pub fn rebuild(&mut self, source: &[T], selection: &SelectionSet, seed: i64) {
        let available: Vec<T> = source
            .iter()
            .filter(|item| item.is_available(&|ch| selection.contains_char(ch)))
            .cloned()
            .collect();
        self.ordered = seeded_shuffle(&available, seed + self.kind.seed_offset());
        self.cursor = 0;
    }

    pub fn current(&self) -> Option<&T> {
        // A cursor that somehow ran past the end wraps to the start instead
        // of failing.
        self.ordered.get(self.cursor).or_else(|| self.ordered.first())
    }

    pub fn advance(&mut self) {
        if self.ordered.is_empty() {
            self.cursor = 0;
            return;
        }
        self.cursor = (self.cursor + 1) % self.ordered.len();
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Cursor position, normalized the same way `current` is.
    pub fn position(&self) -> usize {
        if self.cursor < self.ordered.len() {
            self.cursor
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{self, MemoryStore};
    use kana_utils::catalog;

    fn selection_of(symbols: &[&str]) -> SelectionSet {
        let store = MemoryStore::default();
        storage::save_selection(&store, symbols);
        SelectionSet::load(&store)
    }

    fn letter_source() -> Vec<kana_utils::LetterEntry> {
        catalog::letters().cloned().collect()
    }

    #[test]
    fn test_rebuild_filters_to_the_selection() {
        let selection = selection_of(&["あ", "い", "う", "え", "お"]);
        let mut deck = SessionDeck::new(ItemKind::Letters);
        deck.rebuild(&letter_source(), &selection, 50);
        assert_eq!(deck.len(), 5);
        let symbols: Vec<&str> = deck.ordered.iter().map(|l| l.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["え", "う", "お", "い", "あ"]);
    }

    #[test]
    fn test_rebuild_resets_the_cursor() {
        let selection = selection_of(&["あ", "い", "う", "え", "お"]);
        let mut deck = SessionDeck::new(ItemKind::Letters);
        deck.rebuild(&letter_source(), &selection, 50);
        deck.advance();
        deck.advance();
        assert_eq!(deck.position(), 2);
        deck.rebuild(&letter_source(), &selection, 51);
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_advance_cycles_back_to_the_start() {
        let selection = selection_of(&["あ", "い", "う"]);
        let mut deck = SessionDeck::new(ItemKind::Letters);
        deck.rebuild(&letter_source(), &selection, 50);
        let first = deck.current().unwrap().symbol.clone();
        for _ in 0..deck.len() {
            deck.advance();
        }
        assert_eq!(deck.current().unwrap().symbol, first);
        assert_eq!(deck.position(), 0);
    }

    #[test]
    fn test_empty_selection_means_empty_deck() {
        let store = MemoryStore::default();
        let mut selection = SelectionSet::load(&store);
        selection.clear(&store);
        let mut deck = SessionDeck::new(ItemKind::Letters);
        deck.rebuild(&letter_source(), &selection, 50);
        assert!(deck.is_empty());
        assert!(deck.current().is_none());
        // Advancing an empty deck is a no-op, not a crash.
        deck.advance();
        assert!(deck.current().is_none());
    }

    #[test]
    fn test_word_needs_every_letter_selected() {
        let both = selection_of(&["あ", "い"]);
        let mut deck = SessionDeck::new(ItemKind::Words);
        deck.rebuild(catalog::words(), &both, 50);
        let symbols: Vec<&str> = deck.ordered.iter().map(|w| w.symbol.as_str()).collect();
        assert!(symbols.contains(&"あい"));

        let only_a = selection_of(&["あ"]);
        deck.rebuild(catalog::words(), &only_a, 50);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_word_deck_uses_the_seed_offset() {
        let store = MemoryStore::default();
        let mut selection = SelectionSet::load(&store);
        selection.select_all(&store);

        let mut deck = SessionDeck::new(ItemKind::Words);
        deck.rebuild(catalog::words(), &selection, 50);

        let expected = seeded_shuffle(catalog::words(), 1050);
        let got: Vec<&str> = deck.ordered.iter().map(|w| w.symbol.as_str()).collect();
        let want: Vec<&str> = expected.iter().map(|w| w.symbol.as_str()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let selection = selection_of(&["か", "き", "く", "け", "こ", "さ", "し"]);
        let mut a = SessionDeck::new(ItemKind::Letters);
        let mut b = SessionDeck::new(ItemKind::Letters);
        a.rebuild(&letter_source(), &selection, 123);
        b.rebuild(&letter_source(), &selection, 123);
        let order_a: Vec<&str> = a.ordered.iter().map(|l| l.symbol.as_str()).collect();
        let order_b: Vec<&str> = b.ordered.iter().map(|l| l.symbol.as_str()).collect();
        assert_eq!(order_a, order_b);
    }
}

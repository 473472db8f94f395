//! The set of letters the learner has chosen to practice. Every mutation is
//! written straight back through the store, so the selection survives a
//! reload; there is no separate save step.

use kana_utils::catalog;
use rustc_hash::FxHashSet;

use crate::storage::{self, Store};

/// How many letters get selected on a fresh profile (the first three rows of
/// the table: vowels, K-sounds, S-sounds).
pub const DEFAULT_SELECTION_COUNT: usize = 15;

#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    selected: FxHashSet<String>,
}

impl SelectionSet {
    /// Loads the persisted selection. A missing, malformed or empty value
    /// falls back to the default starter letters (and persists them, so the
    /// next load is ordinary).
    pub fn load(store: &dyn Store) -> Self {
        let selected: FxHashSet<String> = match storage::load_selection(store) {
            Ok(symbols) => symbols.into_iter().collect(),
            Err(err) => {
                if !err.is_missing() {
                    log::warn!("Discarding stored selection: {err}");
                }
                FxHashSet::default()
            }
        };

        let mut selection = Self { selected };
        if selection.selected.is_empty() {
            selection.selected = catalog::letters()
                .take(DEFAULT_SELECTION_COUNT)
                .map(|letter| letter.symbol.clone())
                .collect();
            selection.persist(store);
        }
        selection
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.selected.contains(symbol)
    }

    pub fn contains_char(&self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.selected.contains(ch.encode_utf8(&mut buf) as &str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flips one symbol in or out of the set. Unknown symbols are accepted;
    /// they never match a catalog entry, so they are harmless.
    pub fn toggle(&mut self, symbol: &str, store: &dyn Store) {
        if !self.selected.remove(symbol) {
            self.selected.insert(symbol.to_string());
        }
        self.persist(store);
    }

    /// Full-toggle on a group: if every letter in the group is selected,
    /// deselect them all, otherwise select them all.
    pub fn toggle_group(&mut self, group_id: &str, store: &dyn Store) {
        let Some(group) = catalog::letter_groups()
            .iter()
            .find(|group| group.group_id == group_id)
        else {
            return;
        };

        if group
            .letters
            .iter()
            .all(|letter| self.selected.contains(&letter.symbol))
        {
            for letter in &group.letters {
                self.selected.remove(&letter.symbol);
            }
        } else {
            for letter in &group.letters {
                self.selected.insert(letter.symbol.clone());
            }
        }
        self.persist(store);
    }

    pub fn select_all(&mut self, store: &dyn Store) {
        self.selected = catalog::letters()
            .map(|letter| letter.symbol.clone())
            .collect();
        self.persist(store);
    }

    pub fn clear(&mut self, store: &dyn Store) {
        self.selected.clear();
        self.persist(store);
    }

    pub fn is_group_fully_selected(&self, group_id: &str) -> bool {
        catalog::letter_groups()
            .iter()
            .find(|group| group.group_id == group_id)
            .is_some_and(|group| {
                group
                    .letters
                    .iter()
                    .all(|letter| self.selected.contains(&letter.symbol))
            })
    }

    pub fn is_group_empty(&self, group_id: &str) -> bool {
        catalog::letter_groups()
            .iter()
            .find(|group| group.group_id == group_id)
            .is_some_and(|group| {
                group
                    .letters
                    .iter()
                    .all(|letter| !self.selected.contains(&letter.symbol))
            })
    }

    fn persist(&self, store: &dyn Store) {
        let mut symbols: Vec<&str> = self.selected.iter().map(String::as_str).collect();
        symbols.sort_unstable();
        storage::save_selection(store, &symbols);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store_with_selection(symbols: &[&str]) -> MemoryStore {
        let store = MemoryStore::default();
        storage::save_selection(&store, symbols);
        store
    }

    #[test]
    fn test_fresh_profile_gets_the_default_letters() {
        let store = MemoryStore::default();
        let selection = SelectionSet::load(&store);
        assert_eq!(selection.len(), DEFAULT_SELECTION_COUNT);
        assert!(selection.contains("あ"));
        assert!(selection.contains("そ"));
        assert!(!selection.contains("た"));
        // The defaults are persisted right away.
        let reloaded = SelectionSet::load(&store);
        assert_eq!(reloaded.len(), DEFAULT_SELECTION_COUNT);
    }

    #[test]
    fn test_corrupt_stored_selection_falls_back_to_defaults() {
        let store = MemoryStore::default();
        store.set(storage::SELECTED_LETTERS_KEY, "{{{ not json");
        let selection = SelectionSet::load(&store);
        assert_eq!(selection.len(), DEFAULT_SELECTION_COUNT);
    }

    #[test]
    fn test_toggle_twice_restores_the_original_state() {
        let store = store_with_selection(&["あ"]);
        let mut selection = SelectionSet::load(&store);
        selection.toggle("か", &store);
        assert!(selection.contains("か"));
        selection.toggle("か", &store);
        assert!(!selection.contains("か"));
        assert!(selection.contains("あ"));
    }

    #[test]
    fn test_group_toggle_selects_the_remainder_then_deselects_all() {
        let store = store_with_selection(&["あ", "い"]);
        let mut selection = SelectionSet::load(&store);
        assert!(!selection.is_group_fully_selected("Vowels"));

        selection.toggle_group("Vowels", &store);
        assert!(selection.is_group_fully_selected("Vowels"));
        for symbol in ["あ", "い", "う", "え", "お"] {
            assert!(selection.contains(symbol));
        }

        selection.toggle_group("Vowels", &store);
        assert!(selection.is_group_empty("Vowels"));
    }

    #[test]
    fn test_unknown_group_is_ignored() {
        let store = store_with_selection(&["あ"]);
        let mut selection = SelectionSet::load(&store);
        selection.toggle_group("Z-sounds", &store);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_select_all_is_idempotent() {
        let store = store_with_selection(&["あ"]);
        let mut selection = SelectionSet::load(&store);
        selection.select_all(&store);
        assert_eq!(selection.len(), 48);
        selection.select_all(&store);
        assert_eq!(selection.len(), 48);
    }

    #[test]
    fn test_clear_empties_the_set_without_touching_defaults() {
        let store = store_with_selection(&["あ", "い"]);
        let mut selection = SelectionSet::load(&store);
        selection.clear(&store);
        assert!(selection.is_empty());
        // The cleared state is persisted as-is; defaults only apply on load.
        assert_eq!(storage::load_selection(&store).unwrap().len(), 0);
    }

    #[test]
    fn test_unknown_symbols_are_accepted_and_harmless() {
        let store = store_with_selection(&["あ"]);
        let mut selection = SelectionSet::load(&store);
        selection.toggle("q", &store);
        assert!(selection.contains("q"));
        assert_eq!(selection.len(), 2);
        // It persists and reloads like anything else.
        let reloaded = SelectionSet::load(&store);
        assert!(reloaded.contains("q"));
    }

    #[test]
    fn test_mutations_are_persisted() {
        let store = store_with_selection(&["あ"]);
        let mut selection = SelectionSet::load(&store);
        selection.toggle("ん", &store);
        let reloaded = SelectionSet::load(&store);
        assert!(reloaded.contains("ん"));
        assert!(reloaded.contains("あ"));
    }
}

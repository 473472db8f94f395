//! Browser app core for hiragana flashcard practice. The JS side renders and
//! forwards user events as typed commands; everything that can change state
//! funnels through [`AppState::dispatch`], and the presenter callback is
//! signalled after every change.

mod deck;
mod drill;
mod scheduler;
mod selection;
mod storage;
mod utils;
mod view;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use kana_utils::{ItemKind, LetterEntry, catalog};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use wasm_bindgen::prelude::*;

pub use deck::SessionDeck;
pub use drill::{
    ADVANCE_PROGRESS_MS, CHOICE_COUNT, CORRECT_FEEDBACK_DELAY_MS, Choice, DrillMode, DrillState,
    EffectOutcome, FADE_OUT_MS, FADE_SETTLE_MS, FadePhase, TRY_AGAIN_CLEAR_MS,
    TYPED_FEEDBACK_CLEAR_MS,
};
pub use scheduler::{DeferredEffect, ScheduledEffect, Scheduler};
pub use selection::{DEFAULT_SELECTION_COUNT, SelectionSet};
pub use storage::{MemoryStore, PersistedStateError, Store};
pub use view::{
    BACKSPACE_KEY, CardView, ChoiceView, DrillView, GroupView, LetterTileView, RenderState,
    TypedView,
};

pub const DEFAULT_SEED: i64 = 50;

static ALL_LETTERS: LazyLock<Vec<LetterEntry>> =
    LazyLock::new(|| catalog::letters().cloned().collect());

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
#[allow(clippy::declare_interior_mutable_const)]
const LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

/// Every way the UI can poke the core. The presenter translates DOM events
/// into these; nothing else mutates state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Command {
    ToggleSymbol { symbol: String },
    ToggleGroup { group_id: String },
    SelectAll,
    ClearSelection,
    SetSeed { seed: i64 },
    RandomizeSeed,
    SetDrillMode { kind: ItemKind, mode: DrillMode },
    Reveal { kind: ItemKind },
    StartChoices { kind: ItemKind },
    PickChoice { kind: ItemKind, index: usize },
    Advance { kind: ItemKind },
    CharacterTyped { kind: ItemKind, character: char },
    BackspacePressed { kind: ItemKind },
}

/// The whole session in one place: selection, seed, one deck and one drill
/// per item kind, and the queue of deferred effects. No ambient globals.
pub struct AppState {
    selection: SelectionSet,
    seed: i64,
    letter_deck: SessionDeck<LetterEntry>,
    word_deck: SessionDeck<kana_utils::WordEntry>,
    letter_drill: DrillState,
    word_drill: DrillState,
    scheduler: Scheduler,
}

impl AppState {
    /// Restores the persisted session, falling back to the defaults (first
    /// fifteen letters, seed 50) wherever the store is missing or corrupt.
    pub fn load(store: &dyn Store) -> Self {
        let selection = SelectionSet::load(store);
        let seed = match storage::load_seed(store) {
            Ok(seed) => seed,
            Err(err) => {
                if !err.is_missing() {
                    log::warn!("Discarding stored seed: {err}");
                }
                DEFAULT_SEED
            }
        };

        let mut state = Self {
            selection,
            seed,
            letter_deck: SessionDeck::new(ItemKind::Letters),
            word_deck: SessionDeck::new(ItemKind::Words),
            letter_drill: DrillState::new(ItemKind::Letters),
            word_drill: DrillState::new(ItemKind::Words),
            scheduler: Scheduler::default(),
        };
        state.rebuild_decks();
        state
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn dispatch(&mut self, store: &dyn Store, rng: &mut dyn RngCore, command: Command) {
        match command {
            Command::ToggleSymbol { symbol } => {
                self.selection.toggle(&symbol, store);
                self.rebuild_decks();
            }
            Command::ToggleGroup { group_id } => {
                self.selection.toggle_group(&group_id, store);
                self.rebuild_decks();
            }
            Command::SelectAll => {
                self.selection.select_all(store);
                self.rebuild_decks();
            }
            Command::ClearSelection => {
                self.selection.clear(store);
                self.rebuild_decks();
            }
            Command::SetSeed { seed } => {
                self.seed = seed;
                storage::save_seed(store, seed);
                self.rebuild_decks();
            }
            Command::RandomizeSeed => {
                self.seed = rng.gen_range(1..=999);
                storage::save_seed(store, self.seed);
                self.rebuild_decks();
            }
            Command::SetDrillMode { kind, mode } => {
                self.drill_mut(kind).set_mode(mode);
            }
            Command::Reveal { kind } => {
                self.drill_mut(kind).reveal();
            }
            Command::StartChoices { kind } => {
                let pool = answer_pool(kind);
                self.drill_mut(kind).start_choices(&pool, rng);
            }
            Command::PickChoice { kind, index } => {
                let (drill, scheduler) = self.drill_parts(kind);
                drill.pick_choice(index, scheduler);
            }
            Command::Advance { kind } => {
                self.advance_deck(kind);
            }
            Command::CharacterTyped { kind, character } => {
                let (drill, scheduler) = self.drill_parts(kind);
                drill.character_typed(character, scheduler);
            }
            Command::BackspacePressed { kind } => {
                let (drill, scheduler) = self.drill_parts(kind);
                drill.backspace_pressed(scheduler);
            }
        }
    }

    /// Fires a deferred effect back into the state machine. Effects whose
    /// card generation has moved on are dropped; that is how a manual
    /// advance cancels a pending auto-advance.
    pub fn apply_effect(&mut self, effect: ScheduledEffect) {
        if effect.generation != self.drill(effect.deck).generation() {
            log::debug!(
                "Dropping stale {:?} for the {} drill",
                effect.effect,
                effect.deck
            );
            return;
        }
        let (drill, scheduler) = self.drill_parts(effect.deck);
        match drill.apply_effect(effect.effect, scheduler) {
            EffectOutcome::Stay => {}
            EffectOutcome::Advance => {
                self.advance_deck(effect.deck);
                let (drill, scheduler) = self.drill_parts(effect.deck);
                drill.begin_fade_in(scheduler);
            }
        }
    }

    /// Hands queued timer effects to the host for scheduling.
    pub fn take_scheduled_effects(&mut self) -> Vec<ScheduledEffect> {
        self.scheduler.drain()
    }

    pub fn render(&self) -> RenderState {
        RenderState {
            seed: self.seed,
            groups: view::group_views(&self.selection),
            letters: view::drill_view(&self.letter_deck, &self.letter_drill),
            words: view::drill_view(&self.word_deck, &self.word_drill),
            keyboard_rows: view::keyboard_rows(),
        }
    }

    fn rebuild_decks(&mut self) {
        self.letter_deck
            .rebuild(&ALL_LETTERS, &self.selection, self.seed);
        self.word_deck
            .rebuild(catalog::words(), &self.selection, self.seed);
        self.letter_drill.set_card(self.letter_deck.current());
        self.word_drill.set_card(self.word_deck.current());
    }

    fn advance_deck(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Letters => {
                self.letter_deck.advance();
                self.letter_drill.set_card(self.letter_deck.current());
            }
            ItemKind::Words => {
                self.word_deck.advance();
                self.word_drill.set_card(self.word_deck.current());
            }
        }
    }

    fn drill(&self, kind: ItemKind) -> &DrillState {
        match kind {
            ItemKind::Letters => &self.letter_drill,
            ItemKind::Words => &self.word_drill,
        }
    }

    fn drill_mut(&mut self, kind: ItemKind) -> &mut DrillState {
        match kind {
            ItemKind::Letters => &mut self.letter_drill,
            ItemKind::Words => &mut self.word_drill,
        }
    }

    fn drill_parts(&mut self, kind: ItemKind) -> (&mut DrillState, &mut Scheduler) {
        match kind {
            ItemKind::Letters => (&mut self.letter_drill, &mut self.scheduler),
            ItemKind::Words => (&mut self.word_drill, &mut self.scheduler),
        }
    }
}

/// Distractors are drawn from every entry of the kind, not just the
/// selected ones.
fn answer_pool(kind: ItemKind) -> Vec<String> {
    match kind {
        ItemKind::Letters => ALL_LETTERS
            .iter()
            .map(|letter| letter.romanization.clone())
            .collect(),
        ItemKind::Words => catalog::words()
            .iter()
            .map(|word| word.romanization.clone())
            .collect(),
    }
}

struct AppInner {
    state: RefCell<AppState>,
    store: Box<dyn Store>,
    rng: RefCell<SmallRng>,
    presenter: RefCell<Option<js_sys::Function>>,
}

impl AppInner {
    fn notify_presenter(&self) {
        if let Some(callback) = &*self.presenter.borrow() {
            let this = JsValue::null();
            let _ = callback.call0(&this);
        }
    }
}

/// Drains the effect queue into host timers, then signals the presenter.
fn flush(inner: &Rc<AppInner>) {
    let effects = inner.state.borrow_mut().take_scheduled_effects();
    for effect in effects {
        schedule_effect(inner, effect);
    }
    inner.notify_presenter();
}

#[cfg(target_arch = "wasm32")]
fn schedule_effect(inner: &Rc<AppInner>, effect: ScheduledEffect) {
    use wasm_bindgen::JsCast;

    let inner = Rc::clone(inner);
    let callback = wasm_bindgen::closure::Closure::once_into_js(move || {
        inner.state.borrow_mut().apply_effect(effect);
        flush(&inner);
    });
    let Some(window) = web_sys::window() else {
        log::warn!("No window to schedule timers on");
        return;
    };
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            effect.delay_ms as i32,
        )
        .is_err()
    {
        log::warn!("Failed to schedule {:?}", effect.effect);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule_effect(_inner: &Rc<AppInner>, effect: ScheduledEffect) {
    // Outside the browser there is no event loop to hand timers to; native
    // callers drive AppState and its effect queue directly.
    log::debug!("No host timer for {:?}", effect.effect);
}

/// The wasm entry point. Owns the state behind a `RefCell`; every JS call
/// runs to completion before the next one, so borrows never overlap.
#[wasm_bindgen]
pub struct KanaApp {
    inner: Rc<AppInner>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl KanaApp {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        // used to only initialize the logger once
        #[allow(clippy::borrow_interior_mutable_const)]
        *LOGGER;

        let store = default_store();
        let state = AppState::load(store.as_ref());
        Self {
            inner: Rc::new(AppInner {
                state: RefCell::new(state),
                store,
                rng: RefCell::new(SmallRng::from_entropy()),
                presenter: RefCell::new(None),
            }),
        }
    }

    /// Registers the render callback. It is invoked (with no arguments) after
    /// every state change; the presenter then pulls `render_state`.
    pub fn set_presenter(&self, callback: js_sys::Function) {
        *self.inner.presenter.borrow_mut() = Some(callback);
        self.inner.notify_presenter();
    }

    pub fn dispatch(&self, command: Command) {
        {
            let mut state = self.inner.state.borrow_mut();
            let mut rng = self.inner.rng.borrow_mut();
            state.dispatch(self.inner.store.as_ref(), &mut *rng, command);
        }
        flush(&self.inner);
    }

    pub fn render_state(&self) -> RenderState {
        self.inner.state.borrow().render()
    }
}

impl Default for KanaApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn default_store() -> Box<dyn Store> {
    Box::new(storage::LocalStorage)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_store() -> Box<dyn Store> {
    Box::new(MemoryStore::default())
}

//! Per-card interaction state. One `DrillState` wraps whichever entry its
//! deck is currently pointing at and runs the reveal / multiple-choice /
//! typed-input surfaces over it. All timing goes through the scheduler as
//! tagged effects; the generation counter ties every deferred effect to the
//! card visit that scheduled it.

use kana_utils::{DrillItem, ItemKind};
use rand::RngCore;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

use crate::scheduler::{DeferredEffect, ScheduledEffect, Scheduler};

/// Pause between picking the right answer and the progress bar starting.
pub const CORRECT_FEEDBACK_DELAY_MS: u32 = 50;
/// Length of the progress animation that ends in the next card.
pub const ADVANCE_PROGRESS_MS: u32 = 750;
/// The outgoing card starts fading this long before it is replaced.
pub const FADE_OUT_MS: u32 = 300;
/// Settle time before the incoming card fades back in.
pub const FADE_SETTLE_MS: u32 = 50;
/// How long the "try again" indicator stays up after a wrong pick.
pub const TRY_AGAIN_CLEAR_MS: u32 = 400;
/// How long the typed-input match flash stays up.
pub const TYPED_FEEDBACK_CLEAR_MS: u32 = 1000;

/// Total buttons in multiple-choice mode, correct answer included.
pub const CHOICE_COUNT: usize = 10;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum DrillMode {
    Typed,
    Choice,
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum FadePhase {
    #[default]
    None,
    FadingOut,
    FadingIn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    AnswerRevealed,
    ChoicesShown,
    Correct,
}

#[derive(Clone, Debug)]
pub struct Choice {
    pub romanization: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug)]
struct Target {
    prompt: String,
    answer: String,
    answer_display: String,
}

/// What the app should do after a deferred effect was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EffectOutcome {
    Stay,
    /// The auto-advance completed: move the deck and install the next card.
    Advance,
}

#[derive(Debug)]
pub struct DrillState {
    kind: ItemKind,
    mode: DrillMode,
    generation: u64,
    phase: Phase,
    target: Option<Target>,
    choices: Vec<Choice>,
    wrong_choices: FxHashSet<String>,
    try_again_visible: bool,
    progress_active: bool,
    fade: FadePhase,
    typed_buffer: String,
    typed_matched: bool,
    typed_feedback: bool,
}

impl DrillState {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            mode: DrillMode::Choice,
            generation: 0,
            phase: Phase::Idle,
            target: None,
            choices: Vec::new(),
            wrong_choices: FxHashSet::default(),
            try_again_visible: false,
            progress_active: false,
            fade: FadePhase::None,
            typed_buffer: String::new(),
            typed_matched: false,
            typed_feedback: false,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn mode(&self) -> DrillMode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn prompt(&self) -> Option<&str> {
        self.target.as_ref().map(|target| target.prompt.as_str())
    }

    pub fn answer_display(&self) -> Option<&str> {
        self.target
            .as_ref()
            .map(|target| target.answer_display.as_str())
    }

    pub fn is_revealed(&self) -> bool {
        self.phase == Phase::AnswerRevealed
    }

    pub fn correct_picked(&self) -> bool {
        self.phase == Phase::Correct
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn is_choice_disabled(&self, choice: &Choice) -> bool {
        self.phase == Phase::Correct || self.wrong_choices.contains(&choice.romanization)
    }

    pub fn is_choice_marked_wrong(&self, choice: &Choice) -> bool {
        self.wrong_choices.contains(&choice.romanization)
    }

    pub fn try_again_visible(&self) -> bool {
        self.try_again_visible
    }

    pub fn progress_active(&self) -> bool {
        self.progress_active
    }

    pub fn fade(&self) -> FadePhase {
        self.fade
    }

    pub fn typed_buffer(&self) -> &str {
        &self.typed_buffer
    }

    pub fn typed_matched(&self) -> bool {
        self.typed_matched
    }

    pub fn typed_feedback_visible(&self) -> bool {
        self.typed_feedback
    }

    /// Points the drill at a new card (or at nothing, for an empty deck).
    /// All per-card-visit state is dropped and the generation moves on, which
    /// invalidates every effect still queued for the previous card.
    pub fn set_card<T: DrillItem>(&mut self, item: Option<&T>) {
        self.target = item.map(|item| Target {
            prompt: item.symbol().to_string(),
            answer: item.answer().to_string(),
            answer_display: item.answer_display(),
        });
        self.reset_visit();
    }

    /// Switching surfaces restarts the visit to the current card.
    pub fn set_mode(&mut self, mode: DrillMode) {
        self.mode = mode;
        self.reset_visit();
    }

    fn reset_visit(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.choices.clear();
        self.wrong_choices.clear();
        self.try_again_visible = false;
        self.progress_active = false;
        self.fade = FadePhase::None;
        self.typed_buffer.clear();
        self.typed_matched = false;
        self.typed_feedback = false;
    }

    pub fn reveal(&mut self) {
        if self.phase == Phase::Idle && self.target.is_some() {
            self.phase = Phase::AnswerRevealed;
        }
    }

    /// Builds the multiple-choice row: the correct romanization plus up to
    /// nine distinct wrong ones drawn uniformly (with rejection) from every
    /// catalog entry of this kind, not just the selected ones. The row order
    /// is fresh presentation-only randomness, not tied to the session seed.
    pub fn start_choices(&mut self, pool: &[String], rng: &mut dyn RngCore) {
        if self.phase != Phase::Idle {
            return;
        }
        let Some(target) = &self.target else {
            return;
        };

        let distinct_wrong: FxHashSet<&str> = pool
            .iter()
            .map(String::as_str)
            .filter(|romanization| !romanization.eq_ignore_ascii_case(&target.answer))
            .collect();
        let want = distinct_wrong.len().min(CHOICE_COUNT - 1);

        let mut wrong: Vec<String> = Vec::with_capacity(want);
        while wrong.len() < want {
            let Some(candidate) = pool.choose(&mut *rng) else {
                break;
            };
            if candidate.eq_ignore_ascii_case(&target.answer) {
                continue;
            }
            if wrong.iter().any(|picked| picked == candidate) {
                continue;
            }
            wrong.push(candidate.clone());
        }

        let mut choices: Vec<Choice> = wrong
            .into_iter()
            .map(|romanization| Choice {
                romanization,
                is_correct: false,
            })
            .collect();
        choices.push(Choice {
            romanization: target.answer.clone(),
            is_correct: true,
        });
        choices.shuffle(&mut *rng);

        self.choices = choices;
        self.phase = Phase::ChoicesShown;
    }

    pub fn pick_choice(&mut self, index: usize, scheduler: &mut Scheduler) {
        if self.phase != Phase::ChoicesShown {
            return;
        }
        let Some(choice) = self.choices.get(index) else {
            return;
        };

        if choice.is_correct {
            self.phase = Phase::Correct;
            self.try_again_visible = false;
            scheduler.schedule(ScheduledEffect {
                deck: self.kind,
                generation: self.generation,
                delay_ms: CORRECT_FEEDBACK_DELAY_MS,
                effect: DeferredEffect::BeginAdvanceProgress,
            });
        } else {
            let romanization = choice.romanization.clone();
            if !self.wrong_choices.insert(romanization) {
                // Already disabled for this card.
                return;
            }
            self.try_again_visible = true;
            scheduler.schedule(ScheduledEffect {
                deck: self.kind,
                generation: self.generation,
                delay_ms: TRY_AGAIN_CLEAR_MS,
                effect: DeferredEffect::ClearTryAgain,
            });
        }
    }

    /// Applies a deferred effect that already passed the generation check.
    pub fn apply_effect(
        &mut self,
        effect: DeferredEffect,
        scheduler: &mut Scheduler,
    ) -> EffectOutcome {
        match effect {
            DeferredEffect::ClearTryAgain => {
                self.try_again_visible = false;
                EffectOutcome::Stay
            }
            DeferredEffect::BeginAdvanceProgress => {
                self.progress_active = true;
                scheduler.schedule(ScheduledEffect {
                    deck: self.kind,
                    generation: self.generation,
                    delay_ms: ADVANCE_PROGRESS_MS - FADE_OUT_MS,
                    effect: DeferredEffect::StartFadeOut,
                });
                scheduler.schedule(ScheduledEffect {
                    deck: self.kind,
                    generation: self.generation,
                    delay_ms: ADVANCE_PROGRESS_MS,
                    effect: DeferredEffect::CompleteAdvance,
                });
                EffectOutcome::Stay
            }
            DeferredEffect::StartFadeOut => {
                self.fade = FadePhase::FadingOut;
                EffectOutcome::Stay
            }
            DeferredEffect::CompleteAdvance => EffectOutcome::Advance,
            DeferredEffect::FadeSettle => {
                self.fade = FadePhase::None;
                EffectOutcome::Stay
            }
            DeferredEffect::ClearTypedFeedback => {
                self.typed_feedback = false;
                EffectOutcome::Stay
            }
        }
    }

    /// Called right after the deck advanced and the next card was installed.
    pub fn begin_fade_in(&mut self, scheduler: &mut Scheduler) {
        self.fade = FadePhase::FadingIn;
        scheduler.schedule(ScheduledEffect {
            deck: self.kind,
            generation: self.generation,
            delay_ms: FADE_SETTLE_MS,
            effect: DeferredEffect::FadeSettle,
        });
    }

    pub fn character_typed(&mut self, ch: char, scheduler: &mut Scheduler) {
        if self.target.is_none() || !ch.is_ascii_alphabetic() {
            return;
        }
        self.typed_buffer.push(ch.to_ascii_lowercase());
        self.check_typed(scheduler);
    }

    pub fn backspace_pressed(&mut self, scheduler: &mut Scheduler) {
        if self.typed_buffer.pop().is_some() {
            self.check_typed(scheduler);
        }
    }

    fn check_typed(&mut self, scheduler: &mut Scheduler) {
        let Some(target) = &self.target else {
            return;
        };
        let was_matched = self.typed_matched;
        self.typed_matched = self.typed_buffer.eq_ignore_ascii_case(&target.answer);
        // The flash fires on the edge; deleting and retyping flashes again.
        if self.typed_matched && !was_matched {
            self.typed_feedback = true;
            scheduler.schedule(ScheduledEffect {
                deck: self.kind,
                generation: self.generation,
                delay_ms: TYPED_FEEDBACK_CLEAR_MS,
                effect: DeferredEffect::ClearTypedFeedback,
            });
        }
    }
}

//! Deferred work as data. State transitions never call the host timer API
//! directly; they push a `ScheduledEffect` here and the host (browser
//! `setTimeout`, or a test loop stepping by hand) fires it back into the app
//! after the delay. Each effect carries the generation of the card it was
//! scheduled for, and the app drops any effect whose card is gone. There is
//! no other cancellation mechanism.

use kana_utils::ItemKind;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredEffect {
    ClearTryAgain,
    BeginAdvanceProgress,
    StartFadeOut,
    CompleteAdvance,
    FadeSettle,
    ClearTypedFeedback,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScheduledEffect {
    pub deck: ItemKind,
    /// Card generation this effect belongs to; stale effects are dropped.
    pub generation: u64,
    pub delay_ms: u32,
    pub effect: DeferredEffect,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledEffect>,
}

impl Scheduler {
    pub fn schedule(&mut self, effect: ScheduledEffect) {
        self.pending.push(effect);
    }

    /// Hands the queued effects to the host, emptying the queue.
    pub fn drain(&mut self) -> Vec<ScheduledEffect> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_the_queue() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(ScheduledEffect {
            deck: ItemKind::Letters,
            generation: 1,
            delay_ms: 50,
            effect: DeferredEffect::BeginAdvanceProgress,
        });
        assert!(!scheduler.is_empty());
        let drained = scheduler.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].effect, DeferredEffect::BeginAdvanceProgress);
        assert!(scheduler.is_empty());
        assert!(scheduler.drain().is_empty());
    }
}

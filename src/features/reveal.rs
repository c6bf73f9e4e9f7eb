//! Text reveal
//!
//! Typewriter animation: one more character of the target becomes visible
//! per delivered tick. Prefixes are cut on `char` boundaries so every
//! emission is a valid slice of the target.

use std::sync::Arc;

use crate::config::RegionId;
use crate::features::{EngineError, Generation};
use crate::sink::PresentationSink;

/// Reveal lifecycle for one target string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Revealing,
    Complete,
}

/// What a delivered tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale, cancelled, or already complete; nothing emitted.
    Ignored,
    /// One more character became visible.
    Advanced,
    /// The final character became visible; ticking should stop.
    Completed,
}

/// Outcome of a retarget, telling the caller what to do with its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStart {
    /// New target accepted; schedule ticks under this token.
    Scheduled(Generation),
    /// Empty target; complete on the spot, no ticks needed.
    CompletedImmediately,
    /// Same target already active; keep the existing timer.
    Unchanged,
}

pub struct TextRevealAnimator {
    region: RegionId,
    sink: Arc<dyn PresentationSink>,
    target: String,
    /// Byte offset of every char boundary in `target`, including the end.
    boundaries: Vec<usize>,
    revealed: usize,
    speed_ms: u64,
    phase: RevealPhase,
    generation: Generation,
}

impl TextRevealAnimator {
    pub fn new(region: RegionId, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            region,
            sink,
            target: String::new(),
            boundaries: vec![0],
            revealed: 0,
            speed_ms: 0,
            phase: RevealPhase::Idle,
            generation: Generation::default(),
        }
    }

    /// Aim the reveal at `text`. Distinct text restarts from zero; the
    /// currently active text is left untouched. A rejected speed leaves
    /// prior state untouched.
    pub fn set_target(&mut self, text: &str, speed_ms: u64) -> Result<RevealStart, EngineError> {
        if speed_ms == 0 {
            return Err(EngineError::InvalidSpec(
                "reveal speed must be positive".to_string(),
            ));
        }
        if self.phase != RevealPhase::Idle && text == self.target {
            return Ok(RevealStart::Unchanged);
        }

        // Full reset; any in-flight tick becomes stale.
        self.generation = Generation::next();
        self.target = text.to_string();
        self.boundaries = char_boundaries(&self.target);
        self.revealed = 0;
        self.speed_ms = speed_ms;

        if self.target.is_empty() {
            self.phase = RevealPhase::Complete;
            self.sink.revealed_text_changed(&self.region, "");
            tracing::debug!(region = %self.region, "empty reveal target, complete immediately");
            return Ok(RevealStart::CompletedImmediately);
        }

        self.phase = RevealPhase::Revealing;
        tracing::debug!(
            region = %self.region,
            chars = self.char_count(),
            speed_ms = self.speed_ms,
            generation = %self.generation,
            "reveal target set"
        );
        Ok(RevealStart::Scheduled(self.generation))
    }

    /// Reveal one more character and emit the visible prefix. Stale and
    /// post-completion ticks are dropped without emission.
    pub fn on_tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation || self.phase != RevealPhase::Revealing {
            tracing::trace!(region = %self.region, %generation, "stale reveal tick discarded");
            return TickOutcome::Ignored;
        }
        let total = self.char_count();
        self.revealed = (self.revealed + 1).min(total);
        let prefix = &self.target[..self.boundaries[self.revealed]];
        self.sink.revealed_text_changed(&self.region, prefix);
        if self.revealed == total {
            self.phase = RevealPhase::Complete;
            tracing::debug!(region = %self.region, "reveal complete");
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced
        }
    }

    /// Stop revealing and drop the active target. Idempotent.
    pub fn cancel(&mut self) {
        if self.phase == RevealPhase::Idle {
            return;
        }
        self.phase = RevealPhase::Idle;
        self.generation = Generation::next();
        tracing::debug!(region = %self.region, "reveal cancelled");
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }
}

fn char_boundaries(text: &str) -> Vec<usize> {
    let mut offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    offsets.push(text.len());
    offsets
}

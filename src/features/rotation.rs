//! Cyclic rotation
//!
//! Advances an index over a fixed-length sequence, one step per delivered
//! tick. The controller owns the logical lifecycle (spec, index, token);
//! the session owns the host timer that drives [`RotationController::on_tick`].

use std::sync::Arc;

use crate::config::RegionId;
use crate::features::{EngineError, Generation};
use crate::sink::PresentationSink;

pub struct RotationController {
    region: RegionId,
    sink: Arc<dyn PresentationSink>,
    sequence_length: usize,
    interval_ms: u64,
    current_index: usize,
    running: bool,
    generation: Generation,
}

impl RotationController {
    pub fn new(region: RegionId, sink: Arc<dyn PresentationSink>) -> Self {
        Self {
            region,
            sink,
            sequence_length: 0,
            interval_ms: 0,
            current_index: 0,
            running: false,
            generation: Generation::default(),
        }
    }

    /// Begin (or re-spec) the rotation. Returns the token the caller must
    /// stamp onto scheduled ticks. A rejected spec leaves prior state
    /// untouched.
    pub fn start(&mut self, sequence_length: usize, interval_ms: u64) -> Result<Generation, EngineError> {
        if sequence_length < 1 {
            return Err(EngineError::InvalidSpec(format!(
                "rotation needs at least one item (got {})",
                sequence_length
            )));
        }
        if interval_ms == 0 {
            return Err(EngineError::InvalidSpec(
                "rotation interval must be positive".to_string(),
            ));
        }
        self.sequence_length = sequence_length;
        self.interval_ms = interval_ms;
        // Re-spec over a running rotation keeps the position, clamped into
        // the new range.
        self.current_index %= sequence_length;
        self.running = true;
        self.generation = Generation::next();
        tracing::debug!(
            region = %self.region,
            sequence_length,
            interval_ms,
            generation = %self.generation,
            "rotation started"
        );
        Ok(self.generation)
    }

    /// Advance by one step and emit the new index. Stale and post-stop
    /// ticks return None without emitting.
    pub fn on_tick(&mut self, generation: Generation) -> Option<usize> {
        if !self.running || generation != self.generation {
            tracing::trace!(region = %self.region, %generation, "stale rotation tick discarded");
            return None;
        }
        self.current_index = (self.current_index + 1) % self.sequence_length;
        self.sink
            .rotation_index_changed(&self.region, self.current_index);
        Some(self.current_index)
    }

    /// Stop advancing. Pending ticks become stale. Idempotent.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.generation = Generation::next();
        tracing::debug!(region = %self.region, "rotation stopped");
    }

    /// Stop, reset to index 0, and start over with the same interval.
    /// Used when the underlying item count changes.
    pub fn restart(&mut self, new_sequence_length: usize) -> Result<Generation, EngineError> {
        if self.interval_ms == 0 {
            return Err(EngineError::InvalidSpec(
                "rotation was never started".to_string(),
            ));
        }
        if new_sequence_length < 1 {
            return Err(EngineError::InvalidSpec(format!(
                "rotation needs at least one item (got {})",
                new_sequence_length
            )));
        }
        self.stop();
        self.current_index = 0;
        self.start(new_sequence_length, self.interval_ms)
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }
}

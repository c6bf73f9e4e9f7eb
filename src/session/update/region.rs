//! Region lifecycle handlers

use std::sync::Arc;

use crate::config::{RegionConfig, RegionId, RegionKind};
use crate::features::EngineError;
use crate::features::reveal::{RevealStart, TextRevealAnimator};
use crate::features::rotation::RotationController;
use crate::session::event::SessionEvent;
use crate::session::state::{PresentationSession, RegionState};
use crate::session::{schedule_reveal, schedule_rotation};

impl PresentationSession {
    /// Handle region mount and unmount commands
    pub fn handle_region(&mut self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::MountRegion(config) => {
                if let Err(error) = self.mount_region(config.clone()) {
                    tracing::warn!(region = %config.id, %error, "region mount rejected");
                }
                true
            }
            SessionEvent::UnmountRegion(id) => {
                self.unmount_region(id);
                true
            }
            _ => false,
        }
    }

    /// Build a region's leaves and timers from config. Replaces any region
    /// already mounted under the same id once the new config validates; a
    /// rejected config changes nothing.
    pub fn mount_region(&mut self, config: RegionConfig) -> Result<(), EngineError> {
        let RegionConfig { id, kind } = config;
        let mut state = RegionState::default();
        match kind {
            RegionKind::Rotation {
                sequence_length,
                interval_ms,
            } => {
                let mut rotation = RotationController::new(id.clone(), Arc::clone(&self.sink));
                let generation = rotation.start(sequence_length, interval_ms)?;
                state.rotation_timer = Some(schedule_rotation(
                    &self.scheduler,
                    &self.events,
                    &id,
                    interval_ms,
                    generation,
                ));
                state.rotation = Some(rotation);
            }
            RegionKind::Reveal { text, speed_ms } => {
                let mut reveal = TextRevealAnimator::new(id.clone(), Arc::clone(&self.sink));
                if let RevealStart::Scheduled(generation) = reveal.set_target(&text, speed_ms)? {
                    state.reveal_timer = Some(schedule_reveal(
                        &self.scheduler,
                        &self.events,
                        &id,
                        speed_ms,
                        generation,
                    ));
                }
                state.reveal = Some(reveal);
                state.reveal_speed_ms = speed_ms;
            }
            RegionKind::SteppedReveal {
                captions,
                interval_ms,
                speed_ms,
            } => {
                let mut rotation = RotationController::new(id.clone(), Arc::clone(&self.sink));
                let mut reveal = TextRevealAnimator::new(id.clone(), Arc::clone(&self.sink));
                // Validate both halves before scheduling either timer.
                let rotation_generation = rotation.start(captions.len(), interval_ms)?;
                let reveal_start = reveal.set_target(&captions[0], speed_ms)?;
                state.rotation_timer = Some(schedule_rotation(
                    &self.scheduler,
                    &self.events,
                    &id,
                    interval_ms,
                    rotation_generation,
                ));
                if let RevealStart::Scheduled(generation) = reveal_start {
                    state.reveal_timer = Some(schedule_reveal(
                        &self.scheduler,
                        &self.events,
                        &id,
                        speed_ms,
                        generation,
                    ));
                }
                state.rotation = Some(rotation);
                state.reveal = Some(reveal);
                state.captions = captions;
                state.reveal_speed_ms = speed_ms;
            }
        }
        if self.regions.contains_key(&id) {
            self.unmount_region(&id);
        }
        self.regions.insert(id.clone(), state);
        tracing::info!(region = %id, "region mounted");
        Ok(())
    }

    /// Stop timers and drop all presentation state for `id`. Unknown ids
    /// are a logged no-op.
    pub fn unmount_region(&mut self, id: &RegionId) {
        let Some(mut state) = self.regions.remove(id) else {
            tracing::debug!(region = %id, "unmount for unknown region");
            return;
        };
        if let Some(timer) = state.rotation_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = state.reveal_timer.take() {
            timer.cancel();
        }
        if let Some(rotation) = state.rotation.as_mut() {
            rotation.stop();
        }
        if let Some(reveal) = state.reveal.as_mut() {
            reveal.cancel();
        }
        tracing::info!(region = %id, "region unmounted");
    }
}

//! Rotation update handlers

use crate::config::RegionId;
use crate::features::Generation;
use crate::features::reveal::RevealStart;
use crate::session::event::SessionEvent;
use crate::session::state::PresentationSession;
use crate::session::{schedule_reveal, schedule_rotation};

impl PresentationSession {
    /// Handle rotation ticks and restarts
    pub fn handle_rotation(&mut self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::RotationTick { region, generation } => {
                self.rotation_tick(region, *generation);
                true
            }
            SessionEvent::RestartRotation {
                region,
                sequence_length,
            } => {
                self.restart_rotation(region, *sequence_length);
                true
            }
            _ => false,
        }
    }

    fn rotation_tick(&mut self, region: &RegionId, generation: Generation) {
        let Some(state) = self.regions.get_mut(region) else {
            tracing::trace!(%region, "tick for unmounted region");
            return;
        };
        let Some(rotation) = state.rotation.as_mut() else {
            return;
        };
        let Some(index) = rotation.on_tick(generation) else {
            return;
        };

        // Paired reveal: an advance retargets the animator to the caption
        // at the new index.
        let Some(caption) = state.captions.get(index).cloned() else {
            return;
        };
        let Some(reveal) = state.reveal.as_mut() else {
            return;
        };
        match reveal.set_target(&caption, state.reveal_speed_ms) {
            Ok(RevealStart::Scheduled(fresh)) => {
                if let Some(timer) = state.reveal_timer.take() {
                    timer.cancel();
                }
                state.reveal_timer = Some(schedule_reveal(
                    &self.scheduler,
                    &self.events,
                    region,
                    state.reveal_speed_ms,
                    fresh,
                ));
            }
            Ok(RevealStart::CompletedImmediately) => {
                if let Some(timer) = state.reveal_timer.take() {
                    timer.cancel();
                }
            }
            Ok(RevealStart::Unchanged) => {}
            Err(error) => {
                tracing::warn!(%region, %error, "caption retarget rejected");
            }
        }
    }

    fn restart_rotation(&mut self, region: &RegionId, sequence_length: usize) {
        let Some(state) = self.regions.get_mut(region) else {
            tracing::debug!(%region, "restart for unknown region");
            return;
        };
        let Some(rotation) = state.rotation.as_mut() else {
            tracing::debug!(%region, "restart for a region without rotation");
            return;
        };
        match rotation.restart(sequence_length) {
            Ok(generation) => {
                let interval_ms = rotation.interval_ms();
                if let Some(timer) = state.rotation_timer.take() {
                    timer.cancel();
                }
                state.rotation_timer = Some(schedule_rotation(
                    &self.scheduler,
                    &self.events,
                    region,
                    interval_ms,
                    generation,
                ));
                tracing::info!(%region, sequence_length, "rotation restarted");
            }
            Err(error) => {
                tracing::warn!(%region, %error, "rotation restart rejected");
            }
        }
    }
}

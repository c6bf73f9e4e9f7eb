//! Reveal update handlers

use crate::features::reveal::TickOutcome;
use crate::session::event::SessionEvent;
use crate::session::state::PresentationSession;

impl PresentationSession {
    /// Handle per-character reveal ticks
    pub fn handle_reveal(&mut self, event: &SessionEvent) -> bool {
        let SessionEvent::RevealTick { region, generation } = event else {
            return false;
        };
        let Some(state) = self.regions.get_mut(region) else {
            tracing::trace!(%region, "tick for unmounted region");
            return true;
        };
        let Some(reveal) = state.reveal.as_mut() else {
            return true;
        };
        if reveal.on_tick(*generation) == TickOutcome::Completed {
            // The per-character timer ends with its target.
            if let Some(timer) = state.reveal_timer.take() {
                timer.cancel();
            }
        }
        true
    }
}

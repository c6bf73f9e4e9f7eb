//! Event handlers - thin dispatcher delegating to submodules

mod region;
mod reveal;
mod rotation;
mod theme;

use std::ops::ControlFlow;

use super::event::SessionEvent;
use super::state::PresentationSession;

impl PresentationSession {
    /// Handle an event by delegating to the matching submodule handler
    pub fn apply(&mut self, event: SessionEvent) -> ControlFlow<()> {
        if matches!(event, SessionEvent::Shutdown) {
            self.teardown();
            return ControlFlow::Break(());
        }
        if self.handle_theme(&event) {
            return ControlFlow::Continue(());
        }
        if self.handle_region(&event) {
            return ControlFlow::Continue(());
        }
        if self.handle_rotation(&event) {
            return ControlFlow::Continue(());
        }
        if self.handle_reveal(&event) {
            return ControlFlow::Continue(());
        }
        ControlFlow::Continue(())
    }
}

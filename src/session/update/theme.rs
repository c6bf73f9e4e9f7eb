//! Theme update handlers

use crate::session::event::SessionEvent;
use crate::session::state::PresentationSession;

impl PresentationSession {
    /// Handle theme preference changes and signal deliveries
    pub fn handle_theme(&mut self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::SetThemePreference(preference) => {
                let applied = self.theme.set_preference(*preference);
                tracing::info!(
                    preference = preference.as_str(),
                    %applied,
                    "theme preference changed"
                );
                true
            }
            SessionEvent::SystemSignalChanged { dark, generation } => {
                self.theme.on_system_signal(*dark, *generation);
                true
            }
            _ => false,
        }
    }
}

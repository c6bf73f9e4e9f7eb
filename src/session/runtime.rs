//! Session event pump

use std::ops::ControlFlow;

use tokio::sync::mpsc::UnboundedReceiver;

use super::event::SessionEvent;
use super::state::PresentationSession;

/// Owns the session and its event stream, applying one event at a time.
/// The session keeps a sender for its own timers, so the loop ends only
/// on [`SessionEvent::Shutdown`].
pub struct SessionRuntime {
    session: PresentationSession,
    receiver: UnboundedReceiver<SessionEvent>,
}

impl SessionRuntime {
    pub fn new(session: PresentationSession, receiver: UnboundedReceiver<SessionEvent>) -> Self {
        Self { session, receiver }
    }

    /// Apply events in arrival order until shutdown.
    pub async fn run(mut self) {
        while let Some(event) = self.receiver.recv().await {
            if self.session.apply(event) == ControlFlow::Break(()) {
                break;
            }
        }
        tracing::info!("session pump stopped");
    }
}

//! Presentation session module

pub mod event;
pub mod runtime;
pub mod state;
mod update;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::RegionId;
use crate::features::Generation;
use crate::features::prefs::PreferenceStore;
use crate::features::theme::{SignalNotify, ThemeResolver};
use crate::platform::scheduler::{TickScheduler, TimerTask};
use crate::platform::signal::SystemSignal;
use crate::sink::PresentationSink;
pub use event::SessionEvent;
pub use state::PresentationSession;

impl PresentationSession {
    /// Create a session over the given host seams and emit the first
    /// derived appearance. Events sent on the returned receiver's channel
    /// drive everything else.
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        signal: Arc<dyn SystemSignal>,
        scheduler: Arc<dyn TickScheduler>,
        sink: Arc<dyn PresentationSink>,
    ) -> (Self, UnboundedReceiver<SessionEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();

        // 1. Route signal deliveries onto the channel. Watcher threads
        //    re-enter the engine through the channel only.
        let inbox = events.clone();
        let notify: SignalNotify = Arc::new(move |dark, generation| {
            let _ = inbox.send(SessionEvent::SystemSignalChanged { dark, generation });
        });

        // 2. Resolve the starting theme from the persisted preference.
        let preference = store.load().unwrap_or_default();
        let mut theme = ThemeResolver::new(store, signal, Arc::clone(&sink), notify);
        theme.initialize(preference);

        let session = Self {
            theme,
            regions: HashMap::new(),
            scheduler,
            sink,
            events,
        };
        (session, receiver)
    }

    /// Sender for enqueueing commands from outside the event loop.
    pub fn sender(&self) -> UnboundedSender<SessionEvent> {
        self.events.clone()
    }

    /// Unmount every region and stop watching the system appearance.
    pub fn teardown(&mut self) {
        let ids: Vec<RegionId> = self.regions.keys().cloned().collect();
        for id in ids {
            self.unmount_region(&id);
        }
        self.theme.unsubscribe();
        tracing::info!("session torn down");
    }
}

/// Schedule repeating rotation ticks for `region`, stamped with `generation`.
fn schedule_rotation(
    scheduler: &Arc<dyn TickScheduler>,
    events: &UnboundedSender<SessionEvent>,
    region: &RegionId,
    interval_ms: u64,
    generation: Generation,
) -> TimerTask {
    let events = events.clone();
    let region = region.clone();
    scheduler.schedule_repeating(
        Duration::from_millis(interval_ms),
        Box::new(move || {
            let _ = events.send(SessionEvent::RotationTick {
                region: region.clone(),
                generation,
            });
        }),
    )
}

/// Schedule repeating reveal ticks for `region`, stamped with `generation`.
fn schedule_reveal(
    scheduler: &Arc<dyn TickScheduler>,
    events: &UnboundedSender<SessionEvent>,
    region: &RegionId,
    speed_ms: u64,
    generation: Generation,
) -> TimerTask {
    let events = events.clone();
    let region = region.clone();
    scheduler.schedule_repeating(
        Duration::from_millis(speed_ms),
        Box::new(move || {
            let _ = events.send(SessionEvent::RevealTick {
                region: region.clone(),
                generation,
            });
        }),
    )
}

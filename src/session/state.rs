//! Session state

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::config::RegionId;
use crate::features::reveal::TextRevealAnimator;
use crate::features::rotation::RotationController;
use crate::features::theme::ThemeResolver;
use crate::platform::scheduler::{TickScheduler, TimerTask};
use crate::session::event::SessionEvent;
use crate::sink::PresentationSink;

/// Composition root: one authoritative theme resolver plus per-region
/// rotation/reveal state. Everything it owns is torn down with it.
pub struct PresentationSession {
    pub theme: ThemeResolver,
    pub regions: HashMap<RegionId, RegionState>,
    pub scheduler: Arc<dyn TickScheduler>,
    pub sink: Arc<dyn PresentationSink>,
    pub events: UnboundedSender<SessionEvent>,
}

/// Presentation state owned by one mounted region.
#[derive(Default)]
pub struct RegionState {
    pub rotation: Option<RotationController>,
    pub reveal: Option<TextRevealAnimator>,
    /// Captions driving a paired reveal, indexed by rotation position.
    pub captions: Vec<String>,
    pub reveal_speed_ms: u64,
    pub rotation_timer: Option<TimerTask>,
    pub reveal_timer: Option<TimerTask>,
}

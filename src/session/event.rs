//! Session events

use crate::config::{RegionConfig, RegionId};
use crate::features::Generation;
use crate::features::theme::ThemePreference;

/// Unit of work processed by the session, one at a time, in arrival order.
/// Timers and signal watchers only ever enqueue these; all state lives on
/// the session loop.
#[derive(Debug)]
pub enum SessionEvent {
    // ============ Timer ticks ============
    /// A rotation interval elapsed for `region`.
    RotationTick {
        region: RegionId,
        generation: Generation,
    },
    /// A reveal interval elapsed for `region`.
    RevealTick {
        region: RegionId,
        generation: Generation,
    },

    // ============ System signal ============
    /// The observed OS appearance changed.
    SystemSignalChanged { dark: bool, generation: Generation },

    // ============ Commands ============
    /// Change the theme preference.
    SetThemePreference(ThemePreference),
    /// Build a region's presentation state from config.
    MountRegion(RegionConfig),
    /// Tear down one region's presentation state.
    UnmountRegion(RegionId),
    /// Reset a mounted rotation for a new item count.
    RestartRotation {
        region: RegionId,
        sequence_length: usize,
    },
    /// Tear down everything and stop the pump.
    Shutdown,
}

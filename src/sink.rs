//! Outbound presentation interface
//!
//! The engine never renders anything itself; every observable change is
//! pushed through [`PresentationSink`] to whatever does.

use crate::config::RegionId;
use crate::features::Appearance;

/// Receiver for everything the engine emits.
pub trait PresentationSink: Send + Sync {
    /// The derived appearance was recomputed.
    fn applied_appearance_changed(&self, appearance: Appearance);
    /// A rotation advanced to `index`.
    fn rotation_index_changed(&self, region: &RegionId, index: usize);
    /// One more character of a reveal became visible.
    fn revealed_text_changed(&self, region: &RegionId, prefix: &str);
}

/// Sink that logs every emission; stands in for a rendering layer.
pub struct TracingSink;

impl PresentationSink for TracingSink {
    fn applied_appearance_changed(&self, appearance: Appearance) {
        tracing::info!(%appearance, "applied appearance changed");
    }

    fn rotation_index_changed(&self, region: &RegionId, index: usize) {
        tracing::info!(region = region.as_str(), index, "rotation index changed");
    }

    fn revealed_text_changed(&self, region: &RegionId, prefix: &str) {
        tracing::info!(region = region.as_str(), prefix, "revealed text changed");
    }
}

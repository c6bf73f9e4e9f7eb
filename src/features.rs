//! Feature modules - engine state machines separated from any rendering
//!
//! Each module owns one presentation behavior. Features emit through the
//! sink trait and never talk to the host runtime directly.

pub mod prefs;
pub mod reveal;
pub mod rotation;
pub mod theme;

pub use theme::{Appearance, ThemePreference};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

/// Process-unique token stamped onto scheduled callbacks.
///
/// Minted on every lifecycle transition (start, stop, retarget, subscribe).
/// A callback whose token no longer matches its owner's live token is stale
/// and must be dropped without touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    /// Mint the next token. Never returns the default (never-started) value.
    pub fn next() -> Generation {
        Generation(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors surfaced by the engine state machines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A string that names no theme mode.
    InvalidPreference(String),
    /// A non-positive length, interval, or speed.
    InvalidSpec(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidPreference(value) => {
                write!(f, "invalid theme preference: {}", value)
            }
            EngineError::InvalidSpec(reason) => write!(f, "invalid spec: {}", reason),
        }
    }
}

impl std::error::Error for EngineError {}

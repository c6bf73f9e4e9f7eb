//! Platform abstraction layer
//!
//! Host-facing seams the engine is driven through: timers come from a
//! scheduler, the OS appearance arrives through a signal. Both are traits
//! so sessions can run on tokio and the desktop, or be driven by hand.

pub mod scheduler;
pub mod signal;

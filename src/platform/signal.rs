//! System appearance signal
//!
//! Watches the OS light/dark preference. `true` means dark is preferred.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Callback invoked with the new value when the observed signal changes.
pub type SignalCallback = Box<dyn Fn(bool) + Send + Sync>;

/// Identifies one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    /// The platform exposes no appearance information.
    Unavailable,
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalError::Unavailable => write!(f, "system appearance signal unavailable"),
        }
    }
}

impl std::error::Error for SignalError {}

/// Read-only appearance source. Subscriptions stay live until unsubscribed.
pub trait SystemSignal: Send + Sync {
    /// Current value, true when dark is preferred.
    fn query(&self) -> Result<bool, SignalError>;
    /// Watch for changes until unsubscribed.
    fn subscribe(&self, callback: SignalCallback) -> Result<SignalHandle, SignalError>;
    fn unsubscribe(&self, handle: SignalHandle);
}

const POLL_INTERVAL: Duration = Duration::from_secs(2);

fn detect_dark() -> bool {
    matches!(dark_light::detect(), dark_light::Mode::Dark)
}

/// Stop flag a watcher thread parks on between polls.
struct StopFlag {
    stopped: Mutex<bool>,
    condvar: Condvar,
}

impl StopFlag {
    fn new() -> Self {
        Self {
            stopped: Mutex::new(false),
            condvar: Condvar::new(),
        }
    }

    fn stop(&self) {
        *self.stopped.lock() = true;
        self.condvar.notify_all();
    }

    /// Park for one poll period; true when stopped.
    fn wait(&self, period: Duration) -> bool {
        let mut stopped = self.stopped.lock();
        if *stopped {
            return true;
        }
        self.condvar.wait_for(&mut stopped, period);
        *stopped
    }
}

/// OS-backed signal polling `dark_light` for changes.
pub struct DesktopSignal {
    watchers: Mutex<HashMap<u64, Arc<StopFlag>>>,
    next_handle: AtomicU64,
}

impl DesktopSignal {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            watchers: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(0),
        })
    }
}

impl SystemSignal for DesktopSignal {
    fn query(&self) -> Result<bool, SignalError> {
        Ok(detect_dark())
    }

    fn subscribe(&self, callback: SignalCallback) -> Result<SignalHandle, SignalError> {
        let id = self.next_handle.fetch_add(1, Ordering::Relaxed) + 1;
        let stop = Arc::new(StopFlag::new());
        self.watchers.lock().insert(id, Arc::clone(&stop));

        let mut last = detect_dark();
        let spawned = std::thread::Builder::new()
            .name(format!("appearance-watcher-{}", id))
            .spawn(move || {
                loop {
                    if stop.wait(POLL_INTERVAL) {
                        break;
                    }
                    let current = detect_dark();
                    if current != last {
                        last = current;
                        callback(current);
                    }
                }
            });
        if let Err(error) = spawned {
            self.watchers.lock().remove(&id);
            tracing::warn!(%error, "could not spawn appearance watcher");
            return Err(SignalError::Unavailable);
        }
        tracing::debug!(handle = id, "appearance watcher started");
        Ok(SignalHandle(id))
    }

    fn unsubscribe(&self, handle: SignalHandle) {
        if let Some(stop) = self.watchers.lock().remove(&handle.0) {
            stop.stop();
            tracing::debug!(handle = handle.0, "appearance watcher stopped");
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Scripted signal for engine tests.
    pub struct FakeSignal {
        value: Mutex<bool>,
        available: bool,
        next_handle: AtomicU64,
        subscribers: Mutex<HashMap<u64, Arc<dyn Fn(bool) + Send + Sync>>>,
    }

    impl FakeSignal {
        pub fn new(dark: bool) -> Arc<Self> {
            Arc::new(Self {
                value: Mutex::new(dark),
                available: true,
                next_handle: AtomicU64::new(0),
                subscribers: Mutex::new(HashMap::new()),
            })
        }

        /// A signal whose query and subscribe both fail.
        pub fn unavailable() -> Arc<Self> {
            Arc::new(Self {
                value: Mutex::new(false),
                available: false,
                next_handle: AtomicU64::new(0),
                subscribers: Mutex::new(HashMap::new()),
            })
        }

        /// Change the scripted value and notify every subscriber.
        pub fn flip(&self, dark: bool) {
            *self.value.lock() = dark;
            let subscribers: Vec<_> = self.subscribers.lock().values().cloned().collect();
            for callback in subscribers {
                callback(dark);
            }
        }

        pub fn subscriber_count(&self) -> usize {
            self.subscribers.lock().len()
        }
    }

    impl SystemSignal for FakeSignal {
        fn query(&self) -> Result<bool, SignalError> {
            if !self.available {
                return Err(SignalError::Unavailable);
            }
            Ok(*self.value.lock())
        }

        fn subscribe(&self, callback: SignalCallback) -> Result<SignalHandle, SignalError> {
            if !self.available {
                return Err(SignalError::Unavailable);
            }
            let id = self.next_handle.fetch_add(1, Ordering::Relaxed) + 1;
            self.subscribers.lock().insert(id, Arc::from(callback));
            Ok(SignalHandle(id))
        }

        fn unsubscribe(&self, handle: SignalHandle) {
            self.subscribers.lock().remove(&handle.0);
        }
    }
}

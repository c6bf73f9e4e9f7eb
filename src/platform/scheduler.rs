//! Repeating tick scheduling

use std::time::Duration;

/// Callback invoked once per elapsed interval.
pub type TickFn = Box<dyn Fn() + Send + Sync>;

/// Source of repeating timers.
pub trait TickScheduler: Send + Sync {
    /// Schedule `on_tick` every `interval`, first delivery one full interval
    /// from now. The timer runs until the returned task is cancelled or
    /// dropped.
    fn schedule_repeating(&self, interval: Duration, on_tick: TickFn) -> TimerTask;
}

/// Handle to a scheduled timer. Cancels on drop.
pub struct TimerTask {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerTask {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer now instead of at drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Scheduler backed by tokio interval tasks. Requires a running runtime.
pub struct TokioScheduler;

impl TickScheduler for TokioScheduler {
    fn schedule_repeating(&self, interval: Duration, on_tick: TickFn) -> TimerTask {
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            // Delay, never burst: a late tick must not coalesce with the
            // next one into a multi-step jump.
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // Consume the immediate first fire so the first delivery lands
            // one full interval out.
            timer.tick().await;
            loop {
                timer.tick().await;
                on_tick();
            }
        });
        TimerTask::new(move || handle.abort())
    }
}

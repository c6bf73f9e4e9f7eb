//! Theme resolution
//!
//! Derives the concrete appearance from a stored preference and, in System
//! mode, a live OS signal. One resolver per session is authoritative; the
//! derived value is broadcast through the sink instead of any global flag.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::features::prefs::PreferenceStore;
use crate::features::{EngineError, Generation};
use crate::platform::signal::{SignalHandle, SystemSignal};
use crate::sink::PresentationSink;

// ============================================================================
// Preference and appearance
// ============================================================================

/// Stored theme preference, chosen explicitly by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
    /// Follow the OS appearance while it is observable.
    System,
    /// Marker mode: keeps the stored choice but renders the default.
    Device,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
            ThemePreference::Device => "device",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            "device" => Ok(ThemePreference::Device),
            other => Err(EngineError::InvalidPreference(other.to_string())),
        }
    }
}

/// Concrete appearance actually rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    fn from_signal(dark: bool) -> Appearance {
        if dark {
            Appearance::Dark
        } else {
            Appearance::Light
        }
    }
}

impl std::fmt::Display for Appearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Appearance::Light => write!(f, "light"),
            Appearance::Dark => write!(f, "dark"),
        }
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Routes observed signal changes back to the session loop, which calls
/// [`ThemeResolver::on_system_signal`] with them.
pub type SignalNotify = Arc<dyn Fn(bool, Generation) + Send + Sync>;

/// Owns the preference, the derived appearance, and the signal subscription.
pub struct ThemeResolver {
    preference: ThemePreference,
    last_signal: Option<bool>,
    subscription: Option<SignalHandle>,
    generation: Generation,
    store: Arc<dyn PreferenceStore>,
    signal: Arc<dyn SystemSignal>,
    sink: Arc<dyn PresentationSink>,
    notify: SignalNotify,
}

impl ThemeResolver {
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        signal: Arc<dyn SystemSignal>,
        sink: Arc<dyn PresentationSink>,
        notify: SignalNotify,
    ) -> Self {
        Self {
            preference: ThemePreference::default(),
            last_signal: None,
            subscription: None,
            generation: Generation::default(),
            store,
            signal,
            sink,
            notify,
        }
    }

    /// Set the starting preference and emit the first derived appearance.
    pub fn initialize(&mut self, preference: ThemePreference) -> Appearance {
        self.preference = preference;
        self.sync_subscription();
        let applied = self.derive();
        tracing::info!(
            preference = preference.as_str(),
            %applied,
            "theme resolver initialized"
        );
        self.sink.applied_appearance_changed(applied);
        applied
    }

    /// Change the preference, re-derive, emit, and persist.
    ///
    /// Leaving System mode drops the signal subscription before anything
    /// else happens, so a stale listener can never act on this resolver.
    pub fn set_preference(&mut self, preference: ThemePreference) -> Appearance {
        self.preference = preference;
        self.sync_subscription();
        let applied = self.derive();
        self.sink.applied_appearance_changed(applied);
        if let Err(error) = self.store.store(preference) {
            tracing::warn!(%error, "failed to persist theme preference");
        }
        applied
    }

    /// Deliver an observed signal change. Stale tokens and deliveries
    /// outside System mode are dropped.
    pub fn on_system_signal(&mut self, dark: bool, generation: Generation) {
        if generation != self.generation || self.preference != ThemePreference::System {
            tracing::trace!(dark, %generation, "stale system signal delivery discarded");
            return;
        }
        self.last_signal = Some(dark);
        let applied = self.derive();
        tracing::debug!(dark, %applied, "system appearance changed");
        self.sink.applied_appearance_changed(applied);
    }

    /// Hold exactly one live subscription while in System mode. No-op when
    /// already subscribed or not in System mode.
    pub fn subscribe_system_signal(&mut self) {
        if self.subscription.is_some() || self.preference != ThemePreference::System {
            return;
        }
        let value = match self.signal.query() {
            Ok(dark) => dark,
            Err(error) => {
                tracing::warn!(%error, "system appearance unavailable, falling back to light");
                self.last_signal = None;
                return;
            }
        };
        self.generation = Generation::next();
        let generation = self.generation;
        let notify = Arc::clone(&self.notify);
        match self
            .signal
            .subscribe(Box::new(move |dark| notify(dark, generation)))
        {
            Ok(handle) => {
                self.last_signal = Some(value);
                self.subscription = Some(handle);
                tracing::debug!(dark = value, %generation, "watching system appearance");
            }
            Err(error) => {
                tracing::warn!(%error, "system appearance watch failed, falling back to light");
                self.last_signal = None;
            }
        }
    }

    /// Release the signal subscription if held. Idempotent.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.subscription.take() {
            // Pending deliveries from this subscription become stale.
            self.generation = Generation::next();
            self.signal.unsubscribe(handle);
            tracing::debug!("stopped watching system appearance");
        }
    }

    fn sync_subscription(&mut self) {
        if self.preference == ThemePreference::System {
            self.subscribe_system_signal();
        } else {
            self.unsubscribe();
        }
    }

    fn derive(&self) -> Appearance {
        match self.preference {
            ThemePreference::Light => Appearance::Light,
            ThemePreference::Dark => Appearance::Dark,
            ThemePreference::System => Appearance::from_signal(self.last_signal.unwrap_or(false)),
            // Device never derives a concrete value of its own; it passes
            // through to the default appearance.
            ThemePreference::Device => Appearance::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::prefs::StoreError;
    use crate::features::prefs::testing::MemoryStore;
    use crate::platform::signal::testing::FakeSignal;
    use crate::sink::testing::RecordingSink;
    use parking_lot::Mutex;

    type Delivered = Arc<Mutex<Vec<(bool, Generation)>>>;

    struct Harness {
        resolver: ThemeResolver,
        sink: Arc<RecordingSink>,
        signal: Arc<FakeSignal>,
        store: Arc<MemoryStore>,
        delivered: Delivered,
    }

    fn harness_with_signal(signal: Arc<FakeSignal>) -> Harness {
        let sink = RecordingSink::new();
        let store = MemoryStore::new();
        let delivered: Delivered = Arc::new(Mutex::new(Vec::new()));
        let inbox = Arc::clone(&delivered);
        let resolver = ThemeResolver::new(
            Arc::clone(&store) as Arc<dyn PreferenceStore>,
            Arc::clone(&signal) as Arc<dyn SystemSignal>,
            Arc::clone(&sink) as Arc<dyn PresentationSink>,
            Arc::new(move |dark, generation| inbox.lock().push((dark, generation))),
        );
        Harness {
            resolver,
            sink,
            signal,
            store,
            delivered,
        }
    }

    fn harness() -> Harness {
        harness_with_signal(FakeSignal::new(false))
    }

    /// Feed queued signal deliveries into the resolver, as the session
    /// loop would.
    fn pump(h: &mut Harness) {
        let queued: Vec<_> = h.delivered.lock().drain(..).collect();
        for (dark, generation) in queued {
            h.resolver.on_system_signal(dark, generation);
        }
    }

    // ========== Property 1: direct derivation ==========

    #[test]
    fn light_dark_and_device_derive_without_the_signal() {
        let mut h = harness();
        assert_eq!(h.resolver.initialize(ThemePreference::Light), Appearance::Light);
        assert_eq!(h.resolver.set_preference(ThemePreference::Dark), Appearance::Dark);
        assert_eq!(h.resolver.set_preference(ThemePreference::Device), Appearance::Light);
        assert_eq!(
            h.sink.appearances(),
            vec![Appearance::Light, Appearance::Dark, Appearance::Light]
        );
        assert_eq!(h.signal.subscriber_count(), 0);
    }

    // ========== Property 2: system mode follows the live signal ==========

    #[test]
    fn system_mode_samples_the_signal_at_subscribe_time() {
        let mut h = harness_with_signal(FakeSignal::new(true));
        let applied = h.resolver.set_preference(ThemePreference::System);
        assert_eq!(applied, Appearance::Dark);
        assert_eq!(h.signal.subscriber_count(), 1);
    }

    #[test]
    fn signal_flip_reemits_without_a_new_set_preference() {
        let mut h = harness();
        h.resolver.set_preference(ThemePreference::System);
        assert_eq!(h.sink.appearances().last(), Some(&Appearance::Light));

        h.signal.flip(true);
        pump(&mut h);
        assert_eq!(h.sink.appearances().last(), Some(&Appearance::Dark));

        h.signal.flip(false);
        pump(&mut h);
        assert_eq!(h.sink.appearances().last(), Some(&Appearance::Light));
    }

    // ========== Property 3: leaving System tears the subscription down ==========

    #[test]
    fn leaving_system_unsubscribes_before_returning() {
        let mut h = harness();
        h.resolver.set_preference(ThemePreference::System);
        assert_eq!(h.signal.subscriber_count(), 1);

        h.resolver.set_preference(ThemePreference::Dark);
        assert_eq!(h.signal.subscriber_count(), 0);
    }

    #[test]
    fn pending_delivery_after_mode_change_is_discarded() {
        let mut h = harness();
        h.resolver.set_preference(ThemePreference::System);

        // Queued but not yet processed when the mode changes.
        h.signal.flip(true);
        h.resolver.set_preference(ThemePreference::Light);
        pump(&mut h);

        assert!(!h.sink.appearances().contains(&Appearance::Dark));
    }

    #[test]
    fn subscribe_and_unsubscribe_are_idempotent() {
        let mut h = harness();
        h.resolver.set_preference(ThemePreference::System);
        h.resolver.subscribe_system_signal();
        assert_eq!(h.signal.subscriber_count(), 1);

        h.resolver.unsubscribe();
        h.resolver.unsubscribe();
        assert_eq!(h.signal.subscriber_count(), 0);
    }

    // ========== Property 4: unavailable signal falls back to light ==========

    #[test]
    fn unavailable_signal_falls_back_to_light_without_subscribing() {
        let mut h = harness_with_signal(FakeSignal::unavailable());
        let applied = h.resolver.set_preference(ThemePreference::System);
        assert_eq!(applied, Appearance::Light);
        assert_eq!(h.signal.subscriber_count(), 0);
    }

    // ========== Property 5: persistence ==========

    #[test]
    fn set_preference_persists_and_initialize_does_not() {
        let mut h = harness();
        h.resolver.initialize(ThemePreference::Dark);
        assert_eq!(h.store.saved(), None);

        h.resolver.set_preference(ThemePreference::System);
        assert_eq!(h.store.saved(), Some(ThemePreference::System));
    }

    #[test]
    fn store_failure_keeps_the_new_preference() {
        struct FailingStore;
        impl PreferenceStore for FailingStore {
            fn load(&self) -> Option<ThemePreference> {
                None
            }
            fn store(&self, _preference: ThemePreference) -> Result<(), StoreError> {
                Err(StoreError::Io("disk full".to_string()))
            }
        }

        let sink = RecordingSink::new();
        let signal = FakeSignal::new(false);
        let mut resolver = ThemeResolver::new(
            Arc::new(FailingStore),
            signal,
            Arc::clone(&sink) as Arc<dyn PresentationSink>,
            Arc::new(|_, _| {}),
        );
        assert_eq!(resolver.set_preference(ThemePreference::Dark), Appearance::Dark);
        assert_eq!(resolver.preference, ThemePreference::Dark);
        assert_eq!(sink.appearances(), vec![Appearance::Dark]);
    }

    // ========== Property 6: every recomputation emits ==========

    #[test]
    fn unchanged_value_still_emits_on_recompute() {
        let mut h = harness();
        h.resolver.initialize(ThemePreference::Light);
        h.resolver.set_preference(ThemePreference::Light);
        h.resolver.set_preference(ThemePreference::Light);
        assert_eq!(h.sink.appearances().len(), 3);
    }

    // ========== Parsing ==========

    #[test]
    fn preference_strings_parse_case_insensitively() {
        assert_eq!("dark".parse::<ThemePreference>().unwrap(), ThemePreference::Dark);
        assert_eq!("System".parse::<ThemePreference>().unwrap(), ThemePreference::System);
        assert_eq!("DEVICE".parse::<ThemePreference>().unwrap(), ThemePreference::Device);
    }

    #[test]
    fn unknown_preference_string_is_rejected() {
        let err = "blue".parse::<ThemePreference>().unwrap_err();
        match err {
            EngineError::InvalidPreference(value) => assert_eq!(value, "blue"),
            other => panic!("expected InvalidPreference, got {:?}", other),
        }
    }

    #[test]
    fn preference_serializes_as_lowercase() {
        let json = serde_json::to_string(&ThemePreference::System).unwrap();
        assert_eq!(json, "\"system\"");
        let back: ThemePreference = serde_json::from_str("\"device\"").unwrap();
        assert_eq!(back, ThemePreference::Device);
    }
}

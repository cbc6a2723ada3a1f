//! Host preference boundary.
//!
//! Reduced-motion and color-scheme preferences are computed by the host, not
//! by this crate: a [`PreferenceSource`] hands the core a snapshot once and
//! pushes changes to subscribers. Consumers typically gate whether animation
//! runs at all on [`HostPreferences::allows_motion`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme::Light
    }
}

/// Snapshot of the host's animation-relevant preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostPreferences {
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// The host's current color scheme.
    pub color_scheme: ColorScheme,
}

impl HostPreferences {
    /// Whether animation should run under these preferences.
    #[inline]
    pub fn allows_motion(&self) -> bool {
        !self.reduced_motion
    }
}

/// Handle to a preference-change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

/// Source of host preferences: read once, subscribe for changes.
pub trait PreferenceSource {
    /// The current snapshot.
    fn current(&self) -> HostPreferences;

    /// Subscribe to changes. The listener receives each new snapshot.
    fn subscribe(&mut self, listener: Box<dyn FnMut(HostPreferences)>) -> SubscriptionId;

    /// Drop a subscription. Unknown handles are ignored.
    fn unsubscribe(&mut self, id: SubscriptionId);
}

struct Subscriber {
    id: SubscriptionId,
    listener: Box<dyn FnMut(HostPreferences)>,
}

/// Preference source backed by an explicitly set snapshot.
///
/// Hosts without a live preference feed construct one of these and call
/// [`set`](Self::set) when something changes; tests use it the same way.
#[derive(Default)]
pub struct StaticPreferences {
    prefs: HostPreferences,
    subscribers: Vec<Subscriber>,
}

impl StaticPreferences {
    /// Create a source with default preferences (motion allowed, light).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source with the given snapshot.
    pub fn with_preferences(prefs: HostPreferences) -> Self {
        Self {
            prefs,
            subscribers: Vec::new(),
        }
    }

    /// Replace the snapshot and notify subscribers of the change.
    pub fn set(&mut self, prefs: HostPreferences) {
        if self.prefs == prefs {
            return;
        }
        self.prefs = prefs;
        for subscriber in self.subscribers.iter_mut() {
            (subscriber.listener)(prefs);
        }
    }
}

impl PreferenceSource for StaticPreferences {
    fn current(&self) -> HostPreferences {
        self.prefs
    }

    fn subscribe(&mut self, listener: Box<dyn FnMut(HostPreferences)>) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscribers.push(Subscriber { id, listener });
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|subscriber| subscriber.id != id);
    }
}

impl std::fmt::Debug for StaticPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticPreferences")
            .field("prefs", &self.prefs)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_defaults_allow_motion() {
        let prefs = HostPreferences::default();
        assert!(prefs.allows_motion());
        assert_eq!(prefs.color_scheme, ColorScheme::Light);
    }

    #[test]
    fn test_subscribers_see_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut source = StaticPreferences::new();

        let sink = Rc::clone(&seen);
        let id = source.subscribe(Box::new(move |prefs| {
            sink.borrow_mut().push(prefs);
        }));

        let reduced = HostPreferences {
            reduced_motion: true,
            color_scheme: ColorScheme::Dark,
        };
        source.set(reduced);
        // Setting an identical snapshot is not a change.
        source.set(reduced);
        assert_eq!(seen.borrow().len(), 1);
        assert!(!seen.borrow()[0].allows_motion());

        source.unsubscribe(id);
        source.set(HostPreferences::default());
        assert_eq!(seen.borrow().len(), 1);
    }
}

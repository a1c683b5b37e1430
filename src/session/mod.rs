//! Client session store
//!
//! A small key/value layer modelling what a browser client persists between
//! visits: who is signed in, their cached profile, their accessibility
//! preferences, and whether onboarding has finished. The backing store is
//! pluggable; reads are tolerant, so a corrupt or missing entry degrades to
//! the signed-out or default state instead of failing.
//!
//! Every mutation publishes on a watch channel, mirroring the way a storage
//! event lets other tabs notice a login or logout and refresh themselves.

pub mod keys {
    pub const IS_LOGGED_IN: &str = "elderease_is_logged_in";
    pub const USER: &str = "elderease_user";
    pub const USER_ID: &str = "elderease_user_id";
    pub const PREFERENCES: &str = "elderease_preferences";
    pub const ONBOARDING_COMPLETE: &str = "elderease_onboarding_complete";
}

use crate::auth::UserView;
use crate::preferences::Preferences;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

/// Storage abstraction behind the session store
pub trait CacheBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process backend over a mutexed map
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Session store over a cache backend.
///
/// Serialized values use the same JSON shapes the HTTP API speaks, so a
/// cached profile deserializes with the same tolerance rules.
pub struct SessionStore<B: CacheBackend> {
    backend: B,
    changes: watch::Sender<u64>,
}

impl Default for SessionStore<MemoryBackend> {
    fn default() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl<B: CacheBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        let (changes, _) = watch::channel(0);
        Self { backend, changes }
    }

    /// Record a successful login
    pub fn set_session(&self, user: &UserView) {
        self.backend.set(keys::IS_LOGGED_IN, "true");
        self.backend.set(keys::USER_ID, &user.id);
        if let Ok(json) = serde_json::to_string(user) {
            self.backend.set(keys::USER, &json);
        }
        self.notify();
    }

    /// Drop the session keys. Preferences and the onboarding flag survive a
    /// logout so the next sign-in on this device keeps its settings.
    pub fn clear_session(&self) {
        self.backend.remove(keys::IS_LOGGED_IN);
        self.backend.remove(keys::USER);
        self.backend.remove(keys::USER_ID);
        self.notify();
    }

    pub fn is_authenticated(&self) -> bool {
        self.backend
            .get(keys::IS_LOGGED_IN)
            .is_some_and(|v| v == "true")
    }

    /// The cached profile, or None when absent or unreadable
    pub fn current_user(&self) -> Option<UserView> {
        let raw = self.backend.get(keys::USER)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!("Discarding unreadable cached profile: {}", error);
                self.backend.remove(keys::USER);
                None
            }
        }
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.backend.get(keys::USER_ID)
    }

    /// Cached preferences, falling back to defaults when absent or corrupt
    pub fn preferences(&self) -> Preferences {
        match self.backend.get(keys::PREFERENCES) {
            Some(raw) => Preferences::from_json_str(&raw),
            None => Preferences::default(),
        }
    }

    pub fn set_preferences(&self, preferences: &Preferences) {
        self.backend
            .set(keys::PREFERENCES, &preferences.to_json_string());
        self.notify();
    }

    pub fn is_onboarding_complete(&self) -> bool {
        self.backend
            .get(keys::ONBOARDING_COMPLETE)
            .is_some_and(|v| v == "true")
    }

    pub fn set_onboarding_complete(&self) {
        self.backend.set(keys::ONBOARDING_COMPLETE, "true");
        self.notify();
    }

    /// Subscribe to change notifications; each mutation bumps the value
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        self.changes.send_modify(|generation| *generation += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserView {
        UserView {
            id: "user-1".to_string(),
            email: "margaret@example.com".to_string(),
            name: "Margaret".to_string(),
            phone: None,
            birth_year: Some(1948),
            profile_photo: None,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn login_then_logout_round_trip() {
        let store = SessionStore::default();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());

        store.set_session(&user());
        assert!(store.is_authenticated());
        assert_eq!(store.current_user_id().as_deref(), Some("user-1"));
        assert_eq!(store.current_user().unwrap().name, "Margaret");

        store.clear_session();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(store.current_user_id().is_none());
    }

    #[test]
    fn logout_keeps_preferences_and_onboarding() {
        let store = SessionStore::default();
        let mut prefs = Preferences::default();
        prefs.voice_enabled = true;

        store.set_session(&user());
        store.set_preferences(&prefs);
        store.set_onboarding_complete();
        store.clear_session();

        assert!(store.preferences().voice_enabled);
        assert!(store.is_onboarding_complete());
    }

    #[test]
    fn malformed_cached_profile_reads_as_anonymous() {
        let store = SessionStore::default();
        store.backend.set(keys::USER, "{not json");
        store.backend.set(keys::IS_LOGGED_IN, "yes");

        assert!(store.current_user().is_none());
        // The corrupt entry is dropped, not left to fail every read
        assert!(store.backend.get(keys::USER).is_none());
        // Only the exact marker counts as authenticated
        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_preferences_degrade_to_defaults() {
        let store = SessionStore::default();
        store.backend.set(keys::PREFERENCES, "??");
        assert_eq!(store.preferences(), Preferences::default());
    }

    #[tokio::test]
    async fn subscribers_observe_every_mutation() {
        let store = SessionStore::default();
        let mut rx = store.subscribe();
        let start = *rx.borrow_and_update();

        store.set_session(&user());
        assert!(rx.has_changed().unwrap());
        rx.borrow_and_update();

        store.clear_session();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), start + 2);
    }
}

//! Persisted key-value storage for the session token and cached profile.
//!
//! The backing store is whatever the host application provides (secure
//! storage on a device, a file on disk, an in-memory map in tests). The
//! client only ever goes through [`resolve_token`] so the legacy fallback
//! order lives in exactly one place.

use serde_json::Value;
use std::{
    collections::HashMap,
    sync::RwLock,
};

/// The primary key the session token is stored under.
pub const TOKEN_KEY: &str = "token";
/// The legacy key older application builds wrote the token under.
pub const LEGACY_TOKEN_KEY: &str = "@token";
/// The key a cached copy of the logged-in user's profile is stored under.
pub const USER_PROFILE_KEY: &str = "user";

/// A device key-value store.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// An in-memory [`TokenStore`], used as the default and as a test double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore { MemoryStore::default() }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.write().unwrap().remove(key);
    }
}

/// Look up the session token, primary key first, then the legacy key.
///
/// The first non-empty value wins. `None` means the user is logged out; the
/// caller decides whether that is fatal.
pub fn resolve_token(store: &dyn TokenStore) -> Option<String> {
    [TOKEN_KEY, LEGACY_TOKEN_KEY]
        .iter()
        .filter_map(|key| store.get(*key))
        .find(|token| !token.is_empty())
}

/// Read the cached user profile, if one was persisted at login.
pub fn cached_profile(store: &dyn TokenStore) -> Option<Value> {
    let raw = store.get(USER_PROFILE_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            log::warn!("Discarding an unreadable cached profile: {}", e);
            None
        },
    }
}

/// Persist a freshly issued token under both key names so code still reading
/// the legacy key keeps working.
pub fn store_session(store: &dyn TokenStore, token: &str, user: Option<&Value>) {
    store.set(TOKEN_KEY, token);
    store.set(LEGACY_TOKEN_KEY, token);
    if let Some(user) = user {
        store.set(USER_PROFILE_KEY, &user.to_string());
    }
}

/// Remove every session artefact. Used at logout.
pub fn clear_session(store: &dyn TokenStore) {
    store.remove(TOKEN_KEY);
    store.remove(LEGACY_TOKEN_KEY);
    store.remove(USER_PROFILE_KEY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn primary_key_wins_over_legacy() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "new-token");
        store.set(LEGACY_TOKEN_KEY, "old-token");

        assert_eq!(resolve_token(&store).as_deref(), Some("new-token"));
    }

    #[test]
    fn legacy_key_is_a_fallback() {
        let store = MemoryStore::new();
        store.set(LEGACY_TOKEN_KEY, "old-token");

        assert_eq!(resolve_token(&store).as_deref(), Some("old-token"));
    }

    #[test]
    fn empty_tokens_are_skipped() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "");
        store.set(LEGACY_TOKEN_KEY, "old-token");

        assert_eq!(resolve_token(&store).as_deref(), Some("old-token"));
    }

    #[test]
    fn no_token_resolves_to_none() {
        let store = MemoryStore::new();
        assert_eq!(resolve_token(&store), None);
    }

    #[test]
    fn store_and_clear_cover_both_key_names() {
        let store = MemoryStore::new();
        store_session(&store, "abc", Some(&json!({"name": "Dr. Patel"})));

        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
        assert_eq!(store.get(LEGACY_TOKEN_KEY).as_deref(), Some("abc"));
        assert!(cached_profile(&store).is_some());

        clear_session(&store);
        assert_eq!(resolve_token(&store), None);
        assert_eq!(cached_profile(&store), None);
    }

    #[test]
    fn corrupt_profile_reads_as_none() {
        let store = MemoryStore::new();
        store.set(USER_PROFILE_KEY, "{not json");
        assert_eq!(cached_profile(&store), None);
    }
}

//! Host storage abstraction.
//!
//! The session layer reads and writes three tiers of host storage: a
//! persistent scope (survives restarts), a session scope (cleared with the
//! tab/session), and a cookie mirror kept for legacy consumers. Hosts plug
//! in whatever backs these on their platform; [`MemoryStore`] and
//! [`MemoryCookieStore`] serve native hosts and tests.

use std::collections::HashMap;
use std::sync::RwLock;

/// Synchronous string key-value storage, one instance per scope.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Cookie tier. Only the access and refresh tokens are mirrored here.
pub trait CookieStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    /// Set a cookie with a max-age in seconds.
    fn set(&self, name: &str, value: &str, max_age_secs: i64);
    fn delete(&self, name: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}

/// In-memory [`CookieStore`] that records the max-age it was given, so tests
/// can assert on cookie lifetimes.
#[derive(Debug, Default)]
pub struct MemoryCookieStore {
    cookies: RwLock<HashMap<String, (String, i64)>>,
}

impl MemoryCookieStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Max-age in seconds the named cookie was last set with.
    pub fn max_age(&self, name: &str) -> Option<i64> {
        self.cookies.read().ok()?.get(name).map(|(_, age)| *age)
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies.read().ok()?.get(name).map(|(v, _)| v.clone())
    }

    fn set(&self, name: &str, value: &str, max_age_secs: i64) {
        if let Ok(mut cookies) = self.cookies.write() {
            cookies.insert(name.to_string(), (value.to_string(), max_age_secs));
        }
    }

    fn delete(&self, name: &str) {
        if let Ok(mut cookies) = self.cookies.write() {
            cookies.remove(name);
        }
    }
}

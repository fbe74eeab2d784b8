//! Resolved sessions and the in-process validity cache.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// A resolved session: the token plus a snapshot of its user.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session token.
    pub token: String,
    /// Owning user ID.
    pub user_id: i64,
    /// User display name.
    pub name: String,
    /// User email address.
    pub email: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Check if the session has passed its absolute expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

struct CachedEntry {
    session: Session,
    cached_at: Instant,
}

/// Short-lived cache of session validity, keyed by token.
///
/// Avoids a database round trip on every request. Entries expire after
/// the configured TTL and whenever the underlying session itself expires;
/// a stale or expired entry reads as a miss.
pub struct SessionCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
    ttl: Duration,
}

impl SessionCache {
    /// Create a cache with the given entry TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a fresh, unexpired session by token.
    pub fn get(&self, token: &str) -> Option<Session> {
        let mut entries = self.entries.lock().expect("session cache poisoned");

        let fresh = match entries.get(token) {
            Some(entry) => entry.cached_at.elapsed() < self.ttl && !entry.session.is_expired(),
            None => return None,
        };

        if fresh {
            entries.get(token).map(|e| e.session.clone())
        } else {
            entries.remove(token);
            None
        }
    }

    /// Store a resolved session.
    pub fn insert(&self, session: Session) {
        let mut entries = self.entries.lock().expect("session cache poisoned");
        entries.insert(
            session.token.clone(),
            CachedEntry {
                session,
                cached_at: Instant::now(),
            },
        );
    }

    /// Drop a token from the cache (sign-out, revocation).
    pub fn remove(&self, token: &str) {
        let mut entries = self.entries.lock().expect("session cache poisoned");
        entries.remove(token);
    }

    /// Remove stale and expired entries to prevent memory growth.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.entries.lock().expect("session cache poisoned");
        let before = entries.len();
        entries.retain(|_, e| e.cached_at.elapsed() < self.ttl && !e.session.is_expired());
        before - entries.len()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("session cache poisoned").len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn session(token: &str, expires_in_secs: i64) -> Session {
        Session {
            token: token.to_string(),
            user_id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            expires_at: Utc::now() + ChronoDuration::seconds(expires_in_secs),
        }
    }

    #[test]
    fn test_session_is_expired() {
        assert!(!session("t", 3600).is_expired());
        assert!(session("t", -1).is_expired());
    }

    #[test]
    fn test_cache_hit() {
        let cache = SessionCache::new(Duration::from_secs(300));
        cache.insert(session("token-1", 3600));

        let hit = cache.get("token-1");
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().user_id, 1);
    }

    #[test]
    fn test_cache_miss() {
        let cache = SessionCache::new(Duration::from_secs(300));
        assert!(cache.get("unknown").is_none());
    }

    #[test]
    fn test_cache_stale_entry_is_miss() {
        // Zero TTL: every entry is stale on the next read
        let cache = SessionCache::new(Duration::ZERO);
        cache.insert(session("token-1", 3600));

        assert!(cache.get("token-1").is_none());
        // The stale entry was evicted by the read
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_expired_session_is_miss() {
        let cache = SessionCache::new(Duration::from_secs(300));
        cache.insert(session("token-1", -1));

        assert!(cache.get("token-1").is_none());
    }

    #[test]
    fn test_cache_remove() {
        let cache = SessionCache::new(Duration::from_secs(300));
        cache.insert(session("token-1", 3600));

        cache.remove("token-1");
        assert!(cache.get("token-1").is_none());
    }

    #[test]
    fn test_purge_expired() {
        let cache = SessionCache::new(Duration::from_secs(300));
        cache.insert(session("live", 3600));
        cache.insert(session("dead", -1));

        let purged = cache.purge_expired();
        assert_eq!(purged, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("live").is_some());
    }
}

//! Pluggable key-value store for lobby presence.
//!
//! [`PresenceStore`] is keyed by [`SessionId`] with last-write-wins per key
//! and no cross-key atomicity. [`InMemoryPresenceStore`] is the in-process
//! implementation, with optional time-to-live eviction.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

use super::{PresenceEntry, SessionId};

/// Volatile session-keyed storage for [`PresenceEntry`] records.
pub trait PresenceStore: Send + Sync + fmt::Debug {
    /// Writes or overwrites the entry for `session`.
    fn put(&self, session: SessionId, entry: PresenceEntry);

    /// Returns the live entry for `session`, if any.
    fn get(&self, session: &SessionId) -> Option<PresenceEntry>;

    /// Removes the entry for `session`, returning it if it was present.
    fn remove(&self, session: &SessionId) -> Option<PresenceEntry>;

    /// Applies `update` to the entry for `session` only if it exists.
    ///
    /// Returns `true` if an entry was updated.
    fn update(&self, session: &SessionId, update: &dyn Fn(&mut PresenceEntry)) -> bool;

    /// Returns a snapshot of all live entries, in no particular order.
    fn entries(&self) -> Vec<(SessionId, PresenceEntry)>;
}

#[derive(Debug, Clone)]
struct Stored {
    entry: PresenceEntry,
    written_at: DateTime<Utc>,
}

/// [`PresenceStore`] backed by a `HashMap` behind a `parking_lot` lock.
///
/// With a TTL configured, entries not written within the TTL are treated as
/// absent and are dropped on the next write.
pub struct InMemoryPresenceStore {
    entries: RwLock<HashMap<SessionId, Stored>>,
    ttl: Option<Duration>,
}

impl InMemoryPresenceStore {
    /// Creates a store whose entries never expire.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: None,
        }
    }

    /// Creates a store that expires entries `ttl_secs` after their last
    /// write. `0` disables expiry.
    #[must_use]
    pub fn with_ttl_secs(ttl_secs: u64) -> Self {
        let ttl = (ttl_secs > 0)
            .then(|| i64::try_from(ttl_secs).ok())
            .flatten()
            .map(Duration::seconds);
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn is_live(&self, stored: &Stored, now: DateTime<Utc>) -> bool {
        self.ttl
            .is_none_or(|ttl| now.signed_duration_since(stored.written_at) < ttl)
    }

    fn evict_expired(&self, map: &mut HashMap<SessionId, Stored>, now: DateTime<Utc>) {
        if self.ttl.is_some() {
            map.retain(|_, stored| self.is_live(stored, now));
        }
    }
}

impl Default for InMemoryPresenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryPresenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPresenceStore")
            .field("sessions", &self.entries.read().len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl PresenceStore for InMemoryPresenceStore {
    fn put(&self, session: SessionId, entry: PresenceEntry) {
        let now = Utc::now();
        let mut map = self.entries.write();
        self.evict_expired(&mut map, now);
        map.insert(
            session,
            Stored {
                entry,
                written_at: now,
            },
        );
    }

    fn get(&self, session: &SessionId) -> Option<PresenceEntry> {
        let now = Utc::now();
        self.entries
            .read()
            .get(session)
            .filter(|stored| self.is_live(stored, now))
            .map(|stored| stored.entry.clone())
    }

    fn remove(&self, session: &SessionId) -> Option<PresenceEntry> {
        let now = Utc::now();
        self.entries
            .write()
            .remove(session)
            .filter(|stored| self.is_live(stored, now))
            .map(|stored| stored.entry)
    }

    fn update(&self, session: &SessionId, update: &dyn Fn(&mut PresenceEntry)) -> bool {
        let now = Utc::now();
        let mut map = self.entries.write();
        match map.get_mut(session) {
            Some(stored) if self.is_live(stored, now) => {
                update(&mut stored.entry);
                stored.written_at = now;
                true
            }
            _ => false,
        }
    }

    fn entries(&self) -> Vec<(SessionId, PresenceEntry)> {
        let now = Utc::now();
        self.entries
            .read()
            .iter()
            .filter(|(_, stored)| self.is_live(stored, now))
            .map(|(session, stored)| (session.clone(), stored.entry.clone()))
            .collect()
    }
}

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tokio::sync::{Mutex, RwLock};
use tokio::task::AbortHandle;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::QuizSession;

/// Summary text for a completed session. Pending is a valid transient state
/// of a completed session while the fetch is in flight, never an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummaryState {
    Pending,
    Ready(String),
}

/// A session plus the scheduling bookkeeping that does not belong in the
/// pure state machine.
#[derive(Debug)]
pub struct StoredSession {
    pub session: QuizSession,
    pub summary: SummaryState,
    pub pending_advance: Option<AbortHandle>,
}

struct Entry {
    created_at: DateTime<Utc>,
    slot: Arc<Mutex<StoredSession>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>, ttl_seconds: u64) -> bool {
        now.signed_duration_since(self.created_at).num_seconds() >= ttl_seconds as i64
    }
}

/// Bounded in-memory session store. A best-effort cache, not a store of
/// record: nothing survives a restart. Sessions expire a fixed TTL after
/// creation and the oldest session is evicted when capacity is reached.
///
/// Each session sits behind its own `Mutex`, which is what serializes
/// transitions per session; the outer map lock is only held for lookups and
/// never across a session lock.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl_seconds: u64,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl_seconds: u64, max_sessions: usize) -> Self {
        SessionStore {
            sessions: RwLock::new(HashMap::new()),
            ttl_seconds,
            max_sessions,
        }
    }

    /// Stores a session under a fresh id. At capacity, expired entries are
    /// dropped first, then the oldest live session is evicted; an evicted
    /// active session is equivalent to its client abandoning it.
    pub async fn insert(&self, session: QuizSession) -> String {
        let id = Uuid::new_v4().to_string();
        let evicted = {
            let mut sessions = self.sessions.write().await;

            let mut evicted = Vec::new();
            if sessions.len() >= self.max_sessions {
                let now = Utc::now();
                let expired: Vec<String> = sessions
                    .iter()
                    .filter(|(_, entry)| entry.is_expired(now, self.ttl_seconds))
                    .map(|(key, _)| key.clone())
                    .collect();
                for key in expired {
                    if let Some(entry) = sessions.remove(&key) {
                        evicted.push(entry);
                    }
                }
            }
            while sessions.len() >= self.max_sessions {
                let Some(oldest) = sessions
                    .iter()
                    .min_by_key(|(_, entry)| entry.created_at)
                    .map(|(key, _)| key.clone())
                else {
                    break;
                };
                if let Some(entry) = sessions.remove(&oldest) {
                    warn!("session store at capacity, evicting oldest session {}", oldest);
                    evicted.push(entry);
                }
            }

            sessions.insert(
                id.clone(),
                Entry {
                    created_at: Utc::now(),
                    slot: Arc::new(Mutex::new(StoredSession {
                        session,
                        summary: SummaryState::Pending,
                        pending_advance: None,
                    })),
                },
            );
            evicted
        };

        for entry in evicted {
            abort_pending_advance(&entry.slot).await;
        }
        id
    }

    /// Looks a session up by id. An expired session behaves as absent: it is
    /// removed and reported not found.
    pub async fn get(&self, id: &str) -> AppResult<Arc<Mutex<StoredSession>>> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                None => return Err(not_found(id)),
                Some(entry) if !entry.is_expired(Utc::now(), self.ttl_seconds) => {
                    return Ok(Arc::clone(&entry.slot));
                }
                Some(_) => {}
            }
        }

        debug!("session {} expired, dropping it", id);
        let _ = self.remove(id).await;
        Err(not_found(id))
    }

    /// Drops a session and aborts its pending advance timer. The timer's
    /// store-lookup and revision fence already make a late firing harmless;
    /// aborting just stops it from running at all.
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let entry = {
            let mut sessions = self.sessions.write().await;
            sessions.remove(id)
        }
        .ok_or_else(|| not_found(id))?;

        abort_pending_advance(&entry.slot).await;
        Ok(())
    }

    /// Drops every expired session, returning how many were removed.
    pub async fn sweep_expired(&self) -> usize {
        let removed = {
            let mut sessions = self.sessions.write().await;
            let now = Utc::now();
            let expired: Vec<String> = sessions
                .iter()
                .filter(|(_, entry)| entry.is_expired(now, self.ttl_seconds))
                .map(|(key, _)| key.clone())
                .collect();
            expired
                .into_iter()
                .filter_map(|key| sessions.remove(&key))
                .collect::<Vec<_>>()
        };

        let count = removed.len();
        for entry in &removed {
            abort_pending_advance(&entry.slot).await;
        }
        count
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn sweep_period(&self) -> Duration {
        Duration::from_secs((self.ttl_seconds / 10).max(1))
    }
}

async fn abort_pending_advance(slot: &Arc<Mutex<StoredSession>>) {
    let mut stored = slot.lock().await;
    if let Some(handle) = stored.pending_advance.take() {
        handle.abort();
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("session '{}' does not exist or has expired", id))
}

/// Periodically sweeps expired sessions. Holds only a weak reference, so the
/// task winds down once the store itself is dropped.
pub fn spawn_sweeper(store: &Arc<SessionStore>) -> tokio::task::JoinHandle<()> {
    let period = store.sweep_period();
    let weak = Arc::downgrade(store);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await; // the first tick fires immediately
        loop {
            ticker.tick().await;
            let Some(store) = weak.upgrade() else {
                break;
            };
            let removed = store.sweep_expired().await;
            if removed > 0 {
                debug!("session sweep removed {} expired session(s)", removed);
            }
        }
    })
}

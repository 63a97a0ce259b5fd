//! Selection sessions.
//!
//! Each session owns one state machine behind its own mutex, so concurrent
//! requests against the same session apply their transitions one at a time
//! while different sessions never contend. Sessions are held in a Moka cache:
//! one left idle longer than the configured time is evicted, and the cache
//! never holds more than the configured capacity.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use moka::sync::Cache;
use pulse_core::selection::SelectionStateMachine;
use pulse_shared::AppError;
use uuid::Uuid;

use crate::error::ApiError;

/// Default maximum number of live sessions.
const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Default idle time before a session is evicted (30 minutes).
const DEFAULT_IDLE_SECS: u64 = 1800;

type SessionHandle = Arc<Mutex<SelectionStateMachine>>;

/// Bounded map of live sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    /// Creates an empty store with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_MAX_SESSIONS, Duration::from_secs(DEFAULT_IDLE_SECS))
    }

    /// Creates an empty store holding at most `max_capacity` sessions, each
    /// evicted after `idle` without access.
    #[must_use]
    pub fn with_config(max_capacity: u64, idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();

        Self { sessions }
    }

    /// Stores a machine under a fresh id.
    pub fn create(&self, machine: SelectionStateMachine) -> Uuid {
        let id = Uuid::now_v7();
        self.sessions.insert(id, Arc::new(Mutex::new(machine)));
        id
    }

    /// Drops a session, returning whether it existed.
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count()
    }

    /// Whether there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` with exclusive access to a session's machine. Access resets
    /// the session's idle timer.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown or expired session, `Internal` if a
    /// previous holder panicked, or whatever `f` returns.
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SelectionStateMachine) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let handle = self
            .sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("session {id}")))?;

        let mut machine = handle
            .lock()
            .map_err(|_| AppError::Internal(format!("session {id} lock poisoned")))?;
        f(&mut machine)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pulse_core::calendar::{CalendarModel, FinancialYear, LivePeriod, Month, Quarter};

    use super::*;

    fn machine() -> SelectionStateMachine {
        let calendar = Arc::new(CalendarModel::standard());
        let live = LivePeriod::new(
            Month::February,
            Quarter::Q4,
            FinancialYear::fy(2026),
            &calendar,
        )
        .unwrap();
        SelectionStateMachine::new(calendar, live).unwrap()
    }

    fn not_found(result: Result<(), ApiError>) -> bool {
        matches!(result, Err(ApiError(AppError::NotFound(_))))
    }

    #[test]
    fn test_create_access_remove() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let id = store.create(machine());
        assert_eq!(store.len(), 1);
        store
            .with_session(id, |m| {
                m.toggle_month(Month::March)?;
                Ok(())
            })
            .unwrap();
        let months = store
            .with_session(id, |m| Ok(m.selected_months().to_vec()))
            .unwrap();
        assert_eq!(months, vec![Month::February, Month::March]);

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert!(not_found(store.with_session(id, |_| Ok(()))));
    }

    #[test]
    fn test_idle_session_expires() {
        let store = SessionStore::with_config(16, Duration::from_millis(50));
        let id = store.create(machine());
        assert!(store.with_session(id, |_| Ok(())).is_ok());

        std::thread::sleep(Duration::from_millis(150));

        assert!(not_found(store.with_session(id, |_| Ok(()))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_access_keeps_session_alive() {
        let store = SessionStore::with_config(16, Duration::from_millis(300));
        let id = store.create(machine());

        for _ in 0..4 {
            std::thread::sleep(Duration::from_millis(100));
            assert!(store.with_session(id, |_| Ok(())).is_ok());
        }
    }
}

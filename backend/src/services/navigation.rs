//! Per-session navigation state.
//!
//! Each browser session gets its own [`Page`]; nothing is shared between
//! sessions and there is no process-wide current page.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Top-level page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    About,
}

impl Page {
    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
        }
    }

    /// Text on the sidebar button.
    pub fn button_label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::About => "About Us",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(Page::Home),
            "about" => Ok(Page::About),
            other => Err(format!("Unknown page: {}. Must be 'home' or 'about'", other)),
        }
    }
}

/// Sessions idle for longer than this are dropped.
pub const DEFAULT_IDLE_MINUTES: u32 = 30;

/// Upper bound on live sessions; the least recently seen goes first.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

#[derive(Debug, Clone, Copy)]
struct Session {
    page: Page,
    last_seen: DateTime<Utc>,
}

/// Result of looking up the session behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSession {
    pub session_id: Uuid,
    pub page: Page,
    /// True when no usable session id was presented and a new one was issued.
    pub is_new: bool,
}

/// In-memory session store with idle expiry and a size cap.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_MINUTES, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn with_limits(idle_minutes: u32, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: Duration::minutes(i64::from(idle_minutes)),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Look up `session_id`, issuing a fresh session when it is absent,
    /// unknown or expired.
    pub fn resolve(&self, session_id: Option<Uuid>) -> ResolvedSession {
        self.resolve_at(session_id, Utc::now())
    }

    /// Move a session to `page`. Ids the store does not hold are not adopted;
    /// a fresh session is issued on that page instead.
    pub fn navigate(&self, session_id: Option<Uuid>, page: Page) -> ResolvedSession {
        self.navigate_at(session_id, page, Utc::now())
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn is_live(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.last_seen <= self.idle_timeout
    }

    fn create_at(&self, page: Page, now: DateTime<Utc>) -> Uuid {
        let mut sessions = self.sessions.write();
        sessions.retain(|_, session| self.is_live(session, now));
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let session_id = Uuid::new_v4();
        sessions.insert(session_id, Session { page, last_seen: now });
        session_id
    }

    fn resolve_at(&self, session_id: Option<Uuid>, now: DateTime<Utc>) -> ResolvedSession {
        if let Some(id) = session_id {
            if let Some(page) = self.visit(id, None, now) {
                return ResolvedSession {
                    session_id: id,
                    page,
                    is_new: false,
                };
            }
        }
        ResolvedSession {
            session_id: self.create_at(Page::Home, now),
            page: Page::Home,
            is_new: true,
        }
    }

    fn navigate_at(&self, session_id: Option<Uuid>, page: Page, now: DateTime<Utc>) -> ResolvedSession {
        match session_id.filter(|id| self.visit(*id, Some(page), now).is_some()) {
            Some(id) => ResolvedSession {
                session_id: id,
                page,
                is_new: false,
            },
            None => ResolvedSession {
                session_id: self.create_at(page, now),
                page,
                is_new: true,
            },
        }
    }

    /// Touch a live session, optionally moving it to `page`, and return its
    /// page. An expired entry is removed and reported as absent.
    fn visit(&self, session_id: Uuid, page: Option<Page>, now: DateTime<Utc>) -> Option<Page> {
        let mut sessions = self.sessions.write();
        let live = sessions.get(&session_id).map(|s| self.is_live(s, now))?;
        if !live {
            sessions.remove(&session_id);
            return None;
        }
        let session = sessions.get_mut(&session_id)?;
        if let Some(page) = page {
            session.page = page;
        }
        session.last_seen = now;
        Some(session.page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(store: &SessionStore) -> Uuid {
        store.resolve(None).session_id
    }

    #[test]
    fn test_page_parse() {
        assert_eq!("home".parse::<Page>().unwrap(), Page::Home);
        assert_eq!("About".parse::<Page>().unwrap(), Page::About);
        assert!("settings".parse::<Page>().is_err());
        assert_eq!(Page::default(), Page::Home);
    }

    #[test]
    fn test_new_session_starts_home() {
        let store = SessionStore::default();
        let resolved = store.resolve(None);
        assert!(resolved.is_new);
        assert_eq!(resolved.page, Page::Home);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_navigation_round_trip() {
        let store = SessionStore::default();
        let id = start(&store);

        let moved = store.navigate(Some(id), Page::About);
        assert_eq!(moved.session_id, id);
        assert!(!moved.is_new);
        let resolved = store.resolve(Some(id));
        assert!(!resolved.is_new);
        assert_eq!(resolved.page, Page::About);

        store.navigate(Some(id), Page::Home);
        assert_eq!(store.resolve(Some(id)).page, Page::Home);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        let a = start(&store);
        let b = start(&store);
        store.navigate(Some(a), Page::About);
        assert_eq!(store.resolve(Some(a)).page, Page::About);
        assert_eq!(store.resolve(Some(b)).page, Page::Home);
    }

    #[test]
    fn test_unknown_session_id_gets_replaced() {
        let store = SessionStore::default();
        let stale = Uuid::new_v4();
        let resolved = store.resolve(Some(stale));
        assert!(resolved.is_new);
        assert_ne!(resolved.session_id, stale);
    }

    #[test]
    fn test_navigate_does_not_adopt_unissued_ids() {
        let store = SessionStore::default();
        let forged = Uuid::new_v4();
        let resolved = store.navigate(Some(forged), Page::About);
        assert!(resolved.is_new);
        assert_ne!(resolved.session_id, forged);
        assert_eq!(resolved.page, Page::About);
        assert_eq!(store.resolve(Some(resolved.session_id)).page, Page::About);
        assert!(store.resolve(Some(forged)).is_new);
    }

    #[test]
    fn test_idle_sessions_expire() {
        let store = SessionStore::with_limits(30, 100);
        let t0 = Utc::now();
        let id = store.resolve_at(None, t0).session_id;
        store.navigate_at(Some(id), Page::About, t0);

        let still_live = store.resolve_at(Some(id), t0 + Duration::minutes(20));
        assert!(!still_live.is_new);
        assert_eq!(still_live.page, Page::About);

        // idle time counts from the last request, not from creation
        let expired = store.resolve_at(Some(id), t0 + Duration::minutes(51));
        assert!(expired.is_new);
        assert_eq!(expired.page, Page::Home);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_new_sessions_sweep_idle_ones() {
        let store = SessionStore::with_limits(30, 100);
        let t0 = Utc::now();
        for _ in 0..10 {
            store.resolve_at(None, t0);
        }
        assert_eq!(store.len(), 10);

        store.resolve_at(None, t0 + Duration::minutes(31));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_is_capped() {
        let store = SessionStore::with_limits(30, 5);
        let t0 = Utc::now();
        let first = store.resolve_at(None, t0).session_id;
        let second = store.resolve_at(None, t0 + Duration::seconds(1)).session_id;

        for i in 0..200 {
            let now = t0 + Duration::seconds(2 + i);
            store.resolve_at(None, now);
            store.navigate_at(Some(Uuid::new_v4()), Page::About, now);
            // keep the second session busy so it is never the oldest
            store.resolve_at(Some(second), now);
        }

        assert_eq!(store.len(), 5);
        assert!(store.resolve_at(Some(first), t0 + Duration::seconds(300)).is_new);
        assert!(!store.resolve_at(Some(second), t0 + Duration::seconds(300)).is_new);
    }
}

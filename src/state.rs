//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the remote partner store, the sync settings and a map of
//! per-browser console sessions keyed by the session cookie. A session
//! carries everything the console remembers between requests: the
//! selected partner category, the partner form draft, the imported lead
//! table and one pending notice. Sessions idle past `SESSION_IDLE_TTL`
//! are dropped whenever a new one is created.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::partner::{PartnerCategory, PartnerForm, PartnerRecord};
use crate::services::leads::LeadBook;
use crate::services::sync::InitPolicy;
use crate::sheets::SheetStore;

// =============================================================================
// NOTICE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice notice--success",
            Self::Info => "notice notice--info",
            Self::Warning => "notice notice--warning",
            Self::Error => "notice notice--error",
        }
    }
}

/// One-shot message shown on the next page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

// =============================================================================
// CONSOLE SESSION
// =============================================================================

/// Per-browser console state. Lives until the process restarts.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSession {
    /// Partner type chosen in the category selector.
    pub category: PartnerCategory,
    /// Partner form values to pre-fill. Cleared after a successful submit.
    pub draft: PartnerForm,
    /// Imported leads.
    pub leads: LeadBook,
    /// Pending notice, consumed by the next render.
    pub notice: Option<Notice>,
    /// Last record this session submitted, checked against the next live
    /// read to spot a lost append.
    pub last_submission: Option<PartnerRecord>,
}

impl ConsoleSession {
    /// Record a successful submission: clears the draft.
    pub fn submitted(&mut self, record: PartnerRecord, notice: Notice) {
        self.draft.clear();
        self.last_submission = Some(record);
        self.notice = Some(notice);
    }

    /// Record a failed submission: keeps what was typed.
    pub fn submit_failed(&mut self, draft: PartnerForm, notice: Notice) {
        self.draft = draft;
        self.notice = Some(notice);
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Where partner records are synchronized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    pub worksheet: String,
    pub init_policy: InitPolicy,
}

/// Sessions untouched for this long are dropped.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(4 * 60 * 60);

#[derive(Debug)]
struct SessionEntry {
    session: ConsoleSession,
    last_seen: Instant,
}

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SheetStore>,
    pub sync: SyncSettings,
    sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn SheetStore>, sync: SyncSettings) -> Self {
        Self { store, sync, sessions: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Run `f` against the session, creating it on first use. The lock is
    /// held only for the duration of `f`.
    pub async fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut ConsoleSession) -> R) -> R {
        self.with_session_at(id, Instant::now(), f).await
    }

    /// As [`with_session`](Self::with_session), at a given instant. Creating
    /// a session first drops every session idle for longer than
    /// [`SESSION_IDLE_TTL`].
    pub(crate) async fn with_session_at<R>(
        &self,
        id: Uuid,
        now: Instant,
        f: impl FnOnce(&mut ConsoleSession) -> R,
    ) -> R {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(&id) {
            evict_idle(&mut sessions, now);
        }
        let entry = sessions
            .entry(id)
            .or_insert_with(|| SessionEntry { session: ConsoleSession::default(), last_seen: now });
        entry.last_seen = entry.last_seen.max(now);
        f(&mut entry.session)
    }
}

fn evict_idle(sessions: &mut HashMap<Uuid, SessionEntry>, now: Instant) {
    let before = sessions.len();
    sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= SESSION_IDLE_TTL);
    let evicted = before - sessions.len();
    if evicted > 0 {
        debug!(evicted, remaining = sessions.len(), "idle console sessions dropped");
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

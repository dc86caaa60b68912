//! Per-browser session state for the analyzer.
//!
//! A session is identified by a UUID carried in a cookie and holds a single
//! `SessionPhase`. The phase is a tagged union, so a report flag without a
//! report payload cannot be represented. Nothing here is persisted; restarting
//! the process discards all sessions.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "sb_session";

/// Where a session currently is in the analyze lifecycle.
/// `Analyzing` doubles as the re-entrancy guard: a session may run at most
/// one analysis at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "phase", content = "results", rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Analyzing,
    Reported(AnalysisResult),
}

/// In-memory map of session id to phase. Cheap to clone into handlers.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionPhase>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase for a session. Unknown sessions are idle.
    pub async fn phase(&self, id: Uuid) -> SessionPhase {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or(SessionPhase::Idle)
    }

    /// Transitions the session into `Analyzing`. Rejects re-entrant
    /// submission while another analysis is in flight for the same session.
    pub async fn begin(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&id) {
            Some(SessionPhase::Analyzing) => Err(AppError::Conflict(
                "An analysis is already in progress for this session".to_string(),
            )),
            _ => {
                sessions.insert(id, SessionPhase::Analyzing);
                Ok(())
            }
        }
    }

    /// Stores a finished report and transitions the session to `Reported`.
    pub async fn complete(&self, id: Uuid, results: AnalysisResult) {
        self.inner
            .write()
            .await
            .insert(id, SessionPhase::Reported(results));
    }

    /// Returns the session to `Idle`, discarding any report. Used both for
    /// the explicit "new analysis" action and to unwind a failed analysis.
    pub async fn reset(&self, id: Uuid) {
        self.inner.write().await.insert(id, SessionPhase::Idle);
    }
}

/// Reads the session id from the request's `Cookie` header, if present.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// `Set-Cookie` value pinning the session id to this browser.
pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

// file: src/server/session.rs
// description: in-memory cookie sessions carrying the captcha and login flags
// reference: uuid session ids under a tokio RwLock

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::pipeline::HumanVerified;

pub const SESSION_COOKIE: &str = "campus_qa_session";

/// Upper bound on live sessions unless configured otherwise.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct Session {
    pub captcha_text: Option<String>,
    pub passed_captcha: bool,
    pub logged_in: bool,
    expires_at: DateTime<Utc>,
}

impl Session {
    fn new(expires_at: DateTime<Utc>) -> Self {
        Self {
            captcha_text: None,
            passed_captcha: false,
            logged_in: false,
            expires_at,
        }
    }

    pub fn verified(&self) -> Option<HumanVerified> {
        self.passed_captcha.then(HumanVerified::granted)
    }
}

/// Session id attached to the current request; `fresh` ids still need to be
/// sent back as a cookie.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub id: Uuid,
    pub fresh: bool,
}

impl SessionContext {
    pub fn respond(self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.fresh {
            let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, self.id);
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(SET_COOKIE, value);
            }
        }
        response
    }
}

pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    lifetime: TimeDelta,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(lifetime: TimeDelta) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            lifetime,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }

    pub fn with_lifetime_minutes(minutes: i64) -> Self {
        Self::new(TimeDelta::try_minutes(minutes).unwrap_or(TimeDelta::hours(2)))
    }

    /// Cap the number of live sessions. When full, creating a session evicts
    /// the one closest to expiry, i.e. the least recently used.
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Live session named by the request cookie, or a newly created one.
    /// Access extends the session's expiry.
    pub async fn attach(&self, headers: &HeaderMap) -> SessionContext {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;

        if let Some(id) = session_id_from(headers)
            && let Some(session) = sessions.get_mut(&id)
            && session.expires_at > now
        {
            session.expires_at = now + self.lifetime;
            return SessionContext { id, fresh: false };
        }

        sessions.retain(|_, s| s.expires_at > now);
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, s)| s.expires_at)
                .map(|(id, _)| *id)
            else {
                break;
            };
            sessions.remove(&oldest);
            debug!("Evicted session {} (store full)", oldest);
        }

        let id = Uuid::new_v4();
        sessions.insert(id, Session::new(now + self.lifetime));
        debug!("Created session {} ({} active)", id, sessions.len());
        SessionContext { id, fresh: true }
    }

    pub async fn get(&self, id: Uuid) -> Option<Session> {
        self.sessions.read().await.get(&id).cloned()
    }

    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        self.sessions.write().await.get_mut(&id).map(f)
    }
}

pub fn session_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

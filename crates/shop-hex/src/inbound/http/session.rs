//! Cookie-keyed login sessions and the admin guard.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use shop_types::domain::principal::Principal;
use shop_types::domain::role::Role;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "sid";

struct Session {
    principal: Principal,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Stores a new session, sweeping expired ones first.
    pub fn create(&self, principal: Principal) -> Uuid {
        self.purge_expired();
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            Session {
                principal,
                expires_at: Utc::now() + self.ttl,
            },
        );
        id
    }

    /// Drops every expired session and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions.retain(|_, s| s.expires_at > now);
        before.saturating_sub(self.sessions.len())
    }

    /// Number of stored sessions, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// The live principal for `id`. Expired sessions are dropped on read.
    pub fn get(&self, id: &Uuid) -> Option<Principal> {
        let now = Utc::now();
        let principal = {
            let entry = self.sessions.get(id)?;
            (entry.expires_at > now).then(|| entry.principal.clone())
        };
        if principal.is_none() {
            self.sessions.remove(id);
        }
        principal
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn principal_from(&self, headers: &HeaderMap) -> Option<Principal> {
        session_id(headers).and_then(|id| self.get(&id))
    }
}

/// Reads the session id out of the `Cookie` header(s).
pub fn session_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

pub fn session_cookie(id: Uuid) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn cleared_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0")
}

/// Extractor that only succeeds for a logged-in `Admin`.
pub struct AdminPrincipal(pub Principal);

impl<S> FromRequestParts<S> for AdminPrincipal
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionStore::from_ref(state);
        let principal = sessions.principal_from(&parts.headers).ok_or_else(|| {
            AppError::Authentication("No session found! Please login.".into())
        })?;
        if principal.role != Role::Admin {
            tracing::debug!(user_id = principal.id, "admin route refused");
            return Err(AppError::Authorization(
                "Forbidden: admin access required.".into(),
            ));
        }
        Ok(AdminPrincipal(principal))
    }
}

//! Email+password authentication service.
//!
//! Owns credential verification, session issuance and the per-request
//! session lookup used by the route guard. Sessions are opaque UUID
//! tokens persisted in the sessions table and carried in an HttpOnly
//! cookie; a short-lived in-process cache fronts the database lookup.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::password::{hash_password, verify_password};
use super::session::{Session, SessionCache};
use crate::config::AuthConfig;
use crate::db::{
    AccountRepository, DbPool, NewAccount, NewSession, NewUser, SessionRepository, User,
    UserRepository, TIMESTAMP_FORMAT,
};
use crate::{QuillError, Result};

/// Default session lifetime (60 days).
pub const DEFAULT_SESSION_EXPIRY_DAYS: u64 = 60;

/// Default session validity cache lifetime (5 minutes).
pub const DEFAULT_SESSION_CACHE_SECS: u64 = 5 * 60;

/// Authentication service over a database pool.
#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    cache: Arc<SessionCache>,
    config: AuthConfig,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl AuthService {
    /// Create an authentication service.
    pub fn new(pool: DbPool, config: AuthConfig) -> Self {
        let cache = Arc::new(SessionCache::new(Duration::from_secs(
            config.session_cache_secs,
        )));
        Self {
            pool,
            cache,
            config,
        }
    }

    /// Register a new user with email+password credentials.
    ///
    /// Creates the user, its credential account record and a fresh
    /// session. A duplicate email yields a conflict error.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);

        let password_hash =
            hash_password(password).map_err(|e| QuillError::Auth(e.to_string()))?;

        let user = UserRepository::new(&self.pool)
            .create(&NewUser::new(name, &email))
            .await
            .map_err(|e| {
                if e.to_string().contains("UNIQUE") {
                    QuillError::Conflict("email already registered".into())
                } else {
                    e
                }
            })?;

        AccountRepository::new(&self.pool)
            .create(&NewAccount::credential(user.id, password_hash))
            .await?;

        let session = self.issue_session(&user).await?;

        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(session)
    }

    /// Authenticate with email+password and issue a session.
    ///
    /// Unknown email, missing credential record and wrong password are
    /// indistinguishable to the caller.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);

        let user = UserRepository::new(&self.pool)
            .get_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "login failed: unknown email");
                QuillError::Auth("invalid email or password".into())
            })?;

        if !user.is_active {
            warn!(user_id = user.id, "login failed: account disabled");
            return Err(QuillError::Permission("account is disabled".into()));
        }

        let account = AccountRepository::new(&self.pool)
            .get_credential(user.id)
            .await?
            .ok_or_else(|| QuillError::Auth("invalid email or password".into()))?;

        verify_password(password, &account.password_hash).map_err(|_| {
            warn!(user_id = user.id, "login failed: wrong password");
            QuillError::Auth("invalid email or password".into())
        })?;

        let session = self.issue_session(&user).await?;

        info!(user_id = user.id, "login successful");
        Ok(session)
    }

    /// Invalidate a session by token.
    pub async fn sign_out(&self, token: &str) -> Result<bool> {
        self.cache.remove(token);
        let deleted = SessionRepository::new(&self.pool).delete(token).await?;
        if deleted {
            info!("session signed out");
        }
        Ok(deleted)
    }

    /// Resolve the session for a request from its headers.
    ///
    /// Reads the session cookie, consults the validity cache, then the
    /// database. Fail-closed: every failure path (missing cookie, stale
    /// cache, expired or unknown token, database error) reads as "no
    /// session" so an indeterminate lookup can never grant access.
    pub async fn session_from_headers(&self, headers: &HeaderMap) -> Option<Session> {
        let token = self.session_token(headers)?;

        if let Some(session) = self.cache.get(&token) {
            return Some(session);
        }

        match self.load_session(&token).await {
            Ok(Some(session)) => {
                self.cache.insert(session.clone());
                Some(session)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "session lookup failed; treating request as signed out");
                None
            }
        }
    }

    /// Extract the session token from a request's Cookie header.
    pub fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        let jar = CookieJar::from_headers(headers);
        jar.get(&self.config.cookie_name)
            .map(|c| c.value().to_string())
    }

    async fn load_session(&self, token: &str) -> Result<Option<Session>> {
        let record = match SessionRepository::new(&self.pool).get_valid(token).await? {
            Some(record) => record,
            None => return Ok(None),
        };

        let user = match UserRepository::new(&self.pool)
            .get_by_id(record.user_id)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        if !user.is_active {
            return Ok(None);
        }

        let expires_at = match NaiveDateTime::parse_from_str(&record.expires_at, TIMESTAMP_FORMAT)
        {
            Ok(naive) => naive.and_utc(),
            Err(e) => {
                warn!(error = %e, "unparseable session expiry; treating session as expired");
                return Ok(None);
            }
        };

        Ok(Some(Session {
            token: record.token,
            user_id: user.id,
            name: user.name,
            email: user.email,
            expires_at,
        }))
    }

    async fn issue_session(&self, user: &User) -> Result<Session> {
        let token = Uuid::new_v4().to_string();
        let expires_at =
            Utc::now() + chrono::Duration::days(self.config.session_expiry_days as i64);

        let record = SessionRepository::new(&self.pool)
            .create(&NewSession {
                user_id: user.id,
                token,
                expires_at: expires_at.format(TIMESTAMP_FORMAT).to_string(),
            })
            .await?;

        let session = Session {
            token: record.token,
            user_id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            expires_at,
        };
        self.cache.insert(session.clone());

        Ok(session)
    }

    /// Build the Set-Cookie value carrying a session token.
    pub fn session_cookie(&self, session: &Session) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), session.token.clone()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Build an empty session cookie for removal.
    pub fn clear_session_cookie(&self) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), String::new()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build()
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Remove stale entries from the session validity cache.
    pub fn purge_cache(&self) -> usize {
        self.cache.purge_expired()
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

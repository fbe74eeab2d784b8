//! Route guard middleware.
//!
//! Gates page routes on session presence: protected paths redirect signed-out
//! visitors to the auth page, and the auth page redirects signed-in visitors
//! home. The session check resolves before any routing decision is made.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::Session;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Path of the login/registration page.
pub const LOGIN_PATH: &str = "/auth";

/// Path of the home page.
pub const HOME_PATH: &str = "/";

/// A single route pattern: exact path or prefix family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches one path exactly.
    Exact(String),
    /// Matches the base path and every sub-path beneath it.
    Prefix(String),
}

impl RoutePattern {
    /// Parse a pattern string.
    ///
    /// A trailing `/*` marks a prefix family (`"/post/edit/*"`); anything
    /// else is an exact match.
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/*") {
            Some(base) => RoutePattern::Prefix(base.to_string()),
            None => RoutePattern::Exact(pattern.to_string()),
        }
    }

    /// Test a request path against this pattern.
    ///
    /// A prefix pattern matches its base path and any sub-path, but never a
    /// sibling (`/profile/*` matches `/profile` and `/profile/edit`, not
    /// `/profilex`).
    pub fn matches(&self, path: &str) -> bool {
        match self {
            RoutePattern::Exact(p) => path == p,
            RoutePattern::Prefix(base) => {
                path == base
                    || path
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// Ordered set of protected route patterns, fixed at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    protected: Vec<RoutePattern>,
}

impl RouteTable {
    /// Build a route table from pattern strings, preserving order.
    pub fn new(patterns: &[String]) -> Self {
        Self {
            protected: patterns.iter().map(|p| RoutePattern::parse(p)).collect(),
        }
    }

    /// Whether a path requires a session.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected.iter().any(|p| p.matches(path))
    }

    /// Whether a path is the login page.
    pub fn is_login(&self, path: &str) -> bool {
        path == LOGIN_PATH
    }

    /// Number of protected patterns.
    pub fn len(&self) -> usize {
        self.protected.len()
    }

    /// Whether the table has no protected patterns.
    pub fn is_empty(&self) -> bool {
        self.protected.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(&crate::config::ServerConfig::default().protected_routes)
    }
}

/// Session-gating middleware for page routes.
///
/// Decision table:
///
/// | Path        | Session | Outcome            |
/// |-------------|---------|--------------------|
/// | protected   | none    | redirect to /auth  |
/// | protected   | present | allow              |
/// | login page  | present | redirect to /      |
/// | login page  | none    | allow              |
/// | other       | any     | allow              |
///
/// On allow, the resolved session is stored in request extensions for
/// handlers. The request itself is never mutated beyond that.
pub async fn route_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    // The session check must resolve before routing proceeds; lookup
    // failures read as "no session" (fail-closed)
    let session = state.auth.session_from_headers(request.headers()).await;

    if state.routes.is_protected(&path) && session.is_none() {
        return Redirect::temporary(LOGIN_PATH).into_response();
    }

    // A signed-in visitor has no business on the auth page
    if state.routes.is_login(&path) && session.is_some() {
        return Redirect::temporary(HOME_PATH).into_response();
    }

    if let Some(session) = session {
        request.extensions_mut().insert(session);
    }

    next.run(request).await
}

/// Extractor for the session resolved by the route guard.
///
/// Handlers behind the guard can take this to read the signed-in user.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentSession)
            .ok_or_else(|| ApiError::unauthorized("Sign in required"))
    }
}

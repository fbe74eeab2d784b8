//! Handlers for the Quill web layer.

pub mod auth;
pub mod pages;

pub use auth::*;
pub use pages::*;

use crate::auth::AuthService;
use crate::web::middleware::RouteTable;

/// Application state shared across handlers and middleware.
pub struct AppState {
    /// Authentication service (owns the database pool).
    pub auth: AuthService,
    /// Protected-route table, fixed at startup.
    pub routes: RouteTable,
}

impl AppState {
    /// Create a new application state.
    pub fn new(auth: AuthService, routes: RouteTable) -> Self {
        Self { auth, routes }
    }
}

//! Quill - a small blog platform server.
//!
//! Serves a handful of pages (home, auth, profile, post editing) behind a
//! session-aware route guard, plus a JSON authentication API backed by
//! email+password credentials and opaque cookie sessions.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, validate_registration, verify_password, AuthService, PasswordError,
    RegisterInput, Session, SessionCache, DEFAULT_SESSION_CACHE_SECS,
    DEFAULT_SESSION_EXPIRY_DAYS, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use config::Config;
pub use db::{
    Account, AccountRepository, Database, NewAccount, NewSession, NewUser, SessionRecord,
    SessionRepository, User, UserRepository,
};
pub use error::{QuillError, Result};
pub use web::{RoutePattern, RouteTable, WebServer};

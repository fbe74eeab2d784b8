//! Middleware for the Quill web layer.

pub mod cors;
pub mod guard;

pub use cors::create_cors_layer;
pub use guard::{route_guard, CurrentSession, RoutePattern, RouteTable, HOME_PATH, LOGIN_PATH};

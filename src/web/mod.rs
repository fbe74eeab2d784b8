//! Web layer for Quill.
//!
//! Guarded page routes, the JSON authentication API, and the server
//! runtime around them.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use middleware::{RoutePattern, RouteTable};
pub use router::create_router;
pub use server::WebServer;

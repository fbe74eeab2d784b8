//! Page handlers.
//!
//! Minimal HTML shells; the interesting behavior is the route guard in
//! front of them.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;

use crate::web::middleware::CurrentSession;

/// GET / - Home page (public).
pub async fn home() -> Html<&'static str> {
    Html("<h1>Quill</h1><p>Recent posts will appear here.</p>")
}

/// GET /auth - Login and registration page (public; signed-in visitors
/// are redirected home by the guard).
pub async fn auth_page() -> Html<&'static str> {
    Html("<h1>Welcome!</h1><p>Sign in or create your account.</p>")
}

/// GET /profile - Profile page (protected).
pub async fn profile(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(format!(
        "<h1>Profile</h1><p>Signed in as {} &lt;{}&gt;</p>",
        session.name, session.email
    ))
}

/// GET /post/create - Post composer (protected).
pub async fn post_create(CurrentSession(session): CurrentSession) -> Html<String> {
    Html(format!(
        "<h1>New post</h1><p>Drafting as {}</p>",
        session.name
    ))
}

/// GET /post/edit/:id - Post editor (protected).
pub async fn post_edit(
    Path(id): Path<String>,
    CurrentSession(session): CurrentSession,
) -> Html<String> {
    Html(format!(
        "<h1>Edit post {}</h1><p>Editing as {}</p>",
        id, session.name
    ))
}

/// Fallback for unmatched paths.
///
/// Registered before the guard layer so even unrouted paths pass through
/// the session check.
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html("<h1>404</h1><p>Page not found.</p>"))
}

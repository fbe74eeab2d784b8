//! Web server for Quill.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::auth::AuthService;
use crate::config::Config;
use crate::db::{Database, SessionRepository};

use super::handlers::AppState;
use super::middleware::RouteTable;
use super::router::{create_health_router, create_router};

/// Interval between session cleanup runs: 1 hour.
const CLEANUP_INTERVAL_SECS: u64 = 3600;

/// Web server for the page and API routes.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS allowed origins.
    cors_origins: Vec<String>,
}

impl WebServer {
    /// Create a new web server from configuration and an open database.
    pub fn new(config: &Config, db: Database) -> Self {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .expect("Invalid web server address");

        let auth = AuthService::new(db.pool().clone(), config.auth.clone());
        let routes = RouteTable::new(&config.server.protected_routes);
        let app_state = Arc::new(AppState::new(auth, routes));

        Self {
            addr,
            app_state,
            cors_origins: config.server.cors_origins.clone(),
        }
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the session cleanup background task.
    ///
    /// Runs every hour; removes expired session rows and purges the
    /// in-process validity cache.
    fn start_session_cleanup_task(auth: AuthService) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));

            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;

                let repo = SessionRepository::new(auth.pool());
                match repo.cleanup_expired().await {
                    Ok(count) => {
                        if count > 0 {
                            tracing::info!(deleted_count = count, "Cleaned up expired sessions");
                        } else {
                            tracing::debug!("No expired sessions to clean up");
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to cleanup sessions");
                    }
                }

                let purged = auth.purge_cache();
                if purged > 0 {
                    tracing::debug!(purged = purged, "Purged stale session cache entries");
                }
            }
        });
    }

    fn build_router(&self) -> axum::Router {
        create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router())
            .layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> Result<(), std::io::Error> {
        let auth = self.app_state.auth.clone();
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(auth);
        tracing::info!("Session cleanup task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// Useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> Result<SocketAddr, std::io::Error> {
        let auth = self.app_state.auth.clone();
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        Self::start_session_cleanup_task(auth);
        tracing::info!("Session cleanup task started (runs every hour)");

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // Use random port
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, db);
        assert_eq!(server.addr.ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();

        let server = WebServer::new(&config, db);
        let addr = server.run_with_addr().await.unwrap();

        let client = reqwest::Client::new();
        let resp = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(resp.text().await.unwrap(), "OK");
    }
}

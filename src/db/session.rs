//! Session repository for cookie-session authentication.

use super::{DbPool, SQL_NOW};
use crate::Result;

/// Session entity: an opaque token with an absolute expiry.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    /// Session ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Opaque token string (UUID v4).
    pub token: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// New session for creation.
#[derive(Debug, Clone)]
pub struct NewSession {
    /// Owning user ID.
    pub user_id: i64,
    /// Opaque token string.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: String,
}

/// Repository for session operations.
pub struct SessionRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new session.
    pub async fn create(&self, new_session: &NewSession) -> Result<SessionRecord> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO sessions (user_id, token, expires_at) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_session.user_id)
        .bind(&new_session.token)
        .bind(&new_session.expires_at)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::QuillError::NotFound("session".into()))
    }

    /// Get a session by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<SessionRecord>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, token, created_at, expires_at
             FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Get a session by token string, regardless of expiry.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<SessionRecord>> {
        let session = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, user_id, token, created_at, expires_at
             FROM sessions WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(session)
    }

    /// Get a valid (not expired) session by token string.
    pub async fn get_valid(&self, token: &str) -> Result<Option<SessionRecord>> {
        let sql = format!(
            "SELECT id, user_id, token, created_at, expires_at
             FROM sessions
             WHERE token = $1
               AND expires_at > {SQL_NOW}"
        );
        let session = sqlx::query_as::<_, SessionRecord>(&sql)
            .bind(token)
            .fetch_optional(self.pool)
            .await?;

        Ok(session)
    }

    /// Delete a session by token (sign-out).
    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all sessions for a user.
    pub async fn delete_all_for_user(&self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete expired sessions (cleanup).
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let sql = format!("DELETE FROM sessions WHERE expires_at < {SQL_NOW}");
        let result = sqlx::query(&sql).execute(self.pool).await?;

        Ok(result.rows_affected())
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup_db() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("Test User", "test@example.com"))
            .await
            .unwrap();
        let user_id = user.id;
        (db, user_id)
    }

    fn session(user_id: i64, token: &str, expires_at: &str) -> NewSession {
        NewSession {
            user_id,
            token: token.to_string(),
            expires_at: expires_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_session() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        let created = repo
            .create(&session(user_id, "test-token-123", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.token, "test-token-123");
        assert!(!created.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_token() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&session(user_id, "lookup-token", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        let found = repo.get_by_token("lookup-token").await.unwrap();
        assert!(found.is_some());

        let missing = repo.get_by_token("nonexistent").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_valid() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&session(user_id, "valid-token", "2099-12-31 23:59:59"))
            .await
            .unwrap();
        repo.create(&session(user_id, "expired-token", "2000-01-01 00:00:00"))
            .await
            .unwrap();

        let found = repo.get_valid("valid-token").await.unwrap();
        assert!(found.is_some());

        // Expired session exists but is not valid
        let not_found = repo.get_valid("expired-token").await.unwrap();
        assert!(not_found.is_none());
        assert!(repo.get_by_token("expired-token").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&session(user_id, "delete-me", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        assert!(repo.delete("delete-me").await.unwrap());
        assert!(repo.get_by_token("delete-me").await.unwrap().is_none());

        // Already gone
        assert!(!repo.delete("delete-me").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_all_for_user() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        for i in 0..3 {
            repo.create(&session(
                user_id,
                &format!("user-token-{i}"),
                "2099-12-31 23:59:59",
            ))
            .await
            .unwrap();
        }

        let count = repo.delete_all_for_user(user_id).await.unwrap();
        assert_eq!(count, 3);

        for i in 0..3 {
            let found = repo
                .get_by_token(&format!("user-token-{i}"))
                .await
                .unwrap();
            assert!(found.is_none());
        }
    }

    #[tokio::test]
    async fn test_cleanup_expired() {
        let (db, user_id) = setup_db().await;
        let repo = SessionRepository::new(db.pool());

        repo.create(&session(user_id, "old-expired", "2000-01-01 00:00:00"))
            .await
            .unwrap();
        repo.create(&session(user_id, "still-valid", "2099-12-31 23:59:59"))
            .await
            .unwrap();

        let deleted = repo.cleanup_expired().await.unwrap();
        assert_eq!(deleted, 1);

        assert!(repo.get_by_token("old-expired").await.unwrap().is_none());
        assert!(repo.get_by_token("still-valid").await.unwrap().is_some());
    }
}

//! User model and repository for Quill.

use super::DbPool;
use crate::Result;

/// User entity representing a registered user.
///
/// Identity only; the credential record lives in the accounts table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address (unique, stored lowercase).
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
                .bind(&new_user.name)
                .bind(&new_user.email)
                .fetch_one(self.pool)
                .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::QuillError::NotFound("user".into()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by email address.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at, is_active FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Set the active flag on a user account.
    pub async fn set_active(&self, id: i64, is_active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET is_active = $1 WHERE id = $2")
            .bind(is_active)
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_create_user() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("John Doe", "john@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert!(user.is_active);
        assert!(!user.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let created = repo
            .create(&NewUser::new("Jane", "jane@example.com"))
            .await
            .unwrap();

        let found = repo.get_by_id(created.id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().email, "jane@example.com");

        let missing = repo.get_by_id(9999).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("Jane", "jane@example.com"))
            .await
            .unwrap();

        let found = repo.get_by_email("jane@example.com").await.unwrap();
        assert!(found.is_some());

        let missing = repo.get_by_email("nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("First", "dup@example.com"))
            .await
            .unwrap();

        let result = repo.create(&NewUser::new("Second", "dup@example.com")).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_set_active() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("Flag", "flag@example.com"))
            .await
            .unwrap();

        assert!(repo.set_active(user.id, false).await.unwrap());
        let reloaded = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);

        // Unknown ID affects no rows
        assert!(!repo.set_active(9999, false).await.unwrap());
    }
}

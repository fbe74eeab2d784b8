//! Account (credential record) repository for Quill.
//!
//! An account links a user to one authentication provider. Only the
//! `credential` provider (email + password) is wired up in this slice.

use super::DbPool;
use crate::Result;

/// Provider identifier for email+password credentials.
pub const CREDENTIAL_PROVIDER: &str = "credential";

/// Account entity: one credential record per provider per user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Account ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Authentication provider identifier.
    pub provider: String,
    /// Password hash (Argon2, PHC string).
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// Data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Owning user ID.
    pub user_id: i64,
    /// Authentication provider identifier.
    pub provider: String,
    /// Password hash (pre-hashed with Argon2).
    pub password_hash: String,
}

impl NewAccount {
    /// Create a credential-provider account record.
    pub fn credential(user_id: i64, password_hash: impl Into<String>) -> Self {
        Self {
            user_id,
            provider: CREDENTIAL_PROVIDER.to_string(),
            password_hash: password_hash.into(),
        }
    }
}

/// Repository for account operations.
pub struct AccountRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new account record.
    pub async fn create(&self, new_account: &NewAccount) -> Result<Account> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO accounts (user_id, provider, password_hash) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(new_account.user_id)
        .bind(&new_account.provider)
        .bind(&new_account.password_hash)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| crate::QuillError::NotFound("account".into()))
    }

    /// Get an account by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, user_id, provider, password_hash, created_at
             FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }

    /// Get the credential account for a user.
    pub async fn get_credential(&self, user_id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT id, user_id, provider, password_hash, created_at
             FROM accounts WHERE user_id = $1 AND provider = $2",
        )
        .bind(user_id)
        .bind(CREDENTIAL_PROVIDER)
        .fetch_optional(self.pool)
        .await?;

        Ok(account)
    }
}

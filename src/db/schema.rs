//! Database schema and migrations for Quill.
//!
//! Migrations are applied sequentially when the database is first opened
//! or upgraded; the schema_version table tracks progress.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table: identity only, credentials live in accounts
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    is_active   INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: Accounts table for per-provider credential records
    r#"
-- Accounts table: one credential record per provider per user
CREATE TABLE accounts (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    provider      TEXT NOT NULL DEFAULT 'credential',
    password_hash TEXT NOT NULL,           -- Argon2 hash
    created_at    TEXT NOT NULL DEFAULT (datetime('now')),
    UNIQUE(user_id, provider)
);

CREATE INDEX idx_accounts_user_id ON accounts(user_id);
"#,
    // v3: Sessions table for opaque cookie tokens
    r#"
-- Sessions table: opaque tokens with absolute expiry
CREATE TABLE sessions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    expires_at  TEXT NOT NULL
);

CREATE INDEX idx_sessions_token ON sessions(token);
CREATE INDEX idx_sessions_user_id ON sessions(user_id);
CREATE INDEX idx_sessions_expires_at ON sessions(expires_at);
"#,
];

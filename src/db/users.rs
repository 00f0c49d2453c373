//! Credential store: username + password-hash rows.
//!
//! Duplicate usernames are rejected by the UNIQUE constraint on the insert
//! itself rather than a prior existence check, so two concurrent
//! registrations cannot both succeed.

use sqlx::SqlitePool;

use super::User;

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error> {
    sqlx::query_as("INSERT INTO users (username, password_hash) VALUES (?, ?) RETURNING *")
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await
}

/// True when the error is the storage layer reporting a UNIQUE constraint
/// violation (the only unique column is `users.username`).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.message().contains("UNIQUE constraint failed"))
}

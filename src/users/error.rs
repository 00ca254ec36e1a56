use thiserror::Error;

/// Failures surfaced by a [`UserStore`](super::repo::UserStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (email or user id) is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored row could not be turned into a `UserRecord`.
    #[error("corrupt user row: {0}")]
    Corrupt(String),
}

// Postgres reports `users_email_key` / `users_pkey` violations as unique
// violations; those become `Conflict` so the seeder can tell a lost insert race
// apart from a real failure.
impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

#[derive(Debug, Error)]
#[error("credential hashing failed: {0}")]
pub struct HashError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Reasons `ensure_admin_exists` aborts startup.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("admin lookup failed")]
    Lookup(#[source] StoreError),

    #[error("hashing default admin password failed")]
    Hash(#[source] HashError),

    #[error("admin insert failed")]
    Insert(#[source] StoreError),
}

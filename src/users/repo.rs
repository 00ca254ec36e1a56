use async_trait::async_trait;
use sqlx::PgPool;

use super::error::StoreError;
use super::repo_types::{UserRecord, UserRow};

/// Persistent mapping from email to user record.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Presence check that does not decode the row.
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert `user`; a taken email or id yields [`StoreError::Conflict`].
    async fn save(&self, user: &UserRecord) -> Result<UserRecord, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, role, name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        row.map(UserRecord::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#,
        )
        .bind(email)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    /// A duplicate email trips `users_email_key` and comes back as `Conflict`.
    async fn save(&self, user: &UserRecord) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (user_id, email, password_hash, role, name, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING user_id, email, password_hash, role, name, created_at
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.name)
        .bind(user.created_at)
        .fetch_one(&self.db)
        .await?;
        UserRecord::try_from(row)
    }
}

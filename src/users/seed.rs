use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use super::error::{SeedError, StoreError};
use super::password::CredentialHasher;
use super::repo::UserStore;
use super::repo_types::{Role, UserRecord};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_DEFAULT_PASSWORD: &str = "admin123";
pub const ADMIN_NAME: &str = "Admin";

#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    AlreadyExists,
    Created(UserRecord),
}

/// Makes sure the well-known administrator account exists before the
/// application starts serving.
pub struct AdminSeeder {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AdminSeeder {
    pub fn new(store: Arc<dyn UserStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    #[instrument(skip(self))]
    pub async fn ensure_admin_exists(&self) -> Result<SeedOutcome, SeedError> {
        // Presence only: the record may since carry a role this crate doesn't model.
        if self
            .store
            .exists_by_email(ADMIN_EMAIL)
            .await
            .map_err(SeedError::Lookup)?
        {
            info!(email = ADMIN_EMAIL, "admin user already exists");
            return Ok(SeedOutcome::AlreadyExists);
        }

        let password_hash = self
            .hasher
            .hash(ADMIN_DEFAULT_PASSWORD)
            .map_err(SeedError::Hash)?;
        let admin = UserRecord {
            user_id: Uuid::new_v4().to_string(),
            email: ADMIN_EMAIL.to_string(),
            password_hash,
            role: Role::Admin,
            name: ADMIN_NAME.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        match self.store.save(&admin).await {
            Ok(saved) => {
                info!(email = %saved.email, user_id = %saved.user_id, "admin user created");
                Ok(SeedOutcome::Created(saved))
            }
            // Another instance inserted it between our lookup and insert.
            Err(StoreError::Conflict(detail)) => {
                info!(email = ADMIN_EMAIL, %detail, "admin user already exists");
                Ok(SeedOutcome::AlreadyExists)
            }
            Err(e) => Err(SeedError::Insert(e)),
        }
    }
}

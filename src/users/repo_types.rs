use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

use super::error::{StoreError, UnknownRole};

/// Access level of a user account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User account as the rest of the application sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub user_id: String,              // opaque generated id
    pub email: String,                // unique lookup key
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 PHC string, never the plaintext
    pub role: Role,
    pub name: String,                 // display name
    pub created_at: OffsetDateTime,
}

/// Raw `users` row; the role column is plain text.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRow {
    pub user_id: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub name: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let role = r
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::Corrupt(format!("user {}: {}", r.user_id, e)))?;
        Ok(Self {
            user_id: r.user_id,
            email: r.email,
            password_hash: r.password_hash,
            role,
            name: r.name,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> UserRow {
        UserRow {
            user_id: "u-1".into(),
            email: "someone@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            role: role.into(),
            name: "Someone".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn role_parses_stored_text() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("USER".parse::<Role>(), Ok(Role::User));
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn role_rejects_unknown_text() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn row_converts_into_record() {
        let record = UserRecord::try_from(row("ADMIN")).expect("valid row");
        assert_eq!(record.role, Role::Admin);
        assert_eq!(record.email, "someone@example.com");
    }

    #[test]
    fn row_with_unknown_role_is_corrupt() {
        let err = UserRecord::try_from(row("ROOT")).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(msg) if msg.contains("ROOT")));
    }

    #[test]
    fn serialization_hides_password_hash() {
        let record = UserRecord::try_from(row("USER")).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"role\":\"USER\""));
        assert!(!json.contains("password_hash"));
    }
}

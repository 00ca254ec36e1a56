pub mod error;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod seed;

pub use password::Argon2Hasher;
pub use repo::PgUserStore;
pub use seed::AdminSeeder;

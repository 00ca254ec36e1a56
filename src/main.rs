use std::sync::Arc;

use anyhow::Context;

mod app;
mod config;
mod state;
mod users;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::users::{AdminSeeder, Argon2Hasher, PgUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "billing=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    let app_state = AppState::init(config).await?;

    // Run migrations if present
    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    // The admin account must exist before any request is served.
    let seeder = AdminSeeder::new(
        Arc::new(PgUserStore::new(app_state.db.clone())),
        Arc::new(Argon2Hasher),
    );
    seeder
        .ensure_admin_exists()
        .await
        .context("seed admin user")?;

    let app = app::build_app(app_state.clone());
    app::serve(app, &app_state).await
}

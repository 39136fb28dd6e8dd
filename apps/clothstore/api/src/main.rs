use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before anything fallible so startup errors are reported in color
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;
    database::postgres::run_migrations::<Migrator>(&db, config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    tokio::fs::create_dir_all(&config.uploads.dir).await?;

    let state = AppState::new(config, db);

    if let Some(seed) = &state.config.admin {
        let created = api::auth::service(&state)
            .ensure_admin(seed)
            .await
            .map_err(|e| eyre::eyre!("Admin seeding failed: {}", e))?;
        if created {
            info!(username = %seed.username, "Created admin account");
        }
    }

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    // /health: liveness with app name/version; /ready: database and storage checks
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting ClothStore API (30s shutdown timeout)"
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ClothStore API shutdown complete");
    Ok(())
}

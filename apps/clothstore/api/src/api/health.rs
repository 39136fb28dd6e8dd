//! Readiness probe backed by real dependency checks.

use crate::state::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// `GET /ready`: pings the database and checks the upload directory exists.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "database",
            Box::pin(async {
                database::postgres::check_health(&state.db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ),
        (
            "storage",
            Box::pin(async {
                match tokio::fs::metadata(state.storage.root()).await {
                    Ok(meta) if meta.is_dir() => Ok(()),
                    Ok(_) => Err(format!("{} is not a directory", state.storage.root().display())),
                    Err(e) => Err(format!("Upload directory unavailable: {}", e)),
                }
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{cors_layer_from_env, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Wrap the API routes with documentation UIs and the shared layers.
///
/// - `/swagger-ui`, `/redoc`, `/rapidoc`, `/scalar` serve `T::openapi()`
/// - `apis` is nested under `/api`
/// - unknown paths get the JSON 404 body
/// - tracing, security headers, CORS (from `CORS_ALLOWED_ORIGIN`) and compression
///
/// Fails when `CORS_ALLOWED_ORIGIN` is missing or malformed.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = cors_layer_from_env()?;

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    let cleanup_handle = tokio::spawn(async move {
        let _ = shutdown_rx.recv().await;
        info!(timeout = ?shutdown_timeout, "Running cleanup");
        if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
            tracing::warn!(timeout = ?shutdown_timeout, "Cleanup timed out, forcing shutdown");
        }
    });

    let graceful = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { graceful.wait_for_shutdown().await })
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Server error"));

    // Server may also stop on its own error; make sure cleanup still runs
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}, routing::get};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    #[tokio::test]
    async fn test_router_nests_api_and_falls_back_to_json_404() {
        let router = temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("http://localhost:4200"), || {
            create_router::<EmptyDoc>(Router::new().route("/ping", get(|| async { "pong" })))
        })
        .unwrap();

        let ok = router
            .clone()
            .oneshot(Request::get("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(ok.headers()["x-frame-options"], "DENY");

        let missing = router
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }
}

//! Server entry point: env, logging, database pool, migrations, router.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use verso::{config::Config, routes, routes::documents::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verso=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting verso server on {}:{}", config.host, config.port);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    verso::MIGRATOR.run(&pool).await?;

    let state = AppState { pool };

    let api_routes = Router::new()
        .route(
            "/documents",
            get(routes::list_documents).post(routes::create_document),
        )
        .route(
            "/documents/{id}",
            get(routes::get_document).patch(routes::update_document),
        )
        .route(
            "/documents/{id}/versions",
            get(routes::list_document_versions),
        )
        .route(
            "/documents/{id}/versions/current",
            get(routes::get_current_version),
        )
        .route(
            "/documents/{id}/versions/{number}",
            get(routes::get_document_version),
        )
        .route(
            "/documents/{id}/versions/{number}/restore",
            post(routes::restore_document_version),
        )
        .route("/documents/{id}/diff", get(routes::diff_document_versions))
        .route("/health", get(routes::health_check))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

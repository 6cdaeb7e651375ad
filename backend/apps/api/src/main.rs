//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use blog::{PgBlogRepository, blog_router};
use catalog::{PgCatalogRepository, catalog_router};
use platform::mailer::{HttpMailer, LogMailer, MailConfig};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,blog=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired verification codes
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired_codes().await {
        Ok(deleted) => {
            tracing::info!(codes_deleted = deleted, "Verification code cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Verification code cleanup failed, continuing anyway"
            );
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) && env::var("SESSION_SECRET").is_err() {
        tracing::warn!("SESSION_SECRET not set, using a random development secret");
        AuthConfig::development()
    } else {
        AuthConfig::from_env().expect("SESSION_SECRET must be set in production")
    };

    // Mail transport: fall back to the log transport when no API key is
    // configured so local development works without a mail account
    let auth_routes = match MailConfig::from_env() {
        Ok(mail_config) => auth_router(
            auth_repo,
            HttpMailer::new(mail_config),
            auth_config.clone(),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Mail not configured, using log transport");
            auth_router(auth_repo, LogMailer, auth_config.clone())
        }
    };

    let catalog_repo = PgCatalogRepository::new(pool.clone());
    let blog_repo = PgBlogRepository::new(pool.clone());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/b", blog_router(blog_repo, auth_config))
        .nest("/api", catalog_router(catalog_repo))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use auth::{AuthAppState, AuthConfig, PgAccountRepository, RolePolicy, account_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::{
    BookAppState, BookCatalog, PgCatalogRepository, QuestionAppState, QuestionBoard, book_router,
    question_router,
};
use platform::clock::{Clock, SystemClock};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

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

    let config = auth_config_from_env()?;
    tracing::info!(
        admin_emails = config.admin_emails.len(),
        superuser = %config.superuser_email,
        token_ttl_secs = config.token_ttl.as_secs(),
        "Auth configuration loaded"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let policy = Arc::new(RolePolicy::new(&config.superuser_email));

    let auth_state = AuthAppState::new(PgAccountRepository::new(pool.clone()), config, clock.clone());
    let catalog_repo = Arc::new(PgCatalogRepository::new(pool));

    let books = BookAppState {
        catalog: Arc::new(BookCatalog::new(catalog_repo.clone(), policy.clone())),
    };
    let questions = QuestionAppState {
        board: Arc::new(QuestionBoard::new(catalog_repo, policy, clock)),
    };

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string());

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
        ]));

    // Build router
    let app = Router::new()
        .merge(account_router(auth_state.clone()))
        .merge(book_router(auth_state.clone(), books))
        .merge(question_router(auth_state, questions))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the auth configuration from environment variables
fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let mut config = AuthConfig::default();

    if let Ok(admins) = env::var("ADMIN_EMAILS") {
        config = config.with_admin_emails(admins.split(','));
    }

    if let Ok(superuser) = env::var("SUPERUSER_EMAIL") {
        config = config.with_superuser_email(superuser);
    }

    if let Ok(ttl) = env::var("TOKEN_TTL_SECS") {
        let secs: u64 = ttl.parse().context("TOKEN_TTL_SECS must be a number of seconds")?;
        config.token_ttl = Duration::from_secs(secs);
    }

    if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
        if !pepper.is_empty() {
            config.password_pepper = Some(pepper.into_bytes());
        }
    }

    Ok(config)
}

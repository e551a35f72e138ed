use std::sync::Arc;

use auth::Authenticator;
use library_service::config::Config;
use library_service::domain::author::service::AuthorService;
use library_service::domain::book::service::BookService;
use library_service::domain::reconcile::service::ReconcileService;
use library_service::domain::user::service::UserService;
use library_service::inbound::http::router::create_router;
use library_service::inbound::http::router::AppState;
use library_service::inbound::scheduler::ReconcileScheduler;
use library_service::outbound::repositories::PostgresAuthorRepository;
use library_service::outbound::repositories::PostgresBookRepository;
use library_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "library-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let author_repository = Arc::new(PostgresAuthorRepository::new(pg_pool.clone()));
    let book_repository = Arc::new(PostgresBookRepository::new(pg_pool));

    let reconciler = Arc::new(ReconcileService::new(
        Arc::clone(&author_repository),
        Arc::clone(&book_repository),
    ));

    let user_service = Arc::new(UserService::new(user_repository));
    let author_service = Arc::new(AuthorService::new(Arc::clone(&author_repository)));
    let book_service = Arc::new(BookService::new(
        Arc::clone(&book_repository),
        Arc::clone(&author_repository),
        Arc::clone(&reconciler),
    ));

    let scheduler = ReconcileScheduler::start(Arc::clone(&reconciler));

    let state = AppState {
        user_service,
        author_service,
        book_service,
        authenticator,
        jwt_expiration_hours: config.jwt.expiration_hours,
    };

    let http_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await;
    tracing::info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

use std::sync::Arc;

use auth::TokenHandler;
use identity_service::config::Config;
use identity_service::domain::user::service::UserService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::MySqlUserRepository;
use identity_service::outbound::session::RedisSessionStore;
use sqlx::mysql::MySqlPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    // Store connections are startup conditions: failing to reach either
    // one aborts the process instead of limping along.
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(max_connections = 5, database = "mysql", "Database connection pool created");

    let sessions = Arc::new(RedisSessionStore::connect(&config.redis.url).await?);
    tracing::info!(store = "redis", "Session store connected");

    let token_handler = Arc::new(TokenHandler::new(
        config.jwt.secret.as_bytes(),
        config.jwt.expiration_hours,
    ));
    let repository = Arc::new(MySqlUserRepository::new(pool));

    let user_service = Arc::new(UserService::new(
        Arc::clone(&repository),
        Arc::clone(&sessions),
        Arc::clone(&token_handler),
    ));

    let address = format!("0.0.0.0:{}", config.server.http_port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, protocol = "http", "Http server listening");

    let application = create_router(user_service, sessions, token_handler);
    axum::serve(listener, application).await?;

    Ok(())
}

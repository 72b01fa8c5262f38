use std::sync::Arc;

use forum_auth::Authenticator;
use forum_auth::FileKeyProvider;
use forum_auth::KeyProvider;
use forum_gateway::config::Config;
use forum_gateway::domain::account::service::AccountService;
use forum_gateway::inbound::http::router::create_router;
use forum_gateway::outbound::repositories::InMemoryAccountRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forum_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "forum-gateway",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        key_file = %config.jwt.key_file,
        expiration_hours = config.jwt.expiration_hours,
        memory_kib = config.password.memory_kib,
        max_concurrent_hashes = config.password.max_concurrent_hashes,
        "Configuration loaded"
    );

    // The key is re-read on every request, so a missing file is survivable
    // and may be fixed while running.
    let keys = Arc::new(FileKeyProvider::new(&config.jwt.key_file));
    if let Err(e) = keys.load() {
        tracing::warn!(error = %e, "Signing key not loadable at startup");
    }

    let authenticator = Arc::new(Authenticator::new(&config.auth_config(), keys));
    let account_repository = Arc::new(InMemoryAccountRepository::new());
    let account_service = Arc::new(AccountService::new(
        account_repository,
        authenticator,
        config.password.max_concurrent_hashes,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(account_service)).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

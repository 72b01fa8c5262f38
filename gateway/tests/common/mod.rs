use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use forum_auth::Argon2Params;
use forum_auth::AuthConfig;
use forum_auth::Authenticator;
use forum_auth::ClaimSet;
use forum_auth::FileKeyProvider;
use forum_auth::KeyProvider;
use forum_auth::SigningKey;
use forum_auth::StaticKeyProvider;
use forum_auth::TokenCodec;
use forum_auth::TokenConfig;
use forum_gateway::domain::account::service::AccountService;
use forum_gateway::inbound::http::router::create_router;
use forum_gateway::outbound::repositories::InMemoryAccountRepository;
use serde_json::json;

pub const SIGNING_KEY: &[u8] = b"test-signing-key-for-gateway-integration";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryAccountRepository>,
    pub api_client: reqwest::Client,
    pub codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with(Argon2Params::new(64, 1, 1)).await
    }

    /// Spawn with specific hashing parameters, used to simulate a cost upgrade.
    pub async fn spawn_with(params: Argon2Params) -> Self {
        Self::spawn_with_keys(params, Arc::new(StaticKeyProvider::new(SIGNING_KEY.to_vec())))
            .await
    }

    /// Spawn with the signing key read from `path` on every request.
    pub async fn spawn_with_key_file(path: &Path) -> Self {
        Self::spawn_with_keys(
            Argon2Params::new(64, 1, 1),
            Arc::new(FileKeyProvider::new(path)),
        )
        .await
    }

    async fn spawn_with_keys(params: Argon2Params, keys: Arc<dyn KeyProvider>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let config = AuthConfig {
            token: TokenConfig::default(),
            password: params,
        };
        let authenticator = Arc::new(Authenticator::new(&config, keys));

        let repository = Arc::new(InMemoryAccountRepository::new());
        let account_service = Arc::new(AccountService::new(
            Arc::clone(&repository),
            authenticator,
            2,
        ));

        let router = create_router(account_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(&config.token),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn signup(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/users")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and log in, returning the access token.
    pub async fn signed_in(&self, email: &str, password: &str) -> String {
        self.signup(email, password).await;
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Token for `email` signed with `key`, valid from `now - 60` until `now + lifetime`.
    pub fn token_for(&self, email: &str, key: &[u8], lifetime_seconds: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = ClaimSet::new()
            .with_email(email)
            .with_not_before(now - 60)
            .with_expiration(now + lifetime_seconds);
        let key = SigningKey::new(key.to_vec()).expect("Empty key");
        self.codec
            .issue_at(claims, &key, now)
            .expect("Failed to issue token")
    }
}

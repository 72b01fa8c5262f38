use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use forum_auth::Argon2Params;
use forum_auth::AuthConfig;
use forum_auth::TokenConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// File holding the raw HMAC key, read on every issue/verify
    pub key_file: String,
    pub expiration_hours: i64,
    pub leeway_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub time_cost: u32,
    pub parallelism: u32,
    pub output_len: usize,
    /// Upper bound on Argon2 derivations running at once; each one holds
    /// `memory_kib` of memory until it finishes.
    pub max_concurrent_hashes: usize,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__KEY_FILE, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__KEY_FILE=/run/secrets/jwt.key overrides jwt.key_file
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Settings handed to the credential core.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            token: TokenConfig {
                leeway_minutes: self.jwt.leeway_minutes,
                expiration_hours: self.jwt.expiration_hours,
            },
            password: Argon2Params {
                memory_kib: self.password.memory_kib,
                time_cost: self.password.time_cost,
                parallelism: self.password.parallelism,
                output_len: self.password.output_len,
            },
        }
    }
}

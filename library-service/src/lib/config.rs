use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const DEFAULT_RUN_MODE: &str = "development";

/// Process-wide configuration, resolved once at startup and handed to the
/// components that need it. Nothing reads the environment after this.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}

/// Token signing configuration. The secret lives here and goes to the
/// `Authenticator` once; the validity window bounds every issued token.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl Config {
    /// Resolve configuration from layered sources, lowest priority first:
    /// `config/default.toml`, then `config/{RUN_MODE}.toml`, then
    /// environment variables using `__` as the section separator (e.g.
    /// `DATABASE__URL`, `JWT__SECRET`).
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode =
            std::env::var("RUN_MODE").unwrap_or_else(|_| DEFAULT_RUN_MODE.to_string());

        ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?
            .try_deserialize()
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared secret for verifying JWTs issued by the identity provider.
    pub jwt_secret: String,
}

/// Media CDN account credentials and endpoints.
///
/// `api_secret` never leaves this process; clients get signatures, not the
/// secret.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Destination folder stamped into every signed upload.
    pub upload_folder: String,
    pub api_base: String,
    pub delivery_base: String,
}

/// Multimodal inference API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Absence surfaces as a 500 on the ask-question endpoint, not a crash.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub media: MediaConfig,
    pub inference: InferenceConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("media.upload_folder", "video-uploads")?
            .set_default("media.api_base", common::media::DEFAULT_API_BASE)?
            .set_default("media.delivery_base", common::media::DEFAULT_DELIVERY_BASE)?
            .set_default("inference.model", "gemini-2.5-flash")?
            .set_default(
                "inference.base_url",
                "https://generativelanguage.googleapis.com/v1beta",
            )?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CLIPVAULT__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CLIPVAULT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

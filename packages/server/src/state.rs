use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    /// Shared outbound HTTP client for CDN and inference calls.
    pub http: reqwest::Client,
    pub config: AppConfig,
}

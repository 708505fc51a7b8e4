use std::time::Duration;

use tracing::{Level, info};

use server::config::AppConfig;
use server::database;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database).await?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { db, http, config };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

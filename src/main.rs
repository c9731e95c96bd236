use anyhow::Context;
use tracing_subscriber::EnvFilter;

use outfit_api::{
    api::{create_router, AppState},
    models::Catalog,
    services::Recommender,
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.dataset_path)
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;
    let recommender = Recommender::new(catalog).with_max_outfits(config.max_outfits);

    let state = AppState::new(recommender).with_default_count(config.default_count);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!("Server running on http://{}", address);
    axum::serve(listener, app).await?;

    Ok(())
}

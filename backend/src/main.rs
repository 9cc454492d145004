//! Garment Carbon Calculator server binary

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gcc_server::{config::Config, create_app, AppState};
use shared::ReferenceData;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gcc_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Garment Carbon Calculator Server");
    tracing::info!("Environment: {}", config.environment);

    let data = match &config.data.reference_file {
        Some(path) => {
            tracing::info!("Loading reference data from {}", path);
            ReferenceData::from_json_file(path)
                .with_context(|| format!("loading reference data from {}", path))?
        }
        None => ReferenceData::builtin(),
    };

    let issues = data.integrity_report();
    if !issues.is_empty() {
        for issue in &issues {
            tracing::warn!("Reference data: {}", issue);
        }
        anyhow::bail!("reference data failed {} integrity check(s)", issues.len());
    }

    tracing::info!(
        version = %data.meta.version,
        items = data.items.len(),
        materials = data.materials.len(),
        blends = data.blends.len(),
        locations = data.locations.len(),
        "Reference data loaded"
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("binding {}:{}", config.server.host, config.server.port))?;

    let state = AppState::new(data, config);
    let app = create_app(state);

    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

use blog_notifier::{build_router, config::Config, state::AppState};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        name = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting blog notifier"
    );

    let state = AppState::from_config(&config)?;
    let app = build_router(state, &config.server, config.app)?;

    axum_helpers::create_app(app, &config.server).await?;

    info!("Blog notifier shutdown complete");
    Ok(())
}

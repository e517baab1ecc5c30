use tracing_subscriber::EnvFilter;
use unitedenergy_sensor::{Config, HomeAssistantAPI, SensorCoordinator, UnitedEnergyClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting United Energy sensor bridge");
    let config = Config::from_env()?;

    let ue_client = UnitedEnergyClient::new(&config.ue_url, &config.username, &config.password)
        .inspect_err(|e| tracing::error!(error = %e, "Failed to create United Energy client"))?;

    let coordinator = SensorCoordinator::new(
        &config.name,
        config.update_interval,
        Box::new(ue_client),
        HomeAssistantAPI::new(),
    );

    coordinator.spawn().await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("unitedenergy_sensor=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

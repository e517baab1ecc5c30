use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::client::ReadingClient;
use crate::home_assistant::{HASensorState, HomeAssistantAPI};
use crate::poller::UsageData;
use crate::report::ReportKind;
use crate::sensor::UsageSensor;

/// Drives the usage sensors on a fixed tick and publishes them to Home Assistant.
///
/// Owns the shared cache and every sensor, so updates run one after another
/// on a single task.
pub struct SensorCoordinator {
    name: String,
    update_interval: Duration,
    data: UsageData,
    sensors: Vec<UsageSensor>,
    ha_client: HomeAssistantAPI,
}

impl SensorCoordinator {
    /// Creates a coordinator with one sensor per report kind.
    pub fn new(
        name: &str,
        update_interval: Duration,
        client: Box<dyn ReadingClient>,
        ha_client: HomeAssistantAPI,
    ) -> Self {
        tracing::info!(
            name,
            update_interval_secs = update_interval.as_secs(),
            "Initializing sensor coordinator"
        );

        Self {
            name: name.to_owned(),
            update_interval,
            data: UsageData::new(client),
            sensors: ReportKind::ALL.map(UsageSensor::for_kind).to_vec(),
            ha_client,
        }
    }

    /// Sensors in [`ReportKind::ALL`] order
    pub fn sensors(&self) -> &[UsageSensor] {
        &self.sensors
    }

    /// Home Assistant entity id the sensor for `kind` is published under
    pub fn entity_id(&self, kind: ReportKind) -> String {
        entity_id(&self.name, kind)
    }

    /// Spawns the coordinator loop on its own task
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Main loop: update and publish every sensor on each tick
    pub async fn run(&mut self) {
        tracing::info!("Starting United Energy sensor loop");

        let mut update_interval = update_ticker(self.update_interval);
        loop {
            update_interval.tick().await;
            self.run_cycle().await;
        }
    }

    /// Updates each sensor once and publishes the ones that updated cleanly.
    ///
    /// Returns the number of sensors published.
    pub async fn run_cycle(&mut self) -> usize {
        let mut published = 0;

        for sensor in self.sensors.iter_mut() {
            let entity_id = entity_id(&self.name, sensor.kind());

            match sensor.update(&mut self.data).await {
                Ok(true) => tracing::debug!(%entity_id, state = ?sensor.state(), "New reading"),
                Ok(false) => tracing::trace!(%entity_id, "No new reading"),
                Err(e) => {
                    tracing::warn!(%entity_id, error = %e, "Failed to update sensor");
                    continue;
                }
            }

            match self
                .ha_client
                .publish_sensor(&entity_id, &HASensorState::from(&*sensor))
                .await
            {
                Ok(_) => published += 1,
                Err(e) => tracing::warn!(%entity_id, error = %e, "Failed to publish sensor"),
            }
        }

        published
    }
}

fn update_ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    // A slow cycle pushes the next tick back instead of triggering a burst
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn entity_id(name: &str, kind: ReportKind) -> String {
    format!("sensor.{}_{}", name, kind.slug())
}

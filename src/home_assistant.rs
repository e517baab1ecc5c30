use serde_derive::{Deserialize, Serialize};
use std::env;

use crate::sensor::UsageSensor;

pub struct HomeAssistantAPI {
    endpoint_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl Default for HomeAssistantAPI {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeAssistantAPI {
    pub fn new() -> Self {
        Self::with_endpoint(
            &env::var("HA_URL").unwrap_or_default(),
            &env::var("HA_TOKEN").unwrap_or_default(),
        )
    }

    pub fn with_endpoint(endpoint_url: &str, auth_token: &str) -> Self {
        Self {
            endpoint_url: endpoint_url.trim_end_matches('/').to_owned(),
            auth_token: auth_token.to_owned(),
            client: reqwest::Client::new(),
        }
    }

    /// Writes the sensor's current state into Home Assistant's state machine.
    pub async fn publish_sensor(
        &self,
        entity_id: &str,
        state: &HASensorState,
    ) -> Result<HASensorState, anyhow::Error> {
        if self.endpoint_url.is_empty() {
            anyhow::bail!("No HA connection");
        }
        let result = self
            .client
            .post(format!("{}/api/states/{}", self.endpoint_url, entity_id))
            .bearer_auth(&self.auth_token)
            .json(state)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(result)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HASensorAttributes {
    pub friendly_name: String,
    pub unit_of_measurement: String,
    pub icon: String,
    pub device_class: String,
    pub last_update_timestamp: Option<String>,
    pub price: Option<f64>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HASensorState {
    pub state: String,
    pub attributes: HASensorAttributes,
}

impl From<&UsageSensor> for HASensorState {
    fn from(sensor: &UsageSensor) -> Self {
        Self {
            state: sensor
                .state()
                .map(|value| value.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            attributes: HASensorAttributes {
                friendly_name: sensor.name().to_string(),
                unit_of_measurement: sensor.unit_of_measurement().to_string(),
                icon: sensor.icon().to_string(),
                device_class: sensor.device_class().to_string(),
                last_update_timestamp: sensor.attributes().last_update_timestamp.clone(),
                price: sensor.attributes().price,
            },
        }
    }
}

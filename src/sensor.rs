use crate::poller::UsageData;
use crate::report::ReportKind;

pub const UNIT_OF_MEASUREMENT: &str = "kWh";
pub const ICON: &str = "mdi:flash";
pub const DEVICE_CLASS: &str = "power";

/// Extra state published alongside the sensor value.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SensorAttributes {
    pub last_update_timestamp: Option<String>,
    pub price: Option<f64>,
}

/// Exposes one cached report kind as a sensor, republishing only when the
/// upstream timestamp moves.
#[derive(Debug, Clone)]
pub struct UsageSensor {
    name: String,
    kind: ReportKind,
    state: Option<f64>,
    attributes: SensorAttributes,
    prev_timestamp: Option<String>,
}

impl UsageSensor {
    /// Creates a sensor with no state for `kind`, shown under `name`.
    pub fn new(name: &str, kind: ReportKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            state: None,
            attributes: SensorAttributes::default(),
            prev_timestamp: None,
        }
    }

    /// Sensor for `kind` using its standard display name.
    pub fn for_kind(kind: ReportKind) -> Self {
        Self::new(kind.display_name(), kind)
    }

    /// Display name of the sensor
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Report kind this sensor reads from the cache
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    /// Published usage, or `None` until a reading with a timestamp arrives
    pub fn state(&self) -> Option<f64> {
        self.state
    }

    /// Published attributes (`last_update_timestamp`, `price`)
    pub fn attributes(&self) -> &SensorAttributes {
        &self.attributes
    }

    /// Always kilowatt-hours
    pub fn unit_of_measurement(&self) -> &'static str {
        UNIT_OF_MEASUREMENT
    }

    /// Material Design icon shown in Home Assistant
    pub fn icon(&self) -> &'static str {
        ICON
    }

    /// Home Assistant device class
    pub fn device_class(&self) -> &'static str {
        DEVICE_CLASS
    }

    /// Refreshes the backing report and picks up its values if the reading
    /// timestamp changed since the last update.
    ///
    /// Returns whether state and price were republished.
    pub async fn update(&mut self, data: &mut UsageData) -> anyhow::Result<bool> {
        data.refresh(self.kind).await?;

        let timestamp = data.last_timestamp(self.kind).map(str::to_owned);
        self.attributes.last_update_timestamp = timestamp.clone();
        tracing::debug!(
            sensor = %self.name,
            current = ?timestamp,
            previous = ?self.prev_timestamp,
            "Checking reporting timestamp"
        );

        // Don't track the same value twice
        if timestamp == self.prev_timestamp {
            return Ok(false);
        }
        self.prev_timestamp = timestamp;

        self.state = data.usage(self.kind);
        self.attributes.price = data.price(self.kind);
        tracing::info!(
            sensor = %self.name,
            state = ?self.state,
            price = ?self.attributes.price,
            "Sensor updated"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::MockReadingClient;
    use serde_json::json;
    use std::time::Duration;

    fn hourly_setup() -> (UsageSensor, UsageData, MockReadingClient) {
        let client = MockReadingClient::default();
        let data = UsageData::new(Box::new(client.clone()));
        (UsageSensor::for_kind(ReportKind::Hourly), data, client)
    }

    #[test]
    fn test_fixed_properties() {
        let sensor = UsageSensor::for_kind(ReportKind::MonthlyCumulative);
        assert_eq!(sensor.name(), "United Energy Monthly Cumulative");
        assert_eq!(sensor.unit_of_measurement(), "kWh");
        assert_eq!(sensor.icon(), "mdi:flash");
        assert_eq!(sensor.device_class(), "power");
        assert_eq!(sensor.state(), None);
        assert_eq!(sensor.attributes(), &SensorAttributes::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_lifecycle() {
        let (mut sensor, mut data, client) = hourly_setup();
        let interval = ReportKind::Hourly.scan_interval();

        // First reading is published
        client.push_payload(json!({"total": 12.5, "price": 3.2, "timestamp": "T1"}));
        assert!(sensor.update(&mut data).await.unwrap());
        assert_eq!(sensor.state(), Some(12.5));
        assert_eq!(sensor.attributes().price, Some(3.2));
        assert_eq!(sensor.attributes().last_update_timestamp.as_deref(), Some("T1"));

        // Within the window nothing is fetched and nothing changes
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!sensor.update(&mut data).await.unwrap());
        assert_eq!(client.call_count(), 1);
        assert_eq!(sensor.state(), Some(12.5));

        // Window elapsed but upstream has no new data yet
        tokio::time::advance(interval).await;
        client.push_payload(json!({"total": 12.5, "price": 3.2, "timestamp": "T1"}));
        assert!(!sensor.update(&mut data).await.unwrap());
        assert_eq!(client.call_count(), 2);
        assert_eq!(sensor.state(), Some(12.5));
        assert_eq!(sensor.attributes().last_update_timestamp.as_deref(), Some("T1"));

        // New data arrives
        tokio::time::advance(interval).await;
        client.push_payload(json!({"total": 9.9, "price": 3.5, "timestamp": "T2"}));
        assert!(sensor.update(&mut data).await.unwrap());
        assert_eq!(sensor.state(), Some(9.9));
        assert_eq!(sensor.attributes().price, Some(3.5));
        assert_eq!(sensor.attributes().last_update_timestamp.as_deref(), Some("T2"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_timestamp_ignores_changed_values() {
        let (mut sensor, mut data, client) = hourly_setup();

        client.push_payload(json!({"total": 12.5, "price": 3.2, "timestamp": "T1"}));
        sensor.update(&mut data).await.unwrap();

        tokio::time::advance(ReportKind::Hourly.scan_interval()).await;
        client.push_payload(json!({"total": 50.0, "price": 9.0, "timestamp": "T1"}));
        assert!(!sensor.update(&mut data).await.unwrap());

        // The cache moved on, the sensor did not
        assert_eq!(data.usage(ReportKind::Hourly), Some(50.0));
        assert_eq!(sensor.state(), Some(12.5));
        assert_eq!(sensor.attributes().price, Some(3.2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_reading_yet_publishes_nothing() {
        let (mut sensor, mut data, client) = hourly_setup();
        client.push_payload(json!({"total": 12.5}));

        assert!(!sensor.update(&mut data).await.unwrap());
        assert_eq!(sensor.state(), None);
        assert_eq!(sensor.attributes(), &SensorAttributes::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_propagates_and_leaves_state() {
        let (mut sensor, mut data, client) = hourly_setup();

        client.push_payload(json!({"total": 12.5, "price": 3.2, "timestamp": "T1"}));
        sensor.update(&mut data).await.unwrap();

        tokio::time::advance(ReportKind::Hourly.scan_interval()).await;
        client.push_failure("connection reset");
        let error = sensor.update(&mut data).await.unwrap_err();

        assert_eq!(error.to_string(), "connection reset");
        assert_eq!(sensor.state(), Some(12.5));
        assert_eq!(sensor.attributes().last_update_timestamp.as_deref(), Some("T1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sensors_share_one_cache() {
        let client = MockReadingClient::default();
        let mut data = UsageData::new(Box::new(client.clone()));
        let mut monthly = UsageSensor::for_kind(ReportKind::Monthly);
        let mut cumulative = UsageSensor::for_kind(ReportKind::MonthlyCumulative);

        client.push_payload(json!({"total": 300.0, "price": 80.0, "timestamp": "M1"}));
        client.push_payload(json!({"total": 1200.0, "price": 310.0, "timestamp": "C1"}));

        monthly.update(&mut data).await.unwrap();
        cumulative.update(&mut data).await.unwrap();

        assert_eq!(monthly.state(), Some(300.0));
        assert_eq!(cumulative.state(), Some(1200.0));
        assert_eq!(cumulative.attributes().price, Some(310.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_null_timestamp_publishes_nothing() {
        let (mut sensor, mut data, client) = hourly_setup();
        client.push_payload(json!({"total": 12.5, "price": 3.2, "timestamp": null}));

        assert!(!sensor.update(&mut data).await.unwrap());

        // The reading is cached, but without a timestamp there is nothing to track
        assert_eq!(data.usage(ReportKind::Hourly), Some(12.5));
        assert_eq!(sensor.state(), None);
        assert_eq!(sensor.attributes(), &SensorAttributes::default());
    }
}

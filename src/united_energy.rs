use std::time::Duration;

use crate::client::ReadingClient;
use crate::reading::ReadingPayload;
use crate::report::{PeriodOffset, ReportPeriod};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the United Energy usage API.
pub struct UnitedEnergyClient {
    endpoint_url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl UnitedEnergyClient {
    pub fn new(endpoint_url: &str, username: &str, password: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint_url: endpoint_url.trim_end_matches('/').to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            client,
        })
    }

    async fn fetch_usage(
        &self,
        report: &str,
        period: ReportPeriod,
        offset: PeriodOffset,
    ) -> anyhow::Result<ReadingPayload> {
        tracing::debug!(report, %period, offset = offset.value(), "Fetching usage report");

        let body: serde_json::Value = self
            .client
            .get(format!("{}/api/usage/{}", self.endpoint_url, report))
            .basic_auth(&self.username, Some(&self.password))
            .query(&[
                ("period", period.as_str().to_string()),
                ("offset", offset.value().to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match body {
            serde_json::Value::Object(payload) => Ok(payload),
            other => anyhow::bail!("Unexpected {report} usage response: {other}"),
        }
    }
}

#[async_trait::async_trait]
impl ReadingClient for UnitedEnergyClient {
    async fn fetch_last_reading(
        &self,
        period: ReportPeriod,
        offset: PeriodOffset,
    ) -> anyhow::Result<ReadingPayload> {
        self.fetch_usage("last", period, offset).await
    }

    async fn fetch_cumulative_reading(
        &self,
        period: ReportPeriod,
        offset: PeriodOffset,
    ) -> anyhow::Result<ReadingPayload> {
        self.fetch_usage("cumulative", period, offset).await
    }
}

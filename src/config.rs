use std::env;
use std::time::Duration;

pub const DEFAULT_NAME: &str = "unitedenergy";
pub const DEFAULT_UE_URL: &str = "https://customerportal.unitedenergy.com.au";
const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 30;

/// Runtime settings, taken from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub username: String,
    pub password: String,
    /// Prefix for the published entity ids.
    pub name: String,
    pub ue_url: String,
    /// How often every sensor is updated. Upstream fetches are further
    /// limited by each report's own scan interval.
    pub update_interval: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let username = get("UE_USERNAME")
            .ok_or_else(|| anyhow::anyhow!("UE_USERNAME must be set"))?;
        let password = get("UE_PASSWORD")
            .ok_or_else(|| anyhow::anyhow!("UE_PASSWORD must be set"))?;
        let name = get("UE_NAME").unwrap_or_else(|| DEFAULT_NAME.to_string());
        let ue_url = get("UE_URL").unwrap_or_else(|| DEFAULT_UE_URL.to_string());
        let update_interval = match get("UPDATE_INTERVAL_SECS") {
            Some(raw) => parse_interval_secs(&raw)?,
            None => Duration::from_secs(DEFAULT_UPDATE_INTERVAL_SECS),
        };

        Ok(Self {
            username,
            password,
            name,
            ue_url,
            update_interval,
        })
    }
}

fn parse_interval_secs(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid UPDATE_INTERVAL_SECS '{raw}': {e}"))?;
    if secs == 0 {
        anyhow::bail!("UPDATE_INTERVAL_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

//! United Energy Usage Sensor Library
//!
//! This library polls the United Energy usage API on throttled intervals, caches the
//! latest hourly, daily, monthly and monthly cumulative readings, and exposes them as
//! sensors that are published into Home Assistant.

pub mod client;
pub mod config;
pub mod home_assistant;
pub mod poller;
pub mod reading;
pub mod report;
pub mod sensor;
pub mod sensor_coordinator;
pub mod throttle;
pub mod united_energy;

#[cfg(test)]
mod test_support;

// Re-export commonly used types for easier access
pub use client::ReadingClient;
pub use config::Config;
pub use home_assistant::HomeAssistantAPI;
pub use poller::{RefreshOutcome, UsageData};
pub use reading::{Reading, ReadingError};
pub use report::{PeriodOffset, ReportKind, ReportPeriod};
pub use sensor::UsageSensor;
pub use sensor_coordinator::SensorCoordinator;
pub use united_energy::UnitedEnergyClient;

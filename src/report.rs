use std::fmt;
use std::time::Duration;

const HOURLY_SCAN_INTERVAL: Duration = Duration::from_secs(60 * 60);
const DAILY_SCAN_INTERVAL: Duration = Duration::from_secs(60 * 60);
const MONTHLY_SCAN_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Timespan the upstream API aggregates a report over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportPeriod {
    Day,
    Week,
    Month,
    Year,
}

impl ReportPeriod {
    /// Value sent as the `period` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Day => "day",
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::Year => "year",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which instance of a period to report on, counted back from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodOffset {
    Current,
    Prior,
    TimeBeforeLast,
}

impl PeriodOffset {
    /// Number of periods back from the current one
    pub fn value(&self) -> u8 {
        match self {
            PeriodOffset::Current => 0,
            PeriodOffset::Prior => 1,
            PeriodOffset::TimeBeforeLast => 2,
        }
    }
}

/// Upstream endpoint a report kind is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    LastReading,
    CumulativeReading,
}

/// The four readings exposed as sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Hourly,
    Daily,
    Monthly,
    MonthlyCumulative,
}

impl ReportKind {
    /// Every kind, in the order sensors are updated
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Hourly,
        ReportKind::Daily,
        ReportKind::Monthly,
        ReportKind::MonthlyCumulative,
    ];

    /// Position of this kind in [`ReportKind::ALL`], used to index per-kind storage.
    pub fn index(&self) -> usize {
        match self {
            ReportKind::Hourly => 0,
            ReportKind::Daily => 1,
            ReportKind::Monthly => 2,
            ReportKind::MonthlyCumulative => 3,
        }
    }

    /// Aggregation window requested upstream
    pub fn period(&self) -> ReportPeriod {
        match self {
            ReportKind::Hourly => ReportPeriod::Day,
            ReportKind::Daily => ReportPeriod::Month,
            ReportKind::Monthly | ReportKind::MonthlyCumulative => ReportPeriod::Year,
        }
    }

    /// Which window instance is requested; always the current one
    pub fn offset(&self) -> PeriodOffset {
        PeriodOffset::Current
    }

    /// Upstream call used for this kind
    pub fn fetch_mode(&self) -> FetchMode {
        match self {
            ReportKind::MonthlyCumulative => FetchMode::CumulativeReading,
            _ => FetchMode::LastReading,
        }
    }

    /// Minimum time between two upstream fetches for this kind.
    ///
    /// Daily data is polled hourly even though it comes from the monthly
    /// aggregate, as upstream publishes it with a lag of a few hours.
    pub fn scan_interval(&self) -> Duration {
        match self {
            ReportKind::Hourly => HOURLY_SCAN_INTERVAL,
            ReportKind::Daily => DAILY_SCAN_INTERVAL,
            ReportKind::Monthly | ReportKind::MonthlyCumulative => MONTHLY_SCAN_INTERVAL,
        }
    }

    /// Name shown for the sensor in Home Assistant
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportKind::Hourly => "United Energy Hourly",
            ReportKind::Daily => "United Energy Daily",
            ReportKind::Monthly => "United Energy Monthly",
            ReportKind::MonthlyCumulative => "United Energy Monthly Cumulative",
        }
    }

    /// Identifier used in entity ids and logs
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Hourly => "hourly",
            ReportKind::Daily => "daily",
            ReportKind::Monthly => "monthly",
            ReportKind::MonthlyCumulative => "monthly_cumulative",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

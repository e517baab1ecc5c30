use crate::client::ReadingClient;
use crate::reading::Reading;
use crate::report::{FetchMode, ReportKind};
use crate::throttle::Throttle;

/// What a call to [`UsageData::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Still inside the kind's scan interval, upstream was not contacted.
    Throttled,
    /// A reading with all three keys was fetched and cached.
    Updated,
    /// Upstream answered without one of the expected keys; cache kept.
    Malformed,
}

/// Throttle and last reading for one report kind.
struct ReportSlot {
    throttle: Throttle,
    reading: Option<Reading>,
}

/// Throttled cache of the latest United Energy reading for each report kind.
///
/// Each kind has its own scan interval and its own cached reading. Readings
/// are only ever replaced whole.
pub struct UsageData {
    client: Box<dyn ReadingClient>,
    slots: [ReportSlot; 4],
}

impl UsageData {
    /// Creates an empty cache that fetches through `client`.
    pub fn new(client: Box<dyn ReadingClient>) -> Self {
        let slots = ReportKind::ALL.map(|kind| ReportSlot {
            throttle: Throttle::new(kind.scan_interval()),
            reading: None,
        });
        Self { client, slots }
    }

    /// Fetches a fresh reading for `kind` unless its scan interval has not yet
    /// elapsed since the previous call.
    ///
    /// Transport errors are returned to the caller. A payload lacking one of
    /// the expected keys is logged and leaves the cached reading in place.
    pub async fn refresh(&mut self, kind: ReportKind) -> anyhow::Result<RefreshOutcome> {
        if !self.slots[kind.index()].throttle.try_acquire() {
            tracing::trace!(
                %kind,
                interval_secs = self.slots[kind.index()].throttle.interval().as_secs(),
                "Refresh throttled"
            );
            return Ok(RefreshOutcome::Throttled);
        }

        let (period, offset) = (kind.period(), kind.offset());
        let payload = match kind.fetch_mode() {
            FetchMode::LastReading => self.client.fetch_last_reading(period, offset).await?,
            FetchMode::CumulativeReading => {
                self.client.fetch_cumulative_reading(period, offset).await?
            }
        };

        match Reading::from_payload(&payload) {
            Ok(reading) => {
                tracing::debug!(
                    %kind,
                    total = ?reading.total,
                    price = ?reading.price,
                    timestamp = ?reading.timestamp,
                    "Cached new reading"
                );
                self.slots[kind.index()].reading = Some(reading);
                Ok(RefreshOutcome::Updated)
            }
            Err(error) => {
                tracing::error!(
                    %kind,
                    %error,
                    result = %serde_json::Value::Object(payload),
                    "Missing key in result"
                );
                Ok(RefreshOutcome::Malformed)
            }
        }
    }

    /// Last cached reading for `kind`, if any refresh has succeeded.
    pub fn reading(&self, kind: ReportKind) -> Option<&Reading> {
        self.slots[kind.index()].reading.as_ref()
    }

    /// Cached usage in kWh for `kind`.
    pub fn usage(&self, kind: ReportKind) -> Option<f64> {
        self.reading(kind).and_then(|reading| reading.total)
    }

    /// Cached price for `kind`.
    pub fn price(&self, kind: ReportKind) -> Option<f64> {
        self.reading(kind).and_then(|reading| reading.price)
    }

    /// Upstream timestamp of the cached reading for `kind`.
    pub fn last_timestamp(&self, kind: ReportKind) -> Option<&str> {
        self.reading(kind)
            .and_then(|reading| reading.timestamp.as_deref())
    }
}

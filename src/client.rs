use crate::reading::ReadingPayload;
use crate::report::{PeriodOffset, ReportPeriod};

/// Source of usage reports.
///
/// Implementations return the raw payload so that missing fields can be
/// told apart from transport failures, which are returned as errors.
#[async_trait::async_trait]
pub trait ReadingClient: Send + Sync {
    /// Latest reading within the given period.
    async fn fetch_last_reading(
        &self,
        period: ReportPeriod,
        offset: PeriodOffset,
    ) -> anyhow::Result<ReadingPayload>;

    /// Running total across the given period.
    async fn fetch_cumulative_reading(
        &self,
        period: ReportPeriod,
        offset: PeriodOffset,
    ) -> anyhow::Result<ReadingPayload>;
}

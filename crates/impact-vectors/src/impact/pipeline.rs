use super::allocation::{allocate, AllocatedProject, DEFAULT_TOTAL_BUDGET};
use super::record::ProjectRecord;
use super::scaler::ScaleTable;
use super::score::score_records;
use super::selection::VectorSelection;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Scale, score and allocate in one pass over a record snapshot.
///
/// The pipeline holds no state beyond its budget, so one instance can serve
/// any number of concurrent runs. Date-valued vectors are measured against
/// the `now` passed to [`ImpactPipeline::run`], never against the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactPipeline {
    total_budget: f64,
}

impl Default for ImpactPipeline {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_BUDGET)
    }
}

impl ImpactPipeline {
    /// `total_budget` is expected to be finite and positive; configuration
    /// loading enforces that for the service.
    pub const fn new(total_budget: f64) -> Self {
        Self { total_budget }
    }

    pub const fn total_budget(&self) -> f64 {
        self.total_budget
    }

    pub fn run(
        &self,
        records: &[ProjectRecord],
        selections: &[VectorSelection],
        now: DateTime<Utc>,
    ) -> Vec<AllocatedProject> {
        if selections.is_empty() {
            return Vec::new();
        }

        let scales = ScaleTable::build(records, selections, now);
        let scored = score_records(records, selections, &scales, now);
        let allocated = allocate(scored, self.total_budget);

        debug!(
            records = records.len(),
            selections = selections.len(),
            distinct_vectors = scales.len(),
            funded = allocated.len(),
            "impact pipeline completed"
        );

        allocated
    }
}

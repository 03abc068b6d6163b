use super::normalizer::normalize;
use super::record::ProjectRecord;
use super::selection::VectorSelection;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Value the largest observation of each vector is stretched to.
pub const SCALE_CEILING: f64 = 100.0;

/// Factor that maps the largest normalized value of `vector` onto [`SCALE_CEILING`].
///
/// Every record takes part, including rows that later drop out of the
/// allocation. The max-pick starts at zero, so vectors with no positive
/// observation get a multiplier of `0`.
pub fn multiplier(records: &[ProjectRecord], vector: &str, now: DateTime<Utc>) -> f64 {
    let max = records
        .iter()
        .map(|record| normalize(record.get(vector), now))
        .fold(0.0_f64, f64::max);

    if max <= 0.0 {
        return 0.0;
    }

    let multiplier = SCALE_CEILING / max;
    if multiplier.is_finite() {
        multiplier
    } else {
        0.0
    }
}

/// Multipliers for every distinct vector of one selection, computed once per run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleTable {
    multipliers: HashMap<String, f64>,
}

impl ScaleTable {
    pub fn build(
        records: &[ProjectRecord],
        selections: &[VectorSelection],
        now: DateTime<Utc>,
    ) -> Self {
        let mut multipliers = HashMap::new();
        for selection in selections {
            multipliers
                .entry(selection.vector.clone())
                .or_insert_with(|| multiplier(records, &selection.vector, now));
        }

        Self { multipliers }
    }

    /// Vectors outside the table scale to nothing.
    pub fn multiplier(&self, vector: &str) -> f64 {
        self.multipliers.get(vector).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}

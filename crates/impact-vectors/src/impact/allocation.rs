use super::score::ScoredProject;
use serde::Serialize;

/// Tokens distributed per run unless configuration says otherwise.
pub const DEFAULT_TOTAL_BUDGET: f64 = 10_000_000.0;

/// Scored project together with its share of the budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocatedProject {
    #[serde(flatten)]
    pub project: ScoredProject,
    #[serde(rename = "opAllocation")]
    pub op_allocation: f64,
}

/// Drops projects without positive impact and splits `total_budget`
/// across the rest in proportion to score.
///
/// Input order is kept; ranking is left to the presentation layer.
pub fn allocate(scored: Vec<ScoredProject>, total_budget: f64) -> Vec<AllocatedProject> {
    let funded: Vec<ScoredProject> = scored
        .into_iter()
        .filter(|project| project.score > 0.0)
        .collect();

    // Shares are taken relative to the top score so the sum cannot overflow.
    let peak = funded
        .iter()
        .map(|project| project.score)
        .fold(0.0_f64, f64::max);
    let total_share: f64 = funded
        .iter()
        .map(|project| relative_share(project.score, peak))
        .sum();

    funded
        .into_iter()
        .map(|project| {
            let op_allocation = relative_share(project.score, peak) / total_share * total_budget;
            AllocatedProject {
                project,
                op_allocation,
            }
        })
        .collect()
}

// An infinite peak can only come from unbounded weights; the infinite
// scores then split the budget between them.
fn relative_share(score: f64, peak: f64) -> f64 {
    if peak.is_infinite() {
        if score.is_infinite() {
            1.0
        } else {
            0.0
        }
    } else {
        score / peak
    }
}

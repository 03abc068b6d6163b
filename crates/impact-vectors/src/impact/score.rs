use super::normalizer::normalize;
use super::record::{FieldValue, ProjectRecord};
use super::scaler::ScaleTable;
use super::selection::{VectorSelection, Weight};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Weighted contribution of one selected vector to a project's score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VectorContribution {
    pub vector: String,
    pub normalized: f64,
    /// Raw cell as loaded; kept for display only.
    pub actual: Option<FieldValue>,
}

/// Descriptive columns copied from the raw row into every scored project.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectMetadata {
    #[serde(rename = "Meta: Project Name")]
    pub project_name: Option<FieldValue>,
    #[serde(rename = "Meta: Project Image")]
    pub project_image: Option<FieldValue>,
    #[serde(rename = "Meta: Applicant Type")]
    pub applicant_type: Option<FieldValue>,
    #[serde(rename = "Meta: Website")]
    pub website: Option<FieldValue>,
    #[serde(rename = "Meta: Bio")]
    pub bio: Option<FieldValue>,
    #[serde(rename = "Meta: Payout Address")]
    pub payout_address: Option<FieldValue>,
    #[serde(rename = "Category: Collective Governance")]
    pub collective_governance: Option<FieldValue>,
    #[serde(rename = "Category: Developer Ecosystem")]
    pub developer_ecosystem: Option<FieldValue>,
    #[serde(rename = "Category: End User Experience and Adoption")]
    pub end_user_experience: Option<FieldValue>,
    #[serde(rename = "Category: OP Stack")]
    pub op_stack: Option<FieldValue>,
}

impl ProjectMetadata {
    pub fn from_record(record: &ProjectRecord) -> Self {
        let field = |name: &str| record.get(name).cloned();
        Self {
            project_name: field("Meta: Project Name"),
            project_image: field("Meta: Project Image"),
            applicant_type: field("Meta: Applicant Type"),
            website: field("Meta: Website"),
            bio: field("Meta: Bio"),
            payout_address: field("Meta: Payout Address"),
            collective_governance: field("Category: Collective Governance"),
            developer_ecosystem: field("Category: Developer Ecosystem"),
            end_user_experience: field("Category: End User Experience and Adoption"),
            op_stack: field("Category: OP Stack"),
        }
    }

    pub fn display_name(&self) -> String {
        self.project_name
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "(unnamed project)".to_string())
    }
}

/// A project's summed score with the per-vector breakdown behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProject {
    pub score: f64,
    pub data: Vec<VectorContribution>,
    pub metadata: ProjectMetadata,
}

impl ScoredProject {
    pub fn contribution(&self, vector: &str) -> Option<&VectorContribution> {
        self.data.iter().find(|entry| entry.vector == vector)
    }
}

/// Scores every record against the selection, preserving record order.
pub fn score_records(
    records: &[ProjectRecord],
    selections: &[VectorSelection],
    scales: &ScaleTable,
    now: DateTime<Utc>,
) -> Vec<ScoredProject> {
    records
        .iter()
        .map(|record| score_record(record, selections, scales, now))
        .collect()
}

fn score_record(
    record: &ProjectRecord,
    selections: &[VectorSelection],
    scales: &ScaleTable,
    now: DateTime<Utc>,
) -> ScoredProject {
    let mut score = 0.0;
    let mut data = Vec::with_capacity(selections.len());

    for selection in selections {
        let actual = record.get(&selection.vector);
        let scaled = scale(normalize(actual, now), scales.multiplier(&selection.vector));
        let contribution = apply_weight(scaled, selection.weight);

        score += contribution;
        data.push(VectorContribution {
            vector: selection.vector.clone(),
            normalized: contribution,
            actual: actual.cloned(),
        });
    }

    ScoredProject {
        score,
        data,
        metadata: ProjectMetadata::from_record(record),
    }
}

// Non-positive operands contribute nothing; keeps every contribution >= 0.
fn scale(value: f64, multiplier: f64) -> f64 {
    if value > 0.0 && multiplier > 0.0 {
        value * multiplier
    } else {
        0.0
    }
}

fn apply_weight(scaled: f64, weight: Weight) -> f64 {
    if scaled > 0.0 && !weight.is_zero() {
        scaled * weight.value()
    } else {
        0.0
    }
}

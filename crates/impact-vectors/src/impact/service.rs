use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::allocation::AllocatedProject;
use super::pipeline::ImpactPipeline;
use super::selection::VectorSelection;
use crate::dataset::{DatasetError, ProjectSource};

/// Service pairing a project source with the scoring pipeline.
pub struct ImpactService<S> {
    source: Arc<S>,
    pipeline: ImpactPipeline,
}

impl<S> ImpactService<S>
where
    S: ProjectSource + 'static,
{
    pub fn new(source: Arc<S>, pipeline: ImpactPipeline) -> Self {
        Self { source, pipeline }
    }

    pub fn pipeline(&self) -> ImpactPipeline {
        self.pipeline
    }

    /// Scores a fresh snapshot of the source.
    ///
    /// An empty outcome is reported as [`ImpactServiceError::NotFound`] so
    /// front ends can tell "nothing qualified" apart from a ranked result.
    pub fn evaluate(
        &self,
        selections: &[VectorSelection],
        now: DateTime<Utc>,
    ) -> Result<Vec<AllocatedProject>, ImpactServiceError> {
        let records = self.source.load()?;
        debug!(
            records = records.len(),
            selections = selections.len(),
            %now,
            "evaluating impact selection"
        );

        let allocated = self.pipeline.run(&records, selections, now);
        if allocated.is_empty() {
            info!(
                selections = selections.len(),
                "no project has positive impact for selection"
            );
            return Err(ImpactServiceError::NotFound);
        }

        Ok(allocated)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImpactServiceError {
    #[error("project data unavailable: {0}")]
    Dataset(#[from] DatasetError),
    #[error("Vectors not found")]
    NotFound,
}

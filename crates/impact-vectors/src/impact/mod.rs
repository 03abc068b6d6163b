//! Impact scoring core.
//!
//! A run normalizes every selected column onto a number, stretches each
//! vector so its largest observation lands on 100, weights and sums the
//! contributions per project, and finally shares a fixed budget across the
//! projects that ended up with a positive score.

mod allocation;
pub mod catalogue;
pub(crate) mod normalizer;
mod pipeline;
mod record;
pub mod router;
mod scaler;
mod score;
mod selection;
pub mod service;

pub use allocation::{allocate, AllocatedProject, DEFAULT_TOTAL_BUDGET};
pub use catalogue::{default_selection, find_vector, impact_vectors, ImpactVector, VectorSource};
pub use normalizer::normalize;
pub use pipeline::ImpactPipeline;
pub use record::{FieldValue, ProjectRecord};
pub use router::impact_router;
pub use scaler::{multiplier, ScaleTable, SCALE_CEILING};
pub use score::{score_records, ProjectMetadata, ScoredProject, VectorContribution};
pub use selection::{RawWeight, SelectionError, VectorSelection, Weight, MAX_WEIGHT};
pub use service::{ImpactService, ImpactServiceError};

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::allocation::AllocatedProject;
use super::catalogue::{impact_vectors, ImpactVector};
use super::selection::{RawWeight, VectorSelection};
use super::service::ImpactService;
use crate::dataset::ProjectSource;
use crate::error::AppError;

/// JSON body accepted by `POST /api/v1/impact`.
#[derive(Debug, Deserialize)]
pub struct ImpactRequest {
    #[serde(default)]
    pub vectors: Vec<String>,
    #[serde(default)]
    pub weights: Vec<RawWeight>,
    /// Instant date-valued vectors are measured against; defaults to now.
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ImpactResponse {
    pub evaluated_at: DateTime<Utc>,
    pub total_budget: f64,
    pub selections: Vec<VectorSelection>,
    pub projects: Vec<AllocatedProject>,
}

/// Router builder exposing the impact scoring endpoints.
pub fn impact_router<S>(service: Arc<ImpactService<S>>) -> Router
where
    S: ProjectSource + 'static,
{
    Router::new()
        .route("/api/impact", get(query_handler::<S>))
        .route("/api/v1/impact", post(evaluate_handler::<S>))
        .route("/api/v1/impact/vectors", get(vectors_handler))
        .with_state(service)
}

/// `?vector=..&weight=..` pairs, matched up by position.
pub(crate) async fn query_handler<S>(
    State(service): State<Arc<ImpactService<S>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<AllocatedProject>>, AppError>
where
    S: ProjectSource + 'static,
{
    let (vectors, weights) = split_query(params);
    let selections = VectorSelection::pair(&vectors, &weights)?;
    let (_, allocated) = evaluate_blocking(service, selections, Utc::now()).await?;
    Ok(Json(allocated))
}

pub(crate) async fn evaluate_handler<S>(
    State(service): State<Arc<ImpactService<S>>>,
    Json(request): Json<ImpactRequest>,
) -> Result<Json<ImpactResponse>, AppError>
where
    S: ProjectSource + 'static,
{
    let ImpactRequest {
        vectors,
        weights,
        evaluated_at,
    } = request;

    let selections = VectorSelection::pair(&vectors, &weights)?;
    let evaluated_at = evaluated_at.unwrap_or_else(Utc::now);
    let total_budget = service.pipeline().total_budget();
    let (selections, projects) = evaluate_blocking(service, selections, evaluated_at).await?;

    Ok(Json(ImpactResponse {
        evaluated_at,
        total_budget,
        selections,
        projects,
    }))
}

pub(crate) async fn vectors_handler() -> Json<&'static [ImpactVector]> {
    Json(impact_vectors())
}

/// Loading the export reads from disk, so evaluation runs on the blocking pool.
async fn evaluate_blocking<S>(
    service: Arc<ImpactService<S>>,
    selections: Vec<VectorSelection>,
    now: DateTime<Utc>,
) -> Result<(Vec<VectorSelection>, Vec<AllocatedProject>), AppError>
where
    S: ProjectSource + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || {
        service
            .evaluate(&selections, now)
            .map(|projects| (selections, projects))
    })
    .await?;

    Ok(outcome?)
}

fn split_query(params: Vec<(String, String)>) -> (Vec<String>, Vec<String>) {
    let mut vectors = Vec::new();
    let mut weights = Vec::new();

    for (key, value) in params {
        match key.as_str() {
            "vector" => vectors.push(value),
            "weight" => weights.push(value),
            _ => {}
        }
    }

    (vectors, weights)
}

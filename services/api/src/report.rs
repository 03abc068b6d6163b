use chrono::{DateTime, Utc};
use clap::Args;
use impact_vectors::config::{parse_budget, AppConfig};
use impact_vectors::dataset::ProjectDataset;
use impact_vectors::error::AppError;
use impact_vectors::impact::router::ImpactResponse;
use impact_vectors::impact::{
    impact_vectors, AllocatedProject, ImpactPipeline, ImpactServiceError, VectorSelection,
};
use impact_vectors::telemetry;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Project export to score (defaults to IMPACT_DATA_PATH)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Impact vector column; repeat once per selection
    #[arg(long = "vector", required = true)]
    pub(crate) vectors: Vec<String>,
    /// Weight for the vector in the same position; repeat once per selection
    #[arg(long = "weight")]
    pub(crate) weights: Vec<String>,
    /// Tokens to split (defaults to IMPACT_TOTAL_BUDGET)
    #[arg(long, value_parser = budget_arg)]
    pub(crate) budget: Option<f64>,
    /// Instant date vectors are measured against (defaults to now)
    #[arg(long, value_parser = crate::infra::parse_instant)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Only print the N largest allocations
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Print the full result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn budget_arg(raw: &str) -> Result<f64, String> {
    parse_budget(raw).map_err(|err| err.to_string())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;

    let ScoreArgs {
        data,
        vectors,
        weights,
        budget,
        now,
        top,
        json,
    } = args;

    let selections = VectorSelection::pair(&vectors, &weights)?;
    let data_path = data.unwrap_or(config.impact.data_path);
    let pipeline = ImpactPipeline::new(budget.unwrap_or(config.impact.total_budget));
    let evaluated_at = now.unwrap_or_else(Utc::now);

    let records = ProjectDataset::from_path(&data_path)?;
    info!(
        path = %data_path.display(),
        records = records.len(),
        "loaded project export"
    );

    let projects = pipeline.run(&records, &selections, evaluated_at);
    if projects.is_empty() {
        return Err(ImpactServiceError::NotFound.into());
    }

    let mut projects = rank_by_allocation(projects);
    if let Some(limit) = top {
        projects.truncate(limit);
    }

    let response = ImpactResponse {
        evaluated_at,
        total_budget: pipeline.total_budget(),
        selections,
        projects,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &response).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render_allocations(&mut out, &response)?;
    }
    Ok(())
}

pub(crate) fn run_vectors() -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for vector in impact_vectors() {
        writeln!(
            out,
            "- {} [{}]: {}",
            vector.name, vector.source_label, vector.description
        )?;
    }
    Ok(())
}

/// Largest allocation first; ties keep dataset order.
pub(crate) fn rank_by_allocation(mut projects: Vec<AllocatedProject>) -> Vec<AllocatedProject> {
    projects.sort_by(|left, right| right.op_allocation.total_cmp(&left.op_allocation));
    projects
}

pub(crate) fn render_allocations<W: Write>(
    out: &mut W,
    response: &ImpactResponse,
) -> std::io::Result<()> {
    writeln!(out, "Impact allocation")?;
    writeln!(
        out,
        "Budget: {:.0} tokens (evaluated {})",
        response.total_budget,
        response.evaluated_at.to_rfc3339()
    )?;

    writeln!(out, "\nSelection")?;
    for selection in &response.selections {
        writeln!(out, "- {} x{}", selection.vector, selection.weight)?;
    }

    writeln!(out, "\nProjects")?;
    for (rank, project) in response.projects.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {}: {:.2} tokens (score {:.2})",
            rank + 1,
            project.project.metadata.display_name(),
            project.op_allocation,
            project.project.score
        )?;
    }
    Ok(())
}

//! Folds a newly filed progress report into its project.
//!
//! The report names a project and a phase by id. When both resolve, the phase
//! takes the reported percentage, its status is re-derived from that value, and
//! the project's overall progress becomes the rounded mean of all phases.
//! When either id is stale the report stands on its own and nothing else changes.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel, Set};
use uuid::Uuid;

use crate::entities::progress_report;
use crate::entities::project::{self, phases_json, Entity as Project};
use crate::error::AppError;
use crate::models::phase::{find_phase_mut, Phase, PhaseStatus};

/// What happened to the owning project when a report was filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied { overall_progress: i32 },
    ProjectMissing,
    PhaseMissing,
}

/// Status a phase takes when a report sets its progress. Never yields `Delayed`.
pub fn status_for_progress(progress: i32) -> PhaseStatus {
    match progress {
        0 => PhaseStatus::Pending,
        100 => PhaseStatus::Completed,
        _ => PhaseStatus::InProgress,
    }
}

/// Rounded mean of phase progress, or `None` for a project without phases.
pub fn overall_progress(phases: &[Phase]) -> Option<i32> {
    if phases.is_empty() {
        return None;
    }
    let total: i64 = phases.iter().map(|phase| i64::from(phase.progress)).sum();
    Some((total as f64 / phases.len() as f64).round() as i32)
}

/// Applies a reported percentage to one phase.
///
/// Returns the recomputed overall progress, or `None` if no phase has that id.
pub fn apply_progress(phases: &mut [Phase], phase_id: Uuid, progress: i32) -> Option<i32> {
    let phase = find_phase_mut(phases, phase_id)?;
    phase.progress = progress;
    phase.status = status_for_progress(progress);
    overall_progress(phases)
}

/// Runs the aggregation for a report that has already been persisted.
///
/// Stale project or phase references are reported through [`Outcome`] rather
/// than as errors; the caller keeps the report either way.
pub async fn aggregate<C>(db: &C, report: &progress_report::Model) -> Result<Outcome, AppError>
where
    C: ConnectionTrait,
{
    let Some(project) = Project::find_by_id(report.project_id).one(db).await? else {
        tracing::info!(
            report_id = %report.id,
            project_id = %report.project_id,
            "Project not found, skipping aggregation"
        );
        return Ok(Outcome::ProjectMissing);
    };

    let mut phases = project.phase_list()?;
    if find_phase_mut(&mut phases, report.phase_id).is_none() {
        tracing::info!(
            report_id = %report.id,
            project_id = %report.project_id,
            phase_id = %report.phase_id,
            "Phase not found, skipping aggregation"
        );
        return Ok(Outcome::PhaseMissing);
    }

    let recomputed = apply_progress(&mut phases, report.phase_id, report.progress_percentage);
    let overall = recomputed.unwrap_or(project.overall_progress);

    let mut active_project: project::ActiveModel = project.into_active_model();
    active_project.phases = Set(phases_json(&phases)?);
    active_project.overall_progress = Set(overall);
    active_project.updated_at = Set(Utc::now().naive_utc());
    active_project.update(db).await?;

    tracing::info!(
        report_id = %report.id,
        project_id = %report.project_id,
        phase_id = %report.phase_id,
        overall_progress = overall,
        "Project progress recomputed"
    );
    Ok(Outcome::Applied {
        overall_progress: overall,
    })
}

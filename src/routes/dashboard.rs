use axum::{extract::State, response::Json};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use serde::Serialize;

use crate::entities::engineer::Entity as Engineer;
use crate::entities::project::{Entity as Project, ProjectStatus};
use crate::error::AppError;
use crate::models::phase::PhaseStatus;

#[derive(Serialize, Debug, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: u64,
    pub active_projects: u64,
    pub completed_projects: u64,
    /// Projects with at least one delayed phase.
    pub delayed_projects: u64,
    pub total_engineers: u64,
}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = DashboardStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn stats(State(db): State<DatabaseConnection>) -> Result<Json<DashboardStats>, AppError> {
    let projects = Project::find().all(&db).await?;
    let total_engineers = Engineer::find().count(&db).await?;

    let mut stats = DashboardStats {
        total_projects: projects.len() as u64,
        total_engineers,
        ..Default::default()
    };
    for project in &projects {
        match project.status {
            ProjectStatus::Active => stats.active_projects += 1,
            ProjectStatus::Completed => stats.completed_projects += 1,
            _ => {}
        }
        if project
            .phase_list()?
            .iter()
            .any(|phase| phase.status == PhaseStatus::Delayed)
        {
            stats.delayed_projects += 1;
        }
    }

    Ok(Json(stats))
}

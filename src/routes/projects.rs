use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::engineers::EngineerSummary;
use crate::entities::engineer::{self, Entity as Engineer};
use crate::entities::project::{self, phases_json, Entity as Project, ProjectStatus};
use crate::error::AppError;
use crate::models::phase::{find_phase_mut, EngineerAssignment, Phase, PhaseStatus};
use crate::services::resolve::engineers_by_id;
use crate::validation::project::{AssignmentPayload, PhasePayload, ProjectPayload};

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    #[schema(value_type = String)]
    id: Uuid,
    name: String,
    description: String,
    location: String,
    client: String,
    budget: f64,
    start_date: chrono::NaiveDate,
    expected_end_date: chrono::NaiveDate,
    current_phase: String,
    overall_progress: i32,
    status: ProjectStatus,
    phases: Vec<PhaseResponse>,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhaseResponse {
    #[schema(value_type = String)]
    id: Uuid,
    name: String,
    description: String,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    status: PhaseStatus,
    progress: i32,
    assigned_engineers: Vec<AssignmentResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    #[schema(value_type = String)]
    id: Uuid,
    #[schema(value_type = String)]
    engineer_id: Uuid,
    role: Option<String>,
    /// `null` when the engineer has since been deleted.
    engineer: Option<EngineerSummary>,
}

/// How much of an assigned engineer to show.
#[derive(Clone, Copy)]
enum Detail {
    Brief,
    Full,
}

impl ProjectResponse {
    fn resolve(
        project: project::Model,
        directory: &HashMap<Uuid, engineer::Model>,
        detail: Detail,
    ) -> Result<Self, AppError> {
        let phases = project
            .phase_list()?
            .into_iter()
            .map(|phase| PhaseResponse::resolve(phase, directory, detail))
            .collect();

        Ok(ProjectResponse {
            id: project.id,
            name: project.name,
            description: project.description,
            location: project.location,
            client: project.client,
            budget: project.budget,
            start_date: project.start_date,
            expected_end_date: project.expected_end_date,
            current_phase: project.current_phase,
            overall_progress: project.overall_progress,
            status: project.status,
            phases,
            created_at: project.created_at,
            updated_at: project.updated_at,
        })
    }
}

impl PhaseResponse {
    fn resolve(phase: Phase, directory: &HashMap<Uuid, engineer::Model>, detail: Detail) -> Self {
        PhaseResponse {
            id: phase.id,
            name: phase.name,
            description: phase.description,
            start_date: phase.start_date,
            end_date: phase.end_date,
            status: phase.status,
            progress: phase.progress,
            assigned_engineers: phase
                .assigned_engineers
                .into_iter()
                .map(|assignment| AssignmentResponse::resolve(assignment, directory, detail))
                .collect(),
        }
    }
}

impl AssignmentResponse {
    fn resolve(
        assignment: EngineerAssignment,
        directory: &HashMap<Uuid, engineer::Model>,
        detail: Detail,
    ) -> Self {
        let engineer = directory
            .get(&assignment.engineer_id)
            .map(|engineer| match detail {
                Detail::Brief => EngineerSummary::brief(engineer),
                Detail::Full => EngineerSummary::detailed(engineer),
            });

        AssignmentResponse {
            id: assignment.id,
            engineer_id: assignment.engineer_id,
            role: assignment.role,
            engineer,
        }
    }
}

fn assigned_engineer_ids(phases: &[Phase]) -> impl Iterator<Item = Uuid> + '_ {
    phases
        .iter()
        .flat_map(|phase| phase.assigned_engineers.iter())
        .map(|assignment| assignment.engineer_id)
}

/// Resolves one project with full engineer detail.
async fn project_detail(
    db: &DatabaseConnection,
    project: project::Model,
) -> Result<ProjectResponse, AppError> {
    let phases = project.phase_list()?;
    let directory = engineers_by_id(db, assigned_engineer_ids(&phases)).await?;
    ProjectResponse::resolve(project, &directory, Detail::Full)
}

async fn find_project(db: &DatabaseConnection, project_id: Uuid) -> Result<project::Model, AppError> {
    Project::find_by_id(project_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Project not found".to_string()))
}

/// Writes a modified phase list back as part of the whole project document.
async fn save_phases(
    db: &DatabaseConnection,
    project: project::Model,
    phases: &[Phase],
) -> Result<project::Model, AppError> {
    let mut active_project = project.into_active_model();
    active_project.phases = Set(phases_json(phases)?);
    active_project.updated_at = Set(Utc::now().naive_utc());
    Ok(active_project.update(db).await?)
}

#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All projects, newest first", body = [ProjectResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let projects = Project::find()
        .order_by_desc(project::Column::CreatedAt)
        .all(&db)
        .await?;

    let mut engineer_ids = Vec::new();
    for project in &projects {
        engineer_ids.extend(assigned_engineer_ids(&project.phase_list()?));
    }
    let directory = engineers_by_id(&db, engineer_ids).await?;

    let responses = projects
        .into_iter()
        .map(|project| ProjectResponse::resolve(project, &directory, Detail::Brief))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProjectResponse>, AppError> {
    let Path(project_id) = path?;
    let project = find_project(&db, project_id).await?;
    Ok(Json(project_detail(&db, project).await?))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    let Json(payload) = payload?;
    let draft = payload.validate()?;

    let now = Utc::now().naive_utc();
    let project = project::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(draft.name),
        description: Set(draft.description),
        location: Set(draft.location),
        client: Set(draft.client),
        budget: Set(draft.budget),
        start_date: Set(draft.start_date),
        expected_end_date: Set(draft.expected_end_date),
        current_phase: Set(draft.current_phase),
        overall_progress: Set(0),
        status: Set(draft.status),
        phases: Set(phases_json(&[])?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = project.insert(&db).await?;

    tracing::info!(project_id = %created.id, name = %created.name, "Project created");
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse::resolve(created, &HashMap::new(), Detail::Full)?),
    ))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> Result<Json<ProjectResponse>, AppError> {
    let Path(project_id) = path?;
    let Json(patch) = payload?;
    let project = find_project(&db, project_id).await?;
    let draft = patch.or(ProjectPayload::from(&project)).validate()?;

    let mut active_project = project.into_active_model();
    active_project.name = Set(draft.name);
    active_project.description = Set(draft.description);
    active_project.location = Set(draft.location);
    active_project.client = Set(draft.client);
    active_project.budget = Set(draft.budget);
    active_project.start_date = Set(draft.start_date);
    active_project.expected_end_date = Set(draft.expected_end_date);
    active_project.current_phase = Set(draft.current_phase);
    active_project.status = Set(draft.status);
    active_project.updated_at = Set(Utc::now().naive_utc());

    let updated = active_project.update(&db).await?;

    tracing::info!(%project_id, "Project updated");
    Ok(Json(project_detail(&db, updated).await?))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project and its phases deleted"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(project_id) = path?;
    let project = find_project(&db, project_id).await?;

    // Phases and assignments go with the document; reports stay behind.
    let active_project: project::ActiveModel = project.into();
    active_project.delete(&db).await?;

    tracing::info!(%project_id, "Project deleted");
    Ok(Json(serde_json::json!({
        "message": "Project deleted successfully"
    })))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/phases",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = PhasePayload,
    responses(
        (status = 201, description = "Phase appended; returns the project", body = ProjectResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Phases"
)]
pub async fn add_phase(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PhasePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    let Path(project_id) = path?;
    let Json(payload) = payload?;
    let project = find_project(&db, project_id).await?;
    let phase = payload.into_phase()?;
    let phase_id = phase.id;

    let mut phases = project.phase_list()?;
    phases.push(phase);
    let updated = save_phases(&db, project, &phases).await?;

    tracing::info!(%project_id, %phase_id, "Phase added");
    Ok((StatusCode::CREATED, Json(project_detail(&db, updated).await?)))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}/phases/{phase_id}",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("phase_id" = String, Path, description = "Phase ID")
    ),
    request_body = PhasePayload,
    responses(
        (status = 200, description = "Phase updated; returns the project", body = ProjectResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Project or phase not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Phases"
)]
pub async fn update_phase(
    State(db): State<DatabaseConnection>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<PhasePayload>, JsonRejection>,
) -> Result<Json<ProjectResponse>, AppError> {
    let Path((project_id, phase_id)) = path?;
    let Json(patch) = payload?;
    let project = find_project(&db, project_id).await?;

    let mut phases = project.phase_list()?;
    let phase = find_phase_mut(&mut phases, phase_id)
        .ok_or(AppError::NotFound("Phase not found".to_string()))?;
    let base = PhasePayload::from(&*phase);
    patch.or(base).apply_to(phase)?;

    let updated = save_phases(&db, project, &phases).await?;

    tracing::info!(%project_id, %phase_id, "Phase updated");
    Ok(Json(project_detail(&db, updated).await?))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/phases/{phase_id}/assign-engineer",
    params(
        ("id" = String, Path, description = "Project ID"),
        ("phase_id" = String, Path, description = "Phase ID")
    ),
    request_body = AssignmentPayload,
    responses(
        (status = 200, description = "Engineer assigned; returns the project", body = ProjectResponse),
        (status = 400, description = "Missing or invalid engineer id"),
        (status = 404, description = "Project, phase or engineer not found"),
        (status = 409, description = "Engineer already assigned to this phase"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Phases"
)]
pub async fn assign_engineer(
    State(db): State<DatabaseConnection>,
    path: Result<Path<(Uuid, Uuid)>, PathRejection>,
    payload: Result<Json<AssignmentPayload>, JsonRejection>,
) -> Result<Json<ProjectResponse>, AppError> {
    let Path((project_id, phase_id)) = path?;
    let Json(payload) = payload?;
    let (engineer_id, role) = payload.validate()?;

    let project = find_project(&db, project_id).await?;
    Engineer::find_by_id(engineer_id)
        .one(&db)
        .await?
        .ok_or(AppError::NotFound("Engineer not found".to_string()))?;

    let mut phases = project.phase_list()?;
    let phase = find_phase_mut(&mut phases, phase_id)
        .ok_or(AppError::NotFound("Phase not found".to_string()))?;
    phase.assign(engineer_id, role)?;

    let updated = save_phases(&db, project, &phases).await?;

    tracing::info!(%project_id, %phase_id, %engineer_id, "Engineer assigned to phase");
    Ok(Json(project_detail(&db, updated).await?))
}

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
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::engineers::EngineerSummary;
use crate::entities::engineer;
use crate::entities::progress_report::{self, Entity as ProgressReport};
use crate::entities::project::Entity as Project;
use crate::error::AppError;
use crate::models::report::{Attachment, Issue};
use crate::services::aggregation;
use crate::services::resolve::engineers_by_id;
use crate::validation::report::ReportPayload;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[schema(value_type = String)]
    id: Uuid,
    #[schema(value_type = String)]
    project_id: Uuid,
    /// Only resolved on the single-report endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[schema(value_type = String)]
    phase_id: Uuid,
    #[schema(value_type = String)]
    reported_by: Uuid,
    /// `null` when the reporting engineer has since been deleted.
    reporter: Option<EngineerSummary>,
    report_date: chrono::NaiveDateTime,
    progress_percentage: i32,
    description: String,
    next_steps: Option<String>,
    issues: Vec<Issue>,
    attachments: Vec<Attachment>,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl ReportResponse {
    fn resolve(
        report: progress_report::Model,
        directory: &HashMap<Uuid, engineer::Model>,
    ) -> Result<Self, AppError> {
        let issues = report.issue_list()?;
        let attachments = report.attachment_list()?;
        let reporter = directory.get(&report.reported_by).map(EngineerSummary::brief);

        Ok(ReportResponse {
            id: report.id,
            project_id: report.project_id,
            project_name: None,
            phase_id: report.phase_id,
            reported_by: report.reported_by,
            reporter,
            report_date: report.report_date,
            progress_percentage: report.progress_percentage,
            description: report.description,
            next_steps: report.next_steps,
            issues,
            attachments,
            created_at: report.created_at,
            updated_at: report.updated_at,
        })
    }
}

async fn find_report(
    db: &DatabaseConnection,
    report_id: Uuid,
) -> Result<progress_report::Model, AppError> {
    ProgressReport::find_by_id(report_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Report not found".to_string()))
}

async fn with_reporter(
    db: &DatabaseConnection,
    report: progress_report::Model,
) -> Result<ReportResponse, AppError> {
    let directory = engineers_by_id(db, [report.reported_by]).await?;
    ReportResponse::resolve(report, &directory)
}

#[utoipa::path(
    get,
    path = "/api/reports/project/{project_id}",
    params(
        ("project_id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Reports for the project, latest report date first", body = [ReportResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn list_reports_by_project(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    let Path(project_id) = path?;
    let reports = ProgressReport::find()
        .filter(progress_report::Column::ProjectId.eq(project_id))
        .order_by_desc(progress_report::Column::ReportDate)
        .all(&db)
        .await?;

    let directory = engineers_by_id(&db, reports.iter().map(|report| report.reported_by)).await?;

    let responses = reports
        .into_iter()
        .map(|report| ReportResponse::resolve(report, &directory))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report details", body = ReportResponse),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn get_report(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ReportResponse>, AppError> {
    let Path(report_id) = path?;
    let report = find_report(&db, report_id).await?;
    let project_name = Project::find_by_id(report.project_id)
        .one(&db)
        .await?
        .map(|project| project.name);

    let mut response = with_reporter(&db, report).await?;
    response.project_name = project_name;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = ReportPayload,
    responses(
        (status = 201, description = "Report filed and folded into the project's progress", body = ReportResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn create_report(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    let Json(payload) = payload?;
    let draft = payload.validate()?;

    let now = Utc::now().naive_utc();
    let report = progress_report::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(draft.project_id),
        phase_id: Set(draft.phase_id),
        reported_by: Set(draft.reported_by),
        report_date: Set(draft.report_date),
        progress_percentage: Set(draft.progress_percentage),
        description: Set(draft.description),
        next_steps: Set(draft.next_steps),
        issues: Set(to_json(&draft.issues)?),
        attachments: Set(to_json(&draft.attachments)?),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = report.insert(&db).await?;
    tracing::info!(report_id = %created.id, project_id = %created.project_id, "Report filed");

    // The report is already stored; a failure here does not remove it.
    let outcome = aggregation::aggregate(&db, &created).await?;
    tracing::debug!(report_id = %created.id, ?outcome, "Aggregation finished");

    Ok((StatusCode::CREATED, Json(with_reporter(&db, created).await?)))
}

#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = ReportPayload,
    responses(
        (status = 200, description = "Report updated; project progress is left as is", body = ReportResponse),
        (status = 400, description = "Invalid fields"),
        (status = 404, description = "Report not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn update_report(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReportPayload>, JsonRejection>,
) -> Result<Json<ReportResponse>, AppError> {
    let Path(report_id) = path?;
    let Json(patch) = payload?;
    let report = find_report(&db, report_id).await?;
    let draft = patch.or(ReportPayload::from_model(&report)?).validate()?;

    let mut active_report = report.into_active_model();
    active_report.project_id = Set(draft.project_id);
    active_report.phase_id = Set(draft.phase_id);
    active_report.reported_by = Set(draft.reported_by);
    active_report.report_date = Set(draft.report_date);
    active_report.progress_percentage = Set(draft.progress_percentage);
    active_report.description = Set(draft.description);
    active_report.next_steps = Set(draft.next_steps);
    active_report.issues = Set(to_json(&draft.issues)?);
    active_report.attachments = Set(to_json(&draft.attachments)?);
    active_report.updated_at = Set(Utc::now().naive_utc());

    // Editing a filed report never re-runs aggregation.
    let updated = active_report.update(&db).await?;

    tracing::info!(%report_id, "Report updated");
    Ok(Json(with_reporter(&db, updated).await?))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode report: {}", e)))
}

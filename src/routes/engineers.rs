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
use uuid::Uuid;

use crate::entities::engineer::{self, EngineerRole, Entity as Engineer};
use crate::error::AppError;
use crate::validation::engineer::EngineerPayload;

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerResponse {
    #[schema(value_type = String)]
    id: Uuid,
    name: String,
    email: String,
    role: EngineerRole,
    specialization: String,
    contact_number: String,
    experience: i32,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
}

impl From<engineer::Model> for EngineerResponse {
    fn from(engineer: engineer::Model) -> Self {
        EngineerResponse {
            id: engineer.id,
            name: engineer.name,
            email: engineer.email,
            role: engineer.role,
            specialization: engineer.specialization,
            contact_number: engineer.contact_number,
            experience: engineer.experience,
            created_at: engineer.created_at,
            updated_at: engineer.updated_at,
        }
    }
}

/// Engineer identity embedded in assignments and reports for display.
#[derive(Serialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EngineerSummary {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: EngineerRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl EngineerSummary {
    pub fn brief(engineer: &engineer::Model) -> Self {
        EngineerSummary {
            id: engineer.id,
            name: engineer.name.clone(),
            email: engineer.email.clone(),
            role: engineer.role,
            specialization: None,
        }
    }

    pub fn detailed(engineer: &engineer::Model) -> Self {
        EngineerSummary {
            specialization: Some(engineer.specialization.clone()),
            ..Self::brief(engineer)
        }
    }
}

async fn find_engineer(db: &DatabaseConnection, engineer_id: Uuid) -> Result<engineer::Model, AppError> {
    Engineer::find_by_id(engineer_id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("Engineer not found".to_string()))
}

/// Exact-match email uniqueness, ignoring the engineer being updated.
async fn ensure_email_free(
    db: &DatabaseConnection,
    email: &str,
    except: Option<Uuid>,
) -> Result<(), AppError> {
    let mut query = Engineer::find().filter(engineer::Column::Email.eq(email));
    if let Some(id) = except {
        query = query.filter(engineer::Column::Id.ne(id));
    }

    if query.one(db).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "An engineer with email {} already exists",
            email
        )));
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/engineers",
    responses(
        (status = 200, description = "All engineers ordered by name", body = [EngineerResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engineers"
)]
pub async fn list_engineers(
    State(db): State<DatabaseConnection>,
) -> Result<Json<Vec<EngineerResponse>>, AppError> {
    let engineers = Engineer::find()
        .order_by_asc(engineer::Column::Name)
        .all(&db)
        .await?;

    Ok(Json(engineers.into_iter().map(EngineerResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/engineers/{id}",
    params(
        ("id" = String, Path, description = "Engineer ID")
    ),
    responses(
        (status = 200, description = "Engineer details", body = EngineerResponse),
        (status = 404, description = "Engineer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engineers"
)]
pub async fn get_engineer(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<EngineerResponse>, AppError> {
    let Path(engineer_id) = path?;
    let engineer = find_engineer(&db, engineer_id).await?;
    Ok(Json(EngineerResponse::from(engineer)))
}

#[utoipa::path(
    post,
    path = "/api/engineers",
    request_body = EngineerPayload,
    responses(
        (status = 201, description = "Engineer created", body = EngineerResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engineers"
)]
pub async fn create_engineer(
    State(db): State<DatabaseConnection>,
    payload: Result<Json<EngineerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<EngineerResponse>), AppError> {
    let Json(payload) = payload?;
    let draft = payload.validate()?;
    ensure_email_free(&db, &draft.email, None).await?;

    let now = Utc::now().naive_utc();
    let engineer = engineer::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(draft.name),
        email: Set(draft.email),
        role: Set(draft.role),
        specialization: Set(draft.specialization),
        contact_number: Set(draft.contact_number),
        experience: Set(draft.experience),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = engineer.insert(&db).await?;

    tracing::info!(engineer_id = %created.id, name = %created.name, "Engineer created");
    Ok((StatusCode::CREATED, Json(EngineerResponse::from(created))))
}

#[utoipa::path(
    put,
    path = "/api/engineers/{id}",
    params(
        ("id" = String, Path, description = "Engineer ID")
    ),
    request_body = EngineerPayload,
    responses(
        (status = 200, description = "Engineer updated", body = EngineerResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Engineer not found"),
        (status = 409, description = "Email already in use"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engineers"
)]
pub async fn update_engineer(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<EngineerPayload>, JsonRejection>,
) -> Result<Json<EngineerResponse>, AppError> {
    let Path(engineer_id) = path?;
    let Json(patch) = payload?;
    let engineer = find_engineer(&db, engineer_id).await?;

    let draft = patch.or(EngineerPayload::from(&engineer)).validate()?;
    if draft.email != engineer.email {
        ensure_email_free(&db, &draft.email, Some(engineer.id)).await?;
    }

    let mut active_engineer = engineer.into_active_model();
    active_engineer.name = Set(draft.name);
    active_engineer.email = Set(draft.email);
    active_engineer.role = Set(draft.role);
    active_engineer.specialization = Set(draft.specialization);
    active_engineer.contact_number = Set(draft.contact_number);
    active_engineer.experience = Set(draft.experience);
    active_engineer.updated_at = Set(Utc::now().naive_utc());

    let updated = active_engineer.update(&db).await?;

    tracing::info!(engineer_id = %updated.id, "Engineer updated");
    Ok(Json(EngineerResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/engineers/{id}",
    params(
        ("id" = String, Path, description = "Engineer ID")
    ),
    responses(
        (status = 200, description = "Engineer deleted"),
        (status = 404, description = "Engineer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engineers"
)]
pub async fn delete_engineer(
    State(db): State<DatabaseConnection>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Path(engineer_id) = path?;
    let engineer = find_engineer(&db, engineer_id).await?;

    // Assignments and reports keep pointing at this id.
    let active_engineer: engineer::ActiveModel = engineer.into();
    active_engineer.delete(&db).await?;

    tracing::info!(%engineer_id, "Engineer deleted");
    Ok(Json(serde_json::json!({
        "message": "Engineer deleted successfully"
    })))
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::report::{Attachment, Issue};

/// A progress report references its project, phase and reporter by id only;
/// none of those references are enforced by the schema.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "progress_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub phase_id: Uuid,
    pub reported_by: Uuid,
    pub report_date: DateTime,
    pub progress_percentage: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub next_steps: Option<String>,
    pub issues: Json,
    pub attachments: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn issue_list(&self) -> Result<Vec<Issue>, AppError> {
        serde_json::from_value(self.issues.clone()).map_err(|e| {
            AppError::InternalServerError(format!("Corrupt issues on report {}: {}", self.id, e))
        })
    }

    pub fn attachment_list(&self) -> Result<Vec<Attachment>, AppError> {
        serde_json::from_value(self.attachments.clone()).map_err(|e| {
            AppError::InternalServerError(format!("Corrupt attachments on report {}: {}", self.id, e))
        })
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

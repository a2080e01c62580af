use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::phase::Phase;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub location: String,
    pub client: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub start_date: Date,
    pub expected_end_date: Date,
    pub current_phase: String,
    pub overall_progress: i32,
    pub status: ProjectStatus,
    /// Ordered list of [`Phase`] documents, each owning its engineer assignments.
    pub phases: Json,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Model {
    pub fn phase_list(&self) -> Result<Vec<Phase>, AppError> {
        serde_json::from_value(self.phases.clone()).map_err(|e| {
            AppError::InternalServerError(format!("Corrupt phases on project {}: {}", self.id, e))
        })
    }
}

/// Serializes phases back into the JSON column representation.
pub fn phases_json(phases: &[Phase]) -> Result<Json, AppError> {
    serde_json::to_value(phases)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode phases: {}", e)))
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "planning")]
    Planning,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::Active,
        ProjectStatus::Completed,
        ProjectStatus::Suspended,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Suspended => "suspended",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| format!("`{}` is not a valid project status", s))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

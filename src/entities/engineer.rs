use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "engineers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: EngineerRole,
    pub specialization: String,
    pub contact_number: String,
    pub experience: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum EngineerRole {
    #[sea_orm(string_value = "Project Manager")]
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[sea_orm(string_value = "Civil Engineer")]
    #[serde(rename = "Civil Engineer")]
    CivilEngineer,
    #[sea_orm(string_value = "Structural Engineer")]
    #[serde(rename = "Structural Engineer")]
    StructuralEngineer,
    #[sea_orm(string_value = "Electrical Engineer")]
    #[serde(rename = "Electrical Engineer")]
    ElectricalEngineer,
    #[sea_orm(string_value = "Mechanical Engineer")]
    #[serde(rename = "Mechanical Engineer")]
    MechanicalEngineer,
    #[sea_orm(string_value = "Site Supervisor")]
    #[serde(rename = "Site Supervisor")]
    SiteSupervisor,
}

impl EngineerRole {
    pub const ALL: [EngineerRole; 6] = [
        EngineerRole::ProjectManager,
        EngineerRole::CivilEngineer,
        EngineerRole::StructuralEngineer,
        EngineerRole::ElectricalEngineer,
        EngineerRole::MechanicalEngineer,
        EngineerRole::SiteSupervisor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EngineerRole::ProjectManager => "Project Manager",
            EngineerRole::CivilEngineer => "Civil Engineer",
            EngineerRole::StructuralEngineer => "Structural Engineer",
            EngineerRole::ElectricalEngineer => "Electrical Engineer",
            EngineerRole::MechanicalEngineer => "Mechanical Engineer",
            EngineerRole::SiteSupervisor => "Site Supervisor",
        }
    }
}

impl FromStr for EngineerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.label() == s)
            .ok_or_else(|| format!("`{}` is not a valid role", s))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

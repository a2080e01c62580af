//! Phase documents embedded in a project.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: PhaseStatus,
    pub progress: i32,
    #[serde(default)]
    pub assigned_engineers: Vec<EngineerAssignment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngineerAssignment {
    pub id: Uuid,
    pub engineer_id: Uuid,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    Pending,
    InProgress,
    Completed,
    Delayed,
}

impl PhaseStatus {
    pub const ALL: [PhaseStatus; 4] = [
        PhaseStatus::Pending,
        PhaseStatus::InProgress,
        PhaseStatus::Completed,
        PhaseStatus::Delayed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in-progress",
            PhaseStatus::Completed => "completed",
            PhaseStatus::Delayed => "delayed",
        }
    }
}

impl FromStr for PhaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| format!("`{}` is not a valid phase status", s))
    }
}

impl Phase {
    /// A freshly added phase: pending, no progress, nobody assigned.
    pub fn new(name: String, description: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            start_date,
            end_date,
            status: PhaseStatus::Pending,
            progress: 0,
            assigned_engineers: Vec::new(),
        }
    }

    pub fn is_assigned(&self, engineer_id: Uuid) -> bool {
        self.assigned_engineers
            .iter()
            .any(|assignment| assignment.engineer_id == engineer_id)
    }

    /// Appends an assignment unless the engineer already holds one on this phase.
    pub fn assign(&mut self, engineer_id: Uuid, role: Option<String>) -> Result<(), AppError> {
        if self.is_assigned(engineer_id) {
            return Err(AppError::Conflict(
                "Engineer already assigned to this phase".to_string(),
            ));
        }

        self.assigned_engineers.push(EngineerAssignment {
            id: Uuid::new_v4(),
            engineer_id,
            role,
        });
        Ok(())
    }
}

pub fn find_phase_mut(phases: &mut [Phase], phase_id: Uuid) -> Option<&mut Phase> {
    phases.iter_mut().find(|phase| phase.id == phase_id)
}

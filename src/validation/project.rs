use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{clearable, Violations, DATE_FORMAT};
use crate::entities::project::{self, ProjectStatus};
use crate::error::AppError;
use crate::models::phase::{Phase, PhaseStatus};

/// Body of `POST /api/projects` and `PUT /api/projects/{id}`.
///
/// `overallProgress` and `phases` are not part of the payload: the former is
/// derived from report ingestion, the latter is managed through the phase endpoints.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub client: Option<String>,
    pub budget: Option<f64>,
    /// `YYYY-MM-DD` or RFC 3339.
    pub start_date: Option<String>,
    pub expected_end_date: Option<String>,
    /// Defaults to `Planning`; `null` on update resets it.
    #[serde(default, deserialize_with = "clearable")]
    #[schema(value_type = Option<String>)]
    pub current_phase: Option<Option<String>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub client: String,
    pub budget: f64,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub current_phase: String,
    pub status: ProjectStatus,
}

impl From<&project::Model> for ProjectPayload {
    fn from(model: &project::Model) -> Self {
        Self {
            name: Some(model.name.clone()),
            description: Some(model.description.clone()),
            location: Some(model.location.clone()),
            client: Some(model.client.clone()),
            budget: Some(model.budget),
            start_date: Some(model.start_date.format(DATE_FORMAT).to_string()),
            expected_end_date: Some(model.expected_end_date.format(DATE_FORMAT).to_string()),
            current_phase: Some(Some(model.current_phase.clone())),
            status: Some(model.status.label().to_string()),
        }
    }
}

impl ProjectPayload {
    pub fn or(self, base: ProjectPayload) -> ProjectPayload {
        ProjectPayload {
            name: self.name.or(base.name),
            description: self.description.or(base.description),
            location: self.location.or(base.location),
            client: self.client.or(base.client),
            budget: self.budget.or(base.budget),
            start_date: self.start_date.or(base.start_date),
            expected_end_date: self.expected_end_date.or(base.expected_end_date),
            current_phase: self.current_phase.or(base.current_phase),
            status: self.status.or(base.status),
        }
    }

    pub fn validate(self) -> Result<ProjectDraft, AppError> {
        let mut v = Violations::new("Project");

        let name = v.required_text("name", self.name);
        let description = v.required_text("description", self.description);
        let location = v.required_text("location", self.location);
        let client = v.required_text("client", self.client);
        let budget = v.required("budget", self.budget).and_then(|budget| {
            if budget.is_finite() && budget > 0.0 {
                Some(budget)
            } else {
                v.add("budget", "must be a positive number");
                None
            }
        });
        let start_date = v.date("startDate", self.start_date);
        let expected_end_date = v.date("expectedEndDate", self.expected_end_date);
        if let (Some(start), Some(end)) = (start_date, expected_end_date) {
            if end <= start {
                v.add("expectedEndDate", "must be after startDate");
            }
        }
        let current_phase = self
            .current_phase
            .flatten()
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| "Planning".to_string());
        let status = match self.status {
            Some(raw) => v.one_of::<ProjectStatus>("status", Some(raw)),
            None => Some(ProjectStatus::Planning),
        };

        v.finish_with(|| {
            Some(ProjectDraft {
                name: name?,
                description: description?,
                location: location?,
                client: client?,
                budget: budget?,
                start_date: start_date?,
                expected_end_date: expected_end_date?,
                current_phase,
                status: status?,
            })
        })
    }
}

/// Body of `POST /api/projects/{id}/phases` and `PUT /api/projects/{projectId}/phases/{phaseId}`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhasePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// `pending`, `in-progress`, `completed` or `delayed`.
    pub status: Option<String>,
    /// Whole number in 0..=100.
    pub progress: Option<f64>,
}

impl From<&Phase> for PhasePayload {
    fn from(phase: &Phase) -> Self {
        Self {
            name: Some(phase.name.clone()),
            description: Some(phase.description.clone()),
            start_date: Some(phase.start_date.format(DATE_FORMAT).to_string()),
            end_date: Some(phase.end_date.format(DATE_FORMAT).to_string()),
            status: Some(phase.status.label().to_string()),
            progress: Some(f64::from(phase.progress)),
        }
    }
}

impl PhasePayload {
    pub fn or(self, base: PhasePayload) -> PhasePayload {
        PhasePayload {
            name: self.name.or(base.name),
            description: self.description.or(base.description),
            start_date: self.start_date.or(base.start_date),
            end_date: self.end_date.or(base.end_date),
            status: self.status.or(base.status),
            progress: self.progress.or(base.progress),
        }
    }

    /// Validates a new phase. Status and progress default to pending and 0.
    pub fn into_phase(self) -> Result<Phase, AppError> {
        let mut phase = Phase::new(String::new(), String::new(), NaiveDate::MIN, NaiveDate::MIN);
        self.apply_to(&mut phase)?;
        Ok(phase)
    }

    /// Validates the payload and writes every field into `phase`.
    /// Nothing is written when validation fails.
    pub fn apply_to(self, phase: &mut Phase) -> Result<(), AppError> {
        let mut v = Violations::new("Phase");

        let name = v.required_text("name", self.name);
        let description = v.required_text("description", self.description);
        let start_date = v.date("startDate", self.start_date);
        let end_date = v.date("endDate", self.end_date);
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                v.add("endDate", "must not precede startDate");
            }
        }
        let status = match self.status {
            Some(raw) => v.one_of::<PhaseStatus>("status", Some(raw)),
            None => Some(phase.status),
        };
        let progress = match self.progress {
            Some(raw) => v
                .whole_number("progress", raw)
                .and_then(|raw| v.percentage("progress", raw)),
            None => Some(phase.progress),
        };

        let (name, description, start_date, end_date, status, progress) = v.finish_with(|| {
            Some((name?, description?, start_date?, end_date?, status?, progress?))
        })?;

        phase.name = name;
        phase.description = description;
        phase.start_date = start_date;
        phase.end_date = end_date;
        phase.status = status;
        phase.progress = progress;
        Ok(())
    }
}

/// Body of `POST /api/projects/{projectId}/phases/{phaseId}/assign-engineer`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPayload {
    pub engineer_id: Option<String>,
    /// Free-text role held on this phase.
    pub role: Option<String>,
}

impl AssignmentPayload {
    pub fn validate(self) -> Result<(Uuid, Option<String>), AppError> {
        let mut v = Violations::new("Assignment");
        let engineer_id = v.id("engineerId", self.engineer_id);
        let role = self
            .role
            .map(|role| role.trim().to_string())
            .filter(|role| !role.is_empty());
        v.finish_with(|| Some((engineer_id?, role)))
    }
}

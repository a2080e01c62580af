use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::{clearable, Violations, TIMESTAMP_FORMAT};
use crate::entities::progress_report;
use crate::error::AppError;
use crate::models::report::{Attachment, Issue, IssueSeverity, IssueStatus};

/// Body of `POST /api/reports` and `PUT /api/reports/{id}`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    pub project_id: Option<String>,
    pub phase_id: Option<String>,
    /// Id of the reporting engineer.
    pub reported_by: Option<String>,
    /// Defaults to the time of creation. Blank on update keeps the stored date.
    pub report_date: Option<String>,
    pub progress_percentage: Option<f64>,
    pub description: Option<String>,
    /// `null` clears it on update.
    #[serde(default, deserialize_with = "clearable")]
    #[schema(value_type = Option<String>)]
    pub next_steps: Option<Option<String>>,
    pub issues: Option<Vec<IssuePayload>>,
    pub attachments: Option<Vec<AttachmentPayload>>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuePayload {
    /// Keeps the identity of an existing issue when a report is edited.
    #[schema(value_type = Option<String>)]
    pub id: Option<Uuid>,
    pub description: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentPayload {
    #[schema(value_type = Option<String>)]
    pub id: Option<Uuid>,
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDraft {
    pub project_id: Uuid,
    pub phase_id: Uuid,
    pub reported_by: Uuid,
    pub report_date: NaiveDateTime,
    pub progress_percentage: i32,
    pub description: String,
    pub next_steps: Option<String>,
    pub issues: Vec<Issue>,
    pub attachments: Vec<Attachment>,
}

impl From<Issue> for IssuePayload {
    fn from(issue: Issue) -> Self {
        Self {
            id: Some(issue.id),
            description: Some(issue.description),
            severity: Some(issue.severity.label().to_string()),
            status: Some(issue.status.label().to_string()),
        }
    }
}

impl From<Attachment> for AttachmentPayload {
    fn from(attachment: Attachment) -> Self {
        Self {
            id: Some(attachment.id),
            file_name: Some(attachment.file_name),
            file_url: Some(attachment.file_url),
            upload_date: Some(attachment.upload_date.format(TIMESTAMP_FORMAT).to_string()),
        }
    }
}

impl ReportPayload {
    /// Rebuilds the payload a stored report would have been created from.
    pub fn from_model(model: &progress_report::Model) -> Result<Self, AppError> {
        Ok(Self {
            project_id: Some(model.project_id.to_string()),
            phase_id: Some(model.phase_id.to_string()),
            reported_by: Some(model.reported_by.to_string()),
            report_date: Some(model.report_date.format(TIMESTAMP_FORMAT).to_string()),
            progress_percentage: Some(f64::from(model.progress_percentage)),
            description: Some(model.description.clone()),
            next_steps: Some(model.next_steps.clone()),
            issues: Some(model.issue_list()?.into_iter().map(IssuePayload::from).collect()),
            attachments: Some(
                model
                    .attachment_list()?
                    .into_iter()
                    .map(AttachmentPayload::from)
                    .collect(),
            ),
        })
    }

    /// Fields absent from `self` fall back to `base`, and so does a blank `reportDate`.
    pub fn or(self, base: ReportPayload) -> ReportPayload {
        let report_date = self.report_date.filter(|raw| !raw.trim().is_empty());
        ReportPayload {
            project_id: self.project_id.or(base.project_id),
            phase_id: self.phase_id.or(base.phase_id),
            reported_by: self.reported_by.or(base.reported_by),
            report_date: report_date.or(base.report_date),
            progress_percentage: self.progress_percentage.or(base.progress_percentage),
            description: self.description.or(base.description),
            next_steps: self.next_steps.or(base.next_steps),
            issues: self.issues.or(base.issues),
            attachments: self.attachments.or(base.attachments),
        }
    }

    pub fn validate(self) -> Result<ReportDraft, AppError> {
        let now = Utc::now().naive_utc();
        let mut v = Violations::new("ProgressReport");

        let project_id = v.id("projectId", self.project_id);
        let phase_id = v.id("phaseId", self.phase_id);
        let reported_by = v.id("reportedBy", self.reported_by);
        let report_date = v.timestamp("reportDate", self.report_date.clone());
        let report_date = match (report_date, &self.report_date) {
            (Some(date), _) => Some(date),
            (None, Some(raw)) if !raw.trim().is_empty() => None,
            _ => Some(now),
        };
        let progress_percentage = v
            .required("progressPercentage", self.progress_percentage)
            .and_then(|raw| v.whole_number("progressPercentage", raw))
            .and_then(|raw| v.percentage("progressPercentage", raw));
        let description = v.required_text("description", self.description);
        let next_steps = self
            .next_steps
            .flatten()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let mut issues = Vec::new();
        for (index, issue) in self.issues.unwrap_or_default().into_iter().enumerate() {
            let severity = match issue.severity {
                Some(raw) => v.one_of::<IssueSeverity>(&format!("issues.{}.severity", index), Some(raw)),
                None => Some(IssueSeverity::default()),
            };
            let status = match issue.status {
                Some(raw) => v.one_of::<IssueStatus>(&format!("issues.{}.status", index), Some(raw)),
                None => Some(IssueStatus::default()),
            };
            if let (Some(severity), Some(status)) = (severity, status) {
                issues.push(Issue {
                    id: issue.id.unwrap_or_else(Uuid::new_v4),
                    description: issue.description.map(|d| d.trim().to_string()).unwrap_or_default(),
                    severity,
                    status,
                });
            }
        }

        let mut attachments = Vec::new();
        for (index, attachment) in self.attachments.unwrap_or_default().into_iter().enumerate() {
            let field = format!("attachments.{}.uploadDate", index);
            let upload_date = match attachment.upload_date {
                Some(raw) => v.timestamp(&field, Some(raw)).unwrap_or(now),
                None => now,
            };
            attachments.push(Attachment {
                id: attachment.id.unwrap_or_else(Uuid::new_v4),
                file_name: attachment.file_name.unwrap_or_default(),
                file_url: attachment.file_url.unwrap_or_default(),
                upload_date,
            });
        }

        v.finish_with(|| {
            Some(ReportDraft {
                project_id: project_id?,
                phase_id: phase_id?,
                reported_by: reported_by?,
                report_date: report_date?,
                progress_percentage: progress_percentage?,
                description: description?,
                next_steps,
                issues,
                attachments,
            })
        })
    }
}

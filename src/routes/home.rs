use axum::response::{Html, Json};
use serde::Serialize;

use crate::entities::engineer::EngineerRole;
use crate::entities::project::ProjectStatus;
use crate::models::phase::PhaseStatus;
use crate::models::report::{IssueSeverity, IssueStatus};

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: String,
}

/// The enumerations the validators accept, for building option lists.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub engineer_roles: Vec<String>,
    pub project_statuses: Vec<String>,
    pub phase_statuses: Vec<String>,
    pub issue_severities: Vec<String>,
    pub issue_statuses: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Welcome page HTML", content_type = "text/html")
    ),
    tag = "General"
)]
pub async fn root() -> Html<&'static str> {
    Html(r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>Infra Tracker</title>
            <style>
                body {
                    display: flex;
                    flex-direction: column;
                    justify-content: center;
                    align-items: center;
                    height: 100vh;
                    margin: 0;
                    font-family: Arial, sans-serif;
                    background-color: #f0f0f0;
                }
                h1 {
                    color: #333;
                }
                p {
                    color: #666;
                }
            </style>
        </head>
        <body>
            <h1>Infra Tracker</h1>
            <p>Projects, phases, engineers and progress reports for construction sites.</p>
            <a href="/swagger-ui/" style="
                margin-top: 20px;
                padding: 10px 20px;
                background-color: #ea580c;
                color: white;
                text-decoration: none;
                border-radius: 5px;
                font-weight: bold;
            ">
                Explore API Docs
            </a>
        </body>
        </html>
    "#)
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "General"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Server is running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[utoipa::path(
    get,
    path = "/api/options",
    responses(
        (status = 200, description = "Accepted enumeration values", body = OptionsResponse)
    ),
    tag = "General"
)]
pub async fn options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        engineer_roles: EngineerRole::ALL.iter().map(|role| role.label().to_string()).collect(),
        project_statuses: ProjectStatus::ALL.iter().map(|status| status.label().to_string()).collect(),
        phase_statuses: PhaseStatus::ALL.iter().map(|status| status.label().to_string()).collect(),
        issue_severities: IssueSeverity::ALL.iter().map(|severity| severity.label().to_string()).collect(),
        issue_statuses: IssueStatus::ALL.iter().map(|status| status.label().to_string()).collect(),
    })
}

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn new_project_starts_in_planning_with_no_progress() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;

    let (status, body) = get(&app, &format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "planning");
    assert_eq!(body["currentPhase"], "Planning");
    assert_eq!(body["overallProgress"], 0);
    assert_eq!(body["startDate"], "2025-01-01");
    assert!(body["phases"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_end_date_before_start() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/projects",
        json!({
            "name": "Backwards",
            "description": "Ends before it starts",
            "location": "Pune",
            "client": "Acme",
            "budget": 1000.0,
            "startDate": "2025-06-01",
            "expectedEndDate": "2025-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("expectedEndDate"));
}

#[tokio::test]
async fn create_rejects_non_positive_budget_and_bad_status() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/projects",
        json!({
            "name": "Freebie",
            "description": "No money",
            "location": "Pune",
            "client": "Acme",
            "budget": 0,
            "startDate": "2025-01-01",
            "expectedEndDate": "2025-12-01",
            "status": "archived"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("budget"));
    assert!(message.contains("status"));
}

#[tokio::test]
async fn list_returns_every_project() {
    let app = app().await;
    create_project(&app, "First").await;
    create_project(&app, "Second").await;

    let (status, body) = get(&app, "/api/projects").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_patches_fields_and_revalidates() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;

    let (status, body) = put(
        &app,
        &format!("/api/projects/{id}"),
        json!({ "status": "active", "currentPhase": "Foundation" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["currentPhase"], "Foundation");
    assert_eq!(body["name"], "Lakeside Towers");

    let (status, _) = put(&app, &format!("/api/projects/{id}"), json!({ "expectedEndDate": "2024-01-01" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = put(&app, &format!("/api/projects/{unknown}"), json!({ "status": "active" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_phase_appends_pending_phase() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;
    add_phase(&app, &id, "Foundation").await;
    add_phase(&app, &id, "Superstructure").await;

    let (_, body) = get(&app, &format!("/api/projects/{id}")).await;
    let phases = body["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0]["name"], "Foundation");
    assert_eq!(phases[1]["name"], "Superstructure");
    assert_eq!(phases[1]["status"], "pending");
    assert_eq!(phases[1]["progress"], 0);
}

#[tokio::test]
async fn add_phase_validates_and_requires_project() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;

    let (status, _) = post(
        &app,
        &format!("/api/projects/{id}/phases"),
        json!({
            "name": "Finishing",
            "description": "Paint and fixtures",
            "startDate": "2025-05-01",
            "endDate": "2025-04-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, &format!("/api/projects/{id}/phases"), json!({ "name": "Finishing" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = post(
        &app,
        &format!("/api/projects/{unknown}/phases"),
        json!({
            "name": "Finishing",
            "description": "Paint and fixtures",
            "startDate": "2025-04-01",
            "endDate": "2025-05-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_phase_patches_only_given_fields() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &id, "Foundation").await;

    let (status, body) = put(
        &app,
        &format!("/api/projects/{id}/phases/{phase_id}"),
        json!({ "status": "delayed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let phase = &body["phases"][0];
    assert_eq!(phase["status"], "delayed");
    assert_eq!(phase["name"], "Foundation");
    assert_eq!(phase["endDate"], "2025-06-30");
    assert_eq!(phase["id"], phase_id.as_str());
}

#[tokio::test]
async fn update_phase_reports_missing_project_or_phase() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;
    let unknown = uuid::Uuid::new_v4();

    let (status, body) = put(
        &app,
        &format!("/api/projects/{id}/phases/{unknown}"),
        json!({ "status": "delayed" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Phase not found");

    let (status, body) = put(
        &app,
        &format!("/api/projects/{unknown}/phases/{unknown}"),
        json!({ "status": "delayed" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn assigning_same_engineer_twice_conflicts() {
    let app = app().await;
    let engineer_id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    let id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &id, "Foundation").await;
    let uri = format!("/api/projects/{id}/phases/{phase_id}/assign-engineer");

    let (status, body) = post(&app, &uri, json!({ "engineerId": engineer_id, "role": "Lead" })).await;
    assert_eq!(status, StatusCode::OK);
    let assignment = &body["phases"][0]["assignedEngineers"][0];
    assert_eq!(assignment["engineer"]["name"], "Arjun Mehta");
    assert_eq!(assignment["engineer"]["specialization"], "Concrete works");

    let (status, _) = post(&app, &uri, json!({ "engineerId": engineer_id, "role": "Backup" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = get(&app, &format!("/api/projects/{id}")).await;
    assert_eq!(body["phases"][0]["assignedEngineers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn list_resolves_assigned_engineer_names() {
    let app = app().await;
    let engineer_id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    let id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &id, "Foundation").await;
    post(
        &app,
        &format!("/api/projects/{id}/phases/{phase_id}/assign-engineer"),
        json!({ "engineerId": engineer_id }),
    )
    .await;

    let (_, body) = get(&app, "/api/projects").await;
    let engineer = &body[0]["phases"][0]["assignedEngineers"][0]["engineer"];
    assert_eq!(engineer["name"], "Arjun Mehta");
    assert_eq!(engineer["role"], "Site Supervisor");
    assert!(engineer.get("specialization").is_none());
}

#[tokio::test]
async fn assignment_requires_existing_project_phase_and_engineer() {
    let app = app().await;
    let engineer_id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    let id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &id, "Foundation").await;
    let unknown = uuid::Uuid::new_v4();

    let (status, _) = post(
        &app,
        &format!("/api/projects/{id}/phases/{phase_id}/assign-engineer"),
        json!({ "engineerId": unknown }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        &format!("/api/projects/{id}/phases/{unknown}/assign-engineer"),
        json!({ "engineerId": engineer_id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        &format!("/api/projects/{unknown}/phases/{phase_id}/assign-engineer"),
        json!({ "engineerId": engineer_id }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        &format!("/api/projects/{id}/phases/{phase_id}/assign-engineer"),
        json!({ "role": "Lead" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_project_but_keeps_reports() {
    let app = app().await;
    let engineer_id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    let id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &id, "Foundation").await;
    let (_, report) = file_report(&app, &id, &phase_id, &engineer_id, 30).await;
    let report_id = report["id"].as_str().unwrap();

    let (status, _) = delete(&app, &format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, &format!("/api/projects/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, &format!("/api/reports/{report_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("projectName").is_none());
}

#[tokio::test]
async fn null_current_phase_resets_to_planning() {
    let app = app().await;
    let id = create_project(&app, "Lakeside Towers").await;
    put(&app, &format!("/api/projects/{id}"), json!({ "currentPhase": "Foundation" })).await;

    let (status, body) = put(&app, &format!("/api/projects/{id}"), json!({ "currentPhase": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPhase"], "Planning");
}

#[tokio::test]
async fn fractional_phase_progress_is_rejected() {
    let app = app().await;
    let project_id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &project_id, "Foundation").await;
    let uri = format!("/api/projects/{project_id}/phases/{phase_id}");

    let (status, body) = put(&app, &uri, json!({ "progress": 30.0 })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["phases"][0]["progress"], 30);

    let (status, body) = put(&app, &uri, json!({ "progress": 30.5 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Phase validation failed: progress: 30.5 is not a whole number");
}

#[tokio::test]
async fn malformed_phase_ids_are_json_validation_errors() {
    let app = app().await;
    let project_id = create_project(&app, "Lakeside Towers").await;

    let (status, body) = put(
        &app,
        &format!("/api/projects/{project_id}/phases/not-a-uuid"),
        json!({ "progress": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid path parameter"));

    let (status, body) = get(&app, "/api/projects/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn lists_engineers_by_name() {
    let app = app().await;
    create_engineer(&app, "Zoya Khan", "zoya@example.com").await;
    create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    create_engineer(&app, "Meera Iyer", "meera@example.com").await;

    let (status, body) = get(&app, "/api/engineers").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|engineer| engineer["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Arjun Mehta", "Meera Iyer", "Zoya Khan"]);
}

#[tokio::test]
async fn create_returns_camel_case_record() {
    let app = app().await;
    let (status, body) = post(&app, "/api/engineers", engineer_body("Arjun Mehta", "arjun@example.com")).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "Site Supervisor");
    assert_eq!(body["contactNumber"], "+91 90000 00000");
    assert_eq!(body["experience"], 5);

    let id = body["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/engineers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "arjun@example.com");
}

#[tokio::test]
async fn create_rejects_unknown_role() {
    let app = app().await;
    let mut body = engineer_body("Arjun Mehta", "arjun@example.com");
    body["role"] = json!("Architect");

    let (status, body) = post(&app, "/api/engineers", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("role"));
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = app().await;
    let (status, body) = post(&app, "/api/engineers", json!({ "name": "Arjun" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("email: is required"));
    assert!(message.contains("experience: is required"));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = app().await;
    let (status, body) = post(&app, "/api/engineers", json!({ "experience": "a lot" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = app().await;
    create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;

    let (status, _) = post(&app, "/api/engineers", engineer_body("Another Arjun", "arjun@example.com")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Exact match only.
    let (status, _) = post(&app, "/api/engineers", engineer_body("Another Arjun", "Arjun@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_applies_partial_patch() {
    let app = app().await;
    let id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;

    let (status, body) = put(
        &app,
        &format!("/api/engineers/{id}"),
        json!({ "experience": 9, "role": "Project Manager" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["experience"], 9);
    assert_eq!(body["role"], "Project Manager");
    assert_eq!(body["name"], "Arjun Mehta");
    assert_eq!(body["specialization"], "Concrete works");
}

#[tokio::test]
async fn update_revalidates_and_checks_email() {
    let app = app().await;
    let id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    create_engineer(&app, "Meera Iyer", "meera@example.com").await;

    let (status, _) = put(&app, &format!("/api/engineers/{id}"), json!({ "experience": -3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = put(&app, &format!("/api/engineers/{id}"), json!({ "email": "meera@example.com" })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting its own email is fine.
    let (status, _) = put(&app, &format!("/api/engineers/{id}"), json!({ "email": "arjun@example.com" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_engineer_is_not_found() {
    let app = app().await;
    let unknown = uuid::Uuid::new_v4();

    let (status, _) = get(&app, &format!("/api/engineers/{unknown}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put(&app, &format!("/api/engineers/{unknown}"), json!({ "experience": 2 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, &format!("/api/engineers/{unknown}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_an_assigned_engineer_leaves_a_dangling_assignment() {
    let app = app().await;
    let engineer_id = create_engineer(&app, "Arjun Mehta", "arjun@example.com").await;
    let project_id = create_project(&app, "Lakeside Towers").await;
    let phase_id = add_phase(&app, &project_id, "Foundation").await;

    let (status, _) = post(
        &app,
        &format!("/api/projects/{project_id}/phases/{phase_id}/assign-engineer"),
        json!({ "engineerId": engineer_id, "role": "Lead" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete(&app, &format!("/api/engineers/{engineer_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, project) = get(&app, &format!("/api/projects/{project_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let assignment = &project["phases"][0]["assignedEngineers"][0];
    assert_eq!(assignment["engineerId"], engineer_id.as_str());
    assert_eq!(assignment["role"], "Lead");
    assert!(assignment["engineer"].is_null());
}

#[tokio::test]
async fn malformed_path_id_is_a_json_validation_error() {
    let app = app().await;

    let (status, body) = get(&app, "/api/engineers/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid path parameter"));

    let (status, body) = put(&app, "/api/engineers/not-a-uuid", json!({ "experience": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = delete(&app, "/api/engineers/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn experience_accepts_integral_floats_only() {
    let app = app().await;
    let mut body = engineer_body("Arjun Mehta", "arjun@example.com");
    body["experience"] = json!(5.0);
    let (status, created) = post(&app, "/api/engineers", body).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["experience"], 5);

    let mut body = engineer_body("Meera Iyer", "meera@example.com");
    body["experience"] = json!(5.5);
    let (status, rejected) = post(&app, "/api/engineers", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected["error"], "Engineer validation failed: experience: 5.5 is not a whole number");
}

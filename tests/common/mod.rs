#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt; // for `collect`
use infra_tracker::routes::create_routes;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Router backed by a fresh, fully migrated in-memory SQLite database.
pub async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    // A single long-lived connection keeps the in-memory database alive.
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    create_routes(db)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

pub fn engineer_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "role": "Site Supervisor",
        "specialization": "Concrete works",
        "contactNumber": "+91 90000 00000",
        "experience": 5
    })
}

pub async fn create_engineer(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = post(app, "/api/engineers", engineer_body(name, email)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

pub async fn create_project(app: &Router, name: &str) -> String {
    let (status, body) = post(
        app,
        "/api/projects",
        json!({
            "name": name,
            "description": "Mixed-use tower",
            "location": "Bengaluru",
            "client": "Acme Developers",
            "budget": 45000000.0,
            "startDate": "2025-01-01",
            "expectedEndDate": "2026-12-31"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

/// Adds a phase and returns its id.
pub async fn add_phase(app: &Router, project_id: &str, name: &str) -> String {
    let (status, body) = post(
        app,
        &format!("/api/projects/{project_id}/phases"),
        json!({
            "name": name,
            "description": format!("{name} works"),
            "startDate": "2025-02-01",
            "endDate": "2025-06-30"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let phases = body["phases"].as_array().unwrap();
    phases.last().unwrap()["id"].as_str().unwrap().to_string()
}

pub async fn file_report(
    app: &Router,
    project_id: &str,
    phase_id: &str,
    engineer_id: &str,
    progress: i64,
) -> (StatusCode, Value) {
    post(
        app,
        "/api/reports",
        json!({
            "projectId": project_id,
            "phaseId": phase_id,
            "reportedBy": engineer_id,
            "progressPercentage": progress,
            "description": format!("Reached {progress}%")
        }),
    )
    .await
}

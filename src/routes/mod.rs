mod dashboard;
mod engineers;
mod home;
mod projects;
mod reports;

use axum::{
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Define the OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // General endpoints
        home::root,
        home::health,
        home::options,
        dashboard::stats,
        // Engineer directory
        engineers::list_engineers,
        engineers::get_engineer,
        engineers::create_engineer,
        engineers::update_engineer,
        engineers::delete_engineer,
        // Projects and phases
        projects::list_projects,
        projects::get_project,
        projects::create_project,
        projects::update_project,
        projects::delete_project,
        projects::add_phase,
        projects::update_phase,
        projects::assign_engineer,
        // Progress reports
        reports::list_reports_by_project,
        reports::get_report,
        reports::create_report,
        reports::update_report,
    ),
    components(
        schemas(
            home::HealthResponse,
            home::OptionsResponse,
            dashboard::DashboardStats,
            engineers::EngineerResponse,
            engineers::EngineerSummary,
            projects::ProjectResponse,
            projects::PhaseResponse,
            projects::AssignmentResponse,
            reports::ReportResponse,
            crate::validation::engineer::EngineerPayload,
            crate::validation::project::ProjectPayload,
            crate::validation::project::PhasePayload,
            crate::validation::project::AssignmentPayload,
            crate::validation::report::ReportPayload,
            crate::validation::report::IssuePayload,
            crate::validation::report::AttachmentPayload,
            crate::entities::engineer::EngineerRole,
            crate::entities::project::ProjectStatus,
            crate::models::phase::PhaseStatus,
            crate::models::report::Issue,
            crate::models::report::IssueSeverity,
            crate::models::report::IssueStatus,
            crate::models::report::Attachment,
        )
    ),
    tags(
        (name = "General", description = "Service information"),
        (name = "Dashboard", description = "Aggregated counters for the dashboard"),
        (name = "Engineers", description = "Engineer directory"),
        (name = "Projects", description = "Projects and their derived overall progress"),
        (name = "Phases", description = "Phases embedded in a project and their engineer assignments"),
        (name = "Reports", description = "Progress reports; filing one updates the project's progress")
    ),
    info(
        title = "Infra Tracker API",
        version = "0.1.0",
        description = "Construction project tracking: projects, phases, engineers and progress reports",
    )
)]
struct ApiDoc;

pub fn create_routes(db: DatabaseConnection) -> Router {
    // Swagger UI (stateless)
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let engineer_routes = Router::new()
        .route(
            "/engineers",
            get(engineers::list_engineers).post(engineers::create_engineer),
        )
        .route(
            "/engineers/{id}",
            get(engineers::get_engineer)
                .put(engineers::update_engineer)
                .delete(engineers::delete_engineer),
        );

    let project_routes = Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/{id}/phases", post(projects::add_phase))
        .route(
            "/projects/{id}/phases/{phase_id}",
            put(projects::update_phase),
        )
        .route(
            "/projects/{id}/phases/{phase_id}/assign-engineer",
            post(projects::assign_engineer),
        );

    let report_routes = Router::new()
        .route("/reports", post(reports::create_report))
        .route(
            "/reports/project/{project_id}",
            get(reports::list_reports_by_project),
        )
        .route(
            "/reports/{id}",
            get(reports::get_report).put(reports::update_report),
        );

    let api_routes = Router::new()
        .route("/health", get(home::health))
        .route("/options", get(home::options))
        .route("/dashboard/stats", get(dashboard::stats))
        .merge(engineer_routes)
        .merge(project_routes)
        .merge(report_routes);

    let app_routes = Router::new()
        .route("/", get(home::root))
        .nest("/api", api_routes)
        .with_state(db);

    // Merge Swagger UI (which has no state) with the rest
    Router::new()
        .merge(swagger_router)
        .merge(app_routes)
}

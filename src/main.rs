use anyhow::Context;
use axum::http::{HeaderValue, Method};
use clap::{Parser, Subcommand};
use infra_tracker::{config::init_config, routes::create_routes};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "infra-tracker")]
#[command(about = "Construction project tracking service", long_about = None)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long, global = true)]
    host: Option<String>,
    /// Port to listen on (overrides PORT)
    #[arg(long, global = true)]
    port: Option<u16>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations and serve the API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("infra_tracker=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = init_config()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    if let Some(Commands::Migrate) = cli.command {
        return Ok(());
    }

    let cors = match &config.cors_origin {
        Some(origin) => CorsLayer::new().allow_origin(AllowOrigin::exact(
            HeaderValue::from_str(origin).context("CORS_ORIGIN is not a valid header value")?,
        )),
        None => CorsLayer::new().allow_origin(Any),
    }
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allow_headers(Any);

    let app = create_routes(db).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    let host = cli.host.unwrap_or_else(|| config.host.clone());
    let port = cli.port.unwrap_or(config.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

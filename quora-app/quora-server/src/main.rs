use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info};

use quora_api::AppState;
use quora_core::services::QuestionService;
use quora_core::SystemClock;
use quora_infrastructure::{
    create_pool, run_migrations, PgQuestionRepository, PgSessionRepository, PgTransactionManager,
};
use quora_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = quora_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    if let Err(e) = run_migrations(&pool).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Database connection established.");

    // Compose the question service
    let questions = QuestionService::new(
        Arc::new(PgSessionRepository::new(pool.clone())),
        Arc::new(PgQuestionRepository::new(pool.clone())),
        Arc::new(PgTransactionManager::new(pool)),
        Arc::new(SystemClock),
    );

    let state = AppState {
        questions: Arc::new(questions),
        service_name: config.app.name.clone(),
    };

    // Build router
    let app = quora_api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin("http://localhost:5173".parse::<HeaderValue>()?)
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

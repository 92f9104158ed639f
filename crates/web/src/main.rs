use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::{Any, CorsLayer};
use upstream::ProgramClient;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod state;

use config::Config;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::ranking::handlers::get_ranking,
        features::ranking::handlers::download_csv,
        features::reports::handlers::get_report,
        features::reports::handlers::update_report,
    ),
    components(
        schemas(
            ranking::models::Student,
            ranking::models::Round,
            ranking::models::Report,
            ranking::models::Program,
            ranking::table::Column,
            ranking::table::ReportCell,
            ranking::table::RankingRow,
            ranking::table::RankingTable,
            ranking::tag::TagKind,
            ranking::dto::ScoreInput,
            ranking::dto::UpdateReportRequest,
            ranking::dto::SaveResponse,
        )
    ),
    tags(
        (name = "ranking", description = "Ranked leaderboard endpoints"),
        (name = "reports", description = "Weekly report endpoints"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting program ranking service");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Upstream API at: {}", config.upstream_url);
    let client = ProgramClient::new(&config.upstream_url, &config.caller);
    let app_state = AppState::new(Arc::new(client));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = axum::Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/ranking", features::ranking::routes())
        .nest("/api/reports", features::reports::routes())
        .layer(cors)
        .with_state(app_state);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}

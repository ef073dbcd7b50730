use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::setup::handlers::get_setup_status,
        features::setup::handlers::complete_setup,
        features::setup::handlers::load_demo_data,
        features::config::handlers::get_config,
        features::config::handlers::update_config,
        features::users::handlers::list_users,
        features::users::handlers::get_user,
        features::users::handlers::create_user,
        features::users::handlers::update_user,
        features::weigh_ins::handlers::create_weigh_in,
        features::weigh_ins::handlers::get_user_weigh_ins,
        features::weigh_ins::handlers::preview_weigh_in,
        features::weeks::handlers::get_current_week,
        features::weeks::handlers::get_week,
        features::stats::handlers::get_overview,
        features::stats::handlers::get_leaderboard,
        features::stats::handlers::get_user_stats,
        features::stats::handlers::get_pot,
        features::stats::handlers::get_prognosis,
        features::stats::handlers::get_progress,
        features::audit::handlers::get_audit_log,
    ),
    components(
        schemas(
            storage::dto::setup::SetupRequest,
            storage::dto::setup::ParticipantSetup,
            storage::dto::setup::SetupResponse,
            storage::dto::setup::SetupStatusResponse,
            storage::dto::setup::DemoSeedResponse,
            storage::dto::config::ConfigResponse,
            storage::dto::config::UpdateConfigRequest,
            storage::dto::user::UserResponse,
            storage::dto::user::CreateUserRequest,
            storage::dto::user::UpdateUserRequest,
            storage::dto::weigh_in::WeighInResponse,
            storage::dto::weigh_in::CreateWeighInRequest,
            storage::dto::weigh_in::RecordedWeighIn,
            storage::dto::weigh_in::WeighInPreviewResponse,
            storage::dto::week::WeekViewResponse,
            storage::dto::week::WeekWeighInRow,
            storage::dto::week::WeekComparisonRow,
            storage::dto::week::WeekResultResponse,
            storage::dto::stats::LeaderboardRow,
            storage::dto::stats::WeekStandingRow,
            storage::dto::stats::UserStatsResponse,
            storage::dto::stats::WeeklyProgressRow,
            storage::dto::stats::UserContributionRow,
            storage::dto::stats::RecentContributionRow,
            storage::dto::stats::PotSummaryResponse,
            storage::dto::stats::ProjectionRow,
            storage::dto::stats::PrognosisResponse,
            storage::dto::stats::OverviewResponse,
            storage::dto::stats::ProgressPoint,
            storage::dto::stats::UserProgressSeries,
            storage::dto::stats::ProgressResponse,
            storage::models::User,
            storage::models::WeighIn,
            storage::models::PotContribution,
            storage::models::BattleConfig,
            storage::models::AuditEntry,
            storage::services::prognosis::Trend,
        )
    ),
    tags(
        (name = "setup", description = "Initial setup and demo data"),
        (name = "config", description = "Competition configuration"),
        (name = "users", description = "Participant management"),
        (name = "weigh-ins", description = "Weekly weigh-ins"),
        (name = "weeks", description = "Week views and results"),
        (name = "stats", description = "Leaderboard, pot, prognosis and charts"),
        (name = "audit", description = "Change history"),
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
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Weight Battle API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/setup", features::setup::routes::routes())
        .nest("/api/config", features::config::routes::routes())
        .nest("/api/users", features::users::routes::routes())
        .nest("/api/weigh-ins", features::weigh_ins::routes::routes())
        .nest("/api/weeks", features::weeks::routes::routes())
        .nest("/api/stats", features::stats::routes::routes())
        .nest("/api/audit", features::audit::routes::routes())
        .layer(cors)
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind address")?;
    axum::serve(listener, app).await?;

    Ok(())
}

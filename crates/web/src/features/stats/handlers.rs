use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::stats::{
        LeaderboardRow, OverviewResponse, PotSummaryResponse, PrognosisResponse, ProgressResponse,
        UserStatsResponse,
    },
};
use uuid::Uuid;

use crate::error::WebError;
use crate::features::today;

use super::services;

#[utoipa::path(
    get,
    path = "/api/stats/overview",
    responses(
        (status = 200, description = "Complete overview of the battle state", body = OverviewResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "stats"
)]
pub async fn get_overview(State(db): State<Database>) -> Result<Response, WebError> {
    let overview = services::overview(db.pool(), today()).await?;

    Ok(Json(overview).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stats/leaderboard",
    responses(
        (status = 200, description = "Users ranked by weekly wins", body = Vec<LeaderboardRow>),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "stats"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> Result<Response, WebError> {
    let leaderboard = services::leaderboard(db.pool()).await?;

    Ok(Json(leaderboard).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stats/user/{id}",
    params(
        ("id" = Uuid, Path, description = "Participant id")
    ),
    responses(
        (status = 200, description = "Detailed statistics for one participant", body = UserStatsResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "stats"
)]
pub async fn get_user_stats(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let stats = services::user_stats(db.pool(), id).await?;

    Ok(Json(stats).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stats/pot",
    responses(
        (status = 200, description = "Pot total, remaining amount, contributions and final payers", body = PotSummaryResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "stats"
)]
pub async fn get_pot(State(db): State<Database>) -> Result<Response, WebError> {
    let summary = services::pot_summary(db.pool()).await?;

    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stats/prognosis",
    responses(
        (status = 200, description = "Weight projections until the end of the battle", body = PrognosisResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "stats"
)]
pub async fn get_prognosis(State(db): State<Database>) -> Result<Response, WebError> {
    let prognosis = services::prognosis(db.pool(), today()).await?;

    Ok(Json(prognosis).into_response())
}

#[utoipa::path(
    get,
    path = "/api/stats/progress",
    responses(
        (status = 200, description = "Relative progress series for charting", body = ProgressResponse),
        (status = 409, description = "Competition not configured yet")
    ),
    tag = "stats"
)]
pub async fn get_progress(State(db): State<Database>) -> Result<Response, WebError> {
    let progress = services::progress(db.pool()).await?;

    Ok(Json(progress).into_response())
}

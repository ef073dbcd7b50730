use chrono::NaiveDate;
use sqlx::SqlitePool;
use storage::{
    dto::weigh_in::{
        CreateWeighInRequest, PreviewParams, RecordedWeighIn, WeighInPreviewResponse,
    },
    error::Result,
    models::{week, WeighIn},
    repository::{user::UserRepository, weigh_in::WeighInRepository},
    services::{pot, scoring, snapshot::BattleSnapshot},
};
use uuid::Uuid;

/// Record (or replace) a weigh-in, re-settle the pot and score the saved
/// value against the prior week for the response.
pub async fn record_weigh_in(
    pool: &SqlitePool,
    req: &CreateWeighInRequest,
    today: NaiveDate,
) -> Result<RecordedWeighIn> {
    let user = UserRepository::new(pool).find_by_id(req.user_id).await?;
    let week_start = week::week_start_for(req.week_start.unwrap_or(today));

    let recorded = WeighInRepository::new(pool)
        .upsert(user.user_id, week_start, req.weight, &user.name)
        .await?;

    let snapshot = BattleSnapshot::load(pool).await?;
    pot::settle_all(pool, &snapshot, &user.name).await?;

    let preview = scoring::preview(&snapshot, user.user_id, week_start, recorded.weight);

    Ok(RecordedWeighIn {
        weigh_in: recorded.into(),
        previous_weight: preview.previous_weight,
        percent_change: preview.percent_change.map(|p| p.round_dp(2)),
    })
}

/// A user's full weigh-in history, ordered by week.
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<WeighIn>> {
    UserRepository::new(pool).find_by_id(user_id).await?;

    WeighInRepository::new(pool).list_for_user(user_id).await
}

/// Score a pending weigh-in for the current week without saving anything.
pub async fn preview(
    pool: &SqlitePool,
    params: &PreviewParams,
    today: NaiveDate,
) -> Result<WeighInPreviewResponse> {
    let user = UserRepository::new(pool).find_by_id(params.user_id).await?;
    let snapshot = BattleSnapshot::load(pool).await?;

    let week_start = week::week_start_for(today);
    let preview = scoring::preview(&snapshot, user.user_id, week_start, params.weight);

    Ok(WeighInPreviewResponse {
        user_id: user.user_id,
        weight: params.weight,
        previous_weight: preview.previous_weight,
        percent_change: preview.percent_change.map(|p| p.round_dp(2)),
    })
}

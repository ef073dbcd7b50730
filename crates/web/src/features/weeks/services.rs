use chrono::NaiveDate;
use sqlx::SqlitePool;
use storage::{
    dto::week::{WeekComparisonRow, WeekResultResponse, WeekViewResponse, WeekWeighInRow},
    error::Result,
    models::week,
    services::{scoring, snapshot::BattleSnapshot},
};

/// Everything the week screen needs: recorded weigh-ins, the derived
/// result, a comparison row per participant and who is still missing.
pub async fn week_view(pool: &SqlitePool, date: NaiveDate) -> Result<WeekViewResponse> {
    let snapshot = BattleSnapshot::load(pool).await?;
    let week_start = week::week_start_for(date);

    let result = scoring::week_result(&snapshot, week_start);

    let weigh_ins: Vec<WeekWeighInRow> = snapshot
        .users
        .iter()
        .filter_map(|user| {
            snapshot
                .weigh_in_at(user.user_id, week_start)
                .map(|wi| WeekWeighInRow {
                    user_id: user.user_id,
                    name: user.name.clone(),
                    weight: wi.weight,
                    created_at: wi.created_at,
                })
        })
        .collect();

    let mut comparison: Vec<WeekComparisonRow> = snapshot
        .users
        .iter()
        .map(|user| {
            let weigh_in = snapshot.weigh_in_at(user.user_id, week_start);
            let percent_change = weigh_in.and_then(|wi| {
                snapshot
                    .reference_weight(user.user_id, week_start)
                    .map(|previous| scoring::percent_change(previous, wi.weight).round_dp(2))
            });
            WeekComparisonRow {
                user_id: user.user_id,
                name: user.name.clone(),
                weight: weigh_in.map(|wi| wi.weight),
                percent_change,
                weighed_in: weigh_in.is_some(),
            }
        })
        .collect();

    // Weighed-in rows first, best change on top; names keep it stable.
    comparison.sort_by(|a, b| {
        b.percent_change
            .cmp(&a.percent_change)
            .then_with(|| b.weighed_in.cmp(&a.weighed_in))
            .then_with(|| a.name.cmp(&b.name))
    });

    let missing_participants: Vec<String> = snapshot
        .users
        .iter()
        .filter(|user| snapshot.weigh_in_at(user.user_id, week_start).is_none())
        .map(|user| user.name.clone())
        .collect();

    let all_weighed_in = missing_participants.is_empty() && !snapshot.users.is_empty();

    Ok(WeekViewResponse {
        week_start,
        week_end: week::week_end(week_start),
        weigh_ins,
        result: WeekResultResponse::from_result(result),
        comparison,
        missing_participants,
        all_weighed_in,
    })
}

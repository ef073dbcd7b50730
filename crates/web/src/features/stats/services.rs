use chrono::NaiveDate;
use sqlx::SqlitePool;
use storage::{
    dto::stats::{
        LeaderboardRow, OverviewResponse, PotSummaryResponse, PrognosisResponse, ProgressPoint,
        ProgressResponse, RecentContributionRow, UserContributionRow, UserProgressSeries,
        UserStatsResponse, WeekStandingRow, WeeklyProgressRow,
    },
    error::Result,
    models::week,
    repository::{pot::PotRepository, user::UserRepository},
    services::{pot, prognosis, scoring, snapshot::BattleSnapshot},
};
use uuid::Uuid;

pub async fn leaderboard(pool: &SqlitePool) -> Result<Vec<LeaderboardRow>> {
    let snapshot = BattleSnapshot::load(pool).await?;

    Ok(scoring::leaderboard(&snapshot)
        .into_iter()
        .map(LeaderboardRow::from)
        .collect())
}

pub async fn user_stats(pool: &SqlitePool, user_id: Uuid) -> Result<UserStatsResponse> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;
    let snapshot = BattleSnapshot::load(pool).await?;

    let stats = scoring::cumulative_stats(&snapshot, &user);
    let weekly_data: Vec<WeeklyProgressRow> = scoring::user_history(&snapshot, &user)
        .into_iter()
        .map(WeeklyProgressRow::from)
        .collect();

    Ok(UserStatsResponse {
        user_id: user.user_id,
        name: user.name,
        start_weight: user.start_weight,
        current_weight: stats.current_weight,
        total_percent_change: stats.total_percent_change.map(|p| p.round_dp(2)),
        wins: stats.wins,
        losses: stats.losses,
        weeks_participated: stats.weeks_participated,
        weekly_data,
    })
}

pub async fn overview(pool: &SqlitePool, today: NaiveDate) -> Result<OverviewResponse> {
    let snapshot = BattleSnapshot::load(pool).await?;
    let current_week = week::week_start_for(today);

    let leaderboard: Vec<LeaderboardRow> = scoring::leaderboard(&snapshot)
        .into_iter()
        .map(LeaderboardRow::from)
        .collect();

    let result = scoring::week_result(&snapshot, current_week);
    let head_to_head = scoring::head_to_head(&result.standings);

    let current_week_standings: Vec<WeekStandingRow> = result
        .standings
        .into_iter()
        .map(WeekStandingRow::from)
        .collect();

    let missing_weigh_ins: Vec<String> = snapshot
        .users
        .iter()
        .filter(|user| snapshot.weigh_in_at(user.user_id, current_week).is_none())
        .map(|user| user.name.clone())
        .collect();

    let pot_total = PotRepository::new(pool).total().await?;

    Ok(OverviewResponse {
        current_week,
        battle_end_date: snapshot.config.end_date,
        days_remaining: week::days_remaining(today, snapshot.config.end_date),
        total_participants: snapshot.users.len() as u32,
        pot_total,
        leader: leaderboard.first().cloned(),
        current_week_standings,
        missing_weigh_ins,
        head_to_head,
        leaderboard,
    })
}

pub async fn pot_summary(pool: &SqlitePool) -> Result<PotSummaryResponse> {
    let snapshot = BattleSnapshot::load(pool).await?;
    let repo = PotRepository::new(pool);

    let contributions = repo.list().await?;
    let total = repo.total().await?;

    let by_user = pot::contributions_by_user(&snapshot, &contributions);
    let final_payers: Vec<UserContributionRow> = pot::final_payers(&by_user)
        .into_iter()
        .map(UserContributionRow::from)
        .collect();

    // The list is newest-first, so the head is the recent history.
    let recent_contributions: Vec<RecentContributionRow> = contributions
        .iter()
        .take(5)
        .map(|contribution| {
            let name = snapshot
                .user(contribution.user_id)
                .map(|u| u.name.clone())
                .unwrap_or_default();
            RecentContributionRow::new(contribution, name)
        })
        .collect();

    Ok(PotSummaryResponse {
        total,
        total_amount: snapshot.config.total_amount,
        remaining_amount: pot::remaining_amount(snapshot.config.total_amount, total),
        contributions: by_user.into_iter().map(UserContributionRow::from).collect(),
        recent_contributions,
        final_payers,
    })
}

pub async fn prognosis(pool: &SqlitePool, today: NaiveDate) -> Result<PrognosisResponse> {
    let snapshot = BattleSnapshot::load(pool).await?;

    Ok(prognosis::prognosis(&snapshot, today).into())
}

/// Relative-to-start chart series: every user starts at 100.
pub async fn progress(pool: &SqlitePool) -> Result<ProgressResponse> {
    let snapshot = BattleSnapshot::load(pool).await?;

    let progress_data: Vec<UserProgressSeries> = snapshot
        .users
        .iter()
        .map(|user| {
            let mut data = vec![ProgressPoint {
                week_start: None,
                value: rust_decimal::Decimal::ONE_HUNDRED,
            }];

            data.extend(scoring::user_history(&snapshot, user).into_iter().map(|row| {
                ProgressPoint {
                    week_start: Some(row.week_start),
                    value: row.relative_to_start.round_dp(2),
                }
            }));

            UserProgressSeries {
                user_id: user.user_id,
                name: user.name.clone(),
                data,
            }
        })
        .collect();

    Ok(ProgressResponse { progress_data })
}

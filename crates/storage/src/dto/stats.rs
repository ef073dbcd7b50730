//! Read-only view rows for the statistics endpoints. Percent values are
//! rounded to two decimals here, at the presentation edge; the engines keep
//! full precision.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::PotContribution;
use crate::services::pot::UserContribution;
use crate::services::prognosis::{PrognosisReport, Trend, UserPrognosis};
use crate::services::scoring::{LeaderboardEntry, WeekStanding, WeeklyProgress};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardRow {
    pub rank: u32,
    pub user_id: Uuid,
    pub name: String,
    pub start_weight: Decimal,
    pub current_weight: Decimal,
    pub total_percent_change: Option<Decimal>,
    pub wins: u32,
    pub losses: u32,
}

impl From<LeaderboardEntry> for LeaderboardRow {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            user_id: entry.user_id,
            name: entry.name,
            start_weight: entry.start_weight,
            current_weight: entry.current_weight,
            total_percent_change: entry.total_percent_change.map(|p| p.round_dp(2)),
            wins: entry.wins,
            losses: entry.losses,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekStandingRow {
    pub user_id: Uuid,
    pub name: String,
    pub weight: Decimal,
    pub percent_change: Decimal,
}

impl From<WeekStanding> for WeekStandingRow {
    fn from(standing: WeekStanding) -> Self {
        Self {
            user_id: standing.user_id,
            name: standing.name,
            weight: standing.weight,
            percent_change: standing.percent_change.round_dp(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserStatsResponse {
    pub user_id: Uuid,
    pub name: String,
    pub start_weight: Decimal,
    pub current_weight: Decimal,
    pub total_percent_change: Option<Decimal>,
    pub wins: u32,
    pub losses: u32,
    pub weeks_participated: u32,
    pub weekly_data: Vec<WeeklyProgressRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyProgressRow {
    pub week_start: NaiveDate,
    pub weight: Decimal,
    pub percent_change: Option<Decimal>,
    pub relative_to_start: Decimal,
}

impl From<WeeklyProgress> for WeeklyProgressRow {
    fn from(progress: WeeklyProgress) -> Self {
        Self {
            week_start: progress.week_start,
            weight: progress.weight,
            percent_change: progress.percent_change.map(|p| p.round_dp(2)),
            relative_to_start: progress.relative_to_start.round_dp(2),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserContributionRow {
    pub user_id: Uuid,
    pub name: String,
    pub times_lost: u32,
    pub total_contributed: i64,
}

impl From<UserContribution> for UserContributionRow {
    fn from(contribution: UserContribution) -> Self {
        Self {
            user_id: contribution.user_id,
            name: contribution.name,
            times_lost: contribution.times_lost,
            total_contributed: contribution.total_contributed,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentContributionRow {
    pub week_start: NaiveDate,
    pub user_id: Uuid,
    pub name: String,
    pub amount: i64,
}

impl RecentContributionRow {
    pub fn new(contribution: &PotContribution, name: String) -> Self {
        Self {
            week_start: contribution.week_start,
            user_id: contribution.user_id,
            name,
            amount: contribution.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PotSummaryResponse {
    pub total: i64,
    pub total_amount: i64,
    pub remaining_amount: i64,
    pub contributions: Vec<UserContributionRow>,
    pub recent_contributions: Vec<RecentContributionRow>,
    pub final_payers: Vec<UserContributionRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProjectionRow {
    pub user_id: Uuid,
    pub name: String,
    pub current_weight: Decimal,
    pub projected_weight: Option<Decimal>,
    pub projected_total_change: Option<Decimal>,
    /// Fitted slope in kg per week.
    pub weekly_trend: Option<Decimal>,
    pub trend: Trend,
}

impl From<UserPrognosis> for ProjectionRow {
    fn from(prognosis: UserPrognosis) -> Self {
        Self {
            user_id: prognosis.user_id,
            name: prognosis.name,
            current_weight: prognosis.current_weight,
            projected_weight: prognosis.projected_weight.map(|w| w.round_dp(1)),
            projected_total_change: prognosis.projected_total_change.map(|p| p.round_dp(2)),
            weekly_trend: prognosis.weekly_trend.map(|t| t.round_dp(2)),
            trend: prognosis.trend,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrognosisResponse {
    pub end_date: NaiveDate,
    pub weeks_remaining: i64,
    pub projections: Vec<ProjectionRow>,
}

impl From<PrognosisReport> for PrognosisResponse {
    fn from(report: PrognosisReport) -> Self {
        Self {
            end_date: report.end_date,
            weeks_remaining: report.weeks_remaining,
            projections: report.projections.into_iter().map(ProjectionRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverviewResponse {
    pub current_week: NaiveDate,
    pub battle_end_date: NaiveDate,
    pub days_remaining: i64,
    pub total_participants: u32,
    pub pot_total: i64,
    pub leader: Option<LeaderboardRow>,
    pub current_week_standings: Vec<WeekStandingRow>,
    pub missing_weigh_ins: Vec<String>,
    pub head_to_head: bool,
    pub leaderboard: Vec<LeaderboardRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgressPoint {
    /// None marks the start-weight point.
    pub week_start: Option<NaiveDate>,
    pub value: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProgressSeries {
    pub user_id: Uuid,
    pub name: String,
    pub data: Vec<ProgressPoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProgressResponse {
    pub progress_data: Vec<UserProgressSeries>,
}

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::stats::WeekStandingRow;
use crate::services::scoring::WeekResult;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekWeighInRow {
    pub user_id: Uuid,
    pub name: String,
    pub weight: Decimal,
    pub created_at: NaiveDateTime,
}

/// One row per participant, whether or not they weighed in yet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekComparisonRow {
    pub user_id: Uuid,
    pub name: String,
    pub weight: Option<Decimal>,
    pub percent_change: Option<Decimal>,
    pub weighed_in: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekResultResponse {
    pub week_start: NaiveDate,
    pub standings: Vec<WeekStandingRow>,
    pub winner: Option<Uuid>,
    pub winner_name: Option<String>,
    pub loser: Option<Uuid>,
    pub loser_name: Option<String>,
}

impl WeekResultResponse {
    pub fn from_result(result: WeekResult) -> Self {
        let name_of = |user_id: Option<Uuid>, standings: &[crate::services::scoring::WeekStanding]| {
            user_id.and_then(|id| {
                standings
                    .iter()
                    .find(|s| s.user_id == id)
                    .map(|s| s.name.clone())
            })
        };

        let winner_name = name_of(result.winner, &result.standings);
        let loser_name = name_of(result.loser, &result.standings);

        Self {
            week_start: result.week_start,
            standings: result.standings.into_iter().map(WeekStandingRow::from).collect(),
            winner: result.winner,
            winner_name,
            loser: result.loser,
            loser_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekViewResponse {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub weigh_ins: Vec<WeekWeighInRow>,
    pub result: WeekResultResponse,
    pub comparison: Vec<WeekComparisonRow>,
    pub missing_participants: Vec<String>,
    pub all_weighed_in: bool,
}

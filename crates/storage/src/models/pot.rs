use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A weekly loser's payment into the shared pot. Keyed by week: a week has
/// at most one contribution, and re-settling an already resolved week is a
/// no-op unless the loser changed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PotContribution {
    pub week_start: NaiveDate,
    pub user_id: Uuid,
    /// Whole currency units, copied from the config in force at settlement.
    pub amount: i64,
    pub created_at: NaiveDateTime,
}

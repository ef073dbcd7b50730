use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Competition configuration. Written once at setup, mutable afterward;
/// derived computations always re-read the current row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BattleConfig {
    /// What a lost week costs, in whole currency units.
    pub pot_contribution: i64,
    /// The target the pot is settled against at the end.
    pub total_amount: i64,
    pub end_date: NaiveDate,
    pub setup_complete: bool,
}

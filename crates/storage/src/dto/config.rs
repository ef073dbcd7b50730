use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::BattleConfig;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConfigResponse {
    pub pot_contribution: i64,
    pub total_amount: i64,
    pub end_date: NaiveDate,
    pub setup_complete: bool,
}

impl From<BattleConfig> for ConfigResponse {
    fn from(config: BattleConfig) -> Self {
        Self {
            pot_contribution: config.pot_contribution,
            total_amount: config.total_amount,
            end_date: config.end_date,
            setup_complete: config.setup_complete,
        }
    }
}

/// Partial config update; omitted fields keep their current value.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateConfigRequest {
    #[validate(range(min = 1, max = 100))]
    pub pot_contribution: Option<i64>,

    #[validate(range(min = 10, max = 1000))]
    pub total_amount: Option<i64>,

    pub end_date: Option<NaiveDate>,
}

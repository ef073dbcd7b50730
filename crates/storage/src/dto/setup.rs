use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::config::ConfigResponse;
use super::user::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ParticipantSetup {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(custom(function = "super::validate_weight"))]
    pub start_weight: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetupRequest {
    #[validate(length(min = 1, message = "At least one participant is required"))]
    #[validate(nested)]
    pub participants: Vec<ParticipantSetup>,

    #[validate(range(min = 1, max = 100))]
    pub pot_contribution: i64,

    #[validate(range(min = 10, max = 1000))]
    pub total_amount: i64,

    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SetupStatusResponse {
    pub setup_complete: bool,
    pub has_users: bool,
    pub has_config: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SetupResponse {
    pub participants: Vec<UserResponse>,
    pub config: ConfigResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DemoSeedResponse {
    pub participants: u32,
    pub weeks: u32,
}

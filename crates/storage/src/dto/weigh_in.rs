use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::WeighIn;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeighInResponse {
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub weight: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<WeighIn> for WeighInResponse {
    fn from(weigh_in: WeighIn) -> Self {
        Self {
            user_id: weigh_in.user_id,
            week_start: weigh_in.week_start,
            weight: weigh_in.weight,
            created_at: weigh_in.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateWeighInRequest {
    pub user_id: Uuid,

    #[validate(custom(function = "super::validate_weight"))]
    pub weight: Decimal,

    /// Any date inside the intended week; defaults to the current week.
    pub week_start: Option<NaiveDate>,
}

/// A recorded weigh-in, echoed back with its score against the prior week.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecordedWeighIn {
    pub weigh_in: WeighInResponse,
    pub previous_weight: Option<Decimal>,
    pub percent_change: Option<Decimal>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PreviewParams {
    pub user_id: Uuid,
    pub weight: Decimal,
}

/// What a pending weigh-in would score; nothing is persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeighInPreviewResponse {
    pub user_id: Uuid,
    pub weight: Decimal,
    pub previous_weight: Option<Decimal>,
    pub percent_change: Option<Decimal>,
}

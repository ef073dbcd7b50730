use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One canonical weigh-in per user per week. Resubmitting the same week
/// replaces the weight (upsert), with the old value kept in the audit log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeighIn {
    pub user_id: Uuid,
    /// Monday of the scoring week.
    pub week_start: NaiveDate,
    pub weight: Decimal,
    pub created_at: NaiveDateTime,
}

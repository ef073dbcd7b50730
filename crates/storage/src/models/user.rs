use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A battle participant. Identity is immutable once created; the weight
/// history accrues through weigh-ins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
    pub start_weight: Decimal,
    pub created_at: chrono::NaiveDateTime,
}

use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditQuery {
    /// Filter by entity type, e.g. `user`, `weigh_in`, `pot_contribution`.
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

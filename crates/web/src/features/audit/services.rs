use sqlx::SqlitePool;
use storage::{
    dto::audit::AuditQuery, error::Result, models::AuditEntry, repository::audit::AuditRepository,
};

pub async fn list_entries(pool: &SqlitePool, query: &AuditQuery) -> Result<Vec<AuditEntry>> {
    let repo = AuditRepository::new(pool);
    repo.list(
        query.entity.as_deref(),
        query.entity_id.as_deref(),
        query.limit.clamp(1, 1000),
    )
    .await
}

use serde_json::Value;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::AuditEntry;
use crate::repository::row::{self, AuditRow};

/// Write a change record inside the caller's transaction so the audit entry
/// lands atomically with the change it describes.
pub(crate) async fn log_change(
    conn: &mut SqliteConnection,
    entity: &str,
    entity_id: &str,
    old_value: Option<&Value>,
    new_value: Option<&Value>,
    changed_by: &str,
) -> Result<()> {
    let old_json = old_value.map(Value::to_string);
    let new_json = new_value.map(Value::to_string);

    sqlx::query(
        r#"
        INSERT INTO audit_log (entity, entity_id, old_value, new_value, changed_by)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(entity)
    .bind(entity_id)
    .bind(old_json)
    .bind(new_json)
    .bind(changed_by)
    .execute(conn)
    .await?;

    Ok(())
}

pub struct AuditRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AuditRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Most recent entries first, optionally filtered by entity type and id.
    pub async fn list(
        &self,
        entity: Option<&str>,
        entity_id: Option<&str>,
        limit: i64,
    ) -> Result<Vec<AuditEntry>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT id, entity, entity_id, old_value, new_value, changed_by, changed_at
            FROM audit_log
            WHERE 1=1
            "#,
        );

        if let Some(entity) = entity {
            query.push(" AND entity = ");
            query.push_bind(entity);
        }

        if let Some(entity_id) = entity_id {
            query.push(" AND entity_id = ");
            query.push_bind(entity_id);
        }

        query.push(" ORDER BY changed_at DESC, id DESC LIMIT ");
        query.push_bind(limit);

        let rows: Vec<AuditRow> = query.build_query_as().fetch_all(self.pool).await?;

        row::collect(rows)
    }
}

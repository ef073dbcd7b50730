use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::WeighIn;
use crate::repository::audit::log_change;
use crate::repository::row::{self, WeighInRow};

pub struct WeighInRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WeighInRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a weigh-in for (user, week). A second submission for the same
    /// week replaces the weight; the prior value goes to the audit log. The
    /// whole write is one transaction, which serializes concurrent
    /// submissions for the same key.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        week_start: NaiveDate,
        weight: Decimal,
        changed_by: &str,
    ) -> Result<WeighIn> {
        if weight <= Decimal::ZERO {
            return Err(StorageError::InvalidWeight(weight));
        }

        let mut tx = self.pool.begin().await?;

        let existing: Option<WeighInRow> = sqlx::query_as(
            r#"
            SELECT user_id, week_start, weight, created_at
            FROM weigh_ins
            WHERE user_id = ? AND week_start = ?
            "#,
        )
        .bind(row::encode_uuid(user_id))
        .bind(week_start)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO weigh_ins (user_id, week_start, weight)
            VALUES (?, ?, ?)
            ON CONFLICT (user_id, week_start)
            DO UPDATE SET weight = excluded.weight, created_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(row::encode_uuid(user_id))
        .bind(week_start)
        .bind(row::encode_weight(weight))
        .execute(&mut *tx)
        .await?;

        let entity_id = format!("{}:{}", user_id, week_start);
        let old_value = existing.map(|row| json!({ "weight": row.weight }));

        log_change(
            &mut tx,
            "weigh_in",
            &entity_id,
            old_value.as_ref(),
            Some(&json!({ "user_id": user_id, "week_start": week_start, "weight": weight })),
            changed_by,
        )
        .await?;

        tx.commit().await?;

        let recorded = self
            .find(user_id, week_start)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(recorded)
    }

    pub async fn find(&self, user_id: Uuid, week_start: NaiveDate) -> Result<Option<WeighIn>> {
        let found: Option<WeighInRow> = sqlx::query_as(
            r#"
            SELECT user_id, week_start, weight, created_at
            FROM weigh_ins
            WHERE user_id = ? AND week_start = ?
            "#,
        )
        .bind(row::encode_uuid(user_id))
        .bind(week_start)
        .fetch_optional(self.pool)
        .await?;

        found.map(WeighIn::try_from).transpose()
    }

    /// A user's full history, ordered by week.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<WeighIn>> {
        let rows: Vec<WeighInRow> = sqlx::query_as(
            r#"
            SELECT user_id, week_start, weight, created_at
            FROM weigh_ins
            WHERE user_id = ?
            ORDER BY week_start
            "#,
        )
        .bind(row::encode_uuid(user_id))
        .fetch_all(self.pool)
        .await?;

        row::collect(rows)
    }

    pub async fn list_for_week(&self, week_start: NaiveDate) -> Result<Vec<WeighIn>> {
        let rows: Vec<WeighInRow> = sqlx::query_as(
            r#"
            SELECT user_id, week_start, weight, created_at
            FROM weigh_ins
            WHERE week_start = ?
            ORDER BY user_id
            "#,
        )
        .bind(week_start)
        .fetch_all(self.pool)
        .await?;

        row::collect(rows)
    }

    /// Every weigh-in in the store, ordered by week then user: the snapshot
    /// read the engines run against.
    pub async fn list_all(&self) -> Result<Vec<WeighIn>> {
        let rows: Vec<WeighInRow> = sqlx::query_as(
            r#"
            SELECT user_id, week_start, weight, created_at
            FROM weigh_ins
            ORDER BY week_start, user_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        row::collect(rows)
    }
}

use chrono::NaiveDate;
use serde_json::json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PotContribution;
use crate::repository::audit::log_change;
use crate::repository::row::{self, PotContributionRow};

pub struct PotRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PotRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Bring the week's contribution row in line with the resolved loser.
    ///
    /// Idempotent by week: an already-recorded contribution for the same
    /// loser is left untouched (its amount keeps the config in force when it
    /// was created); a changed loser is a corrective edit and is
    /// audit-logged, as is removal when the week no longer has a loser.
    pub async fn settle(
        &self,
        week_start: NaiveDate,
        loser: Option<(Uuid, i64)>,
        changed_by: &str,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<PotContributionRow> = sqlx::query_as(
            r#"
            SELECT week_start, user_id, amount, created_at
            FROM pot_contributions
            WHERE week_start = ?
            "#,
        )
        .bind(week_start)
        .fetch_optional(&mut *tx)
        .await?;

        let entity_id = week_start.to_string();

        match (existing, loser) {
            (None, Some((user_id, amount))) => {
                sqlx::query(
                    r#"
                    INSERT INTO pot_contributions (week_start, user_id, amount)
                    VALUES (?, ?, ?)
                    "#,
                )
                .bind(week_start)
                .bind(row::encode_uuid(user_id))
                .bind(amount)
                .execute(&mut *tx)
                .await?;

                log_change(
                    &mut tx,
                    "pot_contribution",
                    &entity_id,
                    None,
                    Some(&json!({ "user_id": user_id, "amount": amount })),
                    changed_by,
                )
                .await?;
            }
            (Some(current), Some((user_id, amount))) => {
                if current.user_id != row::encode_uuid(user_id) {
                    sqlx::query(
                        r#"
                        UPDATE pot_contributions
                        SET user_id = ?, amount = ?, created_at = CURRENT_TIMESTAMP
                        WHERE week_start = ?
                        "#,
                    )
                    .bind(row::encode_uuid(user_id))
                    .bind(amount)
                    .bind(week_start)
                    .execute(&mut *tx)
                    .await?;

                    log_change(
                        &mut tx,
                        "pot_contribution",
                        &entity_id,
                        Some(&json!({ "user_id": current.user_id, "amount": current.amount })),
                        Some(&json!({ "user_id": user_id, "amount": amount })),
                        changed_by,
                    )
                    .await?;
                }
            }
            (Some(current), None) => {
                sqlx::query("DELETE FROM pot_contributions WHERE week_start = ?")
                    .bind(week_start)
                    .execute(&mut *tx)
                    .await?;

                log_change(
                    &mut tx,
                    "pot_contribution",
                    &entity_id,
                    Some(&json!({ "user_id": current.user_id, "amount": current.amount })),
                    None,
                    changed_by,
                )
                .await?;
            }
            (None, None) => {}
        }

        tx.commit().await?;

        Ok(())
    }

    /// All contributions, most recent week first.
    pub async fn list(&self) -> Result<Vec<PotContribution>> {
        let rows: Vec<PotContributionRow> = sqlx::query_as(
            r#"
            SELECT week_start, user_id, amount, created_at
            FROM pot_contributions
            ORDER BY week_start DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        row::collect(rows)
    }

    /// Sum of all contribution amounts. Integer arithmetic, no drift.
    pub async fn total(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM pot_contributions")
            .fetch_one(self.pool)
            .await?;

        Ok(total)
    }
}

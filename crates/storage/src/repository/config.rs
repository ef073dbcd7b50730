use serde_json::json;
use sqlx::{FromRow, SqlitePool};

use crate::error::{Result, StorageError};
use crate::models::BattleConfig;
use crate::repository::audit::log_change;

#[derive(FromRow)]
struct ConfigRow {
    pot_contribution: i64,
    total_amount: i64,
    end_date: chrono::NaiveDate,
    setup_complete: bool,
}

impl From<ConfigRow> for BattleConfig {
    fn from(row: ConfigRow) -> Self {
        Self {
            pot_contribution: row.pot_contribution,
            total_amount: row.total_amount,
            end_date: row.end_date,
            setup_complete: row.setup_complete,
        }
    }
}

pub struct ConfigRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ConfigRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn try_get(&self) -> Result<Option<BattleConfig>> {
        let row: Option<ConfigRow> = sqlx::query_as(
            r#"
            SELECT pot_contribution, total_amount, end_date, setup_complete
            FROM battle_config
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(BattleConfig::from))
    }

    pub async fn get(&self) -> Result<BattleConfig> {
        self.try_get().await?.ok_or(StorageError::ConfigMissing)
    }

    /// Write the single config row, keeping before/after in the audit log.
    pub async fn save(&self, config: &BattleConfig, changed_by: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<ConfigRow> = sqlx::query_as(
            r#"
            SELECT pot_contribution, total_amount, end_date, setup_complete
            FROM battle_config
            WHERE id = 1
            "#,
        )
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO battle_config (id, pot_contribution, total_amount, end_date, setup_complete)
            VALUES (1, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                pot_contribution = excluded.pot_contribution,
                total_amount = excluded.total_amount,
                end_date = excluded.end_date,
                setup_complete = excluded.setup_complete
            "#,
        )
        .bind(config.pot_contribution)
        .bind(config.total_amount)
        .bind(config.end_date)
        .bind(config.setup_complete)
        .execute(&mut *tx)
        .await?;

        let old_value = previous.map(|row| {
            json!({
                "pot_contribution": row.pot_contribution,
                "total_amount": row.total_amount,
                "end_date": row.end_date,
                "setup_complete": row.setup_complete,
            })
        });

        log_change(
            &mut tx,
            "config",
            "1",
            old_value.as_ref(),
            Some(&json!({
                "pot_contribution": config.pot_contribution,
                "total_amount": config.total_amount,
                "end_date": config.end_date,
                "setup_complete": config.setup_complete,
            })),
            changed_by,
        )
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

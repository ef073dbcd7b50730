use sqlx::SqlitePool;
use storage::{
    dto::config::UpdateConfigRequest,
    error::Result,
    models::BattleConfig,
    repository::config::ConfigRepository,
};

pub async fn get_config(pool: &SqlitePool) -> Result<BattleConfig> {
    ConfigRepository::new(pool).get().await
}

/// Apply a partial update. Already-recorded pot contributions keep the
/// amount they were created with; only future settlements see the new
/// contribution amount.
pub async fn update_config(pool: &SqlitePool, req: &UpdateConfigRequest) -> Result<BattleConfig> {
    let repo = ConfigRepository::new(pool);
    let current = repo.get().await?;

    let updated = BattleConfig {
        pot_contribution: req.pot_contribution.unwrap_or(current.pot_contribution),
        total_amount: req.total_amount.unwrap_or(current.total_amount),
        end_date: req.end_date.unwrap_or(current.end_date),
        setup_complete: current.setup_complete,
    };
    repo.save(&updated, "config").await?;

    Ok(updated)
}

//! The shared pot: loss penalties, settlement against the target amount and
//! the final-payer rule. Amounts are whole currency units (`i64`) so sums
//! stay exact no matter how often they are recomputed.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::PotContribution;
use crate::repository::config::ConfigRepository;
use crate::repository::pot::PotRepository;
use crate::services::scoring;
use crate::services::snapshot::BattleSnapshot;

/// What is still owed once the pot is subtracted from the target. Never
/// negative.
pub fn remaining_amount(total_amount: i64, pot_total: i64) -> i64 {
    (total_amount - pot_total).max(0)
}

#[derive(Debug, Clone)]
pub struct UserContribution {
    pub user_id: Uuid,
    pub name: String,
    pub times_lost: u32,
    pub total_contributed: i64,
}

/// Per-user totals for display, every participant included, biggest
/// contributor first.
pub fn contributions_by_user(
    snapshot: &BattleSnapshot,
    contributions: &[PotContribution],
) -> Vec<UserContribution> {
    let mut entries: Vec<UserContribution> = snapshot
        .users
        .iter()
        .map(|user| {
            let theirs = contributions.iter().filter(|c| c.user_id == user.user_id);
            let (times_lost, total_contributed) = theirs
                .fold((0u32, 0i64), |(count, sum), c| (count + 1, sum + c.amount));
            UserContribution {
                user_id: user.user_id,
                name: user.name.clone(),
                times_lost,
                total_contributed,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_contributed
            .cmp(&a.total_contributed)
            .then_with(|| a.name.cmp(&b.name))
    });

    entries
}

/// Whoever lost the most weeks covers the remaining amount at the end; ties
/// make co-payers. Nobody has lost yet ⇒ nobody is on the hook.
pub fn final_payers(contributions: &[UserContribution]) -> Vec<UserContribution> {
    let max_losses = contributions.iter().map(|c| c.times_lost).max().unwrap_or(0);
    if max_losses == 0 {
        return Vec::new();
    }
    contributions
        .iter()
        .filter(|c| c.times_lost == max_losses)
        .cloned()
        .collect()
}

/// Re-resolve one week and bring its contribution row in line: a single
/// loser pays the configured amount, a tie or missing data clears the row.
/// Safe to call any number of times.
pub async fn settle_week(
    pool: &SqlitePool,
    snapshot: &BattleSnapshot,
    week_start: NaiveDate,
    changed_by: &str,
) -> Result<()> {
    let result = scoring::week_result(snapshot, week_start);
    let loser = result
        .loser
        .map(|user_id| (user_id, snapshot.config.pot_contribution));

    PotRepository::new(pool)
        .settle(week_start, loser, changed_by)
        .await
}

/// Re-settle every week with data. A changed weigh-in can move any later
/// week's reference weight, so after a write the whole history is brought in
/// line rather than just the touched week.
pub async fn settle_all(pool: &SqlitePool, snapshot: &BattleSnapshot, changed_by: &str) -> Result<()> {
    for week_start in snapshot.weeks() {
        settle_week(pool, snapshot, week_start, changed_by).await?;
    }
    Ok(())
}

/// Fresh snapshot plus full re-settlement; a no-op before setup.
pub async fn resettle(pool: &SqlitePool, changed_by: &str) -> Result<()> {
    if ConfigRepository::new(pool).try_get().await?.is_none() {
        return Ok(());
    }
    let snapshot = BattleSnapshot::load(pool).await?;
    settle_all(pool, &snapshot, changed_by).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{date, id_of, monday, SnapshotBuilder};

    fn contribution(user_id: Uuid, week: i64, amount: i64) -> PotContribution {
        PotContribution {
            week_start: monday(week),
            user_id,
            amount,
            created_at: date(2026, 1, 5).and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn remaining_amount_never_goes_negative() {
        assert_eq!(remaining_amount(100, 0), 100);
        assert_eq!(remaining_amount(100, 35), 65);
        assert_eq!(remaining_amount(100, 120), 0);
    }

    #[test]
    fn contributions_are_grouped_per_user() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .build();
        let alice = id_of(&snapshot, "Alice");
        let ben = id_of(&snapshot, "Ben");

        let contributions = vec![
            contribution(ben, 1, 5),
            contribution(alice, 2, 5),
            contribution(ben, 3, 10),
        ];

        let grouped = contributions_by_user(&snapshot, &contributions);

        assert_eq!(grouped[0].name, "Ben");
        assert_eq!(grouped[0].times_lost, 2);
        assert_eq!(grouped[0].total_contributed, 15);
        assert_eq!(grouped[1].name, "Alice");
        assert_eq!(grouped[1].total_contributed, 5);
    }

    #[test]
    fn final_payers_is_empty_without_losses() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .build();

        let grouped = contributions_by_user(&snapshot, &[]);
        assert!(final_payers(&grouped).is_empty());
    }

    #[test]
    fn final_payers_ties_make_co_payers() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .user("Clara", "70")
            .build();
        let alice = id_of(&snapshot, "Alice");
        let ben = id_of(&snapshot, "Ben");

        let contributions = vec![
            contribution(alice, 1, 5),
            contribution(ben, 2, 5),
        ];

        let grouped = contributions_by_user(&snapshot, &contributions);
        let payers = final_payers(&grouped);

        assert_eq!(payers.len(), 2);
        assert!(payers.iter().all(|p| p.times_lost == 1));
        assert!(payers.iter().any(|p| p.user_id == alice));
        assert!(payers.iter().any(|p| p.user_id == ben));
    }
}

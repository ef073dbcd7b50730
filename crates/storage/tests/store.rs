//! Integration tests against an in-memory database: upsert semantics, the
//! audit trail and pot settlement.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use storage::Database;
use storage::error::StorageError;
use storage::models::BattleConfig;
use storage::repository::audit::AuditRepository;
use storage::repository::config::ConfigRepository;
use storage::repository::pot::PotRepository;
use storage::repository::user::UserRepository;
use storage::repository::weigh_in::WeighInRepository;
use storage::services::pot;
use storage::services::snapshot::BattleSnapshot;

async fn store() -> Database {
    let db = Database::in_memory().await.expect("in-memory store");
    db.run_migrations().await.expect("migrations");
    db
}

fn kg(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn monday(n: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap() + chrono::Duration::weeks(n - 1)
}

async fn configure(db: &Database) {
    let config = BattleConfig {
        pot_contribution: 5,
        total_amount: 100,
        end_date: monday(14),
        setup_complete: true,
    };
    ConfigRepository::new(db.pool())
        .save(&config, "test")
        .await
        .unwrap();
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_fetch_user() {
    let db = store().await;
    let repo = UserRepository::new(db.pool());

    let user = repo.create("Alice", kg("100"), "test").await.unwrap();
    assert_eq!(user.name, "Alice");
    assert_eq!(user.start_weight, kg("100"));

    let fetched = repo.find_by_id(user.user_id).await.unwrap();
    assert_eq!(fetched.user_id, user.user_id);
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_name_is_a_constraint_violation() {
    let db = store().await;
    let repo = UserRepository::new(db.pool());

    repo.create("Alice", kg("100"), "test").await.unwrap();
    let err = repo.create("Alice", kg("90"), "test").await.unwrap_err();

    assert!(matches!(err, StorageError::ConstraintViolation(_)));
}

#[tokio::test]
async fn non_positive_start_weight_is_rejected() {
    let db = store().await;
    let repo = UserRepository::new(db.pool());

    let err = repo.create("Alice", kg("0"), "test").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidWeight(_)));
}

#[tokio::test]
async fn user_update_is_audit_logged_with_before_and_after() {
    let db = store().await;
    let repo = UserRepository::new(db.pool());

    let user = repo.create("Alice", kg("100"), "test").await.unwrap();
    repo.update(&user, None, Some(kg("101.5")), "alice")
        .await
        .unwrap();

    let entries = AuditRepository::new(db.pool())
        .list(Some("user"), Some(&user.user_id.to_string()), 10)
        .await
        .unwrap();

    // creation + update, newest first
    assert_eq!(entries.len(), 2);
    let update = &entries[0];
    assert_eq!(update.changed_by, "alice");
    assert_eq!(update.old_value.as_ref().unwrap()["start_weight"], "100");
    assert_eq!(update.new_value.as_ref().unwrap()["start_weight"], "101.5");
}

// ─── Weigh-ins ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn weigh_in_resubmission_replaces_the_week() {
    let db = store().await;
    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();

    weigh_ins
        .upsert(alice.user_id, monday(1), kg("98"), "alice")
        .await
        .unwrap();
    weigh_ins
        .upsert(alice.user_id, monday(1), kg("97.6"), "alice")
        .await
        .unwrap();

    let history = weigh_ins.list_for_user(alice.user_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].weight, kg("97.6"));

    // Both writes are on the record.
    let entries = AuditRepository::new(db.pool())
        .list(Some("weigh_in"), None, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].old_value.as_ref().unwrap()["weight"], "98");
}

#[tokio::test]
async fn weigh_in_weight_must_be_positive() {
    let db = store().await;
    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let err = weigh_ins
        .upsert(alice.user_id, monday(1), kg("-80"), "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidWeight(_)));
}

// ─── Config ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn config_is_missing_until_saved() {
    let db = store().await;
    let repo = ConfigRepository::new(db.pool());

    assert!(matches!(
        repo.get().await.unwrap_err(),
        StorageError::ConfigMissing
    ));

    configure(&db).await;

    let config = repo.get().await.unwrap();
    assert_eq!(config.pot_contribution, 5);
    assert_eq!(config.total_amount, 100);
    assert_eq!(config.end_date, monday(14));
}

#[tokio::test]
async fn snapshot_load_requires_config() {
    let db = store().await;

    assert!(matches!(
        BattleSnapshot::load(db.pool()).await.unwrap_err(),
        StorageError::ConfigMissing
    ));
}

// ─── Pot settlement ──────────────────────────────────────────────────────────

/// The worked example: A starts at 100, B at 80. Week 1 goes to A and
/// against B; week 2 flips. Two contributions of 5.
#[tokio::test]
async fn two_weeks_accumulate_one_contribution_each() {
    let db = store().await;
    configure(&db).await;

    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let ben = users.create("Ben", kg("80"), "test").await.unwrap();

    weigh_ins.upsert(alice.user_id, monday(1), kg("98"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(1), kg("79"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    let contributions = PotRepository::new(db.pool()).list().await.unwrap();
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].user_id, ben.user_id);
    assert_eq!(contributions[0].amount, 5);

    weigh_ins.upsert(alice.user_id, monday(2), kg("97"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(2), kg("78"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    let repo = PotRepository::new(db.pool());
    let contributions = repo.list().await.unwrap();
    assert_eq!(contributions.len(), 2);
    assert_eq!(repo.total().await.unwrap(), 10);

    // newest week first
    assert_eq!(contributions[0].week_start, monday(2));
    assert_eq!(contributions[0].user_id, alice.user_id);
    assert_eq!(contributions[1].user_id, ben.user_id);
}

#[tokio::test]
async fn settlement_is_idempotent() {
    let db = store().await;
    configure(&db).await;

    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let ben = users.create("Ben", kg("80"), "test").await.unwrap();

    weigh_ins.upsert(alice.user_id, monday(1), kg("98"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(1), kg("79"), "ben").await.unwrap();

    for _ in 0..3 {
        pot::resettle(db.pool(), "test").await.unwrap();
    }

    let repo = PotRepository::new(db.pool());
    assert_eq!(repo.list().await.unwrap().len(), 1);
    assert_eq!(repo.total().await.unwrap(), 5);

    // A no-op settlement leaves no extra audit entries behind.
    let entries = AuditRepository::new(db.pool())
        .list(Some("pot_contribution"), None, 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn changed_loser_moves_the_weeks_contribution() {
    let db = store().await;
    configure(&db).await;

    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let ben = users.create("Ben", kg("80"), "test").await.unwrap();

    weigh_ins.upsert(alice.user_id, monday(1), kg("98"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(1), kg("79"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    // Alice corrects her weigh-in upward; she is now the week's loser.
    weigh_ins.upsert(alice.user_id, monday(1), kg("99.9"), "alice").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    let contributions = PotRepository::new(db.pool()).list().await.unwrap();
    assert_eq!(contributions.len(), 1);
    assert_eq!(contributions[0].user_id, alice.user_id);

    // The correction shows up as an audit-logged edit.
    let entries = AuditRepository::new(db.pool())
        .list(Some("pot_contribution"), Some(&monday(1).to_string()), 10)
        .await
        .unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn tie_at_the_loss_extreme_clears_the_contribution() {
    let db = store().await;
    configure(&db).await;

    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let ben = users.create("Ben", kg("80"), "test").await.unwrap();

    weigh_ins.upsert(alice.user_id, monday(1), kg("98"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(1), kg("79"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();
    assert_eq!(PotRepository::new(db.pool()).total().await.unwrap(), 5);

    // Ben corrects to exactly Alice's percentage: (80 - 78.4) / 80 = 2%.
    weigh_ins.upsert(ben.user_id, monday(1), kg("78.4"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    let repo = PotRepository::new(db.pool());
    assert!(repo.list().await.unwrap().is_empty());
    assert_eq!(repo.total().await.unwrap(), 0);
}

#[tokio::test]
async fn earlier_config_amounts_stick_on_recorded_contributions() {
    let db = store().await;
    configure(&db).await;

    let users = UserRepository::new(db.pool());
    let weigh_ins = WeighInRepository::new(db.pool());

    let alice = users.create("Alice", kg("100"), "test").await.unwrap();
    let ben = users.create("Ben", kg("80"), "test").await.unwrap();

    weigh_ins.upsert(alice.user_id, monday(1), kg("98"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(1), kg("79"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    // Raise the stake, then trigger another settlement pass.
    let config = BattleConfig {
        pot_contribution: 10,
        total_amount: 100,
        end_date: monday(14),
        setup_complete: true,
    };
    ConfigRepository::new(db.pool()).save(&config, "test").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    // Week 1 keeps its recorded 5; only new weeks pay 10.
    let contributions = PotRepository::new(db.pool()).list().await.unwrap();
    assert_eq!(contributions[0].amount, 5);

    weigh_ins.upsert(alice.user_id, monday(2), kg("97"), "alice").await.unwrap();
    weigh_ins.upsert(ben.user_id, monday(2), kg("78"), "ben").await.unwrap();
    pot::resettle(db.pool(), "test").await.unwrap();

    let repo = PotRepository::new(db.pool());
    assert_eq!(repo.total().await.unwrap(), 15);
}

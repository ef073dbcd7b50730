use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use storage::{
    dto::setup::{DemoSeedResponse, SetupRequest, SetupResponse, SetupStatusResponse},
    error::Result,
    models::{week, BattleConfig},
    repository::{config::ConfigRepository, user::UserRepository, weigh_in::WeighInRepository},
    services::{pot, snapshot::BattleSnapshot},
};

pub async fn setup_status(pool: &SqlitePool) -> Result<SetupStatusResponse> {
    let config = ConfigRepository::new(pool).try_get().await?;
    let user_count = UserRepository::new(pool).count().await?;

    let has_config = config.is_some();
    let setup_complete =
        config.map(|c| c.setup_complete).unwrap_or(false) && user_count > 0;

    Ok(SetupStatusResponse {
        setup_complete,
        has_users: user_count > 0,
        has_config,
    })
}

/// Store the configuration and create the participants. The config row is
/// only marked complete once every participant exists.
pub async fn complete_setup(pool: &SqlitePool, req: &SetupRequest) -> Result<SetupResponse> {
    let config_repo = ConfigRepository::new(pool);
    let user_repo = UserRepository::new(pool);

    let mut config = BattleConfig {
        pot_contribution: req.pot_contribution,
        total_amount: req.total_amount,
        end_date: req.end_date,
        setup_complete: false,
    };
    config_repo.save(&config, "setup").await?;

    let mut participants = Vec::with_capacity(req.participants.len());
    for participant in &req.participants {
        let user = user_repo
            .create(&participant.name, participant.start_weight, "setup")
            .await?;
        participants.push(user.into());
    }

    config.setup_complete = true;
    config_repo.save(&config, "setup").await?;

    Ok(SetupResponse {
        participants,
        config: config.into(),
    })
}

const DEMO_WEEKS: i64 = 8;

/// Demo battle: four participants with eight weeks of generated weigh-ins,
/// ending eight weeks from now.
pub async fn seed_demo(pool: &SqlitePool, today: NaiveDate) -> Result<DemoSeedResponse> {
    // Weekly deltas in tenths of a kg.
    let participants: [(&str, i64, [i64; 8]); 4] = [
        ("Alice", 985, [-8, -5, -3, 2, -6, -4, -7, -5]),
        ("Ben", 723, [-4, -3, -5, -2, -4, -3, -2, -4]),
        ("Clara", 880, [-10, -8, 5, -6, -9, 3, -7, -8]),
        ("Dan", 658, [-3, -4, -2, -3, -5, -3, -4, -3]),
    ];

    let config_repo = ConfigRepository::new(pool);
    let user_repo = UserRepository::new(pool);
    let weigh_in_repo = WeighInRepository::new(pool);

    let mut config = BattleConfig {
        pot_contribution: 5,
        total_amount: 100,
        end_date: today + Duration::weeks(DEMO_WEEKS),
        setup_complete: false,
    };
    config_repo.save(&config, "demo").await?;

    let first_week = week::week_start_for(today - Duration::weeks(DEMO_WEEKS));

    for (name, start_tenths, deltas) in participants {
        let start_weight = Decimal::new(start_tenths, 1);
        let user = user_repo.create(name, start_weight, "demo").await?;

        let mut tenths = start_tenths;
        for (week_index, delta) in deltas.iter().enumerate() {
            tenths += delta;
            let week_start = first_week + Duration::weeks(week_index as i64);
            weigh_in_repo
                .upsert(user.user_id, week_start, Decimal::new(tenths, 1), name)
                .await?;
        }
    }

    config.setup_complete = true;
    config_repo.save(&config, "demo").await?;

    let snapshot = BattleSnapshot::load(pool).await?;
    pot::settle_all(pool, &snapshot, "demo").await?;

    Ok(DemoSeedResponse {
        participants: 4,
        weeks: DEMO_WEEKS as u32,
    })
}

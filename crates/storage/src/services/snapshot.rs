//! A consistent read of the battle state. The scoring, pot and prognosis
//! engines are pure functions over this snapshot; only the pot ledger writes
//! anything back.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{week, BattleConfig, User, WeighIn};
use crate::repository::config::ConfigRepository;
use crate::repository::user::UserRepository;
use crate::repository::weigh_in::WeighInRepository;

#[derive(Debug, Clone)]
pub struct BattleSnapshot {
    pub users: Vec<User>,
    /// Per-user weigh-ins, ordered by week start.
    pub weigh_ins: HashMap<Uuid, Vec<WeighIn>>,
    pub config: BattleConfig,
}

impl BattleSnapshot {
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let config = ConfigRepository::new(pool).get().await?;
        let users = UserRepository::new(pool).list().await?;
        let all = WeighInRepository::new(pool).list_all().await?;

        let mut weigh_ins: HashMap<Uuid, Vec<WeighIn>> = HashMap::new();
        for weigh_in in all {
            weigh_ins.entry(weigh_in.user_id).or_default().push(weigh_in);
        }
        // list_all is week-ordered, so each per-user series already is too.

        Ok(Self {
            users,
            weigh_ins,
            config,
        })
    }

    pub fn user(&self, user_id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    pub fn weigh_ins_for(&self, user_id: Uuid) -> &[WeighIn] {
        self.weigh_ins
            .get(&user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn weigh_in_at(&self, user_id: Uuid, week_start: NaiveDate) -> Option<&WeighIn> {
        self.weigh_ins_for(user_id)
            .iter()
            .find(|wi| wi.week_start == week_start)
    }

    pub fn latest_weigh_in(&self, user_id: Uuid) -> Option<&WeighIn> {
        self.weigh_ins_for(user_id).last()
    }

    /// Current weight: latest weigh-in, or the start weight before any exist.
    pub fn current_weight(&self, user: &User) -> Decimal {
        self.latest_weigh_in(user.user_id)
            .map(|wi| wi.weight)
            .unwrap_or(user.start_weight)
    }

    /// The weight a week's percent change is computed against: the previous
    /// week's weigh-in, or the start weight when the user has no earlier
    /// weigh-in at all. A missed week in the middle of a history leaves the
    /// following week without a reference.
    pub fn reference_weight(&self, user_id: Uuid, week_start: NaiveDate) -> Option<Decimal> {
        let series = self.weigh_ins_for(user_id);
        let previous_week = week::previous_week(week_start);

        if let Some(previous) = series.iter().find(|wi| wi.week_start == previous_week) {
            return Some(previous.weight);
        }

        let has_earlier = series.iter().any(|wi| wi.week_start < week_start);
        if has_earlier {
            None
        } else {
            self.user(user_id).map(|u| u.start_weight)
        }
    }

    /// Every week that has at least one weigh-in, in order.
    pub fn weeks(&self) -> BTreeSet<NaiveDate> {
        self.weigh_ins
            .values()
            .flatten()
            .map(|wi| wi.week_start)
            .collect()
    }
}

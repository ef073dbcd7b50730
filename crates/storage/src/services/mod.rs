pub mod pot;
pub mod prognosis;
pub mod scoring;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;

    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::models::{BattleConfig, User, WeighIn};
    use crate::services::snapshot::BattleSnapshot;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday of the n-th battle week (week 1 = 2026-01-05).
    pub fn monday(n: i64) -> NaiveDate {
        date(2026, 1, 5) + Duration::weeks(n - 1)
    }

    pub fn kg(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    pub fn id_of(snapshot: &BattleSnapshot, name: &str) -> Uuid {
        snapshot
            .users
            .iter()
            .find(|u| u.name == name)
            .expect("unknown test user")
            .user_id
    }

    pub struct SnapshotBuilder {
        users: Vec<User>,
        weigh_ins: HashMap<Uuid, Vec<WeighIn>>,
        config: BattleConfig,
    }

    impl SnapshotBuilder {
        pub fn new() -> Self {
            Self {
                users: Vec::new(),
                weigh_ins: HashMap::new(),
                config: BattleConfig {
                    pot_contribution: 5,
                    total_amount: 100,
                    end_date: monday(14),
                    setup_complete: true,
                },
            }
        }

        pub fn end_date(mut self, end_date: NaiveDate) -> Self {
            self.config.end_date = end_date;
            self
        }

        pub fn user(mut self, name: &str, start_weight: &str) -> Self {
            let user_id = Uuid::from_u128(self.users.len() as u128 + 1);
            self.users.push(User {
                user_id,
                name: name.to_string(),
                start_weight: kg(start_weight),
                created_at: date(2026, 1, 1).and_hms_opt(12, 0, 0).unwrap(),
            });
            self
        }

        pub fn weigh_in(mut self, name: &str, week: i64, weight: &str) -> Self {
            let user = self
                .users
                .iter()
                .find(|u| u.name == name)
                .expect("weigh_in for unknown test user");
            let entry = WeighIn {
                user_id: user.user_id,
                week_start: monday(week),
                weight: kg(weight),
                created_at: monday(week).and_hms_opt(8, 0, 0).unwrap(),
            };
            self.weigh_ins.entry(user.user_id).or_default().push(entry);
            self
        }

        pub fn build(mut self) -> BattleSnapshot {
            for series in self.weigh_ins.values_mut() {
                series.sort_by_key(|wi| wi.week_start);
            }
            BattleSnapshot {
                users: self.users,
                weigh_ins: self.weigh_ins,
                config: self.config,
            }
        }
    }
}

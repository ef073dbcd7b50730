//! Weight projections to the end of the battle: an ordinary least-squares
//! line per user over (week index, weight), evaluated at the end date.
//!
//! The regression runs in f64; weights cross the boundary the same way the
//! rest of the crate converts between `Decimal` and `f64`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::week;
use crate::services::scoring;
use crate::services::snapshot::BattleSnapshot;

/// Slopes within this band count as stable, to keep scale noise from
/// flipping the reported trend week to week.
pub const TREND_EPSILON_KG_PER_WEEK: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Losing,
    Gaining,
    Stable,
    InsufficientData,
}

/// Least-squares fit of y over x. Returns `(slope, intercept)`, or None with
/// fewer than two points or a degenerate x spread (guards the denominator).
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    if xs.len() < 2 || xs.len() != ys.len() {
        return None;
    }

    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Some((slope, intercept))
}

pub fn classify_slope(slope: f64) -> Trend {
    if slope < -TREND_EPSILON_KG_PER_WEEK {
        Trend::Losing
    } else if slope > TREND_EPSILON_KG_PER_WEEK {
        Trend::Gaining
    } else {
        Trend::Stable
    }
}

#[derive(Debug, Clone)]
pub struct UserPrognosis {
    pub user_id: Uuid,
    pub name: String,
    pub current_weight: Decimal,
    pub projected_weight: Option<Decimal>,
    /// Percent change from start weight to the projected weight.
    pub projected_total_change: Option<Decimal>,
    /// Fitted slope in kg per week.
    pub weekly_trend: Option<Decimal>,
    pub trend: Trend,
}

#[derive(Debug, Clone)]
pub struct PrognosisReport {
    pub end_date: NaiveDate,
    pub weeks_remaining: i64,
    /// Best projected change first; users without a projection at the end.
    pub projections: Vec<UserPrognosis>,
}

/// Fit and extrapolate every user's series to the end date. The start
/// weight is the first point of each series, so one weigh-in is already
/// enough for a line; a user with none is reported as insufficient data.
pub fn prognosis(snapshot: &BattleSnapshot, today: NaiveDate) -> PrognosisReport {
    let end_date = snapshot.config.end_date;
    let weeks_remaining = week::weeks_remaining(today, end_date);

    let mut projections: Vec<UserPrognosis> = snapshot
        .users
        .iter()
        .map(|user| {
            let series: Vec<f64> = std::iter::once(user.start_weight)
                .chain(snapshot.weigh_ins_for(user.user_id).iter().map(|wi| wi.weight))
                .map(decimal_to_f64)
                .collect();

            let xs: Vec<f64> = (0..series.len()).map(|i| i as f64).collect();

            let Some((slope, intercept)) = linear_regression(&xs, &series) else {
                return UserPrognosis {
                    user_id: user.user_id,
                    name: user.name.clone(),
                    current_weight: snapshot.current_weight(user),
                    projected_weight: None,
                    projected_total_change: None,
                    weekly_trend: None,
                    trend: Trend::InsufficientData,
                };
            };

            // Extrapolation is the point here; no clamp on the result.
            let target_index = (series.len() - 1) as f64 + weeks_remaining as f64;
            let projected = intercept + slope * target_index;
            let projected_weight = Decimal::from_f64_retain(projected);

            UserPrognosis {
                user_id: user.user_id,
                name: user.name.clone(),
                current_weight: snapshot.current_weight(user),
                projected_weight,
                projected_total_change: projected_weight
                    .map(|w| scoring::percent_change(user.start_weight, w)),
                weekly_trend: Decimal::from_f64_retain(slope),
                trend: classify_slope(slope),
            }
        })
        .collect();

    projections.sort_by(|a, b| {
        b.projected_total_change
            .cmp(&a.projected_total_change)
            .then_with(|| a.name.cmp(&b.name))
    });

    PrognosisReport {
        end_date,
        weeks_remaining,
        projections,
    }
}

fn decimal_to_f64(decimal: Decimal) -> f64 {
    decimal.to_string().parse().unwrap_or(0.0)
}

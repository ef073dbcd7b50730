//! Weekly scoring: percent changes, winner/loser resolution, cumulative
//! stats and the leaderboard. Everything here is a pure function over a
//! [`BattleSnapshot`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::User;
use crate::services::snapshot::BattleSnapshot;

/// Standings closer than this at an extreme count as a tie: rounded to the
/// displayed two decimals they would read as equal.
pub fn tie_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Top-two gap below this flags the current week as a head-to-head race.
pub fn head_to_head_threshold() -> Decimal {
    Decimal::new(3, 1)
}

/// Percent lost from `previous` to `current`: positive means the weight went
/// down. Full precision; rounding happens at presentation time only.
pub fn percent_change(previous: Decimal, current: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    (previous - current) / previous * Decimal::ONE_HUNDRED
}

#[derive(Debug, Clone)]
pub struct WeekStanding {
    pub user_id: Uuid,
    pub name: String,
    pub weight: Decimal,
    pub percent_change: Decimal,
}

#[derive(Debug, Clone)]
pub struct WeekResult {
    pub week_start: NaiveDate,
    /// Users with both a weigh-in and a reference weight, best change first.
    pub standings: Vec<WeekStanding>,
    pub winner: Option<Uuid>,
    pub loser: Option<Uuid>,
}

/// Resolve one week. Users without a weigh-in or without a reference weight
/// for the week are left out; fewer than two participants means neither a
/// winner nor a loser, and a tie at an extreme leaves that role empty.
pub fn week_result(snapshot: &BattleSnapshot, week_start: NaiveDate) -> WeekResult {
    let mut standings: Vec<WeekStanding> = snapshot
        .users
        .iter()
        .filter_map(|user| {
            let weigh_in = snapshot.weigh_in_at(user.user_id, week_start)?;
            let previous = snapshot.reference_weight(user.user_id, week_start)?;
            Some(WeekStanding {
                user_id: user.user_id,
                name: user.name.clone(),
                weight: weigh_in.weight,
                percent_change: percent_change(previous, weigh_in.weight),
            })
        })
        .collect();

    standings.sort_by(|a, b| {
        b.percent_change
            .cmp(&a.percent_change)
            .then_with(|| a.name.cmp(&b.name))
    });

    let (winner, loser) = if standings.len() >= 2 {
        let top = &standings[0];
        let runner_up = &standings[1];
        let winner = ((top.percent_change - runner_up.percent_change).abs() >= tie_tolerance())
            .then_some(top.user_id);

        let bottom = &standings[standings.len() - 1];
        let second_bottom = &standings[standings.len() - 2];
        let loser = ((second_bottom.percent_change - bottom.percent_change).abs()
            >= tie_tolerance())
        .then_some(bottom.user_id);

        (winner, loser)
    } else {
        (None, None)
    };

    WeekResult {
        week_start,
        standings,
        winner,
        loser,
    }
}

/// Results for every week that has data, in week order.
pub fn all_week_results(snapshot: &BattleSnapshot) -> Vec<WeekResult> {
    snapshot
        .weeks()
        .into_iter()
        .map(|week| week_result(snapshot, week))
        .collect()
}

/// True when the top two of a week are within [`head_to_head_threshold`].
pub fn head_to_head(standings: &[WeekStanding]) -> bool {
    match standings {
        [first, second, ..] => {
            (first.percent_change - second.percent_change).abs() < head_to_head_threshold()
        }
        _ => false,
    }
}

#[derive(Debug, Clone)]
pub struct CumulativeStats {
    pub wins: u32,
    pub losses: u32,
    pub current_weight: Decimal,
    /// From start weight to the latest weigh-in; None before the first one.
    pub total_percent_change: Option<Decimal>,
    pub weeks_participated: u32,
}

pub fn cumulative_stats(snapshot: &BattleSnapshot, user: &User) -> CumulativeStats {
    let results = all_week_results(snapshot);
    cumulative_from_results(snapshot, &results, user)
}

fn cumulative_from_results(
    snapshot: &BattleSnapshot,
    results: &[WeekResult],
    user: &User,
) -> CumulativeStats {
    let wins = results.iter().filter(|r| r.winner == Some(user.user_id)).count() as u32;
    let losses = results.iter().filter(|r| r.loser == Some(user.user_id)).count() as u32;

    let series = snapshot.weigh_ins_for(user.user_id);
    let total_percent_change = series
        .last()
        .map(|latest| percent_change(user.start_weight, latest.weight));

    CumulativeStats {
        wins,
        losses,
        current_weight: snapshot.current_weight(user),
        total_percent_change,
        weeks_participated: series.len() as u32,
    }
}

#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub name: String,
    pub start_weight: Decimal,
    pub current_weight: Decimal,
    pub total_percent_change: Option<Decimal>,
    pub wins: u32,
    pub losses: u32,
}

/// All users ranked by wins, ties broken by total percent change, then by
/// name so the order is deterministic. Users without any weigh-in still get
/// a row, with zero wins and no percent change.
pub fn leaderboard(snapshot: &BattleSnapshot) -> Vec<LeaderboardEntry> {
    let results = all_week_results(snapshot);

    let mut entries: Vec<LeaderboardEntry> = snapshot
        .users
        .iter()
        .map(|user| {
            let stats = cumulative_from_results(snapshot, &results, user);
            LeaderboardEntry {
                rank: 0,
                user_id: user.user_id,
                name: user.name.clone(),
                start_weight: user.start_weight,
                current_weight: stats.current_weight,
                total_percent_change: stats.total_percent_change,
                wins: stats.wins,
                losses: stats.losses,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then_with(|| b.total_percent_change.cmp(&a.total_percent_change))
            .then_with(|| a.name.cmp(&b.name))
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }

    entries
}

#[derive(Debug, Clone)]
pub struct WeeklyProgress {
    pub week_start: NaiveDate,
    pub weight: Decimal,
    pub percent_change: Option<Decimal>,
    /// Weight as a share of the start weight (start = 100).
    pub relative_to_start: Decimal,
}

/// A user's week-by-week history, for the detail view and charts.
pub fn user_history(snapshot: &BattleSnapshot, user: &User) -> Vec<WeeklyProgress> {
    snapshot
        .weigh_ins_for(user.user_id)
        .iter()
        .map(|wi| {
            let reference = snapshot.reference_weight(user.user_id, wi.week_start);
            let relative = if user.start_weight.is_zero() {
                Decimal::ZERO
            } else {
                wi.weight / user.start_weight * Decimal::ONE_HUNDRED
            };
            WeeklyProgress {
                week_start: wi.week_start,
                weight: wi.weight,
                percent_change: reference.map(|previous| percent_change(previous, wi.weight)),
                relative_to_start: relative,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct WeighInPreview {
    pub previous_weight: Option<Decimal>,
    pub percent_change: Option<Decimal>,
}

/// What a pending weigh-in would score, without persisting anything.
pub fn preview(
    snapshot: &BattleSnapshot,
    user_id: Uuid,
    week_start: NaiveDate,
    weight: Decimal,
) -> WeighInPreview {
    let previous_weight = snapshot.reference_weight(user_id, week_start);
    WeighInPreview {
        previous_weight,
        percent_change: previous_weight.map(|previous| percent_change(previous, weight)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testutil::{id_of, kg, monday, SnapshotBuilder};

    #[test]
    fn percent_change_matches_formula() {
        assert_eq!(percent_change(kg("100"), kg("98")), kg("2"));
        assert_eq!(percent_change(kg("80"), kg("79")), kg("1.25"));
    }

    #[test]
    fn percent_change_is_positive_iff_weight_decreased() {
        assert!(percent_change(kg("90"), kg("89.5")) > Decimal::ZERO);
        assert!(percent_change(kg("90"), kg("91")) < Decimal::ZERO);
        assert_eq!(percent_change(kg("90"), kg("90")), Decimal::ZERO);
    }

    #[test]
    fn first_week_scores_against_start_weight() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Ben", 1, "79")
            .build();

        let result = week_result(&snapshot, monday(1));

        assert_eq!(result.standings.len(), 2);
        assert_eq!(result.standings[0].name, "Alice");
        assert_eq!(result.standings[0].percent_change, kg("2"));
        assert_eq!(result.standings[1].percent_change, kg("1.25"));
        assert_eq!(result.winner, Some(id_of(&snapshot, "Alice")));
        assert_eq!(result.loser, Some(id_of(&snapshot, "Ben")));
    }

    #[test]
    fn second_week_scores_against_previous_week() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Ben", 1, "79")
            .weigh_in("Alice", 2, "97")
            .weigh_in("Ben", 2, "78")
            .build();

        let result = week_result(&snapshot, monday(2));

        // (98-97)/98 ≈ 1.02 < (79-78)/79 ≈ 1.27
        assert_eq!(result.winner, Some(id_of(&snapshot, "Ben")));
        assert_eq!(result.loser, Some(id_of(&snapshot, "Alice")));
    }

    #[test]
    fn tie_at_the_top_leaves_no_winner() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "100")
            .user("Clara", "100")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Ben", 1, "98")
            .weigh_in("Clara", 1, "99.5")
            .build();

        let result = week_result(&snapshot, monday(1));

        assert_eq!(result.winner, None);
        assert_eq!(result.loser, Some(id_of(&snapshot, "Clara")));
    }

    #[test]
    fn tie_at_the_bottom_leaves_no_loser() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "100")
            .user("Clara", "100")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Ben", 1, "99.5")
            .weigh_in("Clara", 1, "99.5")
            .build();

        let result = week_result(&snapshot, monday(1));

        assert_eq!(result.winner, Some(id_of(&snapshot, "Alice")));
        assert_eq!(result.loser, None);
    }

    #[test]
    fn single_participant_has_no_winner_or_loser() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .build();

        let result = week_result(&snapshot, monday(1));

        assert_eq!(result.standings.len(), 1);
        assert_eq!(result.winner, None);
        assert_eq!(result.loser, None);
    }

    #[test]
    fn missed_week_leaves_next_week_without_reference() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Alice", 3, "96")
            .weigh_in("Ben", 1, "79")
            .weigh_in("Ben", 2, "78.5")
            .weigh_in("Ben", 3, "78")
            .build();

        let result = week_result(&snapshot, monday(3));

        // Alice skipped week 2, so week 3 has no reference for her.
        assert_eq!(result.standings.len(), 1);
        assert_eq!(result.standings[0].name, "Ben");
        assert_eq!(result.winner, None);
        assert_eq!(result.loser, None);
    }

    #[test]
    fn cumulative_stats_follow_the_worked_example() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .weigh_in("Ben", 1, "79")
            .weigh_in("Alice", 2, "97")
            .weigh_in("Ben", 2, "78")
            .build();

        let alice = snapshot.user(id_of(&snapshot, "Alice")).unwrap().clone();
        let stats = cumulative_stats(&snapshot, &alice);

        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.current_weight, kg("97"));
        assert_eq!(stats.total_percent_change, Some(kg("3")));
    }

    #[test]
    fn leaderboard_ranks_by_wins_then_change_then_name() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "100")
            .user("Clara", "100")
            // Week 1: Alice wins clearly.
            .weigh_in("Alice", 1, "95")
            .weigh_in("Ben", 1, "99")
            .weigh_in("Clara", 1, "98")
            // Week 2: nobody moves, no winner.
            .weigh_in("Alice", 2, "95")
            .weigh_in("Ben", 2, "99")
            .weigh_in("Clara", 2, "98")
            .build();

        let board = leaderboard(&snapshot);

        assert_eq!(board[0].name, "Alice");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[0].wins, 1);
        // Ben and Clara both have zero wins; Clara lost more weight in total.
        assert_eq!(board[1].name, "Clara");
        assert_eq!(board[2].name, "Ben");
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn leaderboard_breaks_full_ties_by_name() {
        let snapshot = SnapshotBuilder::new()
            .user("Dana", "100")
            .user("Ben", "100")
            .weigh_in("Dana", 1, "99")
            .weigh_in("Ben", 1, "99")
            .build();

        let board = leaderboard(&snapshot);

        assert_eq!(board[0].name, "Ben");
        assert_eq!(board[1].name, "Dana");
    }

    #[test]
    fn user_without_weigh_ins_still_appears_on_the_leaderboard() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "80")
            .weigh_in("Alice", 1, "98")
            .build();

        let board = leaderboard(&snapshot);
        let ben = board.iter().find(|e| e.name == "Ben").unwrap();

        assert_eq!(ben.wins, 0);
        assert_eq!(ben.losses, 0);
        assert_eq!(ben.total_percent_change, None);
        assert_eq!(ben.current_weight, kg("80"));
    }

    #[test]
    fn head_to_head_fires_only_on_close_races() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "100")
            .weigh_in("Alice", 1, "99")
            .weigh_in("Ben", 1, "98.9")
            .build();

        let close = week_result(&snapshot, monday(1));
        assert!(head_to_head(&close.standings));

        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .user("Ben", "100")
            .weigh_in("Alice", 1, "99")
            .weigh_in("Ben", 1, "95")
            .build();

        let clear = week_result(&snapshot, monday(1));
        assert!(!head_to_head(&clear.standings));
    }

    #[test]
    fn preview_does_not_require_a_recorded_weigh_in() {
        let snapshot = SnapshotBuilder::new()
            .user("Alice", "100")
            .weigh_in("Alice", 1, "98")
            .build();

        let alice = id_of(&snapshot, "Alice");
        let preview = preview(&snapshot, alice, monday(2), kg("97"));

        assert_eq!(preview.previous_weight, Some(kg("98")));
        assert_eq!(
            preview.percent_change.map(|p| p.round_dp(2)),
            Some(kg("1.02"))
        );
    }
}

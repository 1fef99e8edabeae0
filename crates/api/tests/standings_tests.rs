//! Standings recomputation against an in-memory store. No database needed.

use std::collections::{BTreeMap, HashSet};

use api::gql::domains::standings::service::{
    aggregate, aggregate_counted, parse_score, rank_groups, read_score, recompute_standings,
    refresh_standings, rerank, MatchScore, Registration, ScoreRejection, StandingsError,
    TeamStats,
};
use api::gql::domains::standings::store::StandingsStore;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio_test::{assert_err, assert_ok};

const TOURNAMENT: i32 = 7;

#[derive(Default)]
struct FakeStore {
    registrations: Mutex<Vec<Registration>>,
    matches: Vec<MatchScore>,
    fail_registrations: bool,
    fail_matches: bool,
    /// Fails every `list_registrations` call after the first.
    fail_second_registrations: bool,
    failing_writes: HashSet<i32>,
    registration_reads: Mutex<u32>,
    stats_writes: Mutex<Vec<i32>>,
    position_writes: Mutex<Vec<i32>>,
}

impl FakeStore {
    fn new(teams: &[(i32, &str, &str)], matches: Vec<MatchScore>) -> Self {
        let registrations = teams
            .iter()
            .map(|&(team_id, name, group)| registration(team_id, name, group, TeamStats::default()))
            .collect();

        FakeStore {
            registrations: Mutex::new(registrations),
            matches,
            ..Default::default()
        }
    }

    async fn snapshot(&self) -> BTreeMap<i32, Registration> {
        self.registrations
            .lock()
            .await
            .iter()
            .map(|r| (r.team_id, r.clone()))
            .collect()
    }
}

#[async_trait]
impl StandingsStore for FakeStore {
    async fn list_registrations(
        &self,
        tournament_id: i32,
    ) -> Result<Vec<Registration>, sqlx::Error> {
        let mut reads = self.registration_reads.lock().await;
        *reads += 1;

        if self.fail_registrations || (self.fail_second_registrations && *reads > 1) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        if tournament_id != TOURNAMENT {
            return Ok(Vec::new());
        }
        Ok(self.registrations.lock().await.clone())
    }

    async fn list_matches_between(
        &self,
        team_ids: &[i32],
    ) -> Result<Vec<MatchScore>, sqlx::Error> {
        if self.fail_matches {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self
            .matches
            .iter()
            .filter(|m| team_ids.contains(&m.team1_id) && team_ids.contains(&m.team2_id))
            .cloned()
            .collect())
    }

    async fn write_team_stats(
        &self,
        _tournament_id: i32,
        team_id: i32,
        stats: &TeamStats,
    ) -> Result<(), sqlx::Error> {
        if self.failing_writes.contains(&team_id) {
            return Err(sqlx::Error::RowNotFound);
        }
        self.stats_writes.lock().await.push(team_id);

        let mut registrations = self.registrations.lock().await;
        if let Some(r) = registrations.iter_mut().find(|r| r.team_id == team_id) {
            r.stats = *stats;
        }
        Ok(())
    }

    async fn write_group_position(
        &self,
        _tournament_id: i32,
        team_id: i32,
        position: i32,
    ) -> Result<(), sqlx::Error> {
        self.position_writes.lock().await.push(team_id);

        let mut registrations = self.registrations.lock().await;
        if let Some(r) = registrations.iter_mut().find(|r| r.team_id == team_id) {
            r.group_position = position;
        }
        Ok(())
    }
}

fn registration(team_id: i32, name: &str, group: &str, stats: TeamStats) -> Registration {
    Registration {
        team_id,
        team_name: name.to_string(),
        team_group: group.to_string(),
        stats,
        group_position: 0,
    }
}

fn scored(match_id: i32, team1_id: i32, team2_id: i32, score: &str) -> MatchScore {
    MatchScore {
        match_id,
        team1_id,
        team2_id,
        goal_score: Some(score.to_string()),
    }
}

fn stats(points: i32, goal_diff: i32, goal_for: i32) -> TeamStats {
    TeamStats {
        points,
        goal_diff,
        goal_for,
        ..Default::default()
    }
}

#[test]
fn test_parse_score_accepts_two_non_negative_integers() {
    assert_eq!(parse_score("3-1"), Some((3, 1)));
    assert_eq!(parse_score("0-0"), Some((0, 0)));
    assert_eq!(parse_score(" 2 : 2 "), Some((2, 2)));
    assert_eq!(parse_score("10-12"), Some((10, 12)));
}

#[test]
fn test_parse_score_rejects_malformed_input() {
    for raw in ["abc", "2-", "-2", "", "1-2-3", "-1-2", "1--2", "+1-2", "1.5-2", "3 1"] {
        assert_eq!(parse_score(raw), None, "{raw:?} should not parse");
    }
}

#[test]
fn test_read_score_tells_oversized_from_malformed() {
    assert_eq!(read_score("2147483647-0"), Ok((i32::MAX, 0)));
    assert_eq!(
        read_score("99999999999-0"),
        Err(ScoreRejection::OutOfRange)
    );
    assert_eq!(
        read_score("0:2147483648"),
        Err(ScoreRejection::OutOfRange)
    );
    assert_eq!(read_score("abc"), Err(ScoreRejection::Malformed));
    assert_eq!(
        read_score("x-99999999999"),
        Err(ScoreRejection::Malformed)
    );
    assert_eq!(parse_score("99999999999-0"), None);
}

#[test]
fn test_aggregate_skips_oversized_scores() {
    let (table, counted) = aggregate_counted(&[1, 2], &[scored(1, 1, 2, "99999999999-0")]);

    assert_eq!(counted, 0);
    assert_eq!(table[&1], TeamStats::default());
    assert_eq!(table[&2], TeamStats::default());
}

#[test]
fn test_aggregate_counts_only_folded_matches() {
    let matches = vec![
        scored(1, 1, 2, "1-0"),
        scored(2, 1, 2, "abc"),
        scored(3, 1, 99, "4-0"),
        scored(4, 2, 2, "1-1"),
        MatchScore {
            match_id: 5,
            team1_id: 1,
            team2_id: 2,
            goal_score: None,
        },
        scored(6, 2, 1, "2:2"),
    ];

    let (table, counted) = aggregate_counted(&[1, 2], &matches);

    assert_eq!(counted, 2);
    assert_eq!(table, aggregate(&[1, 2], &matches));
}

#[test]
fn test_aggregate_worked_example() {
    let matches = vec![scored(1, 1, 2, "3-1"), scored(2, 2, 1, "1-1")];

    let table = aggregate(&[1, 2], &matches);

    assert_eq!(
        table[&1],
        TeamStats {
            match_played: 2,
            won: 1,
            draw: 1,
            lost: 0,
            goal_for: 4,
            goal_against: 2,
            goal_diff: 2,
            points: 4,
        }
    );
    assert_eq!(
        table[&2],
        TeamStats {
            match_played: 2,
            won: 0,
            draw: 1,
            lost: 1,
            goal_for: 2,
            goal_against: 4,
            goal_diff: -2,
            points: 1,
        }
    );
}

#[test]
fn test_aggregate_keeps_teams_without_matches() {
    let table = aggregate(&[1, 2, 3], &[scored(1, 1, 2, "2-0")]);

    assert_eq!(table.len(), 3);
    assert_eq!(table[&3], TeamStats::default());
}

#[test]
fn test_aggregate_wins_match_losses_and_draws_pair_up() {
    let matches = vec![
        scored(1, 1, 2, "2-0"),
        scored(2, 3, 4, "1-1"),
        scored(3, 1, 3, "0-4"),
        scored(4, 2, 4, "3-3"),
        scored(5, 4, 1, "2-1"),
        scored(6, 2, 3, "0-0"),
    ];

    let table = aggregate(&[1, 2, 3, 4], &matches);

    let won: i32 = table.values().map(|s| s.won).sum();
    let lost: i32 = table.values().map(|s| s.lost).sum();
    let draw: i32 = table.values().map(|s| s.draw).sum();
    assert_eq!(won, lost);
    assert_eq!(draw % 2, 0);

    for s in table.values() {
        assert_eq!(s.goal_diff, s.goal_for - s.goal_against);
        assert_eq!(s.match_played, s.won + s.draw + s.lost);
    }
}

#[test]
fn test_aggregate_ignores_match_order() {
    let mut matches = vec![
        scored(1, 1, 2, "2-0"),
        scored(2, 2, 3, "1-1"),
        scored(3, 3, 1, "0-5"),
    ];

    let forward = aggregate(&[1, 2, 3], &matches);
    matches.reverse();
    let backward = aggregate(&[1, 2, 3], &matches);

    assert_eq!(forward, backward);
}

#[test]
fn test_aggregate_skips_malformed_and_missing_scores() {
    let matches = vec![
        scored(1, 1, 2, "abc"),
        scored(2, 1, 2, "2-"),
        MatchScore {
            match_id: 3,
            team1_id: 1,
            team2_id: 2,
            goal_score: None,
        },
    ];

    let table = aggregate(&[1, 2], &matches);

    assert_eq!(table[&1], TeamStats::default());
    assert_eq!(table[&2], TeamStats::default());
}

#[test]
fn test_aggregate_skips_outside_teams_and_self_matches() {
    let matches = vec![scored(1, 1, 99, "5-0"), scored(2, 1, 1, "1-0")];

    let table = aggregate(&[1, 2], &matches);

    assert!(!table.contains_key(&99));
    assert_eq!(table[&1], TeamStats::default());
}

#[test]
fn test_rank_groups_orders_by_name_when_everything_ties() {
    let registrations = vec![
        registration(3, "Gamma", "A", TeamStats::default()),
        registration(1, "Alpha", "A", TeamStats::default()),
        registration(2, "Beta", "A", TeamStats::default()),
    ];

    let ranks = rank_groups(&registrations);

    assert_eq!(ranks[&1], 1);
    assert_eq!(ranks[&2], 2);
    assert_eq!(ranks[&3], 3);
}

#[test]
fn test_rank_groups_applies_criteria_in_priority_order() {
    let registrations = vec![
        registration(1, "A-more-goals", "A", stats(4, 2, 6)),
        registration(2, "B-better-diff", "A", stats(4, 3, 3)),
        registration(3, "C-more-points", "A", stats(6, -1, 1)),
        registration(4, "D-fewer-goals", "A", stats(4, 2, 5)),
    ];

    let ranks = rank_groups(&registrations);

    assert_eq!(ranks[&3], 1);
    assert_eq!(ranks[&2], 2);
    assert_eq!(ranks[&1], 3);
    assert_eq!(ranks[&4], 4);
}

#[test]
fn test_rank_groups_tie_break_ignores_input_order() {
    let tied = stats(3, 1, 2);
    let mut registrations = vec![
        registration(10, "Zulu", "A", tied),
        registration(11, "Mike", "A", tied),
        registration(12, "Alpha", "A", tied),
    ];

    let first = rank_groups(&registrations);
    registrations.reverse();
    let second = rank_groups(&registrations);
    registrations.swap(0, 1);
    let third = rank_groups(&registrations);

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(first[&12], 1);
    assert_eq!(first[&11], 2);
    assert_eq!(first[&10], 3);
}

#[test]
fn test_rank_groups_numbers_each_group_from_one() {
    let registrations = vec![
        registration(1, "A1", "A", stats(9, 5, 7)),
        registration(2, "A2", "A", stats(3, 0, 2)),
        registration(3, "B1", "B", stats(1, 0, 1)),
        registration(4, "B2", "B", stats(0, -2, 0)),
        registration(5, "B3", "B", stats(7, 4, 6)),
        registration(6, "C1", "C", TeamStats::default()),
    ];

    let ranks = rank_groups(&registrations);

    assert_eq!(ranks.len(), registrations.len());
    for group in ["A", "B", "C"] {
        let mut positions: Vec<i32> = registrations
            .iter()
            .filter(|r| r.team_group == group)
            .map(|r| ranks[&r.team_id])
            .collect();
        positions.sort_unstable();
        let expected: Vec<i32> = (1..=positions.len() as i32).collect();
        assert_eq!(positions, expected, "group {group} is not numbered 1..N");
    }
    assert_eq!(ranks[&5], 1);
    assert_eq!(ranks[&3], 2);
    assert_eq!(ranks[&4], 3);
}

#[tokio::test]
async fn test_refresh_standings_persists_counters_and_ranks() {
    let store = FakeStore::new(
        &[(1, "Team 1", "A"), (2, "Team 2", "A")],
        vec![scored(1, 1, 2, "3-1"), scored(2, 1, 2, "1-1")],
    );

    let report = assert_ok!(refresh_standings(&store, TOURNAMENT).await);

    assert!(report.is_clean());
    assert_eq!(report.recompute.matches_considered, 2);
    assert_eq!(report.rerank.ranks[&1], 1);
    assert_eq!(report.rerank.ranks[&2], 2);

    let stored = store.snapshot().await;
    assert_eq!(stored[&1].stats.points, 4);
    assert_eq!(stored[&1].stats.goal_diff, 2);
    assert_eq!(stored[&1].group_position, 1);
    assert_eq!(stored[&2].stats.points, 1);
    assert_eq!(stored[&2].stats.goal_diff, -2);
    assert_eq!(stored[&2].group_position, 2);
}

#[tokio::test]
async fn test_recompute_reports_only_counted_matches() {
    let store = FakeStore::new(
        &[(1, "Team 1", "A"), (2, "Team 2", "A")],
        vec![scored(1, 1, 2, "2-0"), scored(2, 2, 1, "abc")],
    );

    let outcome = assert_ok!(recompute_standings(&store, TOURNAMENT).await);

    assert_eq!(outcome.matches_considered, 1);
    assert_eq!(outcome.stats[&1].match_played, 1);
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let store = FakeStore::new(
        &[(1, "Team 1", "A"), (2, "Team 2", "A"), (3, "Team 3", "B")],
        vec![scored(1, 1, 2, "2-2"), scored(2, 2, 1, "0-1")],
    );

    let first = assert_ok!(recompute_standings(&store, TOURNAMENT).await);
    let after_first = store.snapshot().await;
    let second = assert_ok!(recompute_standings(&store, TOURNAMENT).await);
    let after_second = store.snapshot().await;

    assert_eq!(first.stats, second.stats);
    assert_eq!(after_first, after_second);
    assert_eq!(after_second[&1].stats.match_played, 2);
    assert_eq!(after_second[&3].stats, TeamStats::default());
}

#[tokio::test]
async fn test_recompute_with_no_registrations_succeeds_empty() {
    let store = FakeStore::new(&[], Vec::new());

    let outcome = assert_ok!(recompute_standings(&store, TOURNAMENT).await);

    assert!(outcome.stats.is_empty());
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_lookup_failure_writes_nothing() {
    let mut store = FakeStore::new(&[(1, "Team 1", "A")], vec![scored(1, 1, 2, "1-0")]);
    store.fail_matches = true;

    let err = assert_err!(recompute_standings(&store, TOURNAMENT).await);

    assert!(matches!(
        err,
        StandingsError::Lookup {
            tournament_id: TOURNAMENT,
            ..
        }
    ));
    assert!(store.stats_writes.lock().await.is_empty());
}

#[tokio::test]
async fn test_registration_lookup_failure_aborts_recompute() {
    let mut store = FakeStore::new(&[(1, "Team 1", "A")], Vec::new());
    store.fail_registrations = true;

    let err = assert_err!(refresh_standings(&store, TOURNAMENT).await);

    assert!(matches!(err, StandingsError::Lookup { .. }));
    assert!(store.stats_writes.lock().await.is_empty());
    assert!(store.position_writes.lock().await.is_empty());
}

#[tokio::test]
async fn test_persist_failure_is_collected_and_others_still_written() {
    let mut store = FakeStore::new(
        &[(1, "Team 1", "A"), (2, "Team 2", "A"), (3, "Team 3", "A")],
        vec![scored(1, 1, 2, "2-1"), scored(2, 2, 3, "0-3")],
    );
    store.failing_writes.insert(2);

    let outcome = assert_ok!(recompute_standings(&store, TOURNAMENT).await);

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].team_id, 2);

    let mut written = store.stats_writes.lock().await.clone();
    written.sort_unstable();
    assert_eq!(written, vec![1, 3]);

    let stored = store.snapshot().await;
    assert_eq!(stored[&1].stats.points, 3);
    assert_eq!(stored[&2].stats, TeamStats::default());
    assert_eq!(stored[&3].stats.points, 3);
}

#[tokio::test]
async fn test_ranking_lookup_failure_keeps_counters() {
    let mut store = FakeStore::new(
        &[(1, "Team 1", "A"), (2, "Team 2", "A")],
        vec![scored(1, 1, 2, "0-2")],
    );
    store.fail_second_registrations = true;

    let err = assert_err!(refresh_standings(&store, TOURNAMENT).await);

    assert!(matches!(
        err,
        StandingsError::RankingLookup {
            tournament_id: TOURNAMENT,
            ..
        }
    ));
    assert!(store.position_writes.lock().await.is_empty());

    let stored = store.snapshot().await;
    assert_eq!(stored[&2].stats.points, 3);
    assert_eq!(stored[&1].stats.lost, 1);
}

#[tokio::test]
async fn test_rerank_reads_current_counters() {
    let store = FakeStore::new(&[(1, "Alpha", "A"), (2, "Beta", "A")], Vec::new());
    {
        let mut registrations = store.registrations.lock().await;
        registrations[1].stats = stats(3, 1, 1);
    }

    let outcome = assert_ok!(rerank(&store, TOURNAMENT).await);

    assert_eq!(outcome.ranks[&2], 1);
    assert_eq!(outcome.ranks[&1], 2);
    assert!(outcome.failures.is_empty());
}

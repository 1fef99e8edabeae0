//! Standings recomputation for a tournament.
//!
//! The work is split into two pure functions and two store-driven steps:
//!
//! - [`aggregate`] folds every scored match between registered teams into
//!   per-team counters. It recomputes from scratch, so running it twice over the
//!   same matches gives the same table.
//! - [`rank_groups`] orders each group by points, goal difference, goals for and
//!   team name, and numbers the teams from 1.
//! - [`recompute_standings`] and [`rerank`] read from a [`StandingsStore`],
//!   call the pure functions and write the results back team by team. A failed
//!   write is recorded in the outcome and the loop carries on with the next team.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use infra::models::{MatchRow, TournamentTeamRow};
use infra::repos::StandingsCounters;
use thiserror::Error;

use super::store::StandingsStore;

pub const POINTS_FOR_WIN: i32 = 3;
pub const POINTS_FOR_DRAW: i32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamStats {
    pub match_played: i32,
    pub won: i32,
    pub draw: i32,
    pub lost: i32,
    pub goal_for: i32,
    pub goal_against: i32,
    pub goal_diff: i32,
    pub points: i32,
}

impl TeamStats {
    fn record(&mut self, scored: i32, conceded: i32) {
        self.match_played += 1;
        self.goal_for = self.goal_for.saturating_add(scored);
        self.goal_against = self.goal_against.saturating_add(conceded);

        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won += 1;
                self.points += POINTS_FOR_WIN;
            }
            Ordering::Less => self.lost += 1,
            Ordering::Equal => {
                self.draw += 1;
                self.points += POINTS_FOR_DRAW;
            }
        }
    }
}

impl From<TeamStats> for StandingsCounters {
    fn from(stats: TeamStats) -> Self {
        StandingsCounters {
            match_played: stats.match_played,
            won: stats.won,
            draw: stats.draw,
            lost: stats.lost,
            goal_for: stats.goal_for,
            goal_against: stats.goal_against,
            goal_diff: stats.goal_diff,
            points: stats.points,
        }
    }
}

/// The parts of a match result the aggregator reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    pub match_id: i32,
    pub team1_id: i32,
    pub team2_id: i32,
    pub goal_score: Option<String>,
}

impl From<MatchRow> for MatchScore {
    fn from(row: MatchRow) -> Self {
        MatchScore {
            match_id: row.id,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            goal_score: row.goal_score,
        }
    }
}

/// A team's registration as seen by the ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub team_id: i32,
    pub team_name: String,
    pub team_group: String,
    pub stats: TeamStats,
    pub group_position: i32,
}

impl From<TournamentTeamRow> for Registration {
    fn from(row: TournamentTeamRow) -> Self {
        Registration {
            team_id: row.team_id,
            team_name: row.team_name,
            team_group: row.team_group,
            stats: TeamStats {
                match_played: row.match_played,
                won: row.won,
                draw: row.draw,
                lost: row.lost,
                goal_for: row.goal_for,
                goal_against: row.goal_against,
                goal_diff: row.goal_diff,
                points: row.points,
            },
            group_position: row.group_position,
        }
    }
}

/// Why a stored score was left out of the standings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRejection {
    /// No result recorded yet.
    Missing,
    /// Not two decimal numbers separated by `-` or `:`.
    Malformed,
    /// Well-formed, but a side exceeds `i32::MAX` goals.
    OutOfRange,
}

/// Parse a final score such as `"3-1"` or `"2:2"` into `(team1, team2)` goals.
///
/// Exactly two non-negative decimal integers separated by `-` or `:` are
/// accepted; surrounding whitespace is ignored. Each side is limited to
/// `i32::MAX` goals.
pub fn read_score(raw: &str) -> Result<(i32, i32), ScoreRejection> {
    let (first, second) = raw
        .trim()
        .split_once(['-', ':'])
        .ok_or(ScoreRejection::Malformed)?;
    let first = parse_goals(first);
    let second = parse_goals(second);

    // A malformed side wins over an oversized one so "abc-99999999999" reads as malformed.
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(ScoreRejection::Malformed), _) | (_, Err(ScoreRejection::Malformed)) => {
            Err(ScoreRejection::Malformed)
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    }
}

/// [`read_score`] without the rejection reason.
pub fn parse_score(raw: &str) -> Option<(i32, i32)> {
    read_score(raw).ok()
}

fn parse_goals(raw: &str) -> Result<i32, ScoreRejection> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScoreRejection::Malformed);
    }
    digits.parse().map_err(|_| ScoreRejection::OutOfRange)
}

/// Fold `matches` into a table with one entry per id in `team_ids`.
///
/// Teams without matches keep all-zero counters. A match counts only when both
/// participants are in `team_ids`, they are different teams, and its score
/// parses; otherwise it is skipped. Match order does not affect the result.
pub fn aggregate(team_ids: &[i32], matches: &[MatchScore]) -> BTreeMap<i32, TeamStats> {
    aggregate_counted(team_ids, matches).0
}

/// Like [`aggregate`], also returning how many matches were folded in.
pub fn aggregate_counted(
    team_ids: &[i32],
    matches: &[MatchScore],
) -> (BTreeMap<i32, TeamStats>, usize) {
    let mut table: BTreeMap<i32, TeamStats> = team_ids
        .iter()
        .map(|&team_id| (team_id, TeamStats::default()))
        .collect();
    let mut counted = 0;

    for m in matches {
        if m.team1_id == m.team2_id
            || !table.contains_key(&m.team1_id)
            || !table.contains_key(&m.team2_id)
        {
            continue;
        }

        let score = m
            .goal_score
            .as_deref()
            .ok_or(ScoreRejection::Missing)
            .and_then(read_score);
        let (goals1, goals2) = match score {
            Ok(goals) => goals,
            Err(ScoreRejection::Missing) => continue,
            Err(ScoreRejection::Malformed) => {
                tracing::debug!(
                    match_id = m.match_id,
                    goal_score = ?m.goal_score,
                    "Skipping match with a malformed score"
                );
                continue;
            }
            Err(ScoreRejection::OutOfRange) => {
                tracing::debug!(
                    match_id = m.match_id,
                    goal_score = ?m.goal_score,
                    "Skipping match with a goal count beyond i32::MAX"
                );
                continue;
            }
        };

        if let Some(stats) = table.get_mut(&m.team1_id) {
            stats.record(goals1, goals2);
        }
        if let Some(stats) = table.get_mut(&m.team2_id) {
            stats.record(goals2, goals1);
        }
        counted += 1;
    }

    for stats in table.values_mut() {
        stats.goal_diff = stats.goal_for - stats.goal_against;
    }

    (table, counted)
}

/// Group table order: points, goal difference and goals for descending, then
/// team name ascending. Team id is the last resort so the order is always total.
pub fn standings_order(a: &Registration, b: &Registration) -> Ordering {
    b.stats
        .points
        .cmp(&a.stats.points)
        .then_with(|| b.stats.goal_diff.cmp(&a.stats.goal_diff))
        .then_with(|| b.stats.goal_for.cmp(&a.stats.goal_for))
        .then_with(|| a.team_name.cmp(&b.team_name))
        .then_with(|| a.team_id.cmp(&b.team_id))
}

/// Map each team id to its 1-based position inside its own group.
pub fn rank_groups(registrations: &[Registration]) -> BTreeMap<i32, i32> {
    let mut groups: BTreeMap<&str, Vec<&Registration>> = BTreeMap::new();
    for registration in registrations {
        groups
            .entry(registration.team_group.as_str())
            .or_default()
            .push(registration);
    }

    let mut ranks = BTreeMap::new();
    for (_, mut pool) in groups {
        pool.sort_by(|a, b| standings_order(a, b));
        for (index, registration) in pool.into_iter().enumerate() {
            ranks.insert(registration.team_id, index as i32 + 1);
        }
    }

    ranks
}

#[derive(Debug, Error)]
pub enum StandingsError {
    #[error("failed to load teams or matches for tournament {tournament_id}")]
    Lookup {
        tournament_id: i32,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to load standings for ranking in tournament {tournament_id}")]
    RankingLookup {
        tournament_id: i32,
        #[source]
        source: sqlx::Error,
    },
}

/// A single team whose row could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistFailure {
    pub team_id: i32,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecomputeOutcome {
    pub tournament_id: i32,
    pub stats: BTreeMap<i32, TeamStats>,
    /// Matches that had a valid score and were folded into `stats`.
    pub matches_considered: usize,
    pub failures: Vec<PersistFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct RerankOutcome {
    pub tournament_id: i32,
    pub ranks: BTreeMap<i32, i32>,
    pub failures: Vec<PersistFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct StandingsReport {
    pub recompute: RecomputeOutcome,
    pub rerank: RerankOutcome,
}

impl StandingsReport {
    pub fn is_clean(&self) -> bool {
        self.recompute.failures.is_empty() && self.rerank.failures.is_empty()
    }
}

/// Recompute and persist the counters of every team registered to the tournament.
///
/// Nothing is written when either lookup fails.
pub async fn recompute_standings<S>(
    store: &S,
    tournament_id: i32,
) -> Result<RecomputeOutcome, StandingsError>
where
    S: StandingsStore + ?Sized,
{
    let lookup = |source| StandingsError::Lookup {
        tournament_id,
        source,
    };

    let registrations = store
        .list_registrations(tournament_id)
        .await
        .map_err(lookup)?;
    let team_ids: Vec<i32> = registrations.iter().map(|r| r.team_id).collect();
    let matches = store
        .list_matches_between(&team_ids)
        .await
        .map_err(lookup)?;

    let (stats, counted) = aggregate_counted(&team_ids, &matches);

    let mut failures = Vec::new();
    for (&team_id, team_stats) in &stats {
        if let Err(e) = store
            .write_team_stats(tournament_id, team_id, team_stats)
            .await
        {
            tracing::warn!(
                tournament_id,
                team_id,
                error = %e,
                "Failed to persist team standings"
            );
            failures.push(PersistFailure {
                team_id,
                message: e.to_string(),
            });
        }
    }

    tracing::info!(
        tournament_id,
        teams = stats.len(),
        matches_read = matches.len(),
        matches_counted = counted,
        failed_writes = failures.len(),
        "Standings recomputed"
    );

    Ok(RecomputeOutcome {
        tournament_id,
        stats,
        matches_considered: counted,
        failures,
    })
}

/// Re-read the tournament's registrations and persist group positions.
pub async fn rerank<S>(store: &S, tournament_id: i32) -> Result<RerankOutcome, StandingsError>
where
    S: StandingsStore + ?Sized,
{
    let registrations = store
        .list_registrations(tournament_id)
        .await
        .map_err(|source| StandingsError::RankingLookup {
            tournament_id,
            source,
        })?;

    let ranks = rank_groups(&registrations);

    let mut failures = Vec::new();
    for (&team_id, &position) in &ranks {
        if let Err(e) = store
            .write_group_position(tournament_id, team_id, position)
            .await
        {
            tracing::warn!(
                tournament_id,
                team_id,
                position,
                error = %e,
                "Failed to persist group position"
            );
            failures.push(PersistFailure {
                team_id,
                message: e.to_string(),
            });
        }
    }

    tracing::info!(
        tournament_id,
        teams = ranks.len(),
        failed_writes = failures.len(),
        "Group positions updated"
    );

    Ok(RerankOutcome {
        tournament_id,
        ranks,
        failures,
    })
}

/// Recompute counters, then rerank. If the ranking lookup fails the counters
/// already written stay in place and the error is returned.
pub async fn refresh_standings<S>(
    store: &S,
    tournament_id: i32,
) -> Result<StandingsReport, StandingsError>
where
    S: StandingsStore + ?Sized,
{
    let recompute = recompute_standings(store, tournament_id).await?;
    let ranking = rerank(store, tournament_id).await?;
    Ok(StandingsReport {
        recompute,
        rerank: ranking,
    })
}

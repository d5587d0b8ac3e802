// Leaderboards: top players per team, top players and team of each week, and
// the best single-week performances of the season.
//
// Only performances with strictly positive points are eligible. Exact ties
// are resolved by a fixed rule so output never depends on fetch or hash
// order: points descending, then player name, then team abbreviation, then
// week.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hoopcast_core::league::{MatchSide, PlayerPerformance, SeasonData, WeekSlate};
use serde::Serialize;

/// Players shown per week in the league-wide and season leaderboards.
pub const LEAGUE_LEADERS: usize = 3;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A player's contribution to one team in one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub name: String,
    pub player_id: Option<u64>,
    pub points: f64,
}

/// A performance in a league-wide leaderboard, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPerformance {
    pub name: String,
    pub player_id: Option<u64>,
    pub points: f64,
    pub team: String,
    pub week: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerContributions {
    pub weeks: Vec<u32>,
    /// week -> team -> top players, best first. Every team appears every
    /// week; teams without eligible players have an empty list.
    pub contributions: BTreeMap<u32, BTreeMap<String, Vec<Contribution>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPlayersByWeek {
    pub weeks: Vec<u32>,
    pub top_players: BTreeMap<u32, Vec<RankedPerformance>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTeam {
    pub team: String,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTeamByWeek {
    pub weeks: Vec<u32>,
    /// Weeks without any matchup have no entry.
    pub top_teams: BTreeMap<u32, TopTeam>,
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

fn by_points_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

fn contribution_order(a: &Contribution, b: &Contribution) -> Ordering {
    by_points_desc(a.points, b.points).then_with(|| a.name.cmp(&b.name))
}

/// Leaderboard order for pooled performances.
pub fn performance_order(a: &RankedPerformance, b: &RankedPerformance) -> Ordering {
    by_points_desc(a.points, b.points)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.team.cmp(&b.team))
        .then_with(|| a.week.cmp(&b.week))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn eligible(lineup: &[PlayerPerformance]) -> impl Iterator<Item = &PlayerPerformance> {
    lineup.iter().filter(|p| p.is_eligible())
}

fn ranked(p: &PlayerPerformance, side: &MatchSide, week: u32) -> RankedPerformance {
    RankedPerformance {
        name: p.name.clone(),
        player_id: p.player_id,
        points: p.points,
        team: side.team.clone(),
        week,
    }
}

/// Every eligible performance of the week, across both sides of every match.
fn week_performances(slate: &WeekSlate) -> impl Iterator<Item = RankedPerformance> + '_ {
    slate.matches.iter().flat_map(|m| m.sides()).flat_map(move |side| {
        eligible(&side.lineup).map(move |p| ranked(p, side, slate.week))
    })
}

fn top_n(mut pool: Vec<RankedPerformance>, n: usize) -> Vec<RankedPerformance> {
    pool.sort_by(performance_order);
    pool.truncate(n);
    pool
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Top `per_team` players for each team in each week.
pub fn player_contributions(data: &SeasonData, per_team: usize) -> PlayerContributions {
    let contributions = data
        .weeks
        .iter()
        .map(|slate| {
            let mut by_team: BTreeMap<String, Vec<Contribution>> = data
                .teams()
                .iter()
                .map(|t| (t.abbrev.clone(), Vec::new()))
                .collect();

            for side in slate.matches.iter().flat_map(|m| m.sides()) {
                let mut players: Vec<Contribution> = eligible(&side.lineup)
                    .map(|p| Contribution {
                        name: p.name.clone(),
                        player_id: p.player_id,
                        points: p.points,
                    })
                    .collect();
                players.sort_by(contribution_order);
                players.truncate(per_team);
                by_team.insert(side.team.clone(), players);
            }

            (slate.week, by_team)
        })
        .collect();

    PlayerContributions {
        weeks: data.week_numbers(),
        contributions,
    }
}

/// League-wide top `n` players of each week.
pub fn top_players_by_week(data: &SeasonData, n: usize) -> TopPlayersByWeek {
    let top_players = data
        .weeks
        .iter()
        .map(|slate| (slate.week, top_n(week_performances(slate).collect(), n)))
        .collect();

    TopPlayersByWeek {
        weeks: data.week_numbers(),
        top_players,
    }
}

/// Top `n` single-week performances of the whole season.
pub fn top_performances(data: &SeasonData, n: usize) -> Vec<RankedPerformance> {
    top_n(data.weeks.iter().flat_map(week_performances).collect(), n)
}

/// Highest-scoring team of each week. Equal top scores go to the team whose
/// abbreviation sorts first.
pub fn top_team_by_week(data: &SeasonData) -> TopTeamByWeek {
    let top_teams = data
        .weeks
        .iter()
        .filter_map(|slate| {
            let scores = slate.present_scores();
            // BTreeMap iterates alphabetically; keep the first of equal maxima.
            let (team, points) = scores.into_iter().fold(None, |best, (team, points)| match best {
                Some((_, best_points)) if points <= best_points => best,
                _ => Some((team, points)),
            })?;
            Some((
                slate.week,
                TopTeam {
                    team: team.to_string(),
                    points,
                },
            ))
        })
        .collect();

    TopTeamByWeek {
        weeks: data.week_numbers(),
        top_teams,
    }
}

// League domain model: teams, weekly matchups, lineups.
//
// Everything here is loaded once per run and then only read. Team
// abbreviations are the join key for every derived view.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Teams and players
// ---------------------------------------------------------------------------

/// A fantasy team in the league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Source-side numeric identifier.
    pub id: u32,
    /// Short abbreviation, unique across the league.
    pub abbrev: String,
    /// Display name.
    pub name: String,
}

/// One player's line for one team in one week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPerformance {
    pub name: String,
    /// Absent for empty slots and players the source could not identify.
    pub player_id: Option<u64>,
    pub points: f64,
}

impl PlayerPerformance {
    /// Only strictly positive performances count toward leaderboards.
    pub fn is_eligible(&self) -> bool {
        self.points > 0.0
    }
}

// ---------------------------------------------------------------------------
// Matchups
// ---------------------------------------------------------------------------

/// One side of a matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSide {
    /// Team abbreviation.
    pub team: String,
    pub score: f64,
    pub lineup: Vec<PlayerPerformance>,
}

/// Declared result of a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Home,
    Away,
    Tie,
    /// Matchup still in progress (or otherwise without a declared winner).
    Undecided,
}

/// A single pairing in a week. The away side is absent on a bye.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home: Option<MatchSide>,
    pub away: Option<MatchSide>,
    pub outcome: Outcome,
}

impl MatchRecord {
    /// Present sides, home first.
    pub fn sides(&self) -> impl Iterator<Item = &MatchSide> {
        self.home.iter().chain(self.away.iter())
    }

    /// Winner and loser abbreviations, when both sides are present and the
    /// matchup has a declared winner.
    pub fn decided(&self) -> Option<(&str, &str)> {
        let (home, away) = (self.home.as_ref()?, self.away.as_ref()?);
        match self.outcome {
            Outcome::Home => Some((&home.team, &away.team)),
            Outcome::Away => Some((&away.team, &home.team)),
            Outcome::Tie | Outcome::Undecided => None,
        }
    }

    /// Absolute point difference, only for matchups where both sides scored.
    pub fn margin(&self) -> Option<f64> {
        let home = self.home.as_ref().map_or(0.0, |s| s.score);
        let away = self.away.as_ref().map_or(0.0, |s| s.score);
        (home > 0.0 && away > 0.0).then(|| (home - away).abs())
    }
}

/// All matchups of one scoring week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSlate {
    /// 1-based week number.
    pub week: u32,
    pub matches: Vec<MatchRecord>,
}

impl WeekSlate {
    /// Scores of the teams that actually appear in this week's matchups.
    pub fn present_scores(&self) -> BTreeMap<&str, f64> {
        self.matches
            .iter()
            .flat_map(MatchRecord::sides)
            .map(|side| (side.team.as_str(), side.score))
            .collect()
    }

    /// Score for every league team, zero for teams without a matchup.
    pub fn score_map<'a>(&self, teams: &'a [Team]) -> BTreeMap<&'a str, f64> {
        let present = self.present_scores();
        teams
            .iter()
            .map(|t| {
                let score = present.get(t.abbrev.as_str()).copied().unwrap_or(0.0);
                (t.abbrev.as_str(), score)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// League context and season
// ---------------------------------------------------------------------------

/// League reference data, loaded once and passed to every computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueContext {
    pub league_id: u64,
    /// Season year as ESPN names it (the year the season ends).
    pub season: u16,
    pub name: String,
    /// Teams in league order. Order drives color and logo assignment.
    pub teams: Vec<Team>,
    /// Number of matchup periods played or in progress.
    pub current_week: u32,
    /// Matchup period -> scoring period ids. Empty when the source has none.
    #[serde(default)]
    pub matchup_periods: BTreeMap<u32, Vec<u32>>,
    /// Latest scoring period reported by the source.
    #[serde(default)]
    pub current_scoring_period: u32,
}

impl LeagueContext {
    /// Season label such as "2025-2026".
    pub fn season_label(&self) -> String {
        format!("{}-{}", self.season.saturating_sub(1), self.season)
    }

    pub fn team(&self, abbrev: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.abbrev == abbrev)
    }

    pub fn team_by_id(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Week numbers `1..=current_week`.
    pub fn weeks(&self) -> impl Iterator<Item = u32> {
        1..=self.current_week
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeasonError {
    #[error("expected week {expected}, got week {found}")]
    WeekOutOfOrder { expected: u32, found: u32 },

    #[error("expected {expected} weeks of data, got {found}")]
    WeekCount { expected: u32, found: usize },

    #[error("week {week} references unknown team `{team}`")]
    UnknownTeam { week: u32, team: String },
}

/// League context plus every week of matchups, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonData {
    pub context: LeagueContext,
    pub weeks: Vec<WeekSlate>,
}

impl SeasonData {
    /// Assemble a season, checking that weeks run 1..=current_week with no
    /// gaps and that every side belongs to a known team.
    pub fn new(context: LeagueContext, weeks: Vec<WeekSlate>) -> Result<Self, SeasonError> {
        if weeks.len() != context.current_week as usize {
            return Err(SeasonError::WeekCount {
                expected: context.current_week,
                found: weeks.len(),
            });
        }
        for (expected, slate) in (1u32..).zip(&weeks) {
            if slate.week != expected {
                return Err(SeasonError::WeekOutOfOrder {
                    expected,
                    found: slate.week,
                });
            }
            if let Some(side) = slate
                .matches
                .iter()
                .flat_map(MatchRecord::sides)
                .find(|side| context.team(&side.team).is_none())
            {
                return Err(SeasonError::UnknownTeam {
                    week: slate.week,
                    team: side.team.clone(),
                });
            }
        }
        Ok(Self { context, weeks })
    }

    pub fn teams(&self) -> &[Team] {
        &self.context.teams
    }

    /// Week numbers in order.
    pub fn week_numbers(&self) -> Vec<u32> {
        self.weeks.iter().map(|w| w.week).collect()
    }
}

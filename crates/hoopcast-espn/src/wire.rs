// ESPN fantasy basketball v3 response shapes and their mapping onto the
// league domain model.
//
// Only the fields the dashboard needs are modeled; everything else in the
// (very large) responses is ignored by serde.

use std::collections::BTreeMap;

use hoopcast_core::league::{
    LeagueContext, MatchRecord, MatchSide, Outcome, PlayerPerformance, Team, WeekSlate,
};
use hoopcast_core::source::SourceError;
use serde::Deserialize;
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// League (mTeam, mSettings, mStatus)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeagueResponse {
    pub id: u64,
    pub season_id: u16,
    #[serde(default)]
    pub scoring_period_id: u32,
    pub settings: SettingsWire,
    pub status: StatusWire,
    #[serde(default)]
    pub teams: Vec<TeamWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SettingsWire {
    pub name: String,
    #[serde(default)]
    pub schedule_settings: Option<ScheduleSettingsWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleSettingsWire {
    /// Keys are matchup period ids as strings.
    #[serde(default)]
    pub matchup_periods: BTreeMap<String, Vec<u32>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusWire {
    pub current_matchup_period: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TeamWire {
    pub id: u32,
    pub abbrev: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl TeamWire {
    /// Newer seasons carry `name`; older ones split it into location and
    /// nickname.
    fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        let joined = [self.location.as_deref(), self.nickname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            self.abbrev.clone()
        } else {
            joined
        }
    }
}

impl LeagueResponse {
    pub fn into_context(self) -> LeagueContext {
        let matchup_periods = self
            .settings
            .schedule_settings
            .map(|s| s.matchup_periods)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(period, ids)| match period.parse::<u32>() {
                Ok(p) => Some((p, ids)),
                Err(_) => {
                    warn!(period = %period, "ignoring non-numeric matchup period");
                    None
                }
            })
            .collect();

        LeagueContext {
            league_id: self.id,
            season: self.season_id,
            name: self.settings.name,
            teams: self
                .teams
                .iter()
                .map(|t| Team {
                    id: t.id,
                    abbrev: t.abbrev.clone(),
                    name: t.display_name(),
                })
                .collect(),
            current_week: self.status.current_matchup_period,
            matchup_periods,
            current_scoring_period: self.scoring_period_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule (mMatchupScore, mScoreboard)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<MatchupWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchupWire {
    pub matchup_period_id: u32,
    #[serde(default)]
    pub home: Option<SideWire>,
    #[serde(default)]
    pub away: Option<SideWire>,
    #[serde(default)]
    pub winner: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SideWire {
    pub team_id: u32,
    #[serde(default)]
    pub total_points: f64,
    /// Present while a matchup is still being played.
    #[serde(default)]
    pub total_points_live: Option<f64>,
    #[serde(default)]
    pub roster_for_matchup_period: Option<RosterWire>,
    #[serde(default)]
    pub roster_for_current_scoring_period: Option<RosterWire>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterWire {
    #[serde(default)]
    pub entries: Vec<EntryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryWire {
    #[serde(default)]
    pub player_id: Option<u64>,
    #[serde(default)]
    pub player_pool_entry: Option<PoolEntryWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PoolEntryWire {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub applied_stat_total: f64,
    #[serde(default)]
    pub player: Option<PlayerWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlayerWire {
    #[serde(default)]
    pub full_name: Option<String>,
}

fn outcome(winner: &str) -> Outcome {
    match winner {
        "HOME" => Outcome::Home,
        "AWAY" => Outcome::Away,
        "TIE" => Outcome::Tie,
        _ => Outcome::Undecided,
    }
}

impl EntryWire {
    fn into_performance(self) -> Option<PlayerPerformance> {
        let Some(pool) = self.player_pool_entry else {
            debug!("skipping roster entry without player data");
            return None;
        };
        let name = pool
            .player
            .and_then(|p| p.full_name)
            .unwrap_or_else(|| "Unknown".to_string());
        Some(PlayerPerformance {
            name,
            player_id: self.player_id.or(pool.id),
            points: pool.applied_stat_total,
        })
    }
}

impl SideWire {
    fn into_side(self, ctx: &LeagueContext) -> Result<MatchSide, SourceError> {
        let team = ctx
            .team_by_id(self.team_id)
            .ok_or(SourceError::UnknownTeam {
                team_id: self.team_id,
            })?;
        let roster = self
            .roster_for_matchup_period
            .or(self.roster_for_current_scoring_period);
        let lineup = roster
            .map(|r| {
                r.entries
                    .into_iter()
                    .filter_map(EntryWire::into_performance)
                    .collect()
            })
            .unwrap_or_default();

        Ok(MatchSide {
            team: team.abbrev.clone(),
            score: self.total_points_live.unwrap_or(self.total_points),
            lineup,
        })
    }
}

impl ScheduleResponse {
    /// Map the matchups of `week` onto a slate. Entries for other matchup
    /// periods are dropped.
    pub fn into_week(self, ctx: &LeagueContext, week: u32) -> Result<WeekSlate, SourceError> {
        let mut matches = Vec::new();
        for m in self.schedule {
            if m.matchup_period_id != week {
                continue;
            }
            let home = m.home.map(|s| s.into_side(ctx)).transpose()?;
            let away = m.away.map(|s| s.into_side(ctx)).transpose()?;
            if home.is_none() && away.is_none() {
                warn!(week, "skipping matchup with no sides");
                continue;
            }
            matches.push(MatchRecord {
                home,
                away,
                outcome: outcome(&m.winner),
            });
        }
        Ok(WeekSlate { week, matches })
    }
}

// Assembles every derived view into one serializable report.

use std::collections::BTreeMap;

use hoopcast_core::config::{ChartsConfig, StandingsTiebreak};
use hoopcast_core::league::SeasonData;
use serde::Serialize;
use tracing::info;

use crate::all_play::{self, AllPlayRecords};
use crate::leaderboard::{
    self, PlayerContributions, RankedPerformance, TopPlayersByWeek, TopTeamByWeek, LEAGUE_LEADERS,
};
use crate::margins::{self, MarginHistogram};
use crate::presentation::{self, TeamPresentation};
use crate::standings::{self, TeamRecord};
use crate::weekly::{self, WeeklySeries};

/// Tunables for report construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub top_players_per_team: usize,
    pub histogram_bins: usize,
    pub tiebreak: StandingsTiebreak,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ChartsConfig::default())
    }
}

impl From<&ChartsConfig> for ReportOptions {
    fn from(charts: &ChartsConfig) -> Self {
        Self {
            top_players_per_team: charts.top_players_per_team,
            histogram_bins: charts.histogram_bins,
            tiebreak: charts.standings_tiebreak,
        }
    }
}

/// Every view the dashboard renders, plus the league metadata around them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueReport {
    pub league_name: String,
    pub season_label: String,
    pub current_week: u32,
    pub weekly_scores: WeeklySeries<f64>,
    pub cumulative_points: WeeklySeries<f64>,
    pub standings_progression: WeeklySeries<usize>,
    /// Head-to-head record after the latest week.
    pub records: BTreeMap<String, TeamRecord>,
    pub player_contributions: PlayerContributions,
    pub top_team_by_week: TopTeamByWeek,
    pub top_players_by_week: TopPlayersByWeek,
    pub top_player_performances: Vec<RankedPerformance>,
    pub all_play_records: AllPlayRecords,
    pub all_play_progression: WeeklySeries<f64>,
    pub win_margins: MarginHistogram,
    pub teams: TeamPresentation,
}

impl LeagueReport {
    pub fn build(data: &SeasonData, options: &ReportOptions, logos: &[String]) -> Self {
        let ctx = &data.context;
        info!(
            "Building report for {} ({} teams, {} weeks)",
            ctx.name,
            ctx.teams.len(),
            data.weeks.len()
        );

        let weekly_scores = weekly::weekly_scores(data);
        let cumulative_points = weekly::cumulative_points(&weekly_scores);
        info!("Computed weekly and cumulative points");

        let standings_progression = standings::standings_progression(data, options.tiebreak);
        let records = standings::final_records(data);
        info!("Computed standings progression ({:?} tiebreak)", options.tiebreak);

        let player_contributions =
            leaderboard::player_contributions(data, options.top_players_per_team);
        let top_team_by_week = leaderboard::top_team_by_week(data);
        let top_players_by_week = leaderboard::top_players_by_week(data, LEAGUE_LEADERS);
        let top_player_performances = leaderboard::top_performances(data, LEAGUE_LEADERS);
        info!("Computed leaderboards");

        let all_play_records = all_play::all_play_records(data);
        let all_play_progression = all_play::win_pct_progression(&all_play_records);
        info!("Computed all-play records");

        let margins = margins::win_margins(data);
        let win_margins = margins::histogram(&margins, options.histogram_bins);
        info!("Binned {} matchup margins", margins.len());

        Self {
            league_name: ctx.name.clone(),
            season_label: ctx.season_label(),
            current_week: ctx.current_week,
            weekly_scores,
            cumulative_points,
            standings_progression,
            records,
            player_contributions,
            top_team_by_week,
            top_players_by_week,
            top_player_performances,
            all_play_records,
            all_play_progression,
            win_margins,
            teams: presentation::team_presentation(ctx, logos),
        }
    }
}

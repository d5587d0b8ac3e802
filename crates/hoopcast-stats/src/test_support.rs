// Builders for small hand-written seasons used across the unit tests.

use std::collections::BTreeMap;

use hoopcast_core::league::{
    LeagueContext, MatchRecord, MatchSide, Outcome, PlayerPerformance, SeasonData, Team,
    WeekSlate,
};

pub fn player(name: &str, points: f64) -> PlayerPerformance {
    PlayerPerformance {
        name: name.into(),
        player_id: Some(name.bytes().map(u64::from).sum()),
        points,
    }
}

pub fn side(team: &str, score: f64, lineup: Vec<PlayerPerformance>) -> MatchSide {
    MatchSide {
        team: team.into(),
        score,
        lineup,
    }
}

/// Matchup with the winner derived from the scores.
pub fn game(home: &str, home_score: f64, away: &str, away_score: f64) -> MatchRecord {
    game_with(side(home, home_score, vec![]), side(away, away_score, vec![]))
}

pub fn game_with(home: MatchSide, away: MatchSide) -> MatchRecord {
    let outcome = if home.score > away.score {
        Outcome::Home
    } else if away.score > home.score {
        Outcome::Away
    } else {
        Outcome::Tie
    };
    MatchRecord {
        home: Some(home),
        away: Some(away),
        outcome,
    }
}

pub fn bye(team: &str, score: f64) -> MatchRecord {
    bye_with(team, score, vec![])
}

/// Bye week for `team` with a lineup.
pub fn bye_with(team: &str, score: f64, lineup: Vec<PlayerPerformance>) -> MatchRecord {
    MatchRecord {
        home: Some(side(team, score, lineup)),
        away: None,
        outcome: Outcome::Undecided,
    }
}

pub fn context(abbrevs: &[&str], current_week: u32) -> LeagueContext {
    LeagueContext {
        league_id: 1,
        season: 2026,
        name: "Test League".into(),
        teams: abbrevs
            .iter()
            .enumerate()
            .map(|(i, a)| Team {
                id: i as u32 + 1,
                abbrev: a.to_string(),
                name: format!("The {a}s"),
            })
            .collect(),
        current_week,
        matchup_periods: BTreeMap::new(),
        current_scoring_period: 0,
    }
}

/// Season with one slate per entry of `weeks`, numbered from 1.
pub fn season(abbrevs: &[&str], weeks: Vec<Vec<MatchRecord>>) -> SeasonData {
    let ctx = context(abbrevs, weeks.len() as u32);
    let slates = weeks
        .into_iter()
        .zip(1u32..)
        .map(|(matches, week)| WeekSlate { week, matches })
        .collect();
    SeasonData::new(ctx, slates).expect("valid test season")
}

/// The two-team, two-week season used by several scenarios:
/// week 1 A=110 B=95, week 2 A=80 B=120.
pub fn two_team_season() -> SeasonData {
    season(
        &["A", "B"],
        vec![vec![game("A", 110.0, "B", 95.0)], vec![game("A", 80.0, "B", 120.0)]],
    )
}

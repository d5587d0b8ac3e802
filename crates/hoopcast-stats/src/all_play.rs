// All-play records: how each team would have fared had it played every other
// team's score each week, rather than a single scheduled opponent.

use std::collections::BTreeMap;

use hoopcast_core::league::SeasonData;
use serde::Serialize;

use crate::weekly::WeeklySeries;

/// One team's all-play tally across the season.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllPlayRecord {
    pub weekly_wins: Vec<u32>,
    pub weekly_losses: Vec<u32>,
    pub cumulative_wins: u32,
    pub cumulative_losses: u32,
    /// `cumulative_wins / (cumulative_wins + cumulative_losses)`, or 0.0 when
    /// the team has no decided all-play games.
    pub win_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllPlayRecords {
    pub weeks: Vec<u32>,
    pub teams: BTreeMap<String, AllPlayRecord>,
}

/// Win fraction in [0, 1]; 0.0 when there are no games.
pub fn win_pct(wins: u32, losses: u32) -> f64 {
    let games = wins + losses;
    if games == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(games)
    }
}

/// Compute all-play records for every team.
///
/// Only teams that appear in a week's matchups take part in that week's
/// comparisons. A team without a matchup records 0-0 for the week instead of
/// being counted as a zero score everyone else beats. Equal scores count as
/// neither a win nor a loss.
pub fn all_play_records(data: &SeasonData) -> AllPlayRecords {
    let mut teams: BTreeMap<String, AllPlayRecord> = data
        .teams()
        .iter()
        .map(|t| (t.abbrev.clone(), AllPlayRecord::default()))
        .collect();

    for slate in &data.weeks {
        let scores = slate.present_scores();

        for (abbrev, record) in teams.iter_mut() {
            let (wins, losses) = match scores.get(abbrev.as_str()) {
                Some(&score) => scores
                    .iter()
                    .filter(|(other, _)| **other != abbrev.as_str())
                    .fold((0, 0), |(w, l), (_, &theirs)| {
                        if score > theirs {
                            (w + 1, l)
                        } else if score < theirs {
                            (w, l + 1)
                        } else {
                            (w, l)
                        }
                    }),
                None => (0, 0),
            };
            record.weekly_wins.push(wins);
            record.weekly_losses.push(losses);
            record.cumulative_wins += wins;
            record.cumulative_losses += losses;
        }
    }

    for record in teams.values_mut() {
        record.win_percentage = win_pct(record.cumulative_wins, record.cumulative_losses);
    }

    AllPlayRecords {
        weeks: data.week_numbers(),
        teams,
    }
}

/// Running all-play win fraction after each week, from cumulative totals
/// through that week (not each week's own fraction).
pub fn win_pct_progression(records: &AllPlayRecords) -> WeeklySeries<f64> {
    let teams = records
        .teams
        .iter()
        .map(|(abbrev, record)| {
            let mut wins = 0;
            let mut losses = 0;
            let progression = record
                .weekly_wins
                .iter()
                .zip(&record.weekly_losses)
                .map(|(w, l)| {
                    wins += w;
                    losses += l;
                    win_pct(wins, losses)
                })
                .collect();
            (abbrev.clone(), progression)
        })
        .collect();

    WeeklySeries {
        weeks: records.weeks.clone(),
        teams,
    }
}

// Standings progression: each team's league rank after every week, based on
// actual head-to-head results.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use hoopcast_core::config::StandingsTiebreak;
use hoopcast_core::league::SeasonData;
use serde::Serialize;

use crate::weekly::WeeklySeries;

/// Head-to-head win/loss counters. Ties and undecided matchups count as
/// neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
}

/// Orders records best first.
pub type RecordComparator = fn(&TeamRecord, &TeamRecord) -> Ordering;

/// Most wins first; among equal wins, more losses first.
///
/// This is the ordering the dashboard has historically used. It favors teams
/// that have played more games, which is probably not what anyone intended,
/// but it stays the default so existing standings don't move.
pub fn more_losses_first(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.wins.cmp(&a.wins).then(b.losses.cmp(&a.losses))
}

/// Most wins first; among equal wins, fewer losses first.
pub fn fewer_losses_first(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.wins.cmp(&a.wins).then(a.losses.cmp(&b.losses))
}

pub fn comparator(tiebreak: StandingsTiebreak) -> RecordComparator {
    match tiebreak {
        StandingsTiebreak::MoreLosses => more_losses_first,
        StandingsTiebreak::FewerLosses => fewer_losses_first,
    }
}

/// Team abbreviations best first. Records the comparator treats as equal are
/// ordered by abbreviation ascending.
pub fn rank_teams<'a, F>(records: &BTreeMap<&'a str, TeamRecord>, cmp: F) -> Vec<&'a str>
where
    F: Fn(&TeamRecord, &TeamRecord) -> Ordering,
{
    let mut ordered: Vec<(&str, TeamRecord)> = records.iter().map(|(t, r)| (*t, *r)).collect();
    // Stable sort over abbreviation order keeps equal records alphabetical.
    ordered.sort_by(|a, b| cmp(&a.1, &b.1));
    ordered.into_iter().map(|(team, _)| team).collect()
}

/// Rank of every team after each week, using the configured tiebreak.
pub fn standings_progression(
    data: &SeasonData,
    tiebreak: StandingsTiebreak,
) -> WeeklySeries<usize> {
    standings_progression_by(data, comparator(tiebreak))
}

/// Rank of every team after each week under an arbitrary ordering.
/// Ranks are 1-based positions, so they are always distinct.
pub fn standings_progression_by<F>(data: &SeasonData, cmp: F) -> WeeklySeries<usize>
where
    F: Fn(&TeamRecord, &TeamRecord) -> Ordering,
{
    let mut records: BTreeMap<&str, TeamRecord> = data
        .teams()
        .iter()
        .map(|t| (t.abbrev.as_str(), TeamRecord::default()))
        .collect();

    let mut rows: Vec<BTreeMap<&str, usize>> = Vec::with_capacity(data.weeks.len());
    for slate in &data.weeks {
        for (winner, loser) in slate.matches.iter().filter_map(|m| m.decided()) {
            if let Some(r) = records.get_mut(winner) {
                r.wins += 1;
            }
            if let Some(r) = records.get_mut(loser) {
                r.losses += 1;
            }
        }

        let row = rank_teams(&records, &cmp)
            .into_iter()
            .enumerate()
            .map(|(i, team)| (team, i + 1))
            .collect();
        rows.push(row);
    }

    let team_count = data.teams().len();
    WeeklySeries::from_rows(
        data.week_numbers(),
        data.teams().iter().map(|t| t.abbrev.as_str()),
        &rows,
        team_count,
    )
}

/// Head-to-head record of every team after the final week.
pub fn final_records(data: &SeasonData) -> BTreeMap<String, TeamRecord> {
    let mut records: BTreeMap<String, TeamRecord> = data
        .teams()
        .iter()
        .map(|t| (t.abbrev.clone(), TeamRecord::default()))
        .collect();
    for (winner, loser) in data
        .weeks
        .iter()
        .flat_map(|slate| slate.matches.iter())
        .filter_map(|m| m.decided())
    {
        if let Some(r) = records.get_mut(winner) {
            r.wins += 1;
        }
        if let Some(r) = records.get_mut(loser) {
            r.losses += 1;
        }
    }
    records
}

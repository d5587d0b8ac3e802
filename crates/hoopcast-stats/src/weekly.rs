// Weekly and cumulative team scores.

use std::collections::BTreeMap;

use hoopcast_core::league::SeasonData;
use serde::Serialize;

/// A per-team series with one value per week.
///
/// Every league team has an entry, and every entry has exactly `weeks.len()`
/// values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySeries<T> {
    pub weeks: Vec<u32>,
    pub teams: BTreeMap<String, Vec<T>>,
}

impl<T: Copy> WeeklySeries<T> {
    pub fn series(&self, abbrev: &str) -> Option<&[T]> {
        self.teams.get(abbrev).map(Vec::as_slice)
    }

    /// Every team's value for the week at `index` (0-based).
    pub fn week_slice(&self, index: usize) -> BTreeMap<&str, T> {
        self.teams
            .iter()
            .filter_map(|(team, values)| values.get(index).map(|v| (team.as_str(), *v)))
            .collect()
    }

    /// Build a series by transposing week-major rows into team-major columns.
    pub(crate) fn from_rows<'a>(
        weeks: Vec<u32>,
        teams: impl Iterator<Item = &'a str>,
        rows: &[BTreeMap<&str, T>],
        missing: T,
    ) -> Self {
        let teams = teams
            .map(|team| {
                let values = rows
                    .iter()
                    .map(|row| row.get(team).copied().unwrap_or(missing))
                    .collect();
                (team.to_string(), values)
            })
            .collect();
        Self { weeks, teams }
    }
}

/// Each team's score for each week, zero when a team has no matchup.
pub fn weekly_scores(data: &SeasonData) -> WeeklySeries<f64> {
    let rows: Vec<BTreeMap<&str, f64>> = data
        .weeks
        .iter()
        .map(|slate| slate.score_map(data.teams()))
        .collect();

    WeeklySeries::from_rows(
        data.week_numbers(),
        data.teams().iter().map(|t| t.abbrev.as_str()),
        &rows,
        0.0,
    )
}

/// Running total of each team's weekly scores.
pub fn cumulative_points(weekly: &WeeklySeries<f64>) -> WeeklySeries<f64> {
    let teams = weekly
        .teams
        .iter()
        .map(|(team, scores)| {
            let running = scores
                .iter()
                .scan(0.0, |total, score| {
                    *total += score;
                    Some(*total)
                })
                .collect();
            (team.clone(), running)
        })
        .collect();

    WeeklySeries {
        weeks: weekly.weeks.clone(),
        teams,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn two_team_scenario() {
        let data = two_team_season();
        let weekly = weekly_scores(&data);
        assert_eq!(weekly.weeks, vec![1, 2]);
        assert_eq!(weekly.series("A"), Some(&[110.0, 80.0][..]));
        assert_eq!(weekly.series("B"), Some(&[95.0, 120.0][..]));

        let cumulative = cumulative_points(&weekly);
        assert_eq!(cumulative.series("A"), Some(&[110.0, 190.0][..]));
        assert_eq!(cumulative.series("B"), Some(&[95.0, 215.0][..]));
    }

    #[test]
    fn absent_team_scores_zero() {
        let data = season(
            &["A", "B", "C"],
            vec![
                vec![game("A", 100.0, "B", 90.0)],
                vec![game("A", 70.0, "C", 75.0), bye("B", 50.0)],
            ],
        );
        let weekly = weekly_scores(&data);
        assert_eq!(weekly.series("C"), Some(&[0.0, 75.0][..]));
        assert_eq!(weekly.series("B"), Some(&[90.0, 50.0][..]));
    }

    #[test]
    fn every_week_slice_covers_every_team() {
        let data = season(
            &["A", "B", "C", "D"],
            vec![
                vec![game("A", 1.0, "B", 2.0)],
                vec![],
                vec![game("C", 3.0, "D", 4.0), game("A", 5.0, "B", 6.0)],
            ],
        );
        let weekly = weekly_scores(&data);
        for i in 0..weekly.weeks.len() {
            let slice = weekly.week_slice(i);
            let keys: Vec<&str> = slice.keys().copied().collect();
            assert_eq!(keys, vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn cumulative_equals_prefix_sums() {
        let data = season(
            &["A", "B", "C"],
            vec![
                vec![game("A", 101.5, "B", 99.25)],
                vec![game("B", 87.0, "C", 130.75), bye("A", 12.0)],
                vec![game("C", 64.5, "A", 64.5)],
                vec![game("A", 140.0, "B", 3.5)],
            ],
        );
        let weekly = weekly_scores(&data);
        let cumulative = cumulative_points(&weekly);
        for (team, scores) in &weekly.teams {
            let running = &cumulative.teams[team];
            assert_eq!(running.len(), scores.len());
            for i in 0..scores.len() {
                let expected: f64 = scores[..=i].iter().sum();
                assert!((running[i] - expected).abs() < 1e-9, "{team} week {i}");
            }
        }
    }

    #[test]
    fn zero_weeks_yields_empty_series_for_every_team() {
        let data = season(&["A", "B"], vec![]);
        let weekly = weekly_scores(&data);
        assert!(weekly.weeks.is_empty());
        assert_eq!(weekly.teams.len(), 2);
        assert!(weekly.teams.values().all(Vec::is_empty));
        assert_eq!(cumulative_points(&weekly).teams.len(), 2);
    }
}

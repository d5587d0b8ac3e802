// Win margin distribution.

use hoopcast_core::league::{MatchRecord, SeasonData};
use serde::Serialize;

/// Histogram of matchup margins with equal-width bins over `[0, max]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarginHistogram {
    /// "start-end" per bin, rounded to whole points.
    pub labels: Vec<String>,
    pub counts: Vec<usize>,
}

impl MarginHistogram {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Absolute margin of every matchup in which both sides scored.
pub fn win_margins(data: &SeasonData) -> Vec<f64> {
    data.weeks
        .iter()
        .flat_map(|slate| slate.matches.iter().filter_map(MatchRecord::margin))
        .collect()
}

/// Bin `margins` into `bins` equal-width bins spanning `[0, max(margins)]`.
///
/// Bin `i` holds margins with `start <= m < end`; the last bin also holds its
/// upper edge so the maximum is counted. Every margin lands in exactly one
/// bin. No margins (or no bins) gives an empty histogram.
pub fn histogram(margins: &[f64], bins: usize) -> MarginHistogram {
    if margins.is_empty() || bins == 0 {
        return MarginHistogram::default();
    }

    let max = margins.iter().copied().fold(0.0_f64, f64::max);
    let width = max / bins as f64;
    let last = bins - 1;

    let mut counts = vec![0usize; bins];
    for &m in margins {
        let idx = if width > 0.0 {
            ((m / width).floor() as usize).min(last)
        } else {
            // All margins are zero: only the closed last bin [0, 0] holds them.
            last
        };
        counts[idx] += 1;
    }

    let labels = (0..bins)
        .map(|i| {
            let start = i as f64 * width;
            let end = if i == last { max } else { start + width };
            format!("{start:.0}-{end:.0}")
        })
        .collect();

    MarginHistogram { labels, counts }
}

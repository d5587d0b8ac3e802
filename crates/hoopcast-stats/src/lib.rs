// Aggregation engine: derived season views computed from league matchups.
//
// Every view is a pure function of the season data (or of an earlier view).
// Nothing here performs I/O or can fail.

pub mod all_play;
pub mod leaderboard;
pub mod margins;
pub mod presentation;
pub mod report;
pub mod standings;
pub mod weekly;

#[cfg(test)]
pub(crate) mod test_support;

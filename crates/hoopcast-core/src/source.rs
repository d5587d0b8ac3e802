// League data source seam.
//
// The stats engine never talks to the network; it consumes whatever a
// `LeagueSource` produced. The ESPN client implements this, and tests use an
// in-memory fixture.

use async_trait::async_trait;
use thiserror::Error;

use crate::league::{LeagueContext, WeekSlate};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to reach league source: {message}")]
    Connection { message: String },

    #[error("league source rejected credentials (HTTP {status}); check espn_s2 and swid")]
    Unauthorized { status: u16 },

    #[error("league source returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode league source response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("matchup references unknown team id {team_id}")]
    UnknownTeam { team_id: u32 },
}

/// Supplies league metadata and per-week matchups.
#[async_trait]
pub trait LeagueSource: Send + Sync {
    /// Fetch league metadata: name, season, teams, current week.
    async fn league(&self) -> Result<LeagueContext, SourceError>;

    /// Fetch all matchups for a single week. Weeks are independent of each
    /// other, so callers may request them in any order.
    async fn week(&self, ctx: &LeagueContext, week: u32) -> Result<WeekSlate, SourceError>;
}

// ESPN fantasy basketball read API client.
//
// Fetches league metadata and per-week scoreboards from the v3 `lm-api-reads`
// endpoint. Private leagues need the `espn_s2` and `SWID` cookies, which are
// forwarded as-is.

use std::time::Duration;

use async_trait::async_trait;
use hoopcast_core::config::Config;
use hoopcast_core::league::{LeagueContext, WeekSlate};
use hoopcast_core::source::{LeagueSource, SourceError};
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::wire::{LeagueResponse, ScheduleResponse};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const FANTASY_FILTER_HEADER: &str = "x-fantasy-filter";
const USER_AGENT: &str = concat!("hoopcast/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// EspnClient
// ---------------------------------------------------------------------------

/// Client for one league and season.
pub struct EspnClient {
    http: reqwest::Client,
    base_url: String,
    league_id: u64,
    year: u16,
}

impl EspnClient {
    /// Create a client. `cookies` is `(espn_s2, swid)` for private leagues.
    pub fn new(
        base_url: &str,
        league_id: u64,
        year: u16,
        cookies: Option<(&str, &str)>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        if let Some((espn_s2, swid)) = cookies {
            let value = HeaderValue::from_str(&format!("espn_s2={espn_s2}; SWID={swid}"))
                .map_err(|e| SourceError::Connection {
                    message: format!("invalid cookie value: {e}"),
                })?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Connection {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            league_id,
            year,
        })
    }

    /// Build a client from the application config.
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::new(
            &config.espn.base_url,
            config.league.league_id,
            config.league.year,
            config.credentials.cookies(),
            Duration::from_secs(config.espn.timeout_secs),
        )
    }

    fn league_url(&self) -> String {
        format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, self.year, self.league_id
        )
    }

    /// GET the league endpoint with the given query and optional
    /// `x-fantasy-filter`, decoding the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
        filter: Option<serde_json::Value>,
    ) -> Result<T, SourceError> {
        let url = self.league_url();
        debug!(%url, ?query, "ESPN request");

        let mut request = self.http.get(&url).query(query);
        if let Some(filter) = filter {
            request = request.header(FANTASY_FILTER_HEADER, filter.to_string());
        }

        let response = request.send().await.map_err(|e| SourceError::Connection {
            message: e.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SourceError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| SourceError::Connection {
            message: format!("failed to read response body: {e}"),
        })?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Scoring period to request for a matchup period: the last day of a
/// finished period, or today's period for the one in progress. `None` when
/// the league didn't report its schedule.
pub fn scoring_period_for(ctx: &LeagueContext, week: u32) -> Option<u32> {
    if week >= ctx.current_week && ctx.current_scoring_period > 0 {
        return Some(ctx.current_scoring_period);
    }
    ctx.matchup_periods
        .get(&week)
        .and_then(|ids| ids.last().copied())
}

fn views(names: &[&str]) -> Vec<(&'static str, String)> {
    names.iter().map(|v| ("view", v.to_string())).collect()
}

#[async_trait]
impl LeagueSource for EspnClient {
    async fn league(&self) -> Result<LeagueContext, SourceError> {
        info!(
            "Connecting to ESPN league {} for year {}...",
            self.league_id, self.year
        );
        let response: LeagueResponse = self
            .get_json(&views(&["mTeam", "mSettings", "mStatus"]), None)
            .await?;
        let ctx = response.into_context();
        info!(
            "Connected to {}: {} teams, current week {}",
            ctx.name,
            ctx.teams.len(),
            ctx.current_week
        );
        Ok(ctx)
    }

    async fn week(&self, ctx: &LeagueContext, week: u32) -> Result<WeekSlate, SourceError> {
        let mut query = views(&["mMatchupScore", "mScoreboard"]);
        if let Some(period) = scoring_period_for(ctx, week) {
            query.push(("scoringPeriodId", period.to_string()));
        }
        let filter = serde_json::json!({
            "schedule": { "filterMatchupPeriodIds": { "value": [week] } }
        });

        let response: ScheduleResponse = self.get_json(&query, Some(filter)).await?;
        let slate = response.into_week(ctx, week)?;
        info!("Fetched week {} ({} matchups)", week, slate.matches.len());
        Ok(slate)
    }
}

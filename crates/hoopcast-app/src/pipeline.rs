// Season fetch: league metadata first, then every week.

use anyhow::Context;
use futures_util::future::try_join_all;
use hoopcast_core::league::SeasonData;
use hoopcast_core::source::LeagueSource;
use tracing::info;

/// Fetch the league and all weeks `1..=current_week` from `source`.
///
/// Weeks are requested concurrently; the result keeps them in week order.
/// The first failing fetch aborts the whole load.
pub async fn load_season(source: &dyn LeagueSource) -> anyhow::Result<SeasonData> {
    let ctx = source
        .league()
        .await
        .context("failed to load league metadata")?;
    info!(
        "League {} ({}): {} teams, {} weeks",
        ctx.name,
        ctx.season_label(),
        ctx.teams.len(),
        ctx.current_week
    );

    let weeks = try_join_all(ctx.weeks().map(|week| {
        let ctx = &ctx;
        async move {
            source
                .week(ctx, week)
                .await
                .with_context(|| format!("failed to fetch week {week}"))
        }
    }))
    .await?;

    let data = SeasonData::new(ctx, weeks)
        .context("league source returned an inconsistent season")?;
    info!("Fetched {} weeks of matchups", data.weeks.len());
    Ok(data)
}

// hoopcast entry point.
//
// One-shot batch run:
// 1. Initialize tracing (stderr)
// 2. Load config (auto-copying defaults on first run)
// 3. Fetch league metadata and every week from ESPN
// 4. Compute the report
// 5. Render the dashboard and write it to the output directory

use std::path::Path;

use anyhow::Context;
use hoopcast_app::{pipeline, render};
use hoopcast_core::config;
use hoopcast_espn::EspnClient;
use hoopcast_stats::report::{LeagueReport, ReportOptions};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("hoopcast starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, year={}, output={}",
        config.league.league_id,
        config.league.year,
        config.output.path().display()
    );
    if config.credentials.cookies().is_none() {
        info!("No ESPN cookies configured; only public leagues are readable");
    }

    // 3. Fetch the season
    let client = EspnClient::from_config(&config).context("failed to create ESPN client")?;
    let season = pipeline::load_season(&client).await?;

    // 4. Compute the report
    let options = ReportOptions::from(&config.charts);
    let report = LeagueReport::build(&season, &options, &config.league.logos);

    // 5. Render and write
    let generated_at = render::timestamp(&chrono::Local::now());
    let html = render::render_html(&report, &generated_at)?;
    let path = render::write_report(
        Path::new(&config.output.dir),
        &config.output.filename,
        &html,
    )?;

    info!("Dashboard ready: {}", path.display());
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoopcast=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

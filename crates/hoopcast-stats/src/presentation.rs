// Per-team display attributes: names, chart colors, logos.

use std::collections::BTreeMap;

use hoopcast_core::league::LeagueContext;
use serde::Serialize;
use tracing::{debug, info};

/// Chart colors, assigned by team position in league order and reused once
/// a league has more teams than entries.
pub const PALETTE: [&str; 15] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
    "#4BC0C0", "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPresentation {
    /// Team abbreviations in league order; charts draw datasets in this order.
    pub order: Vec<String>,
    pub names: BTreeMap<String, String>,
    pub colors: BTreeMap<String, String>,
    /// Only teams with a configured logo have an entry.
    pub logos: BTreeMap<String, String>,
}

pub fn team_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Build display attributes for every team. `logos` pairs with teams by
/// position; empty entries and teams past the end of the list get no logo.
pub fn team_presentation(ctx: &LeagueContext, logos: &[String]) -> TeamPresentation {
    let mut presentation = TeamPresentation {
        order: Vec::with_capacity(ctx.teams.len()),
        names: BTreeMap::new(),
        colors: BTreeMap::new(),
        logos: BTreeMap::new(),
    };

    for (idx, team) in ctx.teams.iter().enumerate() {
        let abbrev = team.abbrev.clone();
        presentation.order.push(abbrev.clone());
        presentation.names.insert(abbrev.clone(), team.name.clone());
        presentation
            .colors
            .insert(abbrev.clone(), team_color(idx).to_string());

        match logos.get(idx).filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                presentation.logos.insert(abbrev, url.clone());
            }
            None => debug!(team = %team.abbrev, "no logo configured"),
        }
    }

    info!(
        "Mapped logos for {} of {} teams",
        presentation.logos.len(),
        ctx.teams.len()
    );

    presentation
}

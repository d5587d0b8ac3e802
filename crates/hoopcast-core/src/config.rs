// Configuration loading and parsing (league.toml, report.toml, credentials.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Oldest season served by ESPN's v3 read API.
pub const MIN_SUPPORTED_YEAR: u16 = 2018;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub charts: ChartsConfig,
    pub output: OutputConfig,
    pub espn: EspnConfig,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub league_id: u64,
    pub year: u16,
    /// Logo URLs paired with teams by league order.
    #[serde(default)]
    pub logos: Vec<String>,
}

// ---------------------------------------------------------------------------
// report.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire report.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ReportFile {
    output: OutputConfig,
    #[serde(default)]
    charts: ChartsConfig,
    espn: EspnConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
    pub filename: String,
}

impl OutputConfig {
    pub fn path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.filename)
    }
}

/// Ordering applied to teams with equal wins in the standings progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandingsTiebreak {
    /// More losses ranks higher. This is how the dashboard has always ranked.
    #[default]
    MoreLosses,
    /// Fewer losses ranks higher.
    FewerLosses,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartsConfig {
    #[serde(default = "default_top_players_per_team")]
    pub top_players_per_team: usize,
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    #[serde(default)]
    pub standings_tiebreak: StandingsTiebreak,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            top_players_per_team: default_top_players_per_team(),
            histogram_bins: default_histogram_bins(),
            standings_tiebreak: StandingsTiebreak::default(),
        }
    }
}

fn default_top_players_per_team() -> usize {
    5
}

fn default_histogram_bins() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct EspnConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

/// ESPN session cookies. Passed through verbatim; only needed for private
/// leagues.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

impl CredentialsConfig {
    /// Both cookies, when configured.
    pub fn cookies(&self) -> Option<(&str, &str)> {
        match (self.espn_s2.as_deref(), self.swid.as_deref()) {
            (Some(s2), Some(swid)) if !s2.is_empty() && !swid.is_empty() => Some((s2, swid)),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml`,
/// `config/report.toml`, and (optionally) `config/credentials.toml`,
/// all relative to the given `base_dir`.
///
/// This does not auto-copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    // --- report.toml (required) ---
    let report_path = config_dir.join("report.toml");
    let report_text = read_file(&report_path)?;
    let report_file: ReportFile =
        toml::from_str(&report_text).map_err(|e| ConfigError::ParseError {
            path: report_path.clone(),
            source: e,
        })?;

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let credentials = if credentials_path.exists() {
        let cred_text = read_file(&credentials_path)?;
        toml::from_str(&cred_text).map_err(|e| ConfigError::ParseError {
            path: credentials_path.clone(),
            source: e,
        })?
    } else {
        CredentialsConfig::default()
    };

    let config = Config {
        league: league_file.league,
        charts: report_file.charts,
        output: report_file.output,
        espn: report_file.espn,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Config files seeded from `defaults/` on first run. Credentials are never
/// seeded; `defaults/credentials.toml.example` only documents them.
pub const SEEDED_FILES: [&str; 2] = ["league.toml", "report.toml"];

/// Copy each of [`SEEDED_FILES`] missing from `config/` out of `defaults/`.
/// Files already in `config/` are left untouched. Returns the paths written.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let seed_error = |message: String| ConfigError::DefaultsCopyError { message };

    let missing: Vec<&str> = SEEDED_FILES
        .into_iter()
        .filter(|name| !config_dir.join(name).exists())
        .collect();
    if missing.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| seed_error(format!("cannot create {}: {e}", config_dir.display())))?;

    let mut seeded = Vec::with_capacity(missing.len());
    for name in missing {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if !source.is_file() {
            return Err(seed_error(format!(
                "{} is missing and {} does not exist; run from the project root",
                target.display(),
                source.display()
            )));
        }
        std::fs::copy(&source, &target).map_err(|e| {
            seed_error(format!(
                "cannot copy {} to {}: {e}",
                source.display(),
                target.display()
            ))
        })?;
        seeded.push(target);
    }

    Ok(seeded)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.league_id == 0 {
        return Err(invalid("league.league_id", "must be greater than 0"));
    }

    if config.league.year < MIN_SUPPORTED_YEAR {
        return Err(invalid(
            "league.year",
            format!(
                "must be {MIN_SUPPORTED_YEAR} or later, got {}",
                config.league.year
            ),
        ));
    }

    let counts: &[(&str, usize)] = &[
        ("charts.top_players_per_team", config.charts.top_players_per_team),
        ("charts.histogram_bins", config.charts.histogram_bins),
    ];
    for (name, val) in counts {
        if *val == 0 {
            return Err(invalid(name, "must be > 0"));
        }
    }

    if config.output.filename.trim().is_empty() {
        return Err(invalid("output.filename", "must not be empty"));
    }

    if config.espn.timeout_secs == 0 {
        return Err(invalid("espn.timeout_secs", "must be > 0"));
    }

    // The cookies only work as a pair.
    let creds = &config.credentials;
    if creds.espn_s2.is_some() != creds.swid.is_some() {
        let missing = if creds.espn_s2.is_none() {
            "credentials.espn_s2"
        } else {
            "credentials.swid"
        };
        return Err(invalid(
            missing,
            "espn_s2 and swid must be set together (or both omitted for public leagues)",
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Helper: returns the workspace root holding `defaults/`, searching up
    /// from the CWD (cargo runs crate tests from the crate directory).
    fn project_root() -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        cwd.ancestors()
            .find(|dir| dir.join("defaults/league.toml").exists())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| panic!("Cannot locate defaults/ directory from CWD {:?}", cwd))
    }

    /// Fresh temp dir with a config/ directory holding copies of both
    /// default files.
    fn scratch_with_defaults(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();

        let root = project_root();
        fs::copy(root.join("defaults/league.toml"), config_dir.join("league.toml")).unwrap();
        fs::copy(root.join("defaults/report.toml"), config_dir.join("report.toml")).unwrap();
        tmp
    }

    fn expect_validation_field(err: ConfigError, expected: &str) {
        match &err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, expected),
            other => panic!("expected ValidationError, got: {other}"),
        }
    }

    #[test]
    fn load_valid_config_from_default_files() {
        let tmp = scratch_with_defaults("hoopcast_config_defaults");
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.league.league_id, 73608366);
        assert_eq!(config.league.year, 2026);
        assert_eq!(config.league.logos.len(), 10);
        assert!(config.league.logos[0].starts_with("https://"));

        assert_eq!(config.charts.top_players_per_team, 5);
        assert_eq!(config.charts.histogram_bins, 10);
        assert_eq!(config.charts.standings_tiebreak, StandingsTiebreak::MoreLosses);

        assert_eq!(config.output.dir, "output");
        assert_eq!(config.output.filename, "league_stats.html");
        assert_eq!(config.output.path(), Path::new("output").join("league_stats.html"));
        assert!(config.espn.base_url.ends_with("/games/fba"));
        assert_eq!(config.espn.timeout_secs, 30);

        assert!(config.credentials.cookies().is_none());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn charts_section_is_optional() {
        let tmp = scratch_with_defaults("hoopcast_config_no_charts");
        let report = "[output]\ndir = \"out\"\nfilename = \"x.html\"\n\n[espn]\nbase_url = \"http://localhost\"\ntimeout_secs = 5\n";
        fs::write(tmp.join("config/report.toml"), report).unwrap();

        let config = load_config_from(&tmp).expect("should fall back to chart defaults");
        assert_eq!(config.charts.top_players_per_team, 5);
        assert_eq!(config.charts.histogram_bins, 10);
        assert_eq!(config.charts.standings_tiebreak, StandingsTiebreak::MoreLosses);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parses_fewer_losses_tiebreak() {
        let tmp = scratch_with_defaults("hoopcast_config_tiebreak");
        let path = tmp.join("config/report.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace(
                "standings_tiebreak = \"more_losses\"",
                "standings_tiebreak = \"fewer_losses\"",
            ),
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert_eq!(config.charts.standings_tiebreak, StandingsTiebreak::FewerLosses);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn credentials_toml_with_both_cookies() {
        let tmp = scratch_with_defaults("hoopcast_config_with_creds");
        fs::write(
            tmp.join("config/credentials.toml"),
            "espn_s2 = \"s2-cookie\"\nswid = \"{ABC}\"\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).expect("should load with credentials.toml");
        assert_eq!(config.credentials.cookies(), Some(("s2-cookie", "{ABC}")));

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_half_configured_credentials() {
        let tmp = scratch_with_defaults("hoopcast_config_half_creds");
        fs::write(tmp.join("config/credentials.toml"), "espn_s2 = \"s2-cookie\"\n").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "credentials.swid");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_league_id_zero() {
        let tmp = scratch_with_defaults("hoopcast_config_league_zero");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nleague_id = 0\nyear = 2026\n",
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "league.league_id");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_pre_v3_season() {
        let tmp = scratch_with_defaults("hoopcast_config_old_year");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nleague_id = 42\nyear = 2015\n",
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "league.year");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn logos_default_to_empty() {
        let tmp = scratch_with_defaults("hoopcast_config_no_logos");
        fs::write(
            tmp.join("config/league.toml"),
            "[league]\nleague_id = 42\nyear = 2025\n",
        )
        .unwrap();

        let config = load_config_from(&tmp).unwrap();
        assert!(config.league.logos.is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_histogram_bins() {
        let tmp = scratch_with_defaults("hoopcast_config_zero_bins");
        let path = tmp.join("config/report.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(&path, text.replace("histogram_bins = 10", "histogram_bins = 0")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "charts.histogram_bins");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_top_players() {
        let tmp = scratch_with_defaults("hoopcast_config_zero_top");
        let path = tmp.join("config/report.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace("top_players_per_team = 5", "top_players_per_team = 0"),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "charts.top_players_per_team");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_output_filename() {
        let tmp = scratch_with_defaults("hoopcast_config_empty_filename");
        let path = tmp.join("config/report.toml");
        let text = fs::read_to_string(&path).unwrap();
        fs::write(
            &path,
            text.replace("filename = \"league_stats.html\"", "filename = \"  \""),
        )
        .unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        expect_validation_field(err, "output.filename");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_league_toml() {
        let tmp = scratch_with_defaults("hoopcast_config_missing_league");
        fs::remove_file(tmp.join("config/league.toml")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => {
                assert!(path.ends_with("league.toml"));
            }
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_with_defaults("hoopcast_config_invalid_toml");
        fs::write(tmp.join("config/report.toml"), "this is not valid [[[ toml").unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => {
                assert!(path.ends_with("report.toml"));
            }
            other => panic!("expected ParseError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seeds_missing_files_and_keeps_existing_ones() {
        let tmp = std::env::temp_dir().join("hoopcast_config_seed");
        let _ = fs::remove_dir_all(&tmp);
        let config_dir = tmp.join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::create_dir_all(tmp.join("defaults")).unwrap();

        let root = project_root();
        for name in SEEDED_FILES {
            fs::copy(root.join("defaults").join(name), tmp.join("defaults").join(name)).unwrap();
        }
        fs::copy(
            root.join("defaults/credentials.toml.example"),
            tmp.join("defaults/credentials.toml.example"),
        )
        .unwrap();
        fs::write(config_dir.join("league.toml"), "# mine\n").unwrap();

        let seeded = ensure_config_files(&tmp).unwrap();
        assert_eq!(seeded, vec![config_dir.join("report.toml")]);
        assert_eq!(fs::read_to_string(config_dir.join("league.toml")).unwrap(), "# mine\n");
        assert!(!config_dir.join("credentials.toml").exists());
        assert!(!config_dir.join("credentials.toml.example").exists());

        // Second run has nothing left to do.
        assert!(ensure_config_files(&tmp).unwrap().is_empty());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seeding_without_defaults_is_an_error() {
        let tmp = std::env::temp_dir().join("hoopcast_config_no_defaults");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match ensure_config_files(&tmp).unwrap_err() {
            ConfigError::DefaultsCopyError { message } => {
                assert!(message.contains("league.toml"), "{message}");
            }
            other => panic!("expected DefaultsCopyError, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

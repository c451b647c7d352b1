use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::dataset;
use crate::error::ConfigError;

pub const FACEIT_API_URL: &str = "https://open.faceit.com/data/v4";
pub const DEFAULT_GAME: &str = "cs2";
pub const DEFAULT_ROSTER: &[&str] = &["vari0us", "s1mple", "m0NESY", "ZywOo"];
pub const DEFAULT_HISTORY_LIMIT: u32 = 1000;
pub const STATS_DELAY_MS: u64 = 1100;

const PLACEHOLDER_API_KEY: &str = "YOUR_FACEIT_API_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub game: String,
    pub roster: Vec<String>,
    pub history_limit: u32,
    /// Pause before every match stats request.
    pub stats_delay: Duration,
    pub output_path: PathBuf,
}

impl Config {
    /// Reads `FACEIT_API_KEY`, `FACEIT_PLAYERS` and `FACEIT_MATCHES_LIMIT`
    /// from the process environment and validates the result.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup("FACEIT_API_KEY")
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        let roster = match lookup("FACEIT_PLAYERS") {
            Some(raw) if !raw.trim().is_empty() => parse_roster(&raw),
            _ => DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
        };

        let history_limit = match lookup("FACEIT_MATCHES_LIMIT") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidHistoryLimit(raw))?,
            _ => DEFAULT_HISTORY_LIMIT,
        };

        let cfg = Self {
            api_key,
            base_url: FACEIT_API_URL.to_string(),
            game: DEFAULT_GAME.to_string(),
            roster,
            history_limit,
            stats_delay: Duration::from_millis(STATS_DELAY_MS),
            output_path: dataset::default_output_path(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.api_key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::PlaceholderApiKey);
        }
        if self.roster.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidHistoryLimit("0".to_string()));
        }
        Ok(())
    }
}

fn parse_roster(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for handle in raw.split([',', ';', ' ']).map(str::trim) {
        if !handle.is_empty() && seen.insert(handle) {
            out.push(handle.to_string());
        }
    }
    out
}

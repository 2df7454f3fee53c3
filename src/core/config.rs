//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.glucodash/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::nav::Route;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GlucodashConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_screen: Option<Route>,
    /// Delay before the mock agent answers a chat message, in milliseconds.
    pub reply_delay_ms: Option<u64>,
    /// Delay before a meal simulation resolves, in milliseconds.
    pub simulate_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplayConfig {
    pub sidebar_collapsed: Option<bool>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_SIMULATE_DELAY_MS: u64 = 2000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub start_screen: Route,
    pub reply_delay_ms: u64,
    pub simulate_delay_ms: u64,
    pub sidebar_collapsed: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.glucodash/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".glucodash").join("config.toml"))
}

/// Load config from `~/.glucodash/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GlucodashConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<GlucodashConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GlucodashConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GlucodashConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: GlucodashConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# glucodash Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_screen = "chat"        # "chat", "trends", "meal-sim", "settings"
# reply_delay_ms = 1000        # How long the demo agent "thinks"
# simulate_delay_ms = 2000     # How long a meal simulation "runs"

# [display]
# sidebar_collapsed = false
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI. `cli_screen` is from the `--screen` flag (None = not given).
pub fn resolve(config: &GlucodashConfig, cli_screen: Option<Route>) -> ResolvedConfig {
    // Screen: CLI → env → config → default
    let start_screen = cli_screen
        .or_else(|| std::env::var("GLUCODASH_SCREEN").ok().and_then(|s| parse_screen(&s)))
        .or(config.general.start_screen)
        .unwrap_or_default();

    ResolvedConfig {
        start_screen,
        reply_delay_ms: config.general.reply_delay_ms.unwrap_or(DEFAULT_REPLY_DELAY_MS),
        simulate_delay_ms: config
            .general
            .simulate_delay_ms
            .unwrap_or(DEFAULT_SIMULATE_DELAY_MS),
        sidebar_collapsed: config.display.sidebar_collapsed.unwrap_or(false),
    }
}

/// Parse a screen name as it appears in config/env ("meal-sim" etc.).
fn parse_screen(s: &str) -> Option<Route> {
    match s.trim().to_lowercase().as_str() {
        "chat" => Some(Route::Chat),
        "trends" => Some(Route::Trends),
        "meal-sim" => Some(Route::MealSim),
        "settings" => Some(Route::Settings),
        other => {
            warn!("Unknown screen name '{}', ignoring", other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = GlucodashConfig::default();
        assert!(config.general.start_screen.is_none());
        assert!(config.display.sidebar_collapsed.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = GlucodashConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.start_screen, Route::Chat);
        assert_eq!(resolved.reply_delay_ms, DEFAULT_REPLY_DELAY_MS);
        assert_eq!(resolved.simulate_delay_ms, DEFAULT_SIMULATE_DELAY_MS);
        assert!(!resolved.sidebar_collapsed);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = GlucodashConfig {
            general: GeneralConfig {
                start_screen: Some(Route::Trends),
                reply_delay_ms: Some(50),
                simulate_delay_ms: Some(75),
            },
            display: DisplayConfig { sidebar_collapsed: Some(true) },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.start_screen, Route::Trends);
        assert_eq!(resolved.reply_delay_ms, 50);
        assert_eq!(resolved.simulate_delay_ms, 75);
        assert!(resolved.sidebar_collapsed);
    }

    #[test]
    fn test_resolve_cli_screen_wins() {
        let config = GlucodashConfig {
            general: GeneralConfig {
                start_screen: Some(Route::Trends),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some(Route::Settings));
        assert_eq!(resolved.start_screen, Route::Settings);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
reply_delay_ms = 250
"#;
        let config: GlucodashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.reply_delay_ms, Some(250));
        assert!(config.general.start_screen.is_none());
        assert!(config.general.simulate_delay_ms.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
start_screen = "meal-sim"
reply_delay_ms = 500
simulate_delay_ms = 1500

[display]
sidebar_collapsed = true
"#;
        let config: GlucodashConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_screen, Some(Route::MealSim));
        assert_eq!(config.general.simulate_delay_ms, Some(1500));
        assert_eq!(config.display.sidebar_collapsed, Some(true));
    }

    #[test]
    fn test_parse_screen_names() {
        assert_eq!(parse_screen("chat"), Some(Route::Chat));
        assert_eq!(parse_screen(" Meal-Sim "), Some(Route::MealSim));
        assert_eq!(parse_screen("dashboard"), None);
    }
}

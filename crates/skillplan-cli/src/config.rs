//! Configuration file management for skillplan.
//!
//! Provides a TOML-based config file at `~/.config/skillplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use skillplan_core::external::StrategiesConfig;
use skillplan_core::planner::{PlanType, PlannerOptions};

/// Environment variable overriding the planner type.
pub const PLANNER_TYPE_ENV: &str = "SKILLPLAN_PLANNER_TYPE";

/// Environment variable overriding the function manifest path.
pub const MANIFEST_ENV: &str = "SKILLPLAN_MANIFEST";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Path to the function manifest to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planner: Option<PlannerOptions>,
    #[serde(default)]
    pub strategies: StrategiesConfig,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the skillplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/skillplan` or
/// `~/.config/skillplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("skillplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("skillplan")
}

/// Return the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file. Returns an error if it does not exist.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(contents)?)
}

/// Serialize and write a config file, creating parent dirs as needed.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct SkillplanConfig {
    /// `None` when no layer set a planner type; the dispatcher then uses
    /// its default.
    pub planner: Option<PlannerOptions>,
    pub strategies: StrategiesConfig,
    pub manifest: Option<PathBuf>,
}

impl SkillplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Config file: `cli_config` (must exist) > default path (optional).
    /// - Planner type: `cli_type` > `SKILLPLAN_PLANNER_TYPE` > `[planner]` > unset.
    /// - Manifest: `cli_manifest` > `SKILLPLAN_MANIFEST` > `manifest` > unset.
    pub fn resolve(
        cli_config: Option<&Path>,
        cli_type: Option<PlanType>,
        cli_manifest: Option<&Path>,
    ) -> Result<Self> {
        let file_config = match cli_config {
            Some(path) => load_config(path)?,
            None => {
                let path = config_path();
                if path.exists() {
                    load_config(&path)?
                } else {
                    ConfigFile::default()
                }
            }
        };

        let planner = if let Some(plan_type) = cli_type {
            Some(PlannerOptions::new(plan_type))
        } else if let Ok(value) = std::env::var(PLANNER_TYPE_ENV) {
            let plan_type = value
                .parse::<PlanType>()
                .with_context(|| format!("{PLANNER_TYPE_ENV} env var is invalid"))?;
            Some(PlannerOptions::new(plan_type))
        } else {
            file_config.planner
        };

        let manifest = if let Some(path) = cli_manifest {
            Some(path.to_path_buf())
        } else if let Ok(path) = std::env::var(MANIFEST_ENV) {
            Some(PathBuf::from(path))
        } else {
            file_config.manifest
        };

        Ok(Self {
            planner,
            strategies: file_config.strategies,
            manifest,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

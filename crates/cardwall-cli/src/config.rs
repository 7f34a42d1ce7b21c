use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use cardwall_client::DEFAULT_ENDPOINT;
use cardwall_client::viewer::ENV_GH_BIN;

use crate::args::Cli;

/// Environment variable carrying the API bearer token.
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

/// Environment variable naming the default organization.
pub const ENV_ORG: &str = "CARDWALL_ORG";

/// Environment variable pointing at an alternate config file.
pub const ENV_CONFIG: &str = "CARDWALL_CONFIG";

/// Resolve the config file path based on priority:
/// 1. CARDWALL_CONFIG environment variable
/// 2. XDG config directory
/// 3. ~/.cardwall.toml (fallback for systems without XDG)
pub fn resolve_config_path() -> PathBuf {
    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return PathBuf::from(env_path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cardwall").join("config.toml");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".cardwall.toml");
    }

    PathBuf::from("cardwall.toml")
}

/// Optional on-disk defaults so routine invocations are just `cardwall`.
/// Read-only: nothing in the program writes it back.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub org: Option<String>,

    #[serde(default)]
    pub project: Option<u64>,

    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub gh_bin: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&resolve_config_path())
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}

/// Environment inputs to settings resolution, split out so tests can
/// resolve without touching the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub org: Option<String>,
    pub token: Option<String>,
    pub gh_bin: Option<String>,
}

impl EnvOverrides {
    pub fn from_process() -> Self {
        Self {
            org: std::env::var(ENV_ORG).ok(),
            token: std::env::var(ENV_TOKEN).ok(),
            gh_bin: std::env::var(ENV_GH_BIN).ok(),
        }
    }
}

/// Fully-resolved invocation settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub org: String,
    pub project: u64,
    pub endpoint: String,
    pub token: String,
    pub gh_bin: String,
}

impl Settings {
    /// Merge flags, environment and config file. Priority per field:
    /// flag > environment > config file > built-in default.
    pub fn resolve(cli: &Cli, config: &Config, env: &EnvOverrides) -> Result<Self> {
        let org = cli
            .org
            .clone()
            .or_else(|| env.org.clone())
            .or_else(|| config.org.clone())
            .context("no organization set; pass --org, set CARDWALL_ORG, or add `org` to the config file")?;

        let project = cli
            .project
            .or(config.project)
            .context("no project number set; pass --project or add `project` to the config file")?;

        let endpoint = cli
            .endpoint
            .clone()
            .or_else(|| config.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let token = env
            .token
            .clone()
            .context("GITHUB_TOKEN is not set; the board API needs a bearer token")?;

        let gh_bin = env
            .gh_bin
            .clone()
            .or_else(|| config.gh_bin.clone())
            .unwrap_or_else(|| "gh".to_string());

        Ok(Settings {
            org,
            project,
            endpoint,
            token,
            gh_bin,
        })
    }
}

// src/core/config_manager.rs
//! Configuration loading: `config.yaml` sections per environment, then
//! environment variable overrides.

use crate::engine::DEFAULT_SUGGESTION_LIMIT;
use crate::utils::resolve_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// CSV table with `Category` and `Skills` columns
    pub taxonomy_path: PathBuf,
    /// Newline-separated stopword list; the bundled English list when unset
    pub stopwords_path: Option<PathBuf>,
    pub suggestion_limit: usize,
    pub port: u16,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: PathBuf::from("job_categories.csv"),
            stopwords_path: None,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            port: 8000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: MatcherConfig,
    #[serde(default)]
    production: MatcherConfig,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub matcher: MatcherConfig,
}

impl ConfigManager {
    /// Load from `path` (or `config.yaml`), apply env overrides, resolve paths
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        let mut matcher = Self::load_from_file(path, &environment)?;
        Self::apply_env_overrides(&mut matcher)?;
        matcher.validate()?;

        matcher.taxonomy_path = resolve_path(&matcher.taxonomy_path)?;
        matcher.stopwords_path = matcher
            .stopwords_path
            .as_deref()
            .map(resolve_path)
            .transpose()?;

        Ok(Self {
            environment,
            matcher,
        })
    }

    fn get_environment() -> String {
        std::env::var("CVMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<MatcherConfig> {
        if !path.exists() {
            info!("{} not found, using built-in defaults", path.display());
            return Ok(MatcherConfig::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Pick the section for `environment` out of a YAML document
    pub fn parse(content: &str, environment: &str) -> Result<MatcherConfig> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn apply_env_overrides(config: &mut MatcherConfig) -> Result<()> {
        if let Ok(path) = std::env::var("CVMATCH_TAXONOMY") {
            config.taxonomy_path = PathBuf::from(path);
        }

        if let Ok(port) = std::env::var("ROCKET_PORT") {
            config.port = port
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;
        }

        Ok(())
    }
}

impl MatcherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.suggestion_limit == 0 {
            anyhow::bail!("suggestion_limit must be at least 1");
        }
        Ok(())
    }
}

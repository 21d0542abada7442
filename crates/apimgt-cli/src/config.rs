use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apimgt_core::DEFAULT_PROVIDER;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Per-profile defaults. The dashboard credential is never stored here.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub provider: Option<String>,
    pub base_url: Option<String>,
    pub format: Option<String>,
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn default_config_path() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".cloud-apimgt")
        .join("config.toml"))
}

pub fn load_all(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let cfg: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(cfg)
}

/// Loads `profile` from `path`, or from the default location when `None`.
/// A missing file or profile yields empty defaults.
pub fn load_profile(path: Option<&Path>, profile: &str) -> Result<ProfileConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let mut all = load_all(&path)?;
    Ok(all.remove(profile).unwrap_or_default())
}

pub fn resolve_provider(cli_provider: &Option<String>, profile: &ProfileConfig) -> String {
    // 1. --provider flag / CLOUD_APIMGT_PROVIDER env
    if let Some(p) = cli_provider {
        return p.clone();
    }
    // 2. config.toml profile
    if let Some(p) = &profile.provider {
        return p.clone();
    }
    DEFAULT_PROVIDER.to_string()
}

pub fn resolve_base_url(cli_base_url: &Option<String>, profile: &ProfileConfig) -> Option<String> {
    cli_base_url.clone().or_else(|| profile.base_url.clone())
}

pub fn resolve_format(cli_format: Option<OutputFormat>, profile: &ProfileConfig) -> Result<OutputFormat> {
    if let Some(format) = cli_format {
        return Ok(format);
    }
    match &profile.format {
        Some(raw) => OutputFormat::from_str(raw, true)
            .map_err(|_| anyhow::anyhow!("Unknown format in config: {raw}. Valid formats: json, table")),
        None => Ok(OutputFormat::default()),
    }
}

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cloud-apimgt")]
#[command(about = "Create, update or delete API-management dashboard assets from JSON definitions")]
#[command(version)]
#[command(
    after_help = "The environment variable CLOUD_APIMGT_AUTHORISATION needs to be set in order for this cli to function."
)]
pub struct Cli {
    /// Path to the file to be processed (relative to the working directory)
    #[arg(short = 'f', long)]
    pub file_path: PathBuf,

    /// Operation to perform with the submitted file
    #[arg(short = 'o', long, value_parser = PossibleValuesParser::new(["create", "update", "delete"]))]
    pub operation: String,

    /// Type of asset in the submitted file
    #[arg(short = 't', long = "type", value_parser = PossibleValuesParser::new(["api", "policy"]))]
    pub asset_type: String,

    /// Provider of the cloud API-management service (default: tyk)
    #[arg(short = 'p', long, env = "CLOUD_APIMGT_PROVIDER")]
    pub provider: Option<String>,

    /// Base URL of the provider's dashboard, overriding the provider default
    #[arg(short = 'b', long = "base-url-for-provider", env = "CLOUD_APIMGT_BASEURLFORPROVIDER")]
    pub base_url: Option<String>,

    /// Dashboard credential
    #[arg(
        short = 'a',
        long,
        env = "CLOUD_APIMGT_AUTHORISATION",
        hide_env_values = true
    )]
    pub authorisation: Option<String>,

    /// Config profile name
    #[arg(long, env = "CLOUD_APIMGT_PROFILE", default_value = "default")]
    pub profile: String,

    /// Config file (default: ~/.cloud-apimgt/config.toml)
    #[arg(long, env = "CLOUD_APIMGT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the provider response
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Log filter, e.g. `info` or `apimgt_core=debug` (RUST_LOG wins when set)
    #[arg(long, env = "CLOUD_APIMGT_LOG")]
    pub log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum, Default, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

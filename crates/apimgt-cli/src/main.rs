mod cli;
mod config;
mod observability;
mod output;

use anyhow::Result;
use apimgt_core::{CloudApiManager, ManagerConfig, ProviderRegistry};
use clap::Parser;
use tracing::{error, info};

use cli::Cli;
use output::print_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    observability::init_tracing(cli.log_level.as_deref());

    let code = report(run(&cli).await);
    if code != 0 {
        std::process::exit(code);
    }
}

/// Prints the failure chain, if any, and returns the process exit code.
fn report(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            print_error(&format!("{e:#}"));
            1
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let profile = config::load_profile(cli.config.as_deref(), &cli.profile)?;
    let provider = config::resolve_provider(&cli.provider, &profile);
    let format = config::resolve_format(cli.format, &profile)?;

    let mut registry = ProviderRegistry::new();
    apimgt_tyk::register(&mut registry);

    let manager_config = ManagerConfig {
        provider: provider.clone(),
        authorisation: cli.authorisation.clone(),
        base_url: config::resolve_base_url(&cli.base_url, &profile),
    };
    let manager = CloudApiManager::new(&manager_config, &registry)?;

    info!(
        file = %cli.file_path.display(),
        operation = %cli.operation,
        asset_type = %cli.asset_type,
        provider = %provider,
        "reconciling asset"
    );

    let response = manager
        .execute_raw(&cli.file_path, &cli.operation, &cli.asset_type)
        .await
        .inspect_err(|e| {
            error!(category = %e.category(), "{} for {} asset failed", cli.operation, cli.asset_type);
        })?;

    let message = output::success_message(&cli.operation, &cli.asset_type, &provider);
    info!("{message}");
    output::print_success(&message);
    output::print_value(&response, format);
    Ok(())
}

use std::fs::File;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skiff::app::AppContext;
use skiff::cli::{commands, Cli, Commands};
use skiff::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env_overrides();
    cli.apply_overrides(&mut config);

    let ctx = AppContext::new(config)?;
    let mode = ctx.config.browser.default_mode();

    match cli.command {
        None => skiff::tui::run(Arc::new(ctx), None).await?,
        Some(Commands::Browse { url }) => skiff::tui::run(Arc::new(ctx), url).await?,
        Some(Commands::Dump { url, links, json }) => {
            commands::dump(&ctx, &url, mode, links, json).await?;
        }
        Some(Commands::Search { query }) => {
            commands::search(&ctx, &query).await?;
        }
    }

    Ok(())
}

/// Logs go to `--log` when given, otherwise stderr. Without `--log` the
/// browser screen stays quiet unless `RUST_LOG` asks for output.
fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let interactive = matches!(cli.command, None | Some(Commands::Browse { .. }));
    let default = if interactive && cli.log.is_none() {
        "off"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match &cli.log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .with(filter)
                .init();
            info!("Logging to {}", path.display());
        }
        None => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use mushaf::{
    App, Config,
    api::{CachedApi, DynQuranApi, HttpQuranApi},
    logging,
    surface::{Surface, TerminalSurface},
};
use std::{path::PathBuf, sync::Arc};
use tokio::{io::BufReader, runtime::Handle};

/// Read the Quran surah by surah in the terminal.
///
/// Commands: n (next), p (prev), v <id> (open surah), m (menu), q (quit).
#[derive(Debug, Parser)]
#[command(name = "mushaf", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content API base URL (overrides config and MUSHAF_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, origin) = Config::load(cli.config.as_deref())?;
    let mut config = config.with_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    logging::init(&config, cli.verbose).context("failed to install log subscriber")?;
    origin.log();
    tracing::info!(api = %config.api_base_url, "starting reader");

    let http = HttpQuranApi::new(&config.api_base_url, config.request_timeout())?;
    let api: Arc<dyn DynQuranApi> = if config.cache_responses {
        Arc::new(CachedApi::new(http))
    } else {
        Arc::new(http)
    };
    let surface: Arc<dyn Surface> = Arc::new(TerminalSurface::stdout());

    let app = App::new(api, surface, Handle::current());
    app.start().context("bootstrap failed")?;

    app.controls()
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .context("failed to read commands")?;
    Ok(())
}

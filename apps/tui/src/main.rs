mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::{App, AppActions};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use std::sync::Arc;
use wildtrails_ops::config::init_app_config;
use wildtrails_ops::{ApiClient, Poller};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    // .env first, so the flags override it too
    dotenv::dotenv().ok();
    args.apply_env_overrides();
    let config = init_app_config()?;

    // Headless when asked, or when stdout is not a terminal
    if args.headless || !is_terminal() {
        logging::init_stderr(args.debug);
        return event::run_headless(&config, args.json).await;
    }

    let _log_guard = logging::init(&config.log_dir, args.debug);
    tracing::info!(api_url = %config.api_url, "starting console");

    let client = Arc::new(ApiClient::new(config.api_config())?);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let poller = Poller::spawn(Arc::clone(&client), config.poll_interval, tx.clone());
    let mut app = App::new(&config, AppActions::new(client, tx));

    let mut terminal = terminal::setup_terminal()?;
    let result = event::run(&mut terminal, &mut app, rx).await;
    terminal::cleanup_terminal_state(true, true);

    poller.shutdown().await;
    tracing::info!("console closed");
    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

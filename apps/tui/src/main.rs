mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::{App, AppActions};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use sales_dashboard::config::init_app_config;
use sales_dashboard::data::SalesClient;
use sales_dashboard::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = init_app_config()?;
    if let Err(err) = logging::init(&config) {
        eprintln!("Logging disabled: {err}");
    }
    tracing::info!(api_url = %config.api_url, top_n = config.top_n, "Configuration loaded");

    let client = SalesClient::new(config.api_url.clone())?;
    let actions = AppActions::new(Box::new(client), config.api_url.as_str());
    let mut app = App::new(actions, args.initial_selection(), config.top_n);

    if args.is_headless() || !is_terminal() {
        tracing::info!(json = args.json, "Running headless");
        return event::run_headless(&mut app, args.json).await;
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    if let Err(err) = &result {
        tracing::error!(error = %err, "Dashboard exited with an error");
    }
    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

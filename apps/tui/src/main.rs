mod app;
mod cli;
mod event;
mod logging;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use fleetwatch::config::init_app_config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let mut config = init_app_config()?;
    args.apply_to(&mut config);

    // Without a terminal on stdout there is nothing to draw on.
    let headless = args.headless || args.json || !is_terminal();

    if let Some(path) = &args.export {
        logging::init_stderr(args.debug)?;
        return event::run_export(&config, path).await;
    }

    if headless {
        logging::init_stderr(args.debug)?;
        config.latency = false;
        return event::run_headless(&config, args.json).await;
    }

    logging::init_file(&config.log_path, args.debug)?;
    info!(
        database = %config.database_url,
        user = %config.current_user.id,
        role = %config.current_user.role,
        "starting fleetwatch"
    );

    let mut app = App::new(config);
    if let Err(e) = app.initialize_db().await {
        error!(error = %e, "database initialization failed");
        app.notify_error("Database unavailable", &e);
    }

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

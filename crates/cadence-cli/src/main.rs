use cadence_core::db;
use cadence_core::error::CoreError;
use cadence_core::repository::SqliteRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = config::Config::new().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid configuration, using defaults");
        config::Config::default()
    });

    if let Err(e) = run(cli, &config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli, config: &config::Config) -> anyhow::Result<()> {
    let today = util::resolve_today(cli.today.as_deref(), config)?;
    tracing::debug!(%today, "resolved current day");

    let command = match cli.command {
        cli::Commands::NextDate(command) => {
            return commands::next_date::next_date(command, today);
        }
        other => other,
    };

    let pool = db::establish_connection(&config.database_path).await?;
    let repository = SqliteRepository::new(pool);

    match command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command, today).await,
        cli::Commands::List(command) => {
            commands::list::list_tasks(&repository, command, config, today).await
        }
        cli::Commands::Show(command) => commands::show::show_task(&repository, command, today).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command, today).await,
        cli::Commands::Done(command) => commands::done::done_task(&repository, command, today).await,
        cli::Commands::Delete(command) => commands::delete::delete_task(&repository, command).await,
        cli::Commands::NextDate(command) => commands::next_date::next_date(command, today),
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<CoreError>() {
        Some(CoreError::NotFound(s)) => {
            eprintln!("{} {}", "Error:".style(error_style), s);
        }
        Some(CoreError::InvalidInput(s)) => {
            eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
        }
        Some(core_error) if core_error.is_validation() => {
            eprintln!(
                "{} Invalid repeat rule or date: {}",
                "Error:".style(error_style),
                core_error.yellow()
            );
        }
        _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}

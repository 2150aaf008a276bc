use anyhow::Result;
use cadence_core::models::TaskList;
use cadence_core::repository::Repository;
use chrono::NaiveDate;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(
    repo: &impl Repository,
    command: ListCommand,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let limit = command.limit.unwrap_or(config.search_limit);
    let tasks = repo.find_tasks(command.search.as_deref(), limit).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&TaskList { tasks })?);
    } else {
        display_tasks(&tasks, today);
    }

    Ok(())
}

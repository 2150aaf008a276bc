use anyhow::Result;
use cadence_core::repository::Repository;
use chrono::NaiveDate;

use crate::cli::ShowCommand;
use crate::util::fetch_task;
use crate::views::table::display_task_details;

pub async fn show_task(repo: &impl Repository, command: ShowCommand, today: NaiveDate) -> Result<()> {
    let task = fetch_task(repo, command.id).await?;
    if command.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        display_task_details(&task, today);
    }
    Ok(())
}

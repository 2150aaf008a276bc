use anyhow::{bail, Result};
use cadence_core::models::UpdateTaskData;
use cadence_core::repository::Repository;
use chrono::NaiveDate;

use crate::cli::EditCommand;
use crate::parser::parse_date_arg;

fn build_update(command: &EditCommand, today: NaiveDate) -> Result<UpdateTaskData> {
    let date = command
        .date
        .as_deref()
        .map(|text| parse_date_arg(text, today))
        .transpose()?;

    let comment = if command.comment_clear {
        Some(String::new())
    } else {
        command.comment.clone()
    };
    let repeat = if command.repeat_clear {
        Some(String::new())
    } else {
        command.repeat.clone()
    };

    Ok(UpdateTaskData {
        title: command.title.clone(),
        date,
        comment,
        repeat,
    })
}

pub async fn edit_task(repo: &impl Repository, command: EditCommand, today: NaiveDate) -> Result<()> {
    let update = build_update(&command, today)?;
    if update.is_empty() {
        bail!("Nothing to change. Pass at least one of --title, --date, --comment or --repeat");
    }

    let task = repo.update_task(command.id, update, today).await?;
    println!("Updated task {}: '{}' on {}", task.id, task.title, task.date);
    Ok(())
}

use anyhow::Result;
use cadence_core::models::CompletionResult;
use cadence_core::repository::Repository;
use chrono::NaiveDate;

use crate::cli::DoneCommand;

pub async fn done_task(repo: &impl Repository, command: DoneCommand, today: NaiveDate) -> Result<()> {
    match repo.complete_task(command.id, today).await? {
        CompletionResult::Deleted(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled(task) => {
            println!("Completed task: '{}', next on {}", task.title, task.date);
        }
    }
    Ok(())
}

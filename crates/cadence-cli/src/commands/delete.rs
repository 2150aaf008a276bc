use anyhow::Result;
use cadence_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::DeleteCommand;
use crate::util::fetch_task;

pub async fn delete_task(repo: &impl Repository, command: DeleteCommand) -> Result<()> {
    let task = fetch_task(repo, command.id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!("Are you sure you want to delete task '{}'?", task.title))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    repo.delete_task(task.id).await?;
    println!("Deleted task: '{}'", task.title);
    Ok(())
}

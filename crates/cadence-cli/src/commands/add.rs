use anyhow::Result;
use cadence_core::models::NewTaskData;
use cadence_core::repository::Repository;
use chrono::NaiveDate;
use owo_colors::{OwoColorize, Style};

use crate::cli::AddCommand;
use crate::parser::parse_date_arg;
use crate::views::table::describe_repeat;

pub async fn add_task(repo: &impl Repository, command: AddCommand, today: NaiveDate) -> Result<()> {
    let date = match command.date.as_deref() {
        Some(text) => parse_date_arg(text, today)?,
        None => String::new(),
    };

    let data = NewTaskData {
        title: command.title,
        date,
        comment: command.comment.unwrap_or_default(),
        repeat: command.repeat.unwrap_or_default(),
    };
    let task = repo.add_task(data, today).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    println!(
        "{} Created task: {}",
        "✓".style(success_style),
        task.title.bright_white().bold()
    );
    println!("  {} Task ID: {}", "→".style(info_style), task.id.to_string().yellow());
    println!("  {} Date: {}", "→".style(info_style), task.date.cyan());
    if task.is_recurring() {
        println!("  {} Repeats {}", "→".style(info_style), describe_repeat(&task.repeat));
    }

    Ok(())
}

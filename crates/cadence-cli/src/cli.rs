use clap::{Parser, Subcommand};

/// A small task scheduler with compact repeat rules (d 5, y, w 1,3, m -1 2,8)
#[derive(Parser, Debug)]
#[command(name = "cadence", author, version, about, long_about = None)]
pub struct Cli {
    /// Use this day (YYYYMMDD) instead of today's date
    #[arg(long, global = true, value_name = "YYYYMMDD")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List tasks, nearest date first
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done (repeating tasks move to their next date)
    Done(DoneCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Compute the next date of a repeat rule without touching the database
    NextDate(NextDateCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD or e.g. 'next friday'); defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// A free-form comment
    #[arg(short, long)]
    pub comment: Option<String>,
    /// Repeat rule, e.g. 'd 7', 'y', 'w 1,3', 'm 1,-1', 'm -2 3,9'
    #[arg(short, long)]
    pub repeat: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Substring of the title or comment, or a date as DD.MM.YYYY
    #[arg(short, long)]
    pub search: Option<String>,
    /// Maximum number of tasks to show
    #[arg(long)]
    pub limit: Option<u32>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task
    pub id: i64,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long, conflicts_with = "comment")]
    pub comment_clear: bool,

    #[arg(long, help = "Update the repeat rule")]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove the repeat rule (one-off task)")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// The ID of the task to mark as done
    pub id: i64,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: i64,
    /// Force deletion without confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// Reference day (YYYYMMDD); defaults to today
    #[arg(long)]
    pub now: Option<String>,
    /// Anchor date (YYYYMMDD)
    #[arg(long)]
    pub date: String,
    /// Repeat rule
    #[arg(long, allow_hyphen_values = true)]
    pub repeat: String,
}

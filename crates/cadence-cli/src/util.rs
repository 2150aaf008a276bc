use anyhow::{anyhow, Result};
use cadence_core::error::CoreError;
use cadence_core::models::Task;
use cadence_core::repository::Repository;
use chrono::NaiveDate;

use crate::config::Config;
use crate::parser::parse_today;

/// `--today` wins over the clock in the configured timezone.
pub fn resolve_today(override_today: Option<&str>, config: &Config) -> Result<NaiveDate> {
    match override_today {
        Some(text) => parse_today(text),
        None => config.today().map_err(|e| anyhow!(e)),
    }
}

pub async fn fetch_task(repo: &impl Repository, id: i64) -> Result<Task> {
    repo.find_task_by_id(id)
        .await?
        .ok_or_else(|| anyhow!(CoreError::NotFound(format!("no task with ID {}", id))))
}

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, Transaction};

use crate::date::{format_date, parse_date, parse_search_date};
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{validate_title, CompletionResult, NewTaskData, Task, UpdateTaskData};
use crate::schedule::{complete, normalize_date, Completion};

/// Default number of rows returned by a listing.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

const SELECT_TASK: &str = "SELECT id, date, title, comment, repeat FROM scheduler";
const SELECT_TASK_BY_ID: &str =
    "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1";

/// Task storage. Every operation that needs "today" takes it as an argument;
/// the repository never reads a clock.
#[async_trait]
pub trait Repository {
    async fn add_task(&self, data: NewTaskData, today: NaiveDate) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError>;
    async fn find_tasks(&self, search: Option<&str>, limit: u32) -> Result<Vec<Task>, CoreError>;
    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        today: NaiveDate,
    ) -> Result<Task, CoreError>;
    async fn update_date(&self, id: i64, date: &str) -> Result<(), CoreError>;
    async fn complete_task(&self, id: i64, today: NaiveDate) -> Result<CompletionResult, CoreError>;
    async fn delete_task(&self, id: i64) -> Result<(), CoreError>;
}

pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_task_by_id_in_transaction<'a>(
        &self,
        tx: &mut Transaction<'a, Sqlite>,
        id: i64,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(SELECT_TASK_BY_ID)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }
}

fn not_found(id: i64) -> CoreError {
    CoreError::NotFound(format!("no task with ID {}", id))
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData, today: NaiveDate) -> Result<Task, CoreError> {
        validate_title(&data.title)?;
        let date = normalize_date(today, &data.date, &data.repeat)?;

        let result = sqlx::query(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, $3, $4)",
        )
        .bind(&date)
        .bind(&data.title)
        .bind(&data.comment)
        .bind(&data.repeat)
        .execute(&self.pool)
        .await?;

        let task = Task {
            id: result.last_insert_rowid(),
            date,
            title: data.title,
            comment: data.comment,
            repeat: data.repeat,
        };
        tracing::debug!(id = task.id, date = %task.date, repeat = %task.repeat, "added task");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: i64) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as(SELECT_TASK_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_tasks(&self, search: Option<&str>, limit: u32) -> Result<Vec<Task>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_TASK);

        // A DD.MM.YYYY term selects one day, anything else is a substring match.
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            match parse_search_date(term) {
                Some(date) => {
                    query_builder.push(" WHERE date = ").push_bind(format_date(date));
                }
                None => {
                    let pattern = format!("%{}%", term);
                    query_builder
                        .push(" WHERE title LIKE ")
                        .push_bind(pattern.clone())
                        .push(" OR comment LIKE ")
                        .push_bind(pattern);
                }
            }
        }

        query_builder
            .push(" ORDER BY date, id LIMIT ")
            .push_bind(i64::from(limit));

        let tasks = query_builder
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: i64,
        data: UpdateTaskData,
        today: NaiveDate,
    ) -> Result<Task, CoreError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut task = data.apply_to(&current);
        validate_title(&task.title)?;
        task.date = normalize_date(today, &task.date, &task.repeat)?;

        sqlx::query("UPDATE scheduler SET date = $1, title = $2, comment = $3, repeat = $4 WHERE id = $5")
            .bind(&task.date)
            .bind(&task.title)
            .bind(&task.comment)
            .bind(&task.repeat)
            .bind(task.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(id, date = %task.date, "updated task");
        Ok(task)
    }

    async fn update_date(&self, id: i64, date: &str) -> Result<(), CoreError> {
        parse_date(date)?;
        let result = sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
            .bind(date)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn complete_task(&self, id: i64, today: NaiveDate) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool.begin().await?;

        let mut task = self
            .find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let result = match complete(today, &task.date, &task.repeat)? {
            Completion::Delete => {
                sqlx::query("DELETE FROM scheduler WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                tracing::info!(id, "completed one-off task, removed");
                CompletionResult::Deleted(task)
            }
            Completion::Reschedule(next) => {
                task.date = format_date(next);
                sqlx::query("UPDATE scheduler SET date = $1 WHERE id = $2")
                    .bind(&task.date)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                tracing::info!(id, date = %task.date, "completed repeating task, rescheduled");
                CompletionResult::Rescheduled(task)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    async fn delete_task(&self, id: i64) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        tracing::debug!(id, "deleted task");
        Ok(())
    }
}

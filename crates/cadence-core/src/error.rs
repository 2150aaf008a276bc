use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The repeat string is empty. Callers treat this as "not recurring".
    #[error("Empty repeat rule")]
    EmptyRule,

    #[error("Unknown repeat rule kind: '{0}'")]
    UnknownRuleKind(String),

    #[error("Invalid repeat argument: {0}")]
    InvalidArgument(String),

    #[error("The maximum allowed interval ({max} days) has been exceeded: {value}")]
    RangeExceeded { value: i64, max: u32 },

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Task has no repeat rule")]
    NoRule,

    #[error("No matching date found for repeat rule '{0}'")]
    UnsatisfiableRule(String),
}

impl CoreError {
    /// True for failures caused by caller-supplied dates or rules, as opposed
    /// to storage failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput(_)
                | CoreError::EmptyRule
                | CoreError::UnknownRuleKind(_)
                | CoreError::InvalidArgument(_)
                | CoreError::RangeExceeded { .. }
                | CoreError::InvalidDate(_)
                | CoreError::NoRule
                | CoreError::UnsatisfiableRule(_)
        )
    }
}

//! # Cadence Core Library
//!
//! Date arithmetic and storage for a small task scheduler whose tasks repeat
//! according to a compact rule grammar (`d 5`, `y`, `w 1,3`, `m -1 2,8`).
//!
//! ## Core Modules
//!
//! - [`date`]: `YYYYMMDD` codec and calendar helpers
//! - [`rule`]: Repeat rule grammar and parser
//! - [`recurrence`]: Next-date evaluation for every rule kind
//! - [`schedule`]: Date normalization on create/edit and completion policy
//! - [`models`]: Task records and transfer objects
//! - [`db`]: Database connection and migration management
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types shared by every layer
//!
//! Nothing in this crate reads the system clock: every operation that depends
//! on "today" takes it as a parameter.
//!
//! ## Example Usage
//!
//! ```rust
//! use cadence_core::date::parse_date;
//! use cadence_core::recurrence::next_date_str;
//!
//! let today = parse_date("20240315").unwrap();
//! let next = next_date_str(today, "20240301", "d 5").unwrap();
//! assert_eq!(next, "20240316");
//! ```
//!
//! ```rust,no_run
//! use cadence_core::{db, models::NewTaskData, repository::{Repository, SqliteRepository}};
//! use cadence_core::date::parse_date;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cadence_core::error::CoreError> {
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(
//!             NewTaskData {
//!                 title: "Pay rent".to_string(),
//!                 repeat: "m 1".to_string(),
//!                 ..Default::default()
//!             },
//!             parse_date("20240315")?,
//!         )
//!         .await?;
//!     println!("Created task {} for {}", task.id, task.date);
//!
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod rule;
pub mod schedule;

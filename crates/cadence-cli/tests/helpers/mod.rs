#![allow(dead_code)]

use assert_cmd::Command;
use cadence_core::models::{Task, TaskList};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Day every test pretends it is, a Friday.
pub const TODAY: &str = "20240126";

/// Test harness for running CLI commands against a temporary database
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// A Command pinned to the temporary database, UTC and a fixed day.
    /// Runs inside the temp dir so no stray `cadence.toml` is picked up.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("cadence").expect("Failed to find cadence binary");
        cmd.current_dir(self.temp_dir.path())
            .env_remove("TODO_DBFILE")
            .env_remove("CADENCE_SEARCH_LIMIT")
            .env("CADENCE_DATABASE_PATH", &self.db_path)
            .env("CADENCE_TIMEZONE", "UTC")
            .env("RUST_LOG", "off")
            .args(["--today", TODAY]);
        cmd
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Lists every task through `list --json`.
    pub fn tasks(&self) -> Vec<Task> {
        let output = self
            .command()
            .args(["list", "--json"])
            .output()
            .expect("Failed to run list");
        assert!(output.status.success());
        let list: TaskList =
            serde_json::from_slice(&output.stdout).expect("list --json is not valid JSON");
        list.tasks
    }

    pub fn task(&self, id: i64) -> Task {
        let output = self
            .command()
            .args(["show", &id.to_string(), "--json"])
            .output()
            .expect("Failed to run show");
        assert!(output.status.success());
        serde_json::from_slice(&output.stdout).expect("show --json is not valid JSON")
    }
}

pub mod assertions {
    use predicates::prelude::*;

    pub fn task_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("Created task")
    }

    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error")
    }
}

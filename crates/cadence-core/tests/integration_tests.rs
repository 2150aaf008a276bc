use cadence_core::date::parse_date;
use cadence_core::db::establish_connection;
use cadence_core::error::CoreError;
use cadence_core::models::*;
use cadence_core::repository::{Repository, SqliteRepository, DEFAULT_LIST_LIMIT};
use chrono::NaiveDate;
use tempfile::TempDir;

/// Helper function to create a test database
async fn setup_test_db() -> (SqliteRepository, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("nested").join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    (SqliteRepository::new(pool), temp_dir)
}

fn today() -> NaiveDate {
    parse_date("20240126").unwrap()
}

/// Helper function to create a test task
async fn create_test_task(repo: &SqliteRepository, title: &str, date: &str, repeat: &str) -> Task {
    let data = NewTaskData {
        title: title.to_string(),
        date: date.to_string(),
        comment: format!("Test task: {}", title),
        repeat: repeat.to_string(),
    };
    repo.add_task(data, today())
        .await
        .expect("Failed to create test task")
}

#[tokio::test]
async fn test_add_task_normalizes_date() {
    let (repo, _temp_dir) = setup_test_db().await;

    let no_date = create_test_task(&repo, "No date", "", "").await;
    assert_eq!(no_date.date, "20240126");

    let past_one_off = create_test_task(&repo, "Past one-off", "20240101", "").await;
    assert_eq!(past_one_off.date, "20240126");

    let past_repeating = create_test_task(&repo, "Past repeating", "20240101", "d 10").await;
    assert_eq!(past_repeating.date, "20240131");

    let future = create_test_task(&repo, "Future", "20240301", "w 1").await;
    assert_eq!(future.date, "20240301");

    let stored = repo.find_task_by_id(past_repeating.id).await.unwrap().unwrap();
    assert_eq!(stored, past_repeating);
}

#[tokio::test]
async fn test_add_task_validation() {
    let (repo, _temp_dir) = setup_test_db().await;

    let missing_title = repo
        .add_task(
            NewTaskData {
                title: "".to_string(),
                ..Default::default()
            },
            today(),
        )
        .await;
    assert!(matches!(missing_title, Err(CoreError::InvalidInput(_))));

    let bad_date = repo
        .add_task(
            NewTaskData {
                title: "Bad date".to_string(),
                date: "20240230".to_string(),
                ..Default::default()
            },
            today(),
        )
        .await;
    assert!(matches!(bad_date, Err(CoreError::InvalidDate(_))));

    let bad_rule = repo
        .add_task(
            NewTaskData {
                title: "Bad rule".to_string(),
                date: "20250101".to_string(),
                repeat: "d 401".to_string(),
                ..Default::default()
            },
            today(),
        )
        .await;
    assert!(matches!(bad_rule, Err(CoreError::RangeExceeded { .. })));

    // nothing was stored
    let tasks = repo.find_tasks(None, DEFAULT_LIST_LIMIT).await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_find_tasks_search_and_order() {
    let (repo, _temp_dir) = setup_test_db().await;

    create_test_task(&repo, "Buy milk", "20240210", "").await;
    create_test_task(&repo, "Dentist", "20240205", "").await;
    create_test_task(&repo, "Gym", "20240205", "w 1,3,5").await;
    create_test_task(&repo, "Water plants", "20240301", "d 3").await;

    let all = repo.find_tasks(None, DEFAULT_LIST_LIMIT).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Dentist", "Gym", "Buy milk", "Water plants"]);

    let limited = repo.find_tasks(None, 2).await.unwrap();
    assert_eq!(limited.len(), 2);

    let by_date = repo.find_tasks(Some("05.02.2024"), DEFAULT_LIST_LIMIT).await.unwrap();
    assert_eq!(by_date.len(), 2);
    assert!(by_date.iter().all(|t| t.date == "20240205"));

    let by_title = repo.find_tasks(Some("milk"), DEFAULT_LIST_LIMIT).await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Buy milk");

    // the helper writes the title into the comment as well
    let by_comment = repo.find_tasks(Some("Test task: Gym"), DEFAULT_LIST_LIMIT).await.unwrap();
    assert_eq!(by_comment.len(), 1);

    let blank = repo.find_tasks(Some("   "), DEFAULT_LIST_LIMIT).await.unwrap();
    assert_eq!(blank.len(), 4);

    let none = repo.find_tasks(Some("nothing like this"), DEFAULT_LIST_LIMIT).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_update_task() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Report", "20240301", "").await;

    let updated = repo
        .update_task(
            task.id,
            UpdateTaskData {
                title: Some("Quarterly report".to_string()),
                date: Some("20231001".to_string()),
                repeat: Some("m 1 1,4,7,10".to_string()),
                ..Default::default()
            },
            today(),
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Quarterly report");
    assert_eq!(updated.date, "20240401");
    assert_eq!(updated.comment, task.comment);

    let stored = repo.find_task_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored, updated);

    let cleared_title = repo
        .update_task(
            task.id,
            UpdateTaskData {
                title: Some(String::new()),
                ..Default::default()
            },
            today(),
        )
        .await;
    assert!(matches!(cleared_title, Err(CoreError::InvalidInput(_))));

    let missing = repo
        .update_task(9999, UpdateTaskData::default(), today())
        .await;
    assert!(matches!(missing, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_complete_one_off_task_deletes_it() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Call plumber", "20240130", "").await;

    match repo.complete_task(task.id, today()).await.unwrap() {
        CompletionResult::Deleted(deleted) => assert_eq!(deleted.id, task.id),
        other => panic!("Expected a deleted task, got {:?}", other),
    }
    assert!(repo.find_task_by_id(task.id).await.unwrap().is_none());

    let again = repo.complete_task(task.id, today()).await;
    assert!(matches!(again, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_complete_repeating_task_reschedules_it() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Stand-up", "20240129", "w 1,3,5").await;

    let first = match repo.complete_task(task.id, today()).await.unwrap() {
        CompletionResult::Rescheduled(next) => next,
        other => panic!("Expected a rescheduled task, got {:?}", other),
    };
    // 2024-01-29 is a Monday, the next slot is Wednesday
    assert_eq!(first.date, "20240131");

    let second = match repo.complete_task(task.id, today()).await.unwrap() {
        CompletionResult::Rescheduled(next) => next,
        other => panic!("Expected a rescheduled task, got {:?}", other),
    };
    assert_eq!(second.date, "20240202");

    let stored = repo.find_task_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.date, "20240202");
}

#[tokio::test]
async fn test_update_date_and_delete() {
    let (repo, _temp_dir) = setup_test_db().await;
    let task = create_test_task(&repo, "Taxes", "20240415", "y").await;

    repo.update_date(task.id, "20240416").await.unwrap();
    let stored = repo.find_task_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(stored.date, "20240416");

    assert!(matches!(
        repo.update_date(task.id, "2024-04-16").await,
        Err(CoreError::InvalidDate(_))
    ));
    assert!(matches!(
        repo.update_date(4242, "20240416").await,
        Err(CoreError::NotFound(_))
    ));

    repo.delete_task(task.id).await.unwrap();
    assert!(repo.find_task_by_id(task.id).await.unwrap().is_none());
    assert!(matches!(
        repo.delete_task(task.id).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_ids_are_not_reused() {
    let (repo, _temp_dir) = setup_test_db().await;
    let first = create_test_task(&repo, "First", "", "").await;
    repo.delete_task(first.id).await.unwrap();
    let second = create_test_task(&repo, "Second", "", "").await;
    assert!(second.id > first.id);
}

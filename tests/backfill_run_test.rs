//! Integration tests for full backfill runs against in-memory fakes

mod common;

use common::*;
use garmin_backfill::core::transform::RecordKind;
use garmin_backfill::domain::PropertyValue;

fn provider_with_days() -> FakeProvider {
    FakeProvider::new()
        .with_activities(activity_history(5))
        .with_steps(date("2024-05-01"), 9000)
        .with_steps(date("2024-05-02"), 11000)
        .with_steps(date("2024-05-03"), 7000)
        .with_sleep(date("2024-05-01"), 27_000)
        .with_sleep(date("2024-05-03"), 25_200)
}

#[tokio::test]
async fn test_second_run_writes_nothing() {
    let store = InMemoryStore::new();
    let today = date("2024-05-04");

    let first = coordinator(
        provider_with_days(),
        store.clone(),
        CountingPacer::new(),
        settings(10, 100, 3),
    )
    .execute(today)
    .await;

    assert_eq!(first.activities.created, 5);
    assert_eq!(first.steps.created, 3);
    assert_eq!(first.sleep.created, 2);
    assert_eq!(first.sleep.skipped_no_data, 1);
    assert!(first.is_successful());
    let pages_after_first = store.pages().len();
    assert_eq!(pages_after_first, 10);

    let second = coordinator(
        provider_with_days(),
        store.clone(),
        CountingPacer::new(),
        settings(10, 100, 3),
    )
    .execute(today)
    .await;

    assert_eq!(second.total_created(), 0);
    assert_eq!(second.activities.skipped_duplicate, 5);
    assert_eq!(second.steps.skipped_duplicate, 3);
    assert_eq!(second.sleep.skipped_duplicate, 2);
    assert_eq!(store.pages().len(), pages_after_first);
}

#[tokio::test]
async fn test_existing_page_suppresses_create() {
    let store = InMemoryStore::new();
    let today = date("2024-05-02");

    // Seed the steps database with the only day of the range
    coordinator(
        FakeProvider::new().with_steps(date("2024-05-01"), 4000),
        store.clone(),
        CountingPacer::new(),
        settings(0, 100, 1),
    )
    .execute(today)
    .await;
    assert_eq!(store.pages_in(STEPS_DB).len(), 1);

    // Different step count for the same day: the date alone is the key
    let summary = coordinator(
        FakeProvider::new().with_steps(date("2024-05-01"), 12_345),
        store.clone(),
        CountingPacer::new(),
        settings(0, 100, 1),
    )
    .execute(today)
    .await;

    assert_eq!(summary.steps.skipped_duplicate, 1);
    assert_eq!(summary.steps.created, 0);
    let pages = store.pages_in(STEPS_DB);
    assert_eq!(pages.len(), 1);
    assert_eq!(
        pages[0].properties.get("Total Steps"),
        Some(&PropertyValue::number(4000.0))
    );
}

#[tokio::test]
async fn test_same_name_on_another_day_is_not_a_duplicate() {
    let store = InMemoryStore::new();
    let provider = FakeProvider::new().with_activities(vec![
        activity("Morning Run", "2024-05-01 06:00:00"),
        activity("Morning Run", "2024-05-02 06:00:00"),
        activity("Morning Run", "2024-05-02 06:00:00"),
    ]);

    let summary = coordinator(provider, store.clone(), CountingPacer::new(), settings(10, 10, 0))
        .execute(date("2024-05-04"))
        .await;

    assert_eq!(summary.activities.created, 2);
    assert_eq!(summary.activities.skipped_duplicate, 1);
    assert_eq!(store.pages_in(ACTIVITIES_DB).len(), 2);
}

#[tokio::test]
async fn test_dry_run_never_creates() {
    let store = InMemoryStore::new();
    let mut dry = settings(10, 100, 3);
    dry.dry_run = true;

    let summary = coordinator(provider_with_days(), store.clone(), CountingPacer::new(), dry)
        .execute(date("2024-05-04"))
        .await;

    assert!(summary.dry_run);
    assert!(store.pages().is_empty());
    // Would-be writes are still reported, and the guard still ran
    assert_eq!(summary.activities.created, 5);
    assert_eq!(summary.steps.created, 3);
    assert_eq!(summary.sleep.created, 2);
    assert_eq!(store.query_count(), 10);
}

#[tokio::test]
async fn test_pacer_runs_once_per_provider_call() {
    let provider = FakeProvider::new()
        .with_activities(activity_history(250))
        .failing_steps_on(date("2024-05-02"));
    let calls = provider.call_log();
    let pacer = CountingPacer::new();

    coordinator(provider, InMemoryStore::new(), pacer.clone(), settings(250, 100, 3))
        .execute(date("2024-05-04"))
        .await;

    // 3 activity pages, then steps and sleep for 3 days
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 9);
    assert_eq!(pacer.count(), calls.len());
}

#[tokio::test]
async fn test_steps_failure_does_not_block_sleep() {
    let store = InMemoryStore::new();
    let provider = FakeProvider::new()
        .with_steps(date("2024-05-01"), 9000)
        .with_steps(date("2024-05-03"), 9000)
        .with_sleep(date("2024-05-02"), 27_000)
        .failing_steps_on(date("2024-05-02"))
        .failing_sleep_on(date("2024-05-03"));

    let summary = coordinator(provider, store.clone(), CountingPacer::new(), settings(0, 100, 3))
        .execute(date("2024-05-04"))
        .await;

    assert_eq!(summary.days_visited, 3);
    assert_eq!(summary.steps.created, 2);
    assert_eq!(summary.steps.errored, 1);
    assert_eq!(summary.sleep.created, 1);
    assert_eq!(summary.sleep.errored, 1);
    assert_eq!(summary.errors.len(), 2);
    assert!(!summary.is_successful());
    assert_eq!(summary.errors[0].kind, RecordKind::Steps);
    assert_eq!(summary.errors[0].label, "2024-05-02");
}

#[tokio::test]
async fn test_create_failure_is_counted_and_run_continues() {
    let store = InMemoryStore::new();
    store.fail_creates_in(ACTIVITIES_DB);

    let summary = coordinator(
        provider_with_days(),
        store.clone(),
        CountingPacer::new(),
        settings(10, 100, 3),
    )
    .execute(date("2024-05-04"))
    .await;

    assert_eq!(summary.activities.errored, 5);
    assert_eq!(summary.steps.created, 3);
    assert_eq!(summary.sleep.created, 2);
    assert!(store.pages_in(ACTIVITIES_DB).is_empty());
}

#[tokio::test]
async fn test_created_activity_page_matches_example() {
    let store = InMemoryStore::new();
    let provider =
        FakeProvider::new().with_activities(vec![activity("Morning Run", "2024-05-01T06:00:00")]);

    coordinator(provider, store.clone(), CountingPacer::new(), settings(1, 100, 0))
        .execute(date("2024-05-04"))
        .await;

    let pages = store.pages_in(ACTIVITIES_DB);
    assert_eq!(pages.len(), 1);
    let props = &pages[0].properties;
    assert_eq!(
        props.get("Date"),
        Some(&PropertyValue::date("2024-05-01T06:00:00"))
    );
    assert_eq!(
        props.get("Activity Name").and_then(|v| v.as_text()),
        Some("Morning Run")
    );
    assert_eq!(
        props.get("Distance (km)").and_then(|v| v.as_number()),
        Some(5.0)
    );
    assert_eq!(
        props.get("Duration (min)").and_then(|v| v.as_number()),
        Some(30.0)
    );
    assert_eq!(
        props.get("Avg Pace").and_then(|v| v.as_text()),
        Some("6:40 min/km")
    );
    assert!(pages[0].icon.is_none());
}

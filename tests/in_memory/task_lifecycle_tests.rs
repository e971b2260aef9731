//! In-memory integration tests for task service flows.

use super::helpers::{TestService, clock, service};
use chrono::{TimeDelta, Utc};
use eyre::{ensure, eyre};
use mockable::DefaultClock;
use rstest::rstest;
use taskflow::task::{
    domain::{TaskId, TaskItem, TaskPriority, TaskStatus},
    services::TaskServiceError,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_fetch_round_trips(service: TestService, clock: DefaultClock) -> eyre::Result<()> {
    let due = Utc::now() + TimeDelta::days(2);
    let created = service
        .create_task(Some(
            TaskItem::new("Prepare theatre list", &clock)
                .with_description("Confirm anaesthetist availability")
                .with_priority(TaskPriority::High)
                .with_due_date(due),
        ))
        .await?;

    let fetched = service
        .get_task(created.id())
        .await?
        .ok_or_else(|| eyre!("created task should be retrievable"))?;

    ensure!(fetched == created, "fetched {fetched:?} != created {created:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_leaves_overdue_view_once_completed(
    service: TestService,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let yesterday = Utc::now() - TimeDelta::days(1);
    let created = service
        .create_task(Some(
            TaskItem::new("Lab review", &clock)
                .with_due_date(yesterday)
                .with_status(TaskStatus::Todo),
        ))
        .await?;

    let overdue = service.list_overdue().await?;
    ensure!(overdue.iter().any(|task| task.id() == created.id()));

    let completed = service
        .complete_task(created.id())
        .await?
        .ok_or_else(|| eyre!("task should exist"))?;
    ensure!(completed.status() == TaskStatus::Completed);
    ensure!(completed.completed_at().is_some());

    let overdue_after = service.list_overdue().await?;
    ensure!(overdue_after.iter().all(|task| task.id() != created.id()));

    let stored = service
        .get_task(created.id())
        .await?
        .ok_or_else(|| eyre!("task should still exist"))?;
    ensure!(stored.status() == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cancelled_past_due_task_stays_overdue(
    service: TestService,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let created = service
        .create_task(Some(
            TaskItem::new("Cancelled audit", &clock)
                .with_due_date(Utc::now() - TimeDelta::hours(3))
                .with_status(TaskStatus::Cancelled),
        ))
        .await?;

    let overdue = service.list_overdue().await?;

    ensure!(overdue.len() == 1);
    ensure!(overdue.iter().all(|task| task.id() == created.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_view_matches_filtered_listing(
    service: TestService,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let statuses = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Todo,
        TaskStatus::Cancelled,
        TaskStatus::Completed,
    ];
    for (index, status) in statuses.into_iter().enumerate() {
        service
            .create_task(Some(
                TaskItem::new(format!("Task {index}"), &clock).with_status(status),
            ))
            .await?;
    }

    let all = service.list_tasks().await?;
    for status in TaskStatus::ALL {
        let expected: Vec<TaskId> = all
            .iter()
            .filter(|task| task.status() == status)
            .map(TaskItem::id)
            .collect();
        let actual: Vec<TaskId> = service
            .list_by_status(status)
            .await?
            .iter()
            .map(TaskItem::id)
            .collect();
        ensure!(actual == expected, "{status}: {actual:?} != {expected:?}");
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_moves_status_freely(service: TestService, clock: DefaultClock) -> eyre::Result<()> {
    let mut task = service
        .create_task(Some(TaskItem::new("Rotate stock", &clock)))
        .await?;

    for status in [
        TaskStatus::Completed,
        TaskStatus::Todo,
        TaskStatus::Cancelled,
        TaskStatus::InProgress,
    ] {
        task.set_status(status);
        task = service
            .update_task(Some(task))
            .await?
            .ok_or_else(|| eyre!("task should exist"))?;
        ensure!(task.status() == status);
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_returns_none(
    service: TestService,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let ghost = TaskItem::new("Ghost", &clock).with_id(TaskId::new(321));

    let result = service.update_task(Some(ghost)).await?;

    ensure!(result.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_fetch_returns_none(service: TestService, clock: DefaultClock) -> eyre::Result<()> {
    let created = service
        .create_task(Some(TaskItem::new("Shred records", &clock)))
        .await?;

    ensure!(!service.delete_task(TaskId::new(created.id().value() + 100)).await?);
    ensure!(service.delete_task(created.id()).await?);
    ensure!(service.get_task(created.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn oversized_title_surfaces_repository_error(service: TestService) -> eyre::Result<()> {
    let result = service
        .create_task(Some(TaskItem::new("x".repeat(201), &DefaultClock)))
        .await;

    ensure!(
        matches!(result, Err(TaskServiceError::Repository(_))),
        "expected repository error, got {result:?}"
    );
    ensure!(service.list_tasks().await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_cannot_rewrite_creation_time(
    service: TestService,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let older = service
        .create_task(Some(TaskItem::new("older", &clock)))
        .await?;
    std::thread::sleep(std::time::Duration::from_millis(2));
    service
        .create_task(Some(TaskItem::new("newer", &clock)))
        .await?;

    let far_future = Utc::now() + TimeDelta::days(365 * 70);
    let updated = service
        .update_task(Some(older.clone().with_created_at(far_future)))
        .await?
        .ok_or_else(|| eyre!("task should exist"))?;
    ensure!(updated.created_at() == older.created_at());

    let titles: Vec<String> = service
        .list_tasks()
        .await?
        .iter()
        .map(|task| task.title().to_owned())
        .collect();
    ensure!(titles == vec!["newer", "older"], "listing reordered: {titles:?}");
    Ok(())
}

//! When steps for task tracking BDD scenarios.

use super::world::{TaskTrackingWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use taskflow::task::domain::{TaskId, TaskItem};

#[when("the task is marked complete")]
fn task_marked_complete(world: &mut TaskTrackingWorld) -> Result<(), eyre::Report> {
    let id = world.created()?.id();
    let completed = run_async(world.service.complete_task(id))
        .wrap_err("complete task in scenario")?
        .ok_or_else(|| eyre::eyre!("task {id} vanished before completion"))?;
    world.created_task = Some(completed);
    Ok(())
}

#[when("the overdue tasks are listed")]
fn overdue_tasks_listed(world: &mut TaskTrackingWorld) -> Result<(), eyre::Report> {
    let overdue = run_async(world.service.list_overdue()).wrap_err("list overdue tasks")?;
    world.overdue_listing = Some(overdue);
    Ok(())
}

#[when("the task with id {id:u64} is updated")]
fn task_with_id_updated(world: &mut TaskTrackingWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(i64::try_from(id).wrap_err("task id out of range")?);
    let ghost = TaskItem::new("Ghost", &DefaultClock).with_id(task_id);
    let result = run_async(world.service.update_task(Some(ghost)))
        .wrap_err("update task in scenario")?;
    world.update_result = Some(result);
    Ok(())
}

#[when("the task with id {id:u64} is deleted")]
fn task_with_id_deleted(world: &mut TaskTrackingWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(i64::try_from(id).wrap_err("task id out of range")?);
    let deleted =
        run_async(world.service.delete_task(task_id)).wrap_err("delete task in scenario")?;
    world.delete_result = Some(deleted);
    Ok(())
}

#[when("the created task is deleted")]
fn created_task_deleted(world: &mut TaskTrackingWorld) -> Result<(), eyre::Report> {
    let id = world.created()?.id();
    let deleted = run_async(world.service.delete_task(id)).wrap_err("delete created task")?;
    world.delete_result = Some(deleted);
    Ok(())
}

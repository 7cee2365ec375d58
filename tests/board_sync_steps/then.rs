//! Then steps for board synchronization BDD scenarios.

use super::world::{BoardWorld, column};
use rstest_bdd_macros::then;
use sprintboard::board::{
    domain::{SprintId, TaskId},
    services::{BoardSyncError, DropOutcome, SyncPhase},
};

#[then(r#"column "{status}" contains task #{task_id:u64}"#)]
fn column_contains(world: &BoardWorld, status: String, task_id: u64) -> Result<(), eyre::Report> {
    let key = column(&status)?;
    let board = world.built_board()?;
    let found = board
        .tasks_in(&key)
        .iter()
        .any(|task| task.id() == TaskId::new(task_id));
    if !found {
        return Err(eyre::eyre!("task {task_id} is not in column {key}"));
    }
    Ok(())
}

#[then(r#"task #{task_id:u64} belongs to sprint {sprint_id:u64}"#)]
fn task_in_sprint(world: &BoardWorld, task_id: u64, sprint_id: u64) -> Result<(), eyre::Report> {
    let board = world.built_board()?;
    let task = board
        .snapshot()
        .get(TaskId::new(task_id))
        .cloned()
        .ok_or_else(|| eyre::eyre!("task {task_id} is not on the board"))?;
    eyre::ensure!(
        task.sprint_id() == Some(SprintId::new(sprint_id)),
        "expected sprint {sprint_id}, found {:?}",
        task.sprint_id()
    );
    Ok(())
}

#[then(r#"task #{task_id:u64} has no sprint"#)]
fn task_without_sprint(world: &BoardWorld, task_id: u64) -> Result<(), eyre::Report> {
    let board = world.built_board()?;
    let sprint = board
        .snapshot()
        .get(TaskId::new(task_id))
        .map(|task| task.sprint_id())
        .ok_or_else(|| eyre::eyre!("task {task_id} is not on the board"))?;
    eyre::ensure!(sprint.is_none(), "expected no sprint, found {sprint:?}");
    Ok(())
}

#[then(r#"the server recorded task #{task_id:u64} in status "{status}""#)]
fn server_recorded(world: &BoardWorld, task_id: u64, status: String) -> Result<(), eyre::Report> {
    let key = column(&status)?;
    let stored = world
        .api
        .stored_task(TaskId::new(task_id))
        .ok_or_else(|| eyre::eyre!("server has no task {task_id}"))?;
    eyre::ensure!(
        stored.status() == &key,
        "server has task {task_id} in {}, expected {key}",
        stored.status()
    );
    Ok(())
}

fn phase(world: &BoardWorld, task_id: u64) -> Result<SyncPhase, eyre::Report> {
    Ok(world.built_board()?.phase_of(TaskId::new(task_id)))
}

#[then(r#"task #{task_id:u64} is idle"#)]
fn task_is_idle(world: &BoardWorld, task_id: u64) -> Result<(), eyre::Report> {
    let current = phase(world, task_id)?;
    eyre::ensure!(current == SyncPhase::Idle, "expected idle, found {current:?}");
    Ok(())
}

#[then(r#"task #{task_id:u64} is unsynced"#)]
fn task_is_unsynced(world: &BoardWorld, task_id: u64) -> Result<(), eyre::Report> {
    let current = phase(world, task_id)?;
    eyre::ensure!(
        current == SyncPhase::Unsynced,
        "expected unsynced, found {current:?}"
    );
    Ok(())
}

#[then(r#"an error notification mentions "{text}""#)]
fn error_mentions(world: &BoardWorld, text: String) -> Result<(), eyre::Report> {
    let errors = world.notifier.errors();
    eyre::ensure!(
        errors.iter().any(|message| message.contains(&text)),
        "no error notification mentions {text:?}: {errors:?}"
    );
    Ok(())
}

#[then("the drop was skipped")]
fn drop_was_skipped(world: &BoardWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop outcome"))?;
    eyre::ensure!(
        matches!(outcome, DropOutcome::Skipped(_)),
        "expected a skipped drop, got {outcome:?}"
    );
    Ok(())
}

#[then("no status update was sent")]
fn no_status_update(world: &BoardWorld) -> Result<(), eyre::Report> {
    let calls = world.api.status_updates();
    eyre::ensure!(calls.is_empty(), "unexpected status updates: {calls:?}");
    Ok(())
}

#[then(r#"the task form is rejected for "{field}""#)]
fn form_rejected(world: &BoardWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_create
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result"))?;
    match result {
        Err(BoardSyncError::Validation(err)) if err.has_issue_for(&field) => Ok(()),
        other => Err(eyre::eyre!("expected a validation error for {field}, got {other:?}")),
    }
}

#[then("no task was sent to the server")]
fn no_task_sent(world: &BoardWorld) -> Result<(), eyre::Report> {
    let calls = world.api.create_calls();
    eyre::ensure!(calls == 0, "expected no create calls, found {calls}");
    Ok(())
}

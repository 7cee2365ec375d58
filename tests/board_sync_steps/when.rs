//! When steps for board synchronization BDD scenarios.

use super::world::{BoardWorld, column, run_async};
use rstest_bdd_macros::when;
use sprintboard::board::{domain::TaskId, services::CreateTaskRequest};

#[when(r#"task #{task_id:u64} is dragged onto column "{status}""#)]
fn drag_task(world: &mut BoardWorld, task_id: u64, status: String) -> Result<(), eyre::Report> {
    let target = column(&status)?;
    let board = world.board();
    let task = board
        .snapshot()
        .get(TaskId::new(task_id))
        .cloned()
        .ok_or_else(|| eyre::eyre!("task {task_id} is not on the board"))?;

    board.begin_drag(&task);
    world.last_outcome = Some(run_async(board.drop_on_column(&target)));
    Ok(())
}

#[when("the server accepts status updates again")]
fn server_accepts_updates(world: &mut BoardWorld) {
    world.api.fail_status_updates(false);
}

#[when("unsynced moves are retried")]
fn retry_unsynced(world: &mut BoardWorld) {
    let board = world.board();
    world.last_retry = Some(run_async(board.retry_unsynced()));
}

#[when(r#"a task without a title is created for assignee "{assignee}""#)]
fn create_untitled_task(world: &mut BoardWorld, assignee: String) {
    let board = world.board();
    let request = CreateTaskRequest::new("", assignee);
    world.last_create = Some(run_async(board.create_task(request)));
}

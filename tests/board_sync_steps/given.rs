//! Given steps for board synchronization BDD scenarios.

use super::world::{BoardWorld, PROJECT, column, run_async};
use rstest_bdd_macros::given;
use sprintboard::board::{
    domain::{SprintId, SprintRef, Task, TaskId},
    services::ReconcilePolicy,
};

#[given(r#"an active sprint "{name}" with id {sprint_id:u64}"#)]
fn active_sprint(world: &mut BoardWorld, name: String, sprint_id: u64) {
    let sprint = SprintRef::active(SprintId::new(sprint_id), name);
    world.api.seed_sprint(PROJECT, sprint.clone());
    world.sprint = Some(sprint);
}

#[given("the board reverts rejected moves")]
fn board_reverts(world: &mut BoardWorld) {
    world.settings = world
        .settings
        .clone()
        .with_reconcile(ReconcilePolicy::Revert);
}

#[given(r#"a task #{task_id:u64} "{title}" in column "{status}""#)]
fn task_in_column(
    world: &mut BoardWorld,
    task_id: u64,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task = Task::new(TaskId::new(task_id), title, column(&status)?);
    world.api.seed_task(PROJECT, task);
    Ok(())
}

#[given("the board is loaded")]
fn board_is_loaded(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board();
    let report = run_async(board.load_board());
    if !report.is_complete() {
        return Err(eyre::eyre!("board failed to load: {:?}", report.failed));
    }
    Ok(())
}

#[given("the server rejects status updates")]
fn server_rejects_updates(world: &mut BoardWorld) {
    world.api.fail_status_updates(true);
}

//! Behaviour tests for optimistic board synchronization.

#[path = "board_sync_steps/mod.rs"]
mod board_sync_steps_defs;

use board_sync_steps_defs::world::{BoardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "Move a backlog task into the active sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_backlog_task_into_sprint(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "Moving a task back to the backlog clears its sprint"
)]
#[tokio::test(flavor = "multi_thread")]
async fn move_back_to_backlog_clears_sprint(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "Dropping a task on its own column does nothing"
)]
#[tokio::test(flavor = "multi_thread")]
async fn drop_on_own_column_is_skipped(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "A rejected move is flagged as unsynced"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_flagged(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "A rejected move is reverted when the board reverts failures"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_is_reverted(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "Unsynced moves are retried once the server recovers"
)]
#[tokio::test(flavor = "multi_thread")]
async fn unsynced_moves_are_retried(world: BoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/board_sync.feature",
    name = "A task form without a title is rejected locally"
)]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_is_rejected(world: BoardWorld) {
    let _ = world;
}

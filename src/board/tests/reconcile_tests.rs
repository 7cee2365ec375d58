//! Reconciliation of status changes the server rejects.

use rstest::rstest;

use crate::board::{
    domain::TaskId,
    ports::NotificationLevel,
    services::{
        BoardSettings, BoardSyncError, DropOutcome, ReconcilePolicy, Reconciliation, SyncPhase,
    },
};

use super::support::{ACTIVE_SPRINT, Harness, active_sprint, harness, status};

fn reverting() -> Harness {
    Harness::new(
        BoardSettings::default().with_reconcile(ReconcilePolicy::Revert),
        Some(active_sprint()),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_move_stays_put_and_is_flagged_unsynced(harness: Harness) {
    let task = harness.seed(1, "Draft roadmap", "BACKLOG");
    harness.load().await;
    harness.api.fail_status_updates(true);
    harness.board.begin_drag(&task);

    let outcome = harness.board.drop_on_column(&status("TODO")).await;

    let DropOutcome::Failed {
        task_id,
        error,
        reconciliation,
    } = outcome
    else {
        panic!("expected a failed drop");
    };
    assert_eq!(task_id, task.id());
    assert!(matches!(error, BoardSyncError::StatusUpdate { .. }));
    assert_eq!(reconciliation, Reconciliation::KeptUnsynced);
    assert_eq!(harness.ids_in("TODO"), [1]);
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::Unsynced);
    assert!(harness.board.dragged_task().is_none());

    let errors = harness.notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(
        errors.iter().all(|message| message.contains("Draft roadmap") && message.contains("To Do")),
        "unexpected notification: {errors:?}"
    );

    let unsynced = harness.board.unsynced_tasks();
    assert_eq!(unsynced.len(), 1);
    assert!(unsynced.iter().all(|card| card.task_id == task.id()
        && card.status == status("TODO")
        && card.sprint_id == Some(ACTIVE_SPRINT)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn revert_policy_restores_original_position() {
    let harness = reverting();
    harness.seed(1, "First", "BACKLOG");
    let task = harness.seed(2, "Second", "BACKLOG");
    harness.seed(3, "Third", "BACKLOG");
    harness.load().await;
    harness.api.fail_status_updates(true);
    harness.board.begin_drag(&task);

    let outcome = harness.board.drop_on_column(&status("IN_REVIEW")).await;

    assert!(matches!(
        outcome,
        DropOutcome::Failed {
            reconciliation: Reconciliation::Reverted,
            ..
        }
    ));
    assert_eq!(harness.ids_in("BACKLOG"), [1, 2, 3]);
    assert!(harness.ids_in("IN_REVIEW").is_empty());
    assert_eq!(harness.card(2).sprint_id(), None);
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::Idle);
    assert!(harness.board.unsynced_tasks().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_failure_does_not_touch_newer_move() {
    let harness = reverting();
    let task = harness.seed(1, "Draft roadmap", "BACKLOG");
    harness.load().await;

    harness.board.begin_drag(&task);
    let older = harness
        .board
        .apply_drop(&status("TODO"))
        .expect("first drop applies");
    harness.board.begin_drag(&harness.card(1));
    let newer = harness
        .board
        .apply_drop(&status("IN_PROGRESS"))
        .expect("second drop applies");

    harness.api.fail_status_updates(true);
    let stale = harness.board.confirm_move(older).await;

    assert!(matches!(
        stale,
        DropOutcome::Failed {
            reconciliation: Reconciliation::Superseded,
            ..
        }
    ));
    assert_eq!(harness.ids_in("IN_PROGRESS"), [1]);
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::OptimisticMoved);

    harness.api.fail_status_updates(false);
    let current = harness.board.confirm_move(newer).await;

    assert!(current.is_confirmed());
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::Idle);
    assert_eq!(harness.ids_in("IN_PROGRESS"), [1]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_success_keeps_newer_move_pending(harness: Harness) {
    let task = harness.seed(1, "Draft roadmap", "BACKLOG");
    harness.load().await;

    harness.board.begin_drag(&task);
    let older = harness
        .board
        .apply_drop(&status("TODO"))
        .expect("first drop applies");
    harness.board.begin_drag(&harness.card(1));
    harness
        .board
        .apply_drop(&status("DONE"))
        .expect("second drop applies");
    harness.board.end_drag();

    let outcome = harness.board.confirm_move(older).await;

    assert!(outcome.is_confirmed());
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::OptimisticMoved);
    assert_eq!(harness.ids_in("DONE"), [1]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn retry_unsynced_confirms_once_server_recovers(harness: Harness) {
    let first = harness.seed(1, "First", "BACKLOG");
    let second = harness.seed(2, "Second", "BACKLOG");
    harness.load().await;
    harness.api.fail_status_updates(true);
    harness.board.begin_drag(&first);
    harness.board.drop_on_column(&status("TODO")).await;
    harness.board.begin_drag(&second);
    harness.board.drop_on_column(&status("DONE")).await;

    let still_failing = harness.board.retry_unsynced().await;
    assert!(still_failing.confirmed.is_empty());
    assert_eq!(still_failing.still_unsynced, [first.id(), second.id()]);

    harness.api.fail_status_updates(false);
    let report = harness.board.retry_unsynced().await;

    assert_eq!(report.confirmed, [first.id(), second.id()]);
    assert!(report.still_unsynced.is_empty());
    assert!(harness.board.unsynced_tasks().is_empty());
    let stored = harness.api.stored_task(TaskId::new(2)).expect("task stored");
    assert_eq!(stored.status(), &status("DONE"));
    assert_eq!(
        harness.notifier.messages_at(NotificationLevel::Success),
        ["Synced 2 task(s)"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_clears_unsynced_flag(harness: Harness) {
    let task = harness.seed(1, "Draft roadmap", "BACKLOG");
    harness.load().await;
    harness.api.fail_status_updates(true);
    harness.board.begin_drag(&task);
    harness.board.drop_on_column(&status("TODO")).await;

    harness
        .board
        .load_column(&status("BACKLOG"))
        .await
        .expect("backlog reloads");

    assert_eq!(harness.ids_in("BACKLOG"), [1]);
    assert_eq!(harness.board.phase_of(task.id()), SyncPhase::Idle);
    assert!(harness.board.unsynced_tasks().is_empty());
}

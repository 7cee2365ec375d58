//! Tests for bucket bookkeeping in the board snapshot.

use crate::board::domain::{BoardDomainError, BoardLayout, BoardSnapshot, Task, TaskId, TaskLocation};
use rstest::{fixture, rstest};

use super::support::status;

fn task(id: u64, column: &str) -> Task {
    Task::new(TaskId::new(id), format!("Task {id}"), status(column))
}

fn ids(snapshot: &BoardSnapshot, column: &str) -> Vec<u64> {
    snapshot
        .tasks_in(&status(column))
        .iter()
        .map(|task| task.id().value())
        .collect()
}

#[fixture]
fn snapshot() -> BoardSnapshot {
    let mut snapshot = BoardSnapshot::new(&BoardLayout::default());
    snapshot
        .replace_column(&status("BACKLOG"), vec![task(1, "BACKLOG"), task(2, "BACKLOG")])
        .expect("backlog loads");
    snapshot
        .replace_column(&status("TODO"), vec![task(3, "TODO")])
        .expect("todo loads");
    snapshot
}

#[rstest]
fn new_snapshot_has_one_empty_bucket_per_column() {
    let snapshot = BoardSnapshot::new(&BoardLayout::default());
    assert_eq!(snapshot.buckets().len(), 5);
    assert!(snapshot.is_empty());
}

#[rstest]
fn replace_column_removes_copies_from_other_buckets(mut snapshot: BoardSnapshot) {
    snapshot
        .replace_column(&status("TODO"), vec![task(3, "TODO"), task(1, "TODO")])
        .expect("todo reloads");

    assert_eq!(ids(&snapshot, "BACKLOG"), [2]);
    assert_eq!(ids(&snapshot, "TODO"), [3, 1]);
    assert_eq!(snapshot.len(), 3);
}

#[rstest]
fn replace_column_rejects_mismatched_status_and_keeps_board(mut snapshot: BoardSnapshot) {
    let result = snapshot.replace_column(&status("TODO"), vec![task(9, "DONE")]);

    assert_eq!(
        result,
        Err(BoardDomainError::StatusMismatch {
            task_id: TaskId::new(9),
            expected: status("TODO"),
            actual: status("DONE"),
        })
    );
    assert_eq!(ids(&snapshot, "TODO"), [3]);
}

#[rstest]
fn replace_column_rejects_unknown_column(mut snapshot: BoardSnapshot) {
    let result = snapshot.replace_column(&status("ARCHIVED"), Vec::new());
    assert_eq!(result, Err(BoardDomainError::UnknownColumn(status("ARCHIVED"))));
}

#[rstest]
fn insert_appends_and_keeps_a_single_copy(mut snapshot: BoardSnapshot) {
    let mut moved = task(1, "BACKLOG");
    moved.relocate(status("TODO"), None);

    snapshot.insert(moved).expect("todo is a column");

    assert_eq!(ids(&snapshot, "BACKLOG"), [2]);
    assert_eq!(ids(&snapshot, "TODO"), [3, 1]);
}

#[rstest]
fn insert_at_clamps_the_index(mut snapshot: BoardSnapshot) {
    snapshot.insert_at(task(4, "BACKLOG"), 0).expect("backlog is a column");
    snapshot.insert_at(task(5, "BACKLOG"), 99).expect("backlog is a column");

    assert_eq!(ids(&snapshot, "BACKLOG"), [4, 1, 2, 5]);
}

#[rstest]
fn remove_reports_previous_location(mut snapshot: BoardSnapshot) {
    let (location, removed) = snapshot.remove(TaskId::new(2)).expect("task 2 is on the board");

    assert_eq!(
        location,
        TaskLocation {
            status: status("BACKLOG"),
            index: 1,
        }
    );
    assert_eq!(removed.id(), TaskId::new(2));
    assert!(!snapshot.contains(TaskId::new(2)));
    assert!(snapshot.remove(TaskId::new(2)).is_none());
}

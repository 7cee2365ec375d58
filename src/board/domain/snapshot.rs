//! Client-side board snapshot: tasks grouped into ordered column buckets.
//!
//! Every mutation keeps a task in at most one bucket, and only ever places
//! a task in the bucket matching its status.

use super::{BoardDomainError, BoardLayout, Column, StatusKey, Task, TaskId};

/// One column and the tasks currently believed to be in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    column: Column,
    tasks: Vec<Task>,
}

impl Bucket {
    /// Returns the column.
    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the tasks in display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

/// Position of a task on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    /// Column holding the task.
    pub status: StatusKey,
    /// Index within the column.
    pub index: usize,
}

/// Mapping from column to the ordered tasks believed to be in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    buckets: Vec<Bucket>,
}

impl BoardSnapshot {
    /// Creates an empty snapshot with one bucket per layout column.
    #[must_use]
    pub fn new(layout: &BoardLayout) -> Self {
        let buckets = layout
            .columns()
            .iter()
            .map(|column| Bucket {
                column: column.clone(),
                tasks: Vec::new(),
            })
            .collect();
        Self { buckets }
    }

    /// Returns the buckets in layout order.
    #[must_use]
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns the tasks in `status`, or an empty slice for unknown columns.
    #[must_use]
    pub fn tasks_in(&self, status: &StatusKey) -> &[Task] {
        self.bucket(status).map(Bucket::tasks).unwrap_or_default()
    }

    /// Returns the total number of tasks on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.tasks.len()).sum()
    }

    /// Returns whether the board holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.tasks.is_empty())
    }

    /// Finds where a task currently sits.
    #[must_use]
    pub fn locate(&self, task_id: TaskId) -> Option<TaskLocation> {
        self.buckets.iter().find_map(|bucket| {
            bucket
                .tasks
                .iter()
                .position(|task| task.id() == task_id)
                .map(|index| TaskLocation {
                    status: bucket.column.key().clone(),
                    index,
                })
        })
    }

    /// Returns the task with `task_id`, if present.
    #[must_use]
    pub fn get(&self, task_id: TaskId) -> Option<&Task> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.tasks.iter())
            .find(|task| task.id() == task_id)
    }

    /// Returns whether the task is on the board.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.get(task_id).is_some()
    }

    /// Replaces the contents of `status` with `tasks`, in order.
    ///
    /// Tasks in the new contents are removed from every other bucket.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] when `status` is not a
    /// column and [`BoardDomainError::StatusMismatch`] when a task's status
    /// differs from `status`; the board is left unchanged.
    pub fn replace_column(
        &mut self,
        status: &StatusKey,
        tasks: Vec<Task>,
    ) -> Result<(), BoardDomainError> {
        if let Some(stray) = tasks.iter().find(|task| task.status() != status) {
            return Err(BoardDomainError::StatusMismatch {
                task_id: stray.id(),
                expected: status.clone(),
                actual: stray.status().clone(),
            });
        }
        if self.bucket(status).is_none() {
            return Err(BoardDomainError::UnknownColumn(status.clone()));
        }
        for bucket in &mut self.buckets {
            if bucket.column.key() != status {
                bucket
                    .tasks
                    .retain(|existing| !tasks.iter().any(|task| task.id() == existing.id()));
            }
        }
        if let Some(bucket) = self.bucket_mut(status) {
            bucket.tasks = tasks;
        }
        Ok(())
    }

    /// Appends `task` to the bucket of its status, removing any earlier copy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] when the task's status is
    /// not a column; the board is left unchanged.
    pub fn insert(&mut self, task: Task) -> Result<(), BoardDomainError> {
        let index = self.tasks_in(task.status()).len();
        self.insert_at(task, index)
    }

    /// Inserts `task` at `index` (clamped) in the bucket of its status,
    /// removing any earlier copy.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownColumn`] when the task's status is
    /// not a column; the board is left unchanged.
    pub fn insert_at(&mut self, task: Task, index: usize) -> Result<(), BoardDomainError> {
        if self.bucket(task.status()).is_none() {
            return Err(BoardDomainError::UnknownColumn(task.status().clone()));
        }
        self.remove(task.id());
        let status = task.status().clone();
        if let Some(bucket) = self.bucket_mut(&status) {
            let position = index.min(bucket.tasks.len());
            bucket.tasks.insert(position, task);
        }
        Ok(())
    }

    /// Removes a task, returning where it was and the task itself.
    pub fn remove(&mut self, task_id: TaskId) -> Option<(TaskLocation, Task)> {
        let location = self.locate(task_id)?;
        let bucket = self.bucket_mut(&location.status)?;
        let task = bucket.tasks.remove(location.index);
        Some((location, task))
    }

    fn bucket(&self, status: &StatusKey) -> Option<&Bucket> {
        self.buckets
            .iter()
            .find(|bucket| bucket.column.key() == status)
    }

    fn bucket_mut(&mut self, status: &StatusKey) -> Option<&mut Bucket> {
        self.buckets
            .iter_mut()
            .find(|bucket| bucket.column.key() == status)
    }
}

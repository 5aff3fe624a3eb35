//! Ordered, densely-packed task collection.
//!
//! # Responsibility
//! - Hold tasks in insertion order with zero-based index access.
//! - Validate indices against the live size before every use.
//! - Answer date and keyword queries with independent result lists.
//!
//! # Invariants
//! - Removing an element shifts all later elements down by one; no gaps.
//! - Destructive or flagging access to an empty list reports the empty-list
//!   condition, not an index-out-of-range one.

use crate::error::{DomainError, TasklineResult};
use crate::model::date_time::DateTimeValue;
use crate::model::task::Task;

/// Zero-indexed, densely-packed sequence of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Appends a task. Never fails.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, index: usize) -> TasklineResult<&Task> {
        self.check_index(index)?;
        Ok(&self.tasks[index])
    }

    pub fn get_mut(&mut self, index: usize) -> TasklineResult<&mut Task> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }

    /// Removes and returns the task at `index`; later elements shift down.
    pub fn remove(&mut self, index: usize) -> TasklineResult<Task> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Flags the task at `index` as done and returns it for messaging.
    pub fn mark(&mut self, index: usize) -> TasklineResult<&Task> {
        let task = self.get_mut(index)?;
        task.mark();
        Ok(task)
    }

    /// Flags the task at `index` as not done and returns it for messaging.
    pub fn unmark(&mut self, index: usize) -> TasklineResult<&Task> {
        let task = self.get_mut(index)?;
        task.unmark();
        Ok(task)
    }

    /// Empties the list. The caller distinguishes "was already empty" for its
    /// acknowledgement message.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Returns an independent list of tasks occurring at `instant`:
    /// deadline-bound tasks due exactly then, and time-ranged tasks whose
    /// interval contains it. Undated tasks never match. Order is preserved.
    pub fn find_tasks_occurring_on(&self, instant: &DateTimeValue) -> TaskList {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.occurs_on(instant))
            .cloned()
            .collect();
        TaskList { tasks }
    }

    /// Returns an independent list of tasks whose rendered line contains
    /// `keyword` as a contiguous, case-sensitive substring, in order.
    ///
    /// An empty keyword is a substring of every string and therefore matches
    /// everything; this is the defined behavior.
    pub fn find_tasks_with_keyword(&self, keyword: &str) -> TaskList {
        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.to_string().contains(keyword))
            .cloned()
            .collect();
        TaskList { tasks }
    }

    /// One persisted record per task in current order.
    pub fn to_records(&self) -> Vec<String> {
        self.tasks.iter().map(Task::to_record).collect()
    }

    fn check_index(&self, index: usize) -> TasklineResult<()> {
        if self.tasks.is_empty() {
            return Err(DomainError::EmptyList.into());
        }
        if index >= self.tasks.len() {
            return Err(DomainError::IndexOutOfRange {
                size: self.tasks.len(),
            }
            .into());
        }
        Ok(())
    }
}

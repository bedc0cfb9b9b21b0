//! Deferred work of a carousel
//!
//! The engine never sets timers itself. It queues [`Task`]s with a due time
//! and the host polls [`Scheduler::next_deadline`] to arm a single timer
//! that calls back into `tick`. Cancelled tasks simply disappear from the
//! queue, so a late host timer finds nothing to run.

use crate::window::WrapCorrection;

/// Identifier of a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw id value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Deferred action
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    /// Non-animated wrap correction after a step
    Teleport(WrapCorrection),
    /// Start dimming slides outside the window after a (re)build
    Reveal,
    /// Auto-rotation timer tick
    AutoRotate,
}

#[derive(Clone, Debug)]
struct Entry {
    id: TaskId,
    due_ms: f64,
    task: Task,
}

/// Queue of pending tasks ordered by due time
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run at `due_ms`
    pub fn schedule(&mut self, due_ms: f64, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, due_ms, task });
        id
    }

    /// Cancel a task, returning whether it was still pending
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every task
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check if a task is still pending
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Task of a pending id
    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.task)
    }

    /// Number of pending tasks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is pending
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest due time of any pending task
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.due_ms).reduce(f64::min)
    }

    /// Remove and return the earliest task due at `now_ms`
    ///
    /// Tasks with equal due times come out in scheduling order.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(TaskId, Task)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by(|(_, a), (_, b)| a.due_ms.total_cmp(&b.due_ms).then(a.id.cmp(&b.id)))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(index);
        Some((entry.id, entry.task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(350.0, Task::Teleport(WrapCorrection::Backward));
        scheduler.schedule(100.0, Task::Reveal);
        scheduler.schedule(5000.0, Task::AutoRotate);

        assert_eq!(scheduler.next_deadline(), Some(100.0));
        assert_eq!(scheduler.pop_due(400.0).map(|(_, t)| t), Some(Task::Reveal));
        assert_eq!(
            scheduler.pop_due(400.0).map(|(_, t)| t),
            Some(Task::Teleport(WrapCorrection::Backward))
        );
        assert_eq!(scheduler.pop_due(400.0), None);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_equal_due_times_keep_order() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(100.0, Task::Reveal);
        let second = scheduler.schedule(100.0, Task::AutoRotate);

        assert_eq!(scheduler.pop_due(100.0).map(|(id, _)| id), Some(first));
        assert_eq!(scheduler.pop_due(100.0).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(250.0, Task::Teleport(WrapCorrection::Forward));
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.task(id), Some(Task::Teleport(WrapCorrection::Forward)));

        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.next_deadline(), None);
        assert_eq!(scheduler.pop_due(1000.0), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule(0.0, Task::Reveal);
        scheduler.clear();
        let b = scheduler.schedule(0.0, Task::Reveal);
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle to a task queued on a [`Scheduler`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Entry<T> {
    id: TaskId,
    due: Duration,
    period: Option<Duration>,
    task: T,
}

/// Virtual-time queue of one-shot and repeating tasks.
///
/// Time only moves through [`Scheduler::advance`], the owner decides what a firing
/// means. Due tasks fire in due order, ties in scheduling order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn schedule_once(&mut self, delay: Duration, task: T) -> TaskId {
        self.push(delay, None, task)
    }

    /// Fires every `period`, first after one period. A zero period is raised to one
    /// millisecond so that `advance` always terminates.
    pub fn schedule_repeating(&mut self, period: Duration, task: T) -> TaskId {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), task)
    }

    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.entries.len();
        self.entries.clear();
        cancelled
    }

    /// Moves time forward by `elapsed` and returns every firing that became due.
    ///
    /// A repeating task that fell several periods behind fires once per period.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TaskId, T)> {
        let target = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();

        while let Some(index) = self.next_due(target) {
            let entry = &mut self.entries[index];
            self.now = entry.due;
            fired.push((entry.id, entry.task.clone()));

            let period = entry.period;
            match period {
                Some(period) => entry.due = entry.due.saturating_add(period),
                None => {
                    self.entries.remove(index);
                }
            }
        }

        self.now = target;
        fired
    }

    fn next_due(&self, target: Duration) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= target)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(index, _)| index)
    }

    fn push(&mut self, delay: Duration, period: Option<Duration>, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due: self.now.saturating_add(delay),
            period,
            task,
        });
        id
    }
}

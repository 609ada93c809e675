// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred tasks: a cancellable queue keyed by deadline.
//!
//! The queue never runs anything by itself. Its owner asks for
//! [`DeferredTasks::next_deadline`] to arm a timer and pops due tasks when it
//! fires. Debouncing is cancel‑and‑replace via [`DeferredTasks::reschedule`].
//!
//! ```
//! use understory_view_canvas::DeferredTasks;
//!
//! let mut tasks = DeferredTasks::new();
//! let quiet = tasks.schedule(500, "wheel finished");
//! tasks.schedule(0, "load");
//!
//! // Another wheel event pushes the quiet period out.
//! let quiet = tasks.reschedule(quiet, 700, "wheel finished");
//!
//! assert_eq!(tasks.next_deadline(), Some(0));
//! assert_eq!(tasks.pop_due(600).map(|(_, t)| t), Some("load"));
//! assert_eq!(tasks.pop_due(600), None);
//! assert_eq!(tasks.pop_due(700), Some((quiet, "wheel finished")));
//! ```

use alloc::vec::Vec;

/// Identifies one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    handle: TaskHandle,
    deadline: u64,
    task: T,
}

/// Ordered queue of `(handle, deadline_ms, task)`.
///
/// Due tasks pop in deadline order, first scheduled first among equal
/// deadlines.
#[derive(Clone, Debug)]
pub struct DeferredTasks<T> {
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for DeferredTasks<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredTasks<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Schedules `task` to become due at `deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            deadline: deadline_ms,
            task,
        });
        handle
    }

    /// Removes a task; returns it if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.handle == handle)?;
        Some(self.entries.remove(idx).task)
    }

    /// Cancels `handle` (if pending) and schedules `task` in its place.
    pub fn reschedule(&mut self, handle: TaskHandle, deadline_ms: u64, task: T) -> TaskHandle {
        self.cancel(handle);
        self.schedule(deadline_ms, task)
    }

    /// Returns `true` if `handle` is still pending.
    #[must_use]
    pub fn contains(&self, handle: TaskHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the first task due at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TaskHandle, T)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.deadline <= now_ms)
            .min_by_key(|(_, e)| (e.deadline, e.handle))
            .map(|(idx, _)| idx)?;
        let entry = self.entries.remove(idx);
        Some((entry.handle, entry.task))
    }

    /// Removes and returns every task due at `now_ms`, in firing order.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<(TaskHandle, T)> {
        let mut due = Vec::new();
        while let Some(entry) = self.pop_due(now_ms) {
            due.push(entry);
        }
        due
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

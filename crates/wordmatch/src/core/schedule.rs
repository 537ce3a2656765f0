//! Deferred tasks on the simulation clock. Nothing here sleeps: a task is
//! data that comes back out of [`Scheduler::advance`] once enough step time
//! has passed.

use std::time::Duration;

/// Cancel token returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub u64);

#[derive(Debug, Clone)]
struct Scheduled<T> {
    handle: TaskHandle,
    due: Duration,
    task: T,
}

/// Single-threaded queue of delayed tasks.
/// Due tasks come out in due-time order, ties in submission order.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Run `task` once `delay` of step time has elapsed.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            handle,
            due: self.now + delay,
            task,
        });
        handle
    }

    /// Drop a task before it fires. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.handle != handle);
        self.pending.len() != before
    }

    /// Move the clock forward and return every task that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now += dt;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|s| s.due <= now);
        self.pending = pending;

        // Handles grow monotonically, so they double as submission order.
        due.sort_by_key(|s| (s.due, s.handle.0));
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending tasks.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn task_fires_once_delay_elapses() {
        let mut s = Scheduler::new();
        s.schedule(ms(500), "revert");
        assert!(s.advance(ms(490)).is_empty());
        assert_eq!(s.advance(ms(10)), vec!["revert"]);
        assert!(s.is_empty());
        assert!(s.advance(ms(1000)).is_empty());
    }

    #[test]
    fn due_tasks_come_out_in_time_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(300), 'b');
        s.schedule(ms(100), 'a');
        s.schedule(ms(300), 'c');
        assert_eq!(s.advance(ms(500)), vec!['a', 'b', 'c']);
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut s = Scheduler::new();
        let h = s.schedule(ms(100), 1);
        assert!(s.cancel(h));
        assert!(s.is_empty());
        assert!(!s.cancel(h));
        assert!(s.advance(ms(200)).is_empty());
    }

    #[test]
    fn delay_is_measured_from_schedule_time() {
        let mut s = Scheduler::new();
        s.advance(ms(1000));
        s.schedule(ms(500), ());
        assert!(s.advance(ms(499)).is_empty());
        assert_eq!(s.advance(ms(1)).len(), 1);
    }
}

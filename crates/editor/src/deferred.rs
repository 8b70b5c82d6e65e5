// Chunk: docs/chunks/deferred_task - Cancellable quiet-period timers
//!
//! A single cancellable deadline.
//!
//! `DeferredTask` is the only timer primitive in the shell. It holds no
//! callback and spawns nothing: the owner arms it, and the drain loop polls
//! it with the current time. Re-arming replaces the previous deadline, so at
//! most one expiry is ever pending per task.

use std::time::{Duration, Instant};

/// A one-shot deadline that can be re-armed or cancelled.
#[derive(Debug, Clone)]
pub struct DeferredTask {
    delay: Duration,
    deadline: Option<Instant>,
}

impl DeferredTask {
    /// Creates a disarmed task that fires `delay` after each `arm`.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn from_millis(delay_ms: u64) -> Self {
        Self::new(Duration::from_millis(delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the task to fire `delay` after `now`, replacing any pending
    /// deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Arms the task only if it is not already pending.
    ///
    /// Returns true if the task was armed by this call.
    pub fn arm_if_idle(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.arm(now);
        true
    }

    /// Cancels the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true exactly once when `now` has reached the deadline, and
    /// disarms the task.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Returns the earliest of the given deadlines.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_disarmed() {
        let mut task = DeferredTask::from_millis(300);
        assert!(!task.is_armed());
        assert!(!task.poll(Instant::now()));
    }

    #[test]
    fn test_does_not_fire_before_deadline() {
        let mut task = DeferredTask::from_millis(300);
        let now = Instant::now();
        task.arm(now);
        assert!(!task.poll(now + Duration::from_millis(299)));
        assert!(task.is_armed());
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut task = DeferredTask::from_millis(300);
        let now = Instant::now();
        task.arm(now);
        assert!(task.poll(now + Duration::from_millis(300)));
        assert!(!task.poll(now + Duration::from_millis(301)));
        assert!(!task.is_armed());
    }

    #[test]
    fn test_rearm_extends_deadline() {
        let mut task = DeferredTask::from_millis(300);
        let start = Instant::now();
        task.arm(start);
        task.arm(start + Duration::from_millis(200));

        assert!(!task.poll(start + Duration::from_millis(350)));
        assert!(task.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut task = DeferredTask::from_millis(10);
        let now = Instant::now();
        task.arm(now);
        task.cancel();
        assert!(!task.poll(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_arm_if_idle_keeps_first_deadline() {
        let mut task = DeferredTask::from_millis(200);
        let now = Instant::now();
        assert!(task.arm_if_idle(now));
        assert!(!task.arm_if_idle(now + Duration::from_millis(150)));
        assert_eq!(task.deadline(), Some(now + Duration::from_millis(200)));
    }

    #[test]
    fn test_earliest_skips_disarmed() {
        let now = Instant::now();
        let later = now + Duration::from_millis(5);
        assert_eq!(earliest([None, Some(later), Some(now)]), Some(now));
        assert_eq!(earliest([None, None]), None);
    }
}

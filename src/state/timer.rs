//! Cancellable scheduled tasks for a single-threaded event loop.
//!
//! Each kind of task has at most one pending instance. Scheduling a task
//! bumps a monotonically increasing generation, so a token handed out for
//! an older schedule can never fire the newer one.

use std::time::{Duration, Instant};

/// The delayed work a picker performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Clear the debounce-derived loading flag after a quiet period.
    LoadingQuiet,
    /// Commit the first match after the search box lost focus.
    BlurCommit,
}

/// Identifies one scheduling of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    kind: TimerKind,
    generation: u64,
}

impl TimerToken {
    /// Task this token belongs to.
    pub fn kind(self) -> TimerKind {
        self.kind
    }

    /// Generation at scheduling time.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// A pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    /// Token identifying this schedule.
    pub token: TimerToken,
    /// When the task fires.
    pub due: Instant,
}

/// Pending tasks, at most one per kind.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    generation: u64,
    loading_quiet: Option<ScheduledTask>,
    blur_commit: Option<ScheduledTask>,
}

impl TimerQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: TimerKind) -> &mut Option<ScheduledTask> {
        match kind {
            TimerKind::LoadingQuiet => &mut self.loading_quiet,
            TimerKind::BlurCommit => &mut self.blur_commit,
        }
    }

    /// Schedule `kind` to fire `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, kind: TimerKind, now: Instant, delay: Duration) -> TimerToken {
        self.generation += 1;
        let token = TimerToken {
            kind,
            generation: self.generation,
        };
        *self.slot(kind) = Some(ScheduledTask {
            token,
            due: now + delay,
        });
        token
    }

    /// Drop the pending task of `kind`.
    pub fn cancel(&mut self, kind: TimerKind) {
        *self.slot(kind) = None;
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.loading_quiet = None;
        self.blur_commit = None;
    }

    /// Whether `kind` is waiting.
    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending(kind).is_some()
    }

    /// Pending task of `kind`, if any.
    pub fn pending(&self, kind: TimerKind) -> Option<ScheduledTask> {
        match kind {
            TimerKind::LoadingQuiet => self.loading_quiet,
            TimerKind::BlurCommit => self.blur_commit,
        }
    }

    /// Remove the task `token` refers to, if it is still the pending one.
    ///
    /// Returns false for stale or cancelled tokens.
    pub fn claim(&mut self, token: TimerToken) -> bool {
        let slot = self.slot(token.kind);
        match slot {
            Some(task) if task.token == token => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Tokens of all tasks due at `now`, earliest first.
    pub fn due(&self, now: Instant) -> Vec<TimerToken> {
        let mut due: Vec<ScheduledTask> = [self.loading_quiet, self.blur_commit]
            .into_iter()
            .flatten()
            .filter(|task| task.due <= now)
            .collect();
        due.sort_by_key(|task| (task.due, task.token.generation));
        due.into_iter().map(|task| task.token).collect()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.loading_quiet, self.blur_commit]
            .into_iter()
            .flatten()
            .map(|task| task.due)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn schedule_replaces_pending_task_of_same_kind() {
        let mut queue = TimerQueue::new();
        let t0 = Instant::now();
        let first = queue.schedule(TimerKind::LoadingQuiet, t0, 500 * MS);
        let second = queue.schedule(TimerKind::LoadingQuiet, t0 + 100 * MS, 500 * MS);

        assert!(second.generation() > first.generation());
        assert!(!queue.claim(first), "stale token must not fire");
        assert!(queue.claim(second));
        assert!(!queue.is_pending(TimerKind::LoadingQuiet));
    }

    #[test]
    fn cancel_invalidates_token() {
        let mut queue = TimerQueue::new();
        let t0 = Instant::now();
        let token = queue.schedule(TimerKind::BlurCommit, t0, 200 * MS);
        queue.cancel(TimerKind::BlurCommit);
        assert!(!queue.claim(token));
    }

    #[test]
    fn due_lists_only_expired_tasks_in_deadline_order() {
        let mut queue = TimerQueue::new();
        let t0 = Instant::now();
        let loading = queue.schedule(TimerKind::LoadingQuiet, t0, 500 * MS);
        let blur = queue.schedule(TimerKind::BlurCommit, t0, 200 * MS);

        assert!(queue.due(t0 + 100 * MS).is_empty());
        assert_eq!(queue.due(t0 + 300 * MS), vec![blur]);
        assert_eq!(queue.due(t0 + 600 * MS), vec![blur, loading]);
    }

    #[test]
    fn next_deadline_is_earliest_pending() {
        let mut queue = TimerQueue::new();
        let t0 = Instant::now();
        assert_eq!(queue.next_deadline(), None);
        queue.schedule(TimerKind::LoadingQuiet, t0, 500 * MS);
        queue.schedule(TimerKind::BlurCommit, t0, 200 * MS);
        assert_eq!(queue.next_deadline(), Some(t0 + 200 * MS));
        queue.cancel_all();
        assert_eq!(queue.next_deadline(), None);
    }
}

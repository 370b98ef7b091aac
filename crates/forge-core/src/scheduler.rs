//! Deferred task scheduling with per-project cancellation.
//!
//! Each project with pending work gets its own [`CancellationToken`];
//! cancelling it stops every pending task for that project at its next await
//! point. The token is dropped once the project's last task finishes. All
//! tasks are tracked so callers can wait for the scheduler to drain.

use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, PoisonError},
};

use log::debug;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

/// Spawns and tracks deferred work keyed by project id.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Arc<SchedulerInner>,
}

#[derive(Default)]
struct SchedulerInner {
    slots: Mutex<Slots>,
    tracker: TaskTracker,
}

#[derive(Default)]
struct Slots {
    by_project: HashMap<String, Slot>,
    next_id: u64,
}

struct Slot {
    id: u64,
    token: CancellationToken,
    tasks: usize,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one more task for `project_id` and returns the slot id with
    /// the project's live token.
    fn enter(&self, project_id: &str) -> (u64, CancellationToken) {
        let mut slots = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Slots {
            by_project,
            next_id,
        } = &mut *slots;
        let slot = by_project.entry(project_id.to_string()).or_insert_with(|| {
            *next_id += 1;
            Slot {
                id: *next_id,
                token: CancellationToken::new(),
                tasks: 0,
            }
        });
        slot.tasks += 1;
        (slot.id, slot.token.clone())
    }

    /// Runs `task` in the background; it is dropped if the project's token
    /// is cancelled first.
    pub fn spawn<F>(&self, project_id: &str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (slot, token) = self.enter(project_id);
        let release = SlotRelease {
            inner: Arc::clone(&self.inner),
            project_id: project_id.to_string(),
            slot,
        };
        let project_id = project_id.to_string();
        self.inner.tracker.spawn(async move {
            let _release = release;
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Cancelled pending work for project {project_id}");
                }
                _ = task => {}
            }
        });
    }

    /// Cancels all pending work for `project_id`.
    pub fn cancel(&self, project_id: &str) {
        let slot = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_project
            .remove(project_id);
        if let Some(slot) = slot {
            slot.token.cancel();
        }
    }

    /// Number of projects with pending work.
    pub fn active_projects(&self) -> usize {
        self.inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_project
            .len()
    }

    /// Number of tasks still running.
    pub fn pending(&self) -> usize {
        self.inner.tracker.len()
    }

    /// Waits until every spawned task has finished, including tasks spawned
    /// by other tasks while waiting.
    pub async fn wait_idle(&self) {
        while !self.inner.tracker.is_empty() {
            self.inner.tracker.close();
            self.inner.tracker.wait().await;
            self.inner.tracker.reopen();
        }
    }
}

/// Drops a project's slot when its last task ends.
struct SlotRelease {
    inner: Arc<SchedulerInner>,
    project_id: String,
    slot: u64,
}

impl Drop for SlotRelease {
    fn drop(&mut self) {
        let mut slots = self
            .inner
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let finished = match slots.by_project.get_mut(&self.project_id) {
            // A cancelled slot may have been replaced by a newer one.
            Some(slot) if slot.id == self.slot => {
                slot.tasks -= 1;
                slot.tasks == 0
            }
            _ => false,
        };
        if finished {
            slots.by_project.remove(&self.project_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_spawned_task_runs() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        scheduler.spawn("p1", async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            seen.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.active_projects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        scheduler.spawn("p1", async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            seen.fetch_add(1, Ordering::SeqCst);
        });

        scheduler.cancel("p1");
        scheduler.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_scoped_to_project() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        for id in ["p1", "p2"] {
            let seen = Arc::clone(&counter);
            scheduler.spawn(id, async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }

        scheduler.cancel("p1");
        scheduler.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_idle_covers_nested_spawns() {
        let scheduler = Scheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let inner_scheduler = scheduler.clone();
        let seen = Arc::clone(&counter);
        scheduler.spawn("p1", async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            inner_scheduler.spawn("p1", async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                seen.fetch_add(1, Ordering::SeqCst);
            });
        });

        scheduler.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_kept_until_last_task_ends() {
        let scheduler = Scheduler::new();
        for secs in [1, 5] {
            scheduler.spawn("p1", async move {
                tokio::time::sleep(Duration::from_secs(secs)).await;
            });
        }
        assert_eq!(scheduler.active_projects(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(scheduler.active_projects(), 1);

        scheduler.wait_idle().await;
        assert_eq!(scheduler.active_projects(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_does_not_release_new_slot() {
        let scheduler = Scheduler::new();
        scheduler.spawn("p1", async {
            tokio::time::sleep(Duration::from_secs(1)).await;
        });
        scheduler.cancel("p1");

        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        scheduler.spawn("p1", async move {
            tokio::time::sleep(Duration::from_secs(3)).await;
            seen.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(scheduler.active_projects(), 1);

        scheduler.wait_idle().await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.active_projects(), 0);
    }
}

//! Deferred continuations run on the next idle tick of the host loop
//!
//! Some work must wait until the current layout pass has yielded back to the
//! event loop (row positions are only valid after that). Such work is queued
//! here with a liveness guard and executed by the host on its next tick. If
//! the owner of the guard was torn down in the meantime, the task is skipped.

use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Token held by an owner for as long as its deferred work is still wanted
#[derive(Debug, Default)]
pub struct Liveness(Rc<()>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(()))
    }

    /// Weak view handed to queued tasks
    pub fn guard(&self) -> LivenessGuard {
        LivenessGuard(Rc::downgrade(&self.0))
    }
}

/// Non-owning check on a [`Liveness`] token
#[derive(Debug, Clone)]
pub struct LivenessGuard(Weak<()>);

impl LivenessGuard {
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

type Continuation<C> = Box<dyn FnOnce(&mut C) -> anyhow::Result<()>>;

struct IdleTask<C> {
    label: &'static str,
    guard: LivenessGuard,
    run: Continuation<C>,
}

/// FIFO of continuations executed against a host context `C`
pub struct IdleQueue<C> {
    tasks: VecDeque<IdleTask<C>>,
}

impl<C> IdleQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Queue `task` for the next idle tick, guarded by `liveness`
    pub fn schedule(
        &mut self,
        label: &'static str,
        liveness: &Liveness,
        task: impl FnOnce(&mut C) -> anyhow::Result<()> + 'static,
    ) {
        tracing::trace!("Scheduled idle task '{}'", label);
        self.tasks.push_back(IdleTask {
            label,
            guard: liveness.guard(),
            run: Box::new(task),
        });
    }

    /// Run every task queued before this call.
    ///
    /// Tasks whose guard has expired are dropped without running. Returns
    /// the number of tasks executed. On error the failing task is consumed
    /// and the tasks behind it stay queued for the next tick.
    pub fn run_pending(&mut self, ctx: &mut C) -> anyhow::Result<usize> {
        let mut executed = 0;
        let batch = self.tasks.len();

        for _ in 0..batch {
            let Some(task) = self.tasks.pop_front() else {
                break;
            };

            if !task.guard.is_alive() {
                tracing::debug!("Skipping idle task '{}': owner torn down", task.label);
                continue;
            }

            (task.run)(ctx)?;
            executed += 1;
        }

        Ok(executed)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<C> Default for IdleQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

//! Debounced saving.
//!
//! Each change of the program schedules a save. A save that is still pending
//! when the next change happens is cancelled and scheduled again, so only the
//! last change within the delay is written.

use std::{cell::Cell, rc::Rc};

use gloo_timers::callback::Timeout;
use log::debug;

/// Runs a task after a delay. Dropping the returned handle cancels the task.
pub trait Scheduler {
    type Handle;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Handle;
}

#[derive(Clone, Copy, Default)]
pub struct GlooScheduler;

impl Scheduler for GlooScheduler {
    type Handle = Timeout;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

pub struct PendingSave<S: Scheduler> {
    scheduler: S,
    delay_ms: u32,
    pending: Option<(S::Handle, Rc<Cell<bool>>)>,
}

impl PendingSave<GlooScheduler> {
    #[must_use]
    pub fn new(delay_ms: u32) -> Self {
        Self::with_scheduler(GlooScheduler, delay_ms)
    }
}

impl<S: Scheduler> PendingSave<S> {
    pub fn with_scheduler(scheduler: S, delay_ms: u32) -> Self {
        Self {
            scheduler,
            delay_ms,
            pending: None,
        }
    }

    /// Schedule `task`, replacing any task that has not run yet.
    pub fn schedule(&mut self, task: impl FnOnce() + 'static) {
        if self.is_pending() {
            debug!("rescheduling pending save");
        }
        self.cancel();
        let done = Rc::new(Cell::new(false));
        let handle = self.scheduler.schedule(
            self.delay_ms,
            Box::new({
                let done = done.clone();
                move || {
                    done.set(true);
                    task();
                }
            }),
        );
        self.pending = Some((handle, done));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|(_, done)| !done.get())
    }

    #[must_use]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

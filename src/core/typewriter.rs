//! # Typewriter
//!
//! Drives a [`RevealSession`](super::reveal::RevealSession) from a tokio task.
//! The task sleeps through a [`RevealSchedule`] and sends one
//! `Action::RevealStep` per character, then `Action::RevealSettled` after the
//! settle delay. It never touches state itself; `update()` applies the steps.
//!
//! At most one task is alive: `start` aborts the previous one before
//! spawning, and so do `cancel` and `Drop`. Steps that were already queued in
//! the channel when a task was aborted carry the old generation and are
//! rejected by the session.

use std::sync::mpsc::Sender;
use std::time::Duration;

use log::{debug, info};
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::reveal::{RevealSchedule, SETTLE_DELAY};

pub struct Typewriter {
    speed: Duration,
    tx: Sender<Action>,
    active: Option<AbortHandle>,
}

impl Typewriter {
    pub fn new(speed: Duration, tx: Sender<Action>) -> Self {
        Self {
            speed,
            tx,
            active: None,
        }
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    /// Cancels whatever is running and starts revealing `text` under
    /// `generation`. Must be called from within a tokio runtime.
    pub fn start(&mut self, generation: u64, text: String) {
        self.cancel();

        info!(
            "Starting reveal: generation={}, chars={}, speed={:?}",
            generation,
            text.chars().count(),
            self.speed
        );

        let schedule = RevealSchedule::new(text, self.speed);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            for (delay, len) in schedule {
                tokio::time::sleep(delay).await;
                if tx.send(Action::RevealStep { generation, len }).is_err() {
                    debug!("Reveal {} stopped: receiver dropped", generation);
                    return;
                }
            }
            tokio::time::sleep(SETTLE_DELAY).await;
            let _ = tx.send(Action::RevealSettled { generation });
        });
        self.active = Some(handle.abort_handle());
    }

    /// Aborts the pending step, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            if !handle.is_finished() {
                debug!("Cancelling running reveal");
            }
            handle.abort();
        }
    }

    /// True while a task is sleeping toward its next step.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        self.cancel();
    }
}

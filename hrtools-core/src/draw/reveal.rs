//! Cosmetic name reveal shown while a draw is in progress.
//!
//! A reveal only samples names for display. It never records a winner; the
//! caller performs the single real draw against the same frozen pool once
//! [`RevealFrame::Finished`] arrives.

use crate::config::RevealConfig;
use crate::error::{HrError, Result};
use crate::random::pick_index;
use crate::types::Participant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealFrame {
    Tick(String),
    Finished,
}

/// Receiving side of a running reveal.
pub struct RevealHandle {
    generation: u64,
    frames: mpsc::UnboundedReceiver<RevealFrame>,
    pool: Arc<Vec<Participant>>,
}

impl RevealHandle {
    /// Next frame, or `None` once the reveal has ended or was cancelled.
    pub async fn next_frame(&mut self) -> Option<RevealFrame> {
        self.frames.recv().await
    }

    /// The pool snapshot taken when the reveal started.
    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }
}

/// Owns at most one in-flight reveal. Starting a new one cancels the old.
#[derive(Default)]
pub struct RevealController {
    active: Option<JoinHandle<()>>,
    generation: u64,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, pool: Vec<Participant>, config: RevealConfig) -> Result<RevealHandle> {
        if pool.is_empty() {
            return Err(HrError::EmptyPool);
        }
        config.validate()?;

        self.cancel();
        self.generation += 1;

        let pool = Arc::new(pool);
        let (tx, rx) = mpsc::unbounded_channel();

        let task_pool = pool.clone();
        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticker = tokio::time::interval(config.interval());
            let mut rng = StdRng::from_entropy();

            loop {
                ticker.tick().await;

                if let Some(index) = pick_index(task_pool.len(), &mut rng) {
                    let name = task_pool[index].name.clone();
                    tracing::debug!("Reveal tick: {}", name);

                    if tx.send(RevealFrame::Tick(name)).is_err() {
                        return; // receiver dropped
                    }
                }

                if started.elapsed() >= config.duration() {
                    break;
                }
            }

            let _ = tx.send(RevealFrame::Finished);
        });

        self.active = Some(task);
        Ok(RevealHandle {
            generation: self.generation,
            frames: rx,
            pool,
        })
    }

    /// Retire the reveal behind `handle` so its draw can be made exactly once.
    /// Handles from a cancelled or superseded reveal are rejected.
    pub fn settle(&mut self, handle: &RevealHandle) -> Result<()> {
        if self.active.is_none() || handle.generation != self.generation {
            return Err(HrError::StaleReveal);
        }

        self.cancel();
        Ok(())
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.active.take() {
            if !task.is_finished() {
                tracing::debug!("Cancelling in-flight reveal");
            }
            task.abort();
        }
    }
}

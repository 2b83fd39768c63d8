//! Decay Heartbeat — background timer that fades the tracked emotion.
//!
//! Ticks once per decay interval and runs a decay step on the shared tracker.
//! The loop is owned by a [`DecayHandle`]; stopping or dropping the handle
//! ends it, so a session never leaves a timer behind.

use crate::ai::emotion::EmotionTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Tracker shared between a session and its decay loop.
pub type SharedTracker = Arc<Mutex<EmotionTracker>>;

/// Owner of a running decay loop.
pub struct DecayHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl DecayHandle {
    /// Signal the loop to exit and wait for it.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Decay loop ended abnormally: {}", e);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for DecayHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawn the decay loop. Must be called from within a tokio runtime.
pub fn spawn_decay_loop(tracker: SharedTracker, interval: Duration) -> DecayHandle {
    let (tx, rx) = oneshot::channel();
    let task = tokio::spawn(decay_loop(tracker, interval, rx));
    DecayHandle {
        shutdown: Some(tx),
        task: Some(task),
    }
}

async fn decay_loop(tracker: SharedTracker, interval: Duration, mut shutdown: oneshot::Receiver<()>) {
    info!(interval_secs = interval.as_secs_f64(), "Decay loop started");

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let mut tracker = tracker.lock().await;
                if tracker.decay_tick() {
                    let state = tracker.state();
                    debug!(
                        label = %state.label,
                        intensity = state.intensity,
                        "Decay tick applied"
                    );
                }
            }
        }
    }

    info!("Decay loop stopped");
}

//! Emotion Session — explicit per-session context for the tracker.
//!
//! Created when a user session starts and ended when it finishes. Components
//! that need the tracker receive the session (or its [`SharedTracker`])
//! instead of reaching for a global.

use crate::ai::emotion::{
    EmotionHistoryEntry, EmotionSnapshot, EmotionState, EmotionTracker, EmotionTrends,
};
use crate::ai::heartbeat::{spawn_decay_loop, DecayHandle, SharedTracker};
use crate::ai::style_adapter::AdaptationProfile;
use crate::config::TrackerConfig;
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct EmotionSession {
    tracker: SharedTracker,
    decay: DecayHandle,
}

impl EmotionSession {
    /// Validate `config`, build a keyword-driven tracker and start its decay
    /// loop. Must be called from within a tokio runtime.
    pub fn start(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_tracker(EmotionTracker::new(&config)))
    }

    /// Start a session around an already-built tracker.
    pub fn with_tracker(tracker: EmotionTracker) -> Self {
        let interval = tracker.decay_interval();
        let tracker = Arc::new(Mutex::new(tracker));
        let decay = spawn_decay_loop(tracker.clone(), interval);
        info!("Emotion session started");
        Self { tracker, decay }
    }

    /// Shared handle for components that need direct access.
    pub fn tracker(&self) -> SharedTracker {
        self.tracker.clone()
    }

    pub async fn process_input(&self, text: &str) -> EmotionState {
        self.tracker.lock().await.process_input(text)
    }

    pub async fn state(&self) -> EmotionState {
        self.tracker.lock().await.state().clone()
    }

    pub async fn history(&self) -> Vec<EmotionHistoryEntry> {
        self.tracker.lock().await.history().iter().cloned().collect()
    }

    pub async fn adaptation(&self) -> AdaptationProfile {
        self.tracker.lock().await.adaptation()
    }

    pub async fn trends(&self) -> EmotionTrends {
        self.tracker.lock().await.trends()
    }

    pub async fn describe(&self) -> String {
        self.tracker.lock().await.describe()
    }

    pub async fn snapshot(&self) -> EmotionSnapshot {
        self.tracker.lock().await.snapshot()
    }

    pub fn is_decaying(&self) -> bool {
        self.decay.is_running()
    }

    /// Stop the decay loop and hand back the final state.
    pub async fn end(self) -> EmotionState {
        self.decay.stop().await;
        let state = self.tracker.lock().await.state().clone();
        info!(label = %state.label, intensity = state.intensity, "Emotion session ended");
        state
    }
}

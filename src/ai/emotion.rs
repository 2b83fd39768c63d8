//! Emotion Tracker for onboarding sessions.
//!
//! Holds the coarse label and intensity inferred from the new hire's free-text
//! input, a bounded history of accepted classifications, and the decay that
//! eases the label back to neutral once the user goes quiet.

use crate::ai::sentiment::{EmotionClassifier, KeywordClassifier};
use crate::ai::style_adapter::{AdaptationProfile, AdaptationTable};
use crate::config::TrackerConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

// ── Label ──────────────────────────────────────────────────

/// Closed set of labels, in declaration order (used for tie-breaking).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    #[default]
    Neutral,
    Excited,
    Frustrated,
    Confused,
    Bored,
    Anxious,
    Interested,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 7] = [
        Self::Neutral,
        Self::Excited,
        Self::Frustrated,
        Self::Confused,
        Self::Bored,
        Self::Anxious,
        Self::Interested,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Excited => "excited",
            Self::Frustrated => "frustrated",
            Self::Confused => "confused",
            Self::Bored => "bored",
            Self::Anxious => "anxious",
            Self::Interested => "interested",
        }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::Excited | Self::Interested)
    }

    pub fn is_negative(self) -> bool {
        matches!(
            self,
            Self::Frustrated | Self::Confused | Self::Bored | Self::Anxious
        )
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── State & history ────────────────────────────────────────

/// Current emotional read of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub label: EmotionLabel,
    pub intensity: f32,
    /// Keywords behind the current label.
    pub triggers: Vec<String>,
    pub last_interaction: DateTime<Utc>,
}

impl EmotionState {
    fn initial() -> Self {
        Self {
            label: EmotionLabel::Neutral,
            intensity: 0.5,
            triggers: Vec::new(),
            last_interaction: Utc::now(),
        }
    }
}

/// A single accepted classification. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionHistoryEntry {
    pub label: EmotionLabel,
    pub intensity: f32,
    pub triggers: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub source_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionTrend {
    Improving,
    Declining,
    Stable,
}

/// Summary of the recent history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTrends {
    pub dominant: EmotionLabel,
    pub trend: EmotionTrend,
}

impl Default for EmotionTrends {
    fn default() -> Self {
        Self {
            dominant: EmotionLabel::Neutral,
            trend: EmotionTrend::Stable,
        }
    }
}

/// Serializable copy of the label state, for hosts that remount their UI
/// within one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionSnapshot {
    pub label: EmotionLabel,
    pub intensity: f32,
    pub triggers: Vec<String>,
}

// ── Tracker ────────────────────────────────────────────────

/// Session-owned emotion tracker.
pub struct EmotionTracker {
    state: EmotionState,
    history: VecDeque<EmotionHistoryEntry>,
    classifier: Box<dyn EmotionClassifier>,
    adaptations: AdaptationTable,
    /// Monotonic twin of `state.last_interaction`, used for decay.
    last_activity: Instant,
    min_intensity: f32,
    decay_interval: Duration,
    decay_rate: f32,
    decay_floor: f32,
    history_capacity: usize,
    trend_window: usize,
}

impl EmotionTracker {
    /// Build a tracker using the keyword classifier from `config`.
    pub fn new(config: &TrackerConfig) -> Self {
        let classifier = KeywordClassifier::new(config.keywords.clone());
        Self::with_classifier(config, Box::new(classifier))
    }

    /// Build a tracker around any classifier implementation.
    pub fn with_classifier(config: &TrackerConfig, classifier: Box<dyn EmotionClassifier>) -> Self {
        Self {
            state: EmotionState::initial(),
            history: VecDeque::new(),
            classifier,
            adaptations: config.adaptations.clone(),
            last_activity: Instant::now(),
            min_intensity: config.min_intensity,
            decay_interval: config.decay_interval(),
            decay_rate: config.decay_rate,
            decay_floor: config.decay_floor,
            history_capacity: config.history_capacity.max(1),
            trend_window: config.trend_window.max(1),
        }
    }

    /// Classify `text` and fold the result into the state.
    ///
    /// The label only changes when the classification clears the minimum
    /// intensity; the interaction time is refreshed either way.
    pub fn process_input(&mut self, text: &str) -> EmotionState {
        let classification = self.classifier.classify(text);
        let now = Utc::now();

        if classification.intensity > self.min_intensity {
            debug!(
                label = %classification.label,
                intensity = classification.intensity,
                triggers = ?classification.triggers,
                "Accepted classification"
            );
            self.state.label = classification.label;
            self.state.intensity = classification.intensity.clamp(0.0, 1.0);
            self.state.triggers = classification.triggers;

            self.history.push_back(EmotionHistoryEntry {
                label: self.state.label,
                intensity: self.state.intensity,
                triggers: self.state.triggers.clone(),
                timestamp: now,
                source_text: text.to_string(),
            });
            while self.history.len() > self.history_capacity {
                self.history.pop_front();
            }
        } else {
            debug!(
                intensity = classification.intensity,
                threshold = self.min_intensity,
                "Classification below threshold, label kept"
            );
        }

        self.state.last_interaction = now;
        self.last_activity = Instant::now();
        self.state.clone()
    }

    /// Adaptation record for the current label.
    pub fn adaptation(&self) -> AdaptationProfile {
        self.adaptations.lookup(self.state.label)
    }

    /// Run one decay step against the current time.
    pub fn decay_tick(&mut self) -> bool {
        self.decay_at(Instant::now())
    }

    /// Run one decay step as of `now`. Returns whether the state changed.
    ///
    /// Nothing happens until more than one decay interval has passed since
    /// the last input. Intensity then drops by the decay rate, never below
    /// the floor, and the label falls back to neutral once the floor is hit.
    pub fn decay_at(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_activity) <= self.decay_interval {
            return false;
        }

        let mut changed = false;
        if self.state.intensity > self.decay_floor {
            self.state.intensity = (self.state.intensity - self.decay_rate).max(self.decay_floor);
            changed = true;
            debug!(intensity = self.state.intensity, "Intensity decayed");
        }

        if self.state.intensity <= self.decay_floor && self.state.label != EmotionLabel::Neutral {
            info!(from = %self.state.label, "Emotion faded back to neutral");
            self.state.label = EmotionLabel::Neutral;
            self.state.triggers.clear();
            changed = true;
        }

        changed
    }

    /// Dominant label and direction over the recent history window.
    pub fn trends(&self) -> EmotionTrends {
        if self.history.is_empty() {
            return EmotionTrends::default();
        }

        let skip = self.history.len().saturating_sub(self.trend_window);
        let window: Vec<EmotionLabel> = self.history.iter().skip(skip).map(|e| e.label).collect();

        let mut counts = [0usize; EmotionLabel::ALL.len()];
        for label in &window {
            counts[label.index()] += 1;
        }
        let mut dominant = EmotionLabel::Neutral;
        for label in EmotionLabel::ALL {
            if counts[label.index()] > counts[dominant.index()] {
                dominant = label;
            }
        }

        let (older, newer) = window.split_at(window.len() / 2);
        let delta = valence_score(newer) - valence_score(older);
        let trend = match delta {
            d if d > 0 => EmotionTrend::Improving,
            d if d < 0 => EmotionTrend::Declining,
            _ => EmotionTrend::Stable,
        };

        EmotionTrends { dominant, trend }
    }

    /// Short human-readable line for display.
    pub fn describe(&self) -> String {
        let trend_desc = match self.trends().trend {
            EmotionTrend::Improving => ", and things are looking up",
            EmotionTrend::Declining => ", and it has been getting harder",
            EmotionTrend::Stable => "",
        };
        format!(
            "Feeling {} (intensity {:.2}){}.",
            self.state.label, self.state.intensity, trend_desc
        )
    }

    pub fn state(&self) -> &EmotionState {
        &self.state
    }

    /// Accepted classifications, oldest first.
    pub fn history(&self) -> &VecDeque<EmotionHistoryEntry> {
        &self.history
    }

    pub fn decay_interval(&self) -> Duration {
        self.decay_interval
    }

    /// Back to the session-start state.
    pub fn reset(&mut self) {
        self.state = EmotionState::initial();
        self.history.clear();
        self.last_activity = Instant::now();
    }

    pub fn snapshot(&self) -> EmotionSnapshot {
        EmotionSnapshot {
            label: self.state.label,
            intensity: self.state.intensity,
            triggers: self.state.triggers.clone(),
        }
    }

    /// Restore the label state. History is left untouched.
    pub fn restore_from_snapshot(&mut self, snap: &EmotionSnapshot) {
        self.state.label = snap.label;
        self.state.intensity = snap.intensity.clamp(0.0, 1.0);
        self.state.triggers = snap.triggers.clone();
    }
}

impl Default for EmotionTracker {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

/// Positives minus negatives.
fn valence_score(labels: &[EmotionLabel]) -> i32 {
    labels.iter().fold(0, |acc, label| {
        if label.is_positive() {
            acc + 1
        } else if label.is_negative() {
            acc - 1
        } else {
            acc
        }
    })
}

// ── Tests ──────────────────────────────────────────────────

//! Content Style Adapter — pacing hints for onboarding content by emotion.
//!
//! Each label maps to a static adaptation record. The table is plain data so
//! it can be overridden from the config file.

use crate::ai::emotion::EmotionLabel;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simplified,
    Standard,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interactivity {
    Low,
    Medium,
    High,
}

/// How content should be presented while the user shows one emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationProfile {
    pub pacing: Pacing,
    pub complexity: Complexity,
    pub interactivity: Interactivity,
    /// Canned phrasing; the UI shows one at random.
    pub suggestions: Vec<String>,
}

impl AdaptationProfile {
    fn new(
        pacing: Pacing,
        complexity: Complexity,
        interactivity: Interactivity,
        suggestions: &[&str],
    ) -> Self {
        Self {
            pacing,
            complexity,
            interactivity,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn neutral() -> Self {
        Self::new(
            Pacing::Moderate,
            Complexity::Standard,
            Interactivity::Medium,
            &[
                "Here's what's next on your onboarding timeline.",
                "Take a look at the resources for this week.",
                "Let us know if anything needs clarifying.",
            ],
        )
    }

    /// Pick one suggestion at random.
    pub fn pick_suggestion<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.suggestions.choose(rng).map(String::as_str)
    }
}

/// Label → adaptation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdaptationTable {
    profiles: BTreeMap<EmotionLabel, AdaptationProfile>,
}

impl AdaptationTable {
    pub fn new(profiles: BTreeMap<EmotionLabel, AdaptationProfile>) -> Self {
        Self { profiles }
    }

    /// Record for `label`, falling back to the neutral record.
    pub fn lookup(&self, label: EmotionLabel) -> AdaptationProfile {
        self.profiles
            .get(&label)
            .or_else(|| self.profiles.get(&EmotionLabel::Neutral))
            .cloned()
            .unwrap_or_else(AdaptationProfile::neutral)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for AdaptationTable {
    fn default() -> Self {
        use Complexity::*;
        use Interactivity::*;
        use Pacing::*;

        let profiles = BTreeMap::from([
            (EmotionLabel::Neutral, AdaptationProfile::neutral()),
            (
                EmotionLabel::Excited,
                AdaptationProfile::new(
                    Fast,
                    Advanced,
                    High,
                    &[
                        "Great energy! Ready for the next module?",
                        "You're moving quickly. Want a stretch goal?",
                        "Try the hands-on lab while you're in the zone.",
                    ],
                ),
            ),
            (
                EmotionLabel::Frustrated,
                AdaptationProfile::new(
                    Slow,
                    Simplified,
                    Medium,
                    &[
                        "Let's break this down into smaller steps.",
                        "This part trips up a lot of people. You're doing fine.",
                        "Would a quick chat with your onboarding buddy help?",
                    ],
                ),
            ),
            (
                EmotionLabel::Confused,
                AdaptationProfile::new(
                    Slow,
                    Simplified,
                    High,
                    &[
                        "Let me explain this a different way.",
                        "Here's a short example to walk through.",
                        "The FAQ for this topic might help.",
                    ],
                ),
            ),
            (
                EmotionLabel::Bored,
                AdaptationProfile::new(
                    Fast,
                    Advanced,
                    High,
                    &[
                        "Let's switch to something more hands-on.",
                        "Skip ahead to the interactive exercise.",
                        "Try a quick challenge to mix things up.",
                    ],
                ),
            ),
            (
                EmotionLabel::Anxious,
                AdaptationProfile::new(
                    Slow,
                    Simplified,
                    Low,
                    &[
                        "You're right on track. No rush.",
                        "Everyone learns at their own pace.",
                        "Your manager is happy to help whenever you need.",
                    ],
                ),
            ),
            (
                EmotionLabel::Interested,
                AdaptationProfile::new(
                    Moderate,
                    Advanced,
                    High,
                    &[
                        "Want to dive deeper into this topic?",
                        "Here are some advanced resources.",
                        "Explore related projects across the team.",
                    ],
                ),
            ),
        ]);

        Self { profiles }
    }
}

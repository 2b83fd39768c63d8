//! Input Sentiment Classification — map free text onto an emotion label.
//!
//! Keyword-based detection (fast, no model call). The keyword table is an
//! explicit configuration structure so it can be tuned from the config file
//! or replaced wholesale by another [`EmotionClassifier`] implementation.

use crate::ai::emotion::EmotionLabel;
use serde::{Deserialize, Serialize};

/// Result of classifying one piece of input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: EmotionLabel,
    /// Strength of the classification (0.0 = none, 1.0 = saturated).
    pub intensity: f32,
    /// Keywords of the winning label found in the input, in table order.
    pub triggers: Vec<String>,
}

impl Classification {
    /// Result used when nothing in the input matches.
    pub fn neutral() -> Self {
        Self {
            label: EmotionLabel::Neutral,
            intensity: 0.5,
            triggers: Vec::new(),
        }
    }
}

/// Anything that can turn user text into a [`Classification`].
///
/// Implementations must be total: every input yields a result.
pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Classification;
}

// ── Keyword table ──────────────────────────────────────────

/// Keywords associated with one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub label: EmotionLabel,
    pub keywords: Vec<String>,
}

/// Ordered label → keywords table. Order matters: on equal match counts the
/// earlier rule wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

impl KeywordTable {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(|r| r.keywords.is_empty())
    }
}

fn rule(label: EmotionLabel, keywords: &[&str]) -> KeywordRule {
    KeywordRule {
        label,
        keywords: keywords.iter().map(|kw| kw.to_string()).collect(),
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new(vec![
            rule(
                EmotionLabel::Excited,
                &[
                    "excited",
                    "amazing",
                    "awesome",
                    "can't wait",
                    "fantastic",
                    "love",
                    "great",
                    "thrilled",
                ],
            ),
            rule(
                EmotionLabel::Frustrated,
                &[
                    "frustrated",
                    "annoying",
                    "stuck",
                    "doesn't work",
                    "not working",
                    "i hate",
                    "hate this",
                    "waste of time",
                ],
            ),
            rule(
                EmotionLabel::Confused,
                &[
                    "confused",
                    "confusing",
                    "don't understand",
                    "unclear",
                    "what does",
                    "how do i",
                    "makes no sense",
                    "lost",
                ],
            ),
            rule(
                EmotionLabel::Bored,
                &[
                    "bored",
                    "boring",
                    "tedious",
                    "dull",
                    "yawn",
                    "whatever",
                    "too slow",
                ],
            ),
            rule(
                EmotionLabel::Anxious,
                &[
                    "anxious",
                    "worried",
                    "nervous",
                    "scared",
                    "overwhelmed",
                    "stressed",
                    "afraid",
                ],
            ),
            rule(
                EmotionLabel::Interested,
                &[
                    "interesting",
                    "curious",
                    "tell me more",
                    "want to learn",
                    "fascinating",
                    "intrigued",
                ],
            ),
        ])
    }
}

// ── Keyword classifier ─────────────────────────────────────

/// Case-insensitive substring matcher over a [`KeywordTable`].
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    table: KeywordTable,
}

impl KeywordClassifier {
    /// Lowercases every keyword and drops empty ones (an empty keyword would
    /// match every input).
    pub fn new(table: KeywordTable) -> Self {
        let rules = table
            .rules
            .into_iter()
            .map(|r| KeywordRule {
                label: r.label,
                keywords: r
                    .keywords
                    .into_iter()
                    .map(|kw| kw.to_lowercase())
                    .filter(|kw| !kw.is_empty())
                    .collect(),
            })
            .collect();
        Self {
            table: KeywordTable { rules },
        }
    }

    pub fn table(&self) -> &KeywordTable {
        &self.table
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(KeywordTable::default())
    }
}

impl EmotionClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();

        // Winner = highest match count; `>` keeps the earlier rule on ties
        let mut best: Option<(&KeywordRule, usize)> = None;
        for rule in &self.table.rules {
            let count = rule
                .keywords
                .iter()
                .filter(|kw| lower.contains(kw.as_str()))
                .count();
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((rule, count));
            }
        }

        let Some((rule, match_count)) = best else {
            return Classification::neutral();
        };

        let word_count = text.split_whitespace().count().max(1);
        let intensity =
            (0.4 + (match_count as f32 / word_count as f32) * 0.6).clamp(0.0, 1.0);

        let triggers = rule
            .keywords
            .iter()
            .filter(|kw| lower.contains(kw.as_str()))
            .cloned()
            .collect();

        Classification {
            label: rule.label,
            intensity,
            triggers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify(text: &str) -> Classification {
        KeywordClassifier::default().classify(text)
    }

    #[test]
    fn plain_text_is_neutral() {
        let c = classify("Tomorrow I meet the platform team at three");
        assert_eq!(c, Classification::neutral());
    }

    #[test]
    fn confused_message_detected() {
        let c = classify("this is confusing and I am confused");
        assert_eq!(c.label, EmotionLabel::Confused);
        assert!(c.triggers.contains(&"confused".to_string()));
        assert!(c.triggers.contains(&"confusing".to_string()));
    }

    #[test]
    fn intensity_follows_match_density() {
        // 2 matches over 4 words: 0.4 + 0.5 * 0.6
        let c = classify("stuck again, frustrated today");
        assert_eq!(c.label, EmotionLabel::Frustrated);
        assert!((c.intensity - 0.7).abs() < 1e-5, "got {}", c.intensity);
    }

    #[test]
    fn intensity_saturates_at_one() {
        let c = classify("frustrated stuck annoying");
        assert!((c.intensity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let c = classify("I am SO EXCITED");
        assert_eq!(c.label, EmotionLabel::Excited);
        assert_eq!(c.triggers, vec!["excited".to_string()]);
    }

    #[test]
    fn ties_go_to_earlier_label() {
        // One excited keyword, one bored keyword
        let c = classify("awesome but boring");
        assert_eq!(c.label, EmotionLabel::Excited);
    }

    #[test]
    fn triggers_keep_table_order() {
        let c = classify("I'm stuck and frustrated, this is annoying");
        assert_eq!(
            c.triggers,
            vec![
                "frustrated".to_string(),
                "annoying".to_string(),
                "stuck".to_string()
            ]
        );
    }

    #[test]
    fn whatever_is_bored() {
        let c = classify("whatever");
        assert_eq!(c.label, EmotionLabel::Bored);
        assert_eq!(c.triggers, vec!["whatever".to_string()]);
    }

    #[test]
    fn everyday_words_do_not_hide_keywords() {
        for text in [
            "I went through the setup guide",
            "that was enough for today",
            "somehow it worked at school",
            "though the badge arrived late",
        ] {
            let c = classify(text);
            assert_eq!(c, Classification::neutral(), "{text}");
        }
    }

    #[test]
    fn no_keyword_contains_another_labels_keyword() {
        let table = KeywordTable::default();
        for a in table.rules() {
            for b in table.rules().iter().filter(|b| b.label != a.label) {
                for outer in &a.keywords {
                    for inner in &b.keywords {
                        assert!(
                            !outer.contains(inner.as_str()),
                            "{} keyword {outer:?} contains {} keyword {inner:?}",
                            a.label,
                            b.label
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn whitespace_only_input_does_not_divide_by_zero() {
        let c = classify("   ");
        assert_eq!(c.label, EmotionLabel::Neutral);
        assert!(c.intensity.is_finite());
    }

    #[test]
    fn custom_table_lowercases_and_skips_empty_keywords() {
        let table = KeywordTable::new(vec![KeywordRule {
            label: EmotionLabel::Anxious,
            keywords: vec!["DEADLINE".to_string(), String::new()],
        }]);
        let classifier = KeywordClassifier::new(table);

        assert_eq!(classifier.classify("hello").label, EmotionLabel::Neutral);
        let c = classifier.classify("the deadline is close");
        assert_eq!(c.label, EmotionLabel::Anxious);
        assert_eq!(c.triggers, vec!["deadline".to_string()]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]
        #[test]
        fn intensity_always_within_unit_range(text in "[a-zA-Z' ,.!?]{0,200}") {
            let c = classify(&text);
            prop_assert!((0.0..=1.0).contains(&c.intensity));
        }

        #[test]
        fn keyword_soup_stays_bounded(
            words in proptest::collection::vec(
                prop::sample::select(vec![
                    "stuck", "whatever", "intrigued", "lost", "yawn", "i hate", "x",
                ]),
                1..50,
            )
        ) {
            let c = classify(&words.join(" "));
            prop_assert!((0.0..=1.0).contains(&c.intensity));
        }
    }
}

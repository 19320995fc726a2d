//! Green-light / red-flag detection over counterpart messages.
//!
//! A universal pattern set always applies; romantic, business and creative
//! conversations unlock an extra set looked up from [`CONTEXT_PATTERNS`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::context::Context;
use crate::transcript::{Message, counterpart_messages};
use crate::utils::excerpt;

pub const MAX_GREEN_LIGHTS: usize = 6;
pub const MAX_RED_FLAGS: usize = 4;
const SIGNAL_EXCERPT_CHARS: usize = 50;

/// Signal strength. Declaration order is strongest first, so `Ord` sorts strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    VeryStrong,
    Strong,
    Moderate,
    Light,
}

impl Tier {
    pub fn label(self) -> &'static str {
        match self {
            Tier::VeryStrong => "Very Strong",
            Tier::Strong => "Strong",
            Tier::Moderate => "Moderate",
            Tier::Light => "Light",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub label: String,
    /// Counterpart message that triggered the signal, at most 50 chars
    pub excerpt: String,
    pub tier: Tier,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub green_lights: Vec<Signal>,
    pub red_flags: Vec<Signal>,
}

pub struct SignalPattern {
    regex: Regex,
    pub label: &'static str,
    pub tier: Tier,
}

impl SignalPattern {
    fn new(pattern: &str, label: &'static str, tier: Tier) -> Self {
        Self {
            regex: Regex::new(&format!("(?i){pattern}")).expect("signal pattern should compile"),
            label,
            tier,
        }
    }

    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }
}

/// Positive and cautionary patterns for one context
pub struct PatternSet {
    pub positive: Vec<SignalPattern>,
    pub negative: Vec<SignalPattern>,
}

static UNIVERSAL: Lazy<PatternSet> = Lazy::new(|| PatternSet {
    positive: vec![
        SignalPattern::new(r"looking forward", "Anticipation expressed", Tier::Strong),
        SignalPattern::new(r"great|awesome|perfect|love it|amazing", "Positive affirmation", Tier::Moderate),
        SignalPattern::new(r"yes|yeah|definitely|absolutely|for sure", "Agreement signal", Tier::Moderate),
        SignalPattern::new(r"thanks|thank you|appreciate", "Gratitude expressed", Tier::Light),
        SignalPattern::new(r"(?s)\?.*\?", "High engagement (multiple questions)", Tier::Strong),
        SignalPattern::new(r"!+", "Enthusiasm markers", Tier::Light),
        SignalPattern::new(r"let me|i('ll| will)|going to", "Commitment language", Tier::Strong),
        SignalPattern::new(r"we (could|should|can)", "Collaborative framing", Tier::Strong),
    ],
    negative: vec![
        SignalPattern::new(r"busy|swamped|crazy|hectic", "Availability concern", Tier::Light),
        SignalPattern::new(r"maybe|perhaps|possibly|not sure", "Hedging language", Tier::Moderate),
        SignalPattern::new(r"later|eventually|sometime|when i can", "Delay indicators", Tier::Moderate),
        SignalPattern::new(r"sorry|apologize|my bad", "Friction acknowledgment", Tier::Light),
        SignalPattern::new(r"but |however |although ", "Qualification markers", Tier::Light),
    ],
});

/// Extra pattern sets keyed by detected context
pub static CONTEXT_PATTERNS: Lazy<HashMap<Context, PatternSet>> = Lazy::new(|| {
    HashMap::from([
        (
            Context::CreativeCollab,
            PatternSet {
                positive: vec![
                    SignalPattern::new(r"cool|nice|sick|fire|dope", "Casual approval", Tier::Moderate),
                    SignalPattern::new(r"love it|dig it|into it", "Creative buy-in", Tier::Strong),
                    SignalPattern::new(r"let('s| us) (do|make|build|try)", "Action orientation", Tier::Strong),
                    SignalPattern::new(r"idea|concept|vision", "Creative engagement", Tier::Moderate),
                    SignalPattern::new(r"update|check it out|done", "Delivery momentum", Tier::Strong),
                ],
                negative: vec![
                    SignalPattern::new(r"clunky|awkward|weird|off", "UX friction feedback", Tier::Strong),
                    SignalPattern::new(r"would love it if|wish it", "Feature request (opportunity)", Tier::Moderate),
                    SignalPattern::new(r"confus|unclear|don('t| not) get", "Comprehension gap", Tier::Strong),
                ],
            },
        ),
        (
            Context::Business,
            PatternSet {
                positive: vec![
                    SignalPattern::new(r"need someone|looking for|require", "Explicit need stated", Tier::VeryStrong),
                    SignalPattern::new(r"budget|ready to|prepared to", "Resource commitment", Tier::VeryStrong),
                    SignalPattern::new(r"decision maker|authority|approve", "Power indicator", Tier::Strong),
                    SignalPattern::new(r"timeline|deadline|asap|urgent", "Urgency signal", Tier::Strong),
                    SignalPattern::new(r"impressive|excellent|outstanding", "High praise", Tier::Strong),
                ],
                negative: vec![
                    SignalPattern::new(r"competitor|alternative|other option", "Shopping around", Tier::Strong),
                    SignalPattern::new(r"check with|run it by|get approval", "Not sole decision maker", Tier::Moderate),
                    SignalPattern::new(r"budget constraint|limited|tight", "Financial hesitation", Tier::Strong),
                ],
            },
        ),
        (
            Context::Romantic,
            PatternSet {
                positive: vec![
                    SignalPattern::new(r"miss you|thinking (of|about) you", "Emotional investment", Tier::VeryStrong),
                    SignalPattern::new(r"see you|meet up|hang out", "Seeking proximity", Tier::Strong),
                    SignalPattern::new(r"😍|❤️|😘|💕|🥰", "Romantic emoji usage", Tier::Moderate),
                    SignalPattern::new(
                        r"you('re| are) (so |really )?(cute|sweet|amazing|special)",
                        "Direct compliment",
                        Tier::VeryStrong,
                    ),
                    SignalPattern::new(r"can('t|not) wait", "Anticipation", Tier::Strong),
                ],
                negative: vec![
                    SignalPattern::new(r"friend|buddy|pal|mate", "Friend-zone language", Tier::VeryStrong),
                    SignalPattern::new(r"busy|rain check|another time", "Avoidance pattern", Tier::Strong),
                    SignalPattern::new(r"ex|previous|last relationship", "Past relationship focus", Tier::Moderate),
                    SignalPattern::new(r"slow down|take it slow|not ready", "Pace concern", Tier::Strong),
                ],
            },
        ),
    ])
});

/// Record the first hit per label, in message order
fn scan<'a>(
    messages: &[&Message],
    patterns: impl Iterator<Item = &'a SignalPattern> + Clone,
) -> Vec<Signal> {
    let mut found: Vec<Signal> = Vec::new();
    for msg in messages {
        for p in patterns.clone() {
            if p.is_match(&msg.content) && !found.iter().any(|s| s.label == p.label) {
                found.push(Signal {
                    label: p.label.to_string(),
                    excerpt: excerpt(&msg.content, SIGNAL_EXCERPT_CHARS),
                    tier: p.tier,
                });
            }
        }
    }
    // stable: equal tiers keep discovery order
    found.sort_by_key(|s| s.tier);
    found
}

/// Detect signals in counterpart messages. Self messages never qualify.
pub fn detect_signals(messages: &[Message], context: Context) -> SignalSet {
    let theirs = counterpart_messages(messages);
    let extra = CONTEXT_PATTERNS.get(&context);

    let positive = UNIVERSAL
        .positive
        .iter()
        .chain(extra.into_iter().flat_map(|set| set.positive.iter()));
    let negative = UNIVERSAL
        .negative
        .iter()
        .chain(extra.into_iter().flat_map(|set| set.negative.iter()));

    let mut green_lights = scan(&theirs, positive);
    let mut red_flags = scan(&theirs, negative);
    green_lights.truncate(MAX_GREEN_LIGHTS);
    red_flags.truncate(MAX_RED_FLAGS);

    tracing::debug!(
        "signals detected for {}: {} green, {} red",
        context,
        green_lights.len(),
        red_flags.len()
    );

    SignalSet {
        green_lights,
        red_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convo(lines: &[(&str, &str)]) -> Vec<Message> {
        lines
            .iter()
            .map(|(s, c)| Message::new(None, *s, *c))
            .collect()
    }

    #[test]
    fn test_self_messages_ignored() {
        let m = convo(&[
            ("You", "Looking forward to it! Thanks, great!"),
            ("Kai", "ok"),
        ]);
        let s = detect_signals(&m, Context::General);
        assert!(s.green_lights.is_empty());
        assert!(s.red_flags.is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let m = convo(&[
            ("Kai", "That is great"),
            ("You", "yep"),
            ("Kai", "Amazing, really perfect work here"),
        ]);
        let s = detect_signals(&m, Context::General);
        let affirm: Vec<_> = s
            .green_lights
            .iter()
            .filter(|g| g.label == "Positive affirmation")
            .collect();
        assert_eq!(affirm.len(), 1);
        assert_eq!(affirm[0].excerpt, "That is great");
    }

    #[test]
    fn test_sorted_strongest_first_and_capped() {
        let m = convo(&[
            ("Kai", "Hey! thanks, great, yes. Let me see. We could do it? Really?"),
            ("Kai", "Looking forward to it"),
            ("You", "ok"),
        ]);
        let s = detect_signals(&m, Context::General);
        assert!(s.green_lights.len() <= MAX_GREEN_LIGHTS);
        assert!(s.green_lights.windows(2).all(|w| w[0].tier <= w[1].tier));
        assert_eq!(s.green_lights[0].tier, Tier::Strong);
    }

    #[test]
    fn test_context_patterns_only_apply_to_their_context() {
        let m = convo(&[("Kai", "We need someone with an impressive track record"), ("You", "ok")]);
        let business = detect_signals(&m, Context::Business);
        assert!(business.green_lights.iter().any(|g| g.label == "Explicit need stated"));
        assert_eq!(business.green_lights[0].tier, Tier::VeryStrong);

        let general = detect_signals(&m, Context::General);
        assert!(!general.green_lights.iter().any(|g| g.label == "High praise"));
    }

    #[test]
    fn test_creative_patterns() {
        let m = convo(&[
            ("Kai", "Just pushed the update, check it out"),
            ("Kai", "The upload flow feels clunky"),
            ("You", "ok"),
        ]);
        let creative = detect_signals(&m, Context::CreativeCollab);
        let momentum = creative
            .green_lights
            .iter()
            .find(|g| g.label == "Delivery momentum")
            .expect("delivery momentum");
        assert_eq!(momentum.tier, Tier::Strong);
        assert!(momentum.excerpt.starts_with("Just pushed"));
        assert!(creative.red_flags.iter().any(|r| r.label == "UX friction feedback"));

        for other in [Context::Business, Context::General] {
            let s = detect_signals(&m, other);
            assert!(!s.green_lights.iter().any(|g| g.label == "Delivery momentum"));
            assert!(!s.red_flags.iter().any(|r| r.label == "UX friction feedback"));
        }
    }

    #[test]
    fn test_red_flags_capped() {
        let m = convo(&[
            ("Kai", "sorry, busy, maybe later but we'll see"),
            ("Kai", "my friend said another time, take it slow, my ex was like that"),
            ("You", "ok"),
        ]);
        let s = detect_signals(&m, Context::Romantic);
        assert_eq!(s.red_flags.len(), MAX_RED_FLAGS);
        assert_eq!(s.red_flags[0].tier, Tier::VeryStrong);
    }

    #[test]
    fn test_excerpt_truncated() {
        let long = format!("looking forward {}", "x".repeat(80));
        let m = convo(&[("Kai", long.as_str()), ("You", "ok")]);
        let s = detect_signals(&m, Context::General);
        assert_eq!(s.green_lights[0].excerpt.chars().count(), 50);
        assert!(s.green_lights[0].excerpt.ends_with("..."));
    }
}

//! Critical moment extraction: counterpart messages that shift leverage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::transcript::Message;
use crate::utils::excerpt;

pub const MAX_MOMENTS: usize = 5;
const MOMENT_EXCERPT_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalMoment {
    /// 1-based position in the full message sequence
    pub turn: usize,
    pub excerpt: String,
    pub label: String,
    /// Signed leverage shift
    pub impact: i32,
    pub rationale: String,
}

struct MomentPattern {
    regex: Regex,
    label: &'static str,
    impact: i32,
    rationale: &'static str,
}

fn moment(pattern: &str, label: &'static str, impact: i32, rationale: &'static str) -> MomentPattern {
    MomentPattern {
        regex: Regex::new(&format!("(?i){pattern}")).expect("moment pattern should compile"),
        label,
        impact,
        rationale,
    }
}

// Order matters: the first matching pattern claims the message.
static MOMENT_PATTERNS: Lazy<Vec<MomentPattern>> = Lazy::new(|| {
    vec![
        moment(
            r"need|require|looking for|want",
            "NEED REVEALED",
            15,
            "They expressed a need or desire. This creates an opportunity for you to provide value.",
        ),
        moment(
            r"would love it if|wish|if only",
            "DESIRE EXPRESSED",
            12,
            "An implicit request or wish - addressing this directly builds goodwill.",
        ),
        moment(
            r"impressive|amazing|wow|incredible",
            "VALIDATION MOMENT",
            18,
            "Strong positive feedback. Your value is recognized.",
        ),
        moment(
            r"let me check|get back to you|think about",
            "CONSIDERATION PAUSE",
            -5,
            "A deliberation moment. They need time or have reservations.",
        ),
        moment(
            r"yes|definitely|absolutely|let('s| us) do",
            "COMMITMENT SIGNAL",
            20,
            "Clear agreement or commitment. Momentum is in your favor.",
        ),
        moment(
            r"sorry|apologize|my fault",
            "ACCOUNTABILITY TAKEN",
            8,
            "Taking responsibility shows maturity and investment in the relationship.",
        ),
        moment(
            r"done|finished|ready|check it out",
            "DELIVERY MOMENT",
            15,
            "A deliverable or promise fulfilled. Builds trust and momentum.",
        ),
        moment(
            r"clunky|confus|problem|issue|doesn('t| not) work",
            "FRICTION POINT",
            -10,
            "A problem or complaint surfaced. Address this to maintain momentum.",
        ),
        moment(
            r"cool|nice|good|ok|sounds good",
            "SOFT APPROVAL",
            5,
            "Casual positive acknowledgment. Steady but not enthusiastic.",
        ),
        moment(
            r"\?{2,}|really\?|seriously\?",
            "SURPRISE/DOUBT",
            -3,
            "Questioning or disbelief. May need clarification or proof.",
        ),
    ]
});

/// Flag turning points in counterpart messages.
///
/// The context is accepted for parity with the other analyzers; the pattern
/// list is the same for every context.
pub fn extract_moments(messages: &[Message], _context: Context) -> Vec<CriticalMoment> {
    let mut moments: Vec<CriticalMoment> = Vec::new();

    for (idx, msg) in messages.iter().enumerate() {
        if msg.is_self() {
            continue;
        }
        let Some(p) = MOMENT_PATTERNS.iter().find(|p| p.regex.is_match(&msg.content)) else {
            continue;
        };
        if moments.iter().any(|m| m.label == p.label) {
            continue;
        }
        moments.push(CriticalMoment {
            turn: idx + 1,
            excerpt: excerpt(&msg.content, MOMENT_EXCERPT_CHARS),
            label: p.label.to_string(),
            impact: p.impact,
            rationale: p.rationale.to_string(),
        });
    }

    moments.sort_by_key(|m| std::cmp::Reverse(m.impact.abs()));
    moments.truncate(MAX_MOMENTS);
    tracing::debug!("critical moments extracted: {}", moments.len());
    moments
}

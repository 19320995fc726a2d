//! Behavioral profile of the counterpart.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::transcript::{Message, counterpart_messages, joined_content};
use crate::utils::{coefficient_of_variation, count_char, mean};

static URGENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)now|asap|immediately|today|right away").expect("urgency pattern")
});

static DELIBERATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)think about|consider|maybe later|not sure yet").expect("deliberation pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentLevel {
    High,
    Moderate,
    Low,
}

impl InvestmentLevel {
    pub fn label(self) -> &'static str {
        match self {
            InvestmentLevel::High => "High",
            InvestmentLevel::Moderate => "Moderate",
            InvestmentLevel::Low => "Low",
        }
    }

    pub fn attachment_style(self) -> &'static str {
        match self {
            InvestmentLevel::High => "Engaged-Invested",
            InvestmentLevel::Low => "Detached-Casual",
            InvestmentLevel::Moderate => "Balanced-Pragmatic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehavioralProfile {
    pub communication_style: String,
    pub decision_speed: String,
    pub investment_level: InvestmentLevel,
    /// 70..=98
    pub consistency_score: u8,
    pub hidden_priorities: Vec<String>,
    pub response_pattern: String,
    pub attachment_style: String,
}

fn communication_style(avg_len: f64, text: &str) -> &'static str {
    if avg_len > 100.0 {
        "Detailed-Expressive"
    } else if avg_len < 30.0 {
        "Concise-Direct"
    } else if text.contains("!!") {
        "Enthusiastic-Energetic"
    } else if text.contains("...") {
        "Thoughtful-Measured"
    } else {
        "Balanced"
    }
}

fn decision_speed(text: &str) -> &'static str {
    if URGENCY.is_match(text) {
        "Fast-Decisive"
    } else if DELIBERATION.is_match(text) {
        "Deliberate-Cautious"
    } else {
        "Moderate"
    }
}

fn investment_level(questions: usize, exclamations: usize, share: f64) -> InvestmentLevel {
    if questions > 3 || exclamations > 3 || share > 0.6 {
        InvestmentLevel::High
    } else if share < 0.4 {
        InvestmentLevel::Low
    } else {
        InvestmentLevel::Moderate
    }
}

fn response_pattern(share: f64) -> &'static str {
    if share > 0.55 {
        "Engaged-Initiating"
    } else if share < 0.45 {
        "Responsive-Reactive"
    } else {
        "Balanced"
    }
}

pub fn hidden_priorities(context: Context) -> [&'static str; 3] {
    match context {
        Context::CreativeCollab => ["Ease of use", "Quick results", "Creative freedom"],
        Context::Business => ["Risk mitigation", "ROI validation", "Credibility"],
        Context::Romantic => ["Emotional safety", "Genuine connection", "Compatibility"],
        Context::Friendship => ["Low friction", "Mutual benefit", "Reliability"],
        _ => ["Value exchange", "Trust building", "Clear communication"],
    }
}

/// 70 + up to 20 for steady message lengths (low coefficient of variation),
/// +8 for high investment, capped at 98.
pub fn consistency_score(lengths: &[f64], investment: InvestmentLevel) -> u8 {
    let cv = coefficient_of_variation(lengths).min(1.0);
    let steadiness = (20.0 * (1.0 - cv)).floor() as u8;
    let bonus = if investment == InvestmentLevel::High { 8 } else { 0 };
    (70 + steadiness + bonus).min(98)
}

/// Profile the counterpart. With no counterpart messages the average length is 0.
pub fn profile_counterpart(messages: &[Message], context: Context) -> BehavioralProfile {
    let theirs = counterpart_messages(messages);
    let text = joined_content(&theirs);
    let lengths: Vec<f64> = theirs
        .iter()
        .map(|m| m.content.chars().count() as f64)
        .collect();
    let avg_len = mean(&lengths);
    let share = if messages.is_empty() {
        0.0
    } else {
        theirs.len() as f64 / messages.len() as f64
    };

    let questions = count_char(&text, '?');
    let exclamations = count_char(&text, '!');
    let investment = investment_level(questions, exclamations, share);

    let profile = BehavioralProfile {
        communication_style: communication_style(avg_len, &text).to_string(),
        decision_speed: decision_speed(&text).to_string(),
        investment_level: investment,
        consistency_score: consistency_score(&lengths, investment),
        hidden_priorities: hidden_priorities(context)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        response_pattern: response_pattern(share).to_string(),
        attachment_style: investment.attachment_style().to_string(),
    };
    tracing::debug!(
        "counterpart profile: style={}, investment={}, consistency={}",
        profile.communication_style,
        investment.label(),
        profile.consistency_score
    );
    profile
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
    fn test_style_thresholds() {
        assert_eq!(communication_style(120.0, ""), "Detailed-Expressive");
        assert_eq!(communication_style(10.0, "wow!!"), "Concise-Direct");
        assert_eq!(communication_style(50.0, "wow!!"), "Enthusiastic-Energetic");
        assert_eq!(communication_style(50.0, "hmm..."), "Thoughtful-Measured");
        assert_eq!(communication_style(50.0, "plain"), "Balanced");
    }

    #[test]
    fn test_decision_speed() {
        assert_eq!(decision_speed("can we do it ASAP"), "Fast-Decisive");
        assert_eq!(decision_speed("I'll consider it"), "Deliberate-Cautious");
        assert_eq!(decision_speed("sure"), "Moderate");
    }

    #[test]
    fn test_investment_and_attachment() {
        assert_eq!(investment_level(4, 0, 0.5), InvestmentLevel::High);
        assert_eq!(investment_level(0, 0, 0.7), InvestmentLevel::High);
        assert_eq!(investment_level(0, 0, 0.3), InvestmentLevel::Low);
        assert_eq!(investment_level(1, 1, 0.5), InvestmentLevel::Moderate);
        assert_eq!(InvestmentLevel::Low.attachment_style(), "Detached-Casual");
    }

    #[test]
    fn test_consistency_is_deterministic_and_bounded() {
        let steady = [40.0, 40.0, 40.0];
        assert_eq!(consistency_score(&steady, InvestmentLevel::Moderate), 90);
        assert_eq!(consistency_score(&steady, InvestmentLevel::High), 98);
        let erratic = [1.0, 200.0, 3.0, 400.0];
        let low = consistency_score(&erratic, InvestmentLevel::Low);
        assert!((70..=98).contains(&low));
        assert!(low < 90);
    }

    #[test]
    fn test_profile_without_counterpart_messages() {
        let m = convo(&[("You", "hello"), ("You", "anyone?")]);
        let p = profile_counterpart(&m, Context::General);
        assert_eq!(p.communication_style, "Concise-Direct");
        assert_eq!(p.investment_level, InvestmentLevel::Low);
        assert_eq!(p.response_pattern, "Responsive-Reactive");
        assert_eq!(p.hidden_priorities.len(), 3);
    }

    #[test]
    fn test_hidden_priorities_by_context() {
        assert_eq!(hidden_priorities(Context::Business)[0], "Risk mitigation");
        assert_eq!(hidden_priorities(Context::Negotiation)[0], "Value exchange");
    }
}

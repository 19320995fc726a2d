//! Prioritized next actions from context and detected signals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::signals::SignalSet;
use crate::transcript::{Message, counterpart_messages};

pub const MAX_QUICK_WINS: usize = 4;

static FEEDBACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)clunky|confus|wish|would love").expect("feedback pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickWin {
    pub action: String,
    pub why: String,
    pub urgency: String,
}

impl QuickWin {
    fn new(action: impl Into<String>, why: &str, urgency: &str) -> Self {
        Self {
            action: action.into(),
            why: why.to_string(),
            urgency: urgency.to_string(),
        }
    }
}

fn playbook(context: Context, last_theirs: &str) -> Vec<QuickWin> {
    match context {
        Context::CreativeCollab => {
            let mut wins = Vec::new();
            if FEEDBACK.is_match(last_theirs) {
                wins.push(QuickWin::new(
                    "Address their specific feedback immediately",
                    "They gave you a direct improvement suggestion. Acting on it fast shows you listen and care.",
                    "Now",
                ));
            }
            wins.push(QuickWin::new(
                "Send a quick demo or screenshot of progress",
                "Visual progress builds excitement and keeps momentum. Show, don't tell.",
                "Within hours",
            ));
            wins.push(QuickWin::new(
                "Ask one specific question about their use case",
                "Shows you're building for them, not just building. Creates investment.",
                "Next message",
            ));
            wins
        }
        Context::Business => vec![
            QuickWin::new(
                "Prepare 2-3 specific insights relevant to their situation",
                "Arrive with value, not questions. Show expertise before asking for commitment.",
                "Before next meeting",
            ),
            QuickWin::new(
                "Research their company and recent news",
                "Match their investment. If they researched you, reciprocate.",
                "Today",
            ),
            QuickWin::new(
                "Have a clear next step ready (proposal, timeline, intro)",
                "Don't let momentum die. Make it easy for them to say yes to the next step.",
                "Prepare now",
            ),
        ],
        Context::Romantic => vec![
            QuickWin::new(
                "Suggest a specific plan, not an open question",
                "\"Want to grab coffee at [place] on Saturday?\" beats \"Want to hang sometime?\"",
                "Next message",
            ),
            QuickWin::new(
                "Reference something specific they mentioned",
                "Shows you listen and remember. Creates feeling of being understood.",
                "In conversation",
            ),
            QuickWin::new(
                "Match their energy level, then add 10%",
                "Don't be more invested than them, but show clear interest.",
                "Ongoing",
            ),
        ],
        Context::Friendship => vec![
            QuickWin::new(
                "Make concrete plans instead of vague intentions",
                "\"Let's hang soon\" dies. \"Saturday at 3?\" happens.",
                "Next message",
            ),
            QuickWin::new(
                "Share something relevant to their interests",
                "A meme, article, or link shows you think of them outside the chat.",
                "When you see something relevant",
            ),
        ],
        _ => vec![
            QuickWin::new(
                "Match their pacing before pushing for anything",
                "Replying faster or longer than they do shifts leverage to them.",
                "Next message",
            ),
            QuickWin::new(
                "Ask one clarifying question about what they want",
                "Knowing their actual goal beats guessing at it.",
                "In conversation",
            ),
        ],
    }
}

/// Build the action list. A friction-type top red flag jumps the queue.
pub fn quick_wins(messages: &[Message], context: Context, signals: &SignalSet) -> Vec<QuickWin> {
    let last_theirs = counterpart_messages(messages)
        .last()
        .map_or("", |m| m.content.as_str());
    let mut wins = playbook(context, last_theirs);

    if let Some(top) = signals.red_flags.first()
        && top.label.to_lowercase().contains("friction")
    {
        wins.insert(
            0,
            QuickWin::new(
                format!("Address the \"{}\" directly", top.label.to_lowercase()),
                "Unaddressed friction compounds. Acknowledge and resolve it.",
                "Priority",
            ),
        );
    }

    wins.truncate(MAX_QUICK_WINS);
    wins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::signals::{Signal, Tier};

    fn flag(label: &str) -> Signal {
        Signal {
            label: label.to_string(),
            excerpt: "x".to_string(),
            tier: Tier::Strong,
        }
    }

    #[test]
    fn test_creative_feedback_first() {
        let m = vec![
            Message::new(None, "Rio", "the upload flow is clunky"),
            Message::new(None, "You", "on it"),
        ];
        let wins = quick_wins(&m, Context::CreativeCollab, &SignalSet::default());
        assert_eq!(wins.len(), 3);
        assert_eq!(wins[0].urgency, "Now");
    }

    #[test]
    fn test_friction_flag_prepended_and_capped() {
        let m = vec![Message::new(None, "Rio", "this is confusing")];
        let signals = SignalSet {
            green_lights: vec![],
            red_flags: vec![flag("UX friction feedback")],
        };
        let wins = quick_wins(&m, Context::CreativeCollab, &signals);
        assert_eq!(wins.len(), MAX_QUICK_WINS);
        assert_eq!(wins[0].action, "Address the \"ux friction feedback\" directly");
        assert_eq!(wins[0].urgency, "Priority");
    }

    #[test]
    fn test_non_friction_flag_ignored() {
        let signals = SignalSet {
            green_lights: vec![],
            red_flags: vec![flag("Hedging language")],
        };
        let wins = quick_wins(&[], Context::Business, &signals);
        assert_eq!(wins.len(), 3);
        assert_eq!(wins[1].urgency, "Today");
    }

    #[test]
    fn test_general_fallback() {
        let wins = quick_wins(&[], Context::Negotiation, &SignalSet::default());
        assert_eq!(wins.len(), 2);
        assert_eq!(quick_wins(&[], Context::Friendship, &SignalSet::default()).len(), 2);
    }
}

//! Communication archetype of the analyzing party.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::context::Context;
use crate::transcript::{Message, joined_content, self_messages};
use crate::utils::{count_char, mean};

static HELPFUL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)help|here|done|check|update|ready").expect("helpful pattern"));

static DELIBERATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)let me|i('ll| will) get back|check my").expect("deliberate pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Builder,
    Consultant,
    Explorer,
    Minimalist,
    Connector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicatorProfile {
    pub archetype: Archetype,
    pub title: String,
    pub style: String,
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub watch_points: Vec<String>,
    pub description: String,
}

struct ArchetypeCard {
    title: &'static str,
    style: &'static str,
    traits: [&'static str; 3],
    strengths: [&'static str; 3],
    watch_points: [&'static str; 2],
    description: &'static str,
}

fn card(archetype: Archetype) -> ArchetypeCard {
    match archetype {
        Archetype::Builder => ArchetypeCard {
            title: "The Builder",
            style: "Action-Oriented Creator",
            traits: ["Quick to deliver", "Solution-focused", "Responsive to feedback"],
            strengths: ["Fast iteration", "Bias to action", "User empathy"],
            watch_points: [
                "May over-promise on timelines",
                "Risk of burnout from over-responsiveness",
            ],
            description: "You show up with results, not excuses. Your quick turnaround builds trust and momentum. People know you deliver.",
        },
        Archetype::Consultant => ArchetypeCard {
            title: "The Consultant",
            style: "Strategic Validator",
            traits: ["Measured responses", "Value-first positioning", "Controlled availability"],
            strengths: ["Frame control", "Professional authority", "Scarcity signaling"],
            watch_points: ["Could appear aloof", "Risk of over-qualifying"],
            description: "You communicate with deliberate pacing and position yourself as the prize. Your responses create value before asking for anything.",
        },
        Archetype::Explorer => ArchetypeCard {
            title: "The Explorer",
            style: "Curiosity-Driven",
            traits: ["Active listener", "Genuine interest", "Information gatherer"],
            strengths: ["Builds rapport through questions", "Learns quickly", "Shows engagement"],
            watch_points: ["May seem interrogative", "Could ask before contributing"],
            description: "You lead with curiosity and make others feel heard. Your questions show genuine interest and help you understand before acting.",
        },
        Archetype::Minimalist => ArchetypeCard {
            title: "The Minimalist",
            style: "Efficient Communicator",
            traits: ["Direct messaging", "No filler", "Action-oriented"],
            strengths: ["Clear communication", "Respects others' time", "Gets to the point"],
            watch_points: ["May seem cold or disinterested", "Could add more warmth"],
            description: "You say what needs to be said without excess. Your communication is efficient and respectful of time.",
        },
        Archetype::Connector => ArchetypeCard {
            title: "The Connector",
            style: "Balanced Communicator",
            traits: ["Adaptive tone", "Reciprocal engagement", "Steady presence"],
            strengths: ["Versatile communication", "Matches energy well", "Reliable"],
            watch_points: ["Could differentiate more", "Risk of being forgettable"],
            description: "You adapt to the conversation's needs and maintain balanced engagement. Reliable and easy to work with.",
        },
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pick_archetype(text: &str, avg_len: f64, context: Context) -> Archetype {
    let question_asker = count_char(text, '?') > 2;
    let concise = avg_len < 40.0;

    if HELPFUL.is_match(text) && context == Context::CreativeCollab {
        Archetype::Builder
    } else if DELIBERATE.is_match(text) && context == Context::Business {
        Archetype::Consultant
    } else if question_asker {
        Archetype::Explorer
    } else if concise {
        Archetype::Minimalist
    } else {
        Archetype::Connector
    }
}

/// Profile the analyzing party's own messages.
pub fn profile_self(messages: &[Message], context: Context) -> CommunicatorProfile {
    let mine = self_messages(messages);
    let text = joined_content(&mine);
    let lengths: Vec<f64> = mine
        .iter()
        .map(|m| m.content.chars().count() as f64)
        .collect();
    let archetype = pick_archetype(&text, mean(&lengths), context);
    let c = card(archetype);

    CommunicatorProfile {
        archetype,
        title: c.title.to_string(),
        style: c.style.to_string(),
        traits: owned(&c.traits),
        strengths: owned(&c.strengths),
        watch_points: owned(&c.watch_points),
        description: c.description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultant_needs_business_context() {
        let text = "Let me check my calendar and get back to you";
        assert_eq!(pick_archetype(text, 60.0, Context::Business), Archetype::Consultant);
        assert_eq!(pick_archetype(text, 60.0, Context::Romantic), Archetype::Connector);
    }

    #[test]
    fn test_builder_in_creative_context() {
        assert_eq!(
            pick_archetype("done, pushed the update", 20.0, Context::CreativeCollab),
            Archetype::Builder
        );
    }

    #[test]
    fn test_explorer_and_minimalist() {
        assert_eq!(pick_archetype("why? how? when?", 50.0, Context::General), Archetype::Explorer);
        assert_eq!(pick_archetype("ok", 2.0, Context::General), Archetype::Minimalist);
    }

    #[test]
    fn test_no_self_messages() {
        let m = vec![Message::new(None, "Ana", "hi"), Message::new(None, "Ana", "there")];
        let p = profile_self(&m, Context::General);
        assert_eq!(p.archetype, Archetype::Minimalist);
        assert_eq!(p.traits.len(), 3);
        assert_eq!(p.watch_points.len(), 2);
    }
}

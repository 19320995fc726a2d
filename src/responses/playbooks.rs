//! One reply playbook per context family.

use super::{ImpactTier, ReplyContext, ResponseVariant, RiskTier};
use crate::analysis::Context;
use crate::utils::excerpt;

const ECHO_CHARS: usize = 40;

pub trait Playbook {
    fn name(&self) -> &'static str;
    fn variants(&self, reply: &ReplyContext<'_>) -> Vec<ResponseVariant>;
}

pub struct Creative;
pub struct Business;
pub struct Romantic;
/// Friendship and every context without a dedicated table
pub struct Casual;

pub fn playbook_for(context: Context) -> &'static dyn Playbook {
    match context {
        Context::CreativeCollab => &Creative,
        Context::Business => &Business,
        Context::Romantic => &Romantic,
        _ => &Casual,
    }
}

impl Playbook for Creative {
    fn name(&self) -> &'static str {
        "creative"
    }

    fn variants(&self, reply: &ReplyContext<'_>) -> Vec<ResponseVariant> {
        let subject = if reply.last_counterpart_message.contains("screenshot") {
            "screenshot upload"
        } else {
            "that feature"
        };
        vec![
            ResponseVariant::new(
                "Action-Oriented",
                "builder",
                format!(
                    "Just pushed the update - {subject} should be working now. Try it out and let me know what you think."
                ),
                &[
                    ("Just pushed", "Immediate Action", "Shows you act fast. Builds trust through delivery."),
                    ("Try it out", "Engagement Invitation", "Invites them to participate, creates ownership."),
                    ("let me know what you think", "Feedback Loop", "Shows you value their input. Keeps iteration going."),
                ],
                RiskTier::VeryLow,
                ImpactTier::High,
            ),
            ResponseVariant::new(
                "Curiosity-Driven",
                "explorer",
                "Done! Quick question - how are you actually using this? Want to make sure I'm building the right thing for your workflow.",
                &[
                    ("Done!", "Delivery Confirmation", "Short, confident. You delivered."),
                    ("how are you actually using this", "User Research", "Gets real insight, not assumptions."),
                    ("right thing for your workflow", "User-Centric Framing", "Shows you're building for them, not your ego."),
                ],
                RiskTier::VeryLow,
                ImpactTier::ModerateHigh,
            ),
            ResponseVariant::new(
                "Minimal",
                "concise",
                "Done, check it out 👆",
                &[
                    ("Done", "Delivery Signal", "No fluff. You said you'd do it, you did it."),
                    ("👆", "Visual Direction", "Points to the link/update. Efficient."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Moderate,
            ),
        ]
    }
}

impl Playbook for Business {
    fn name(&self) -> &'static str {
        "business"
    }

    fn variants(&self, _reply: &ReplyContext<'_>) -> Vec<ResponseVariant> {
        vec![
            ResponseVariant::new(
                "Frame Control",
                "assertive",
                "Looking forward to our conversation. I've been thinking about your situation - I have some frameworks that might shift your perspective. Bring your toughest constraints.",
                &[
                    ("I've been thinking", "Investment Signal", "Shows you're already engaged, creates reciprocity."),
                    ("shift your perspective", "Authority Frame", "Positions you as the one with superior insight."),
                    ("Bring your toughest constraints", "Challenge Frame", "Flips dynamic - you're testing them, not vice versa."),
                ],
                RiskTier::Low,
                ImpactTier::High,
            ),
            ResponseVariant::new(
                "Value-First",
                "balanced",
                "Great, I've pulled together some initial thoughts specific to your situation - curious to pressure-test them with you. See you then.",
                &[
                    ("pulled together some initial thoughts", "Prepared Value", "You're arriving with something, not extracting."),
                    ("pressure-test", "Collaborative Frame", "Implies partnership, reduces sales resistance."),
                    ("specific to your situation", "Personalization", "Shows you understand their context is unique."),
                ],
                RiskTier::VeryLow,
                ImpactTier::ModerateHigh,
            ),
            ResponseVariant::new(
                "Professional Minimal",
                "minimal",
                "Confirmed. Looking forward to it.",
                &[
                    ("Confirmed", "Clarity", "No ambiguity. Professional and direct."),
                    ("Looking forward to it", "Positive Close", "Warm but not over-eager."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Moderate,
            ),
        ]
    }
}

impl Playbook for Romantic {
    fn name(&self) -> &'static str {
        "romantic"
    }

    fn variants(&self, _reply: &ReplyContext<'_>) -> Vec<ResponseVariant> {
        vec![
            ResponseVariant::new(
                "Confident Initiative",
                "assertive",
                "I've been thinking about that thing you mentioned. Free Saturday afternoon? I know a great spot.",
                &[
                    ("I've been thinking", "Investment Signal", "Shows they're on your mind. Flattering but not desperate."),
                    ("Free Saturday afternoon?", "Specific Ask", "Concrete > vague. Makes it easy to say yes."),
                    ("I know a great spot", "Leadership", "You have a plan. Confident, not needy."),
                ],
                RiskTier::Low,
                ImpactTier::High,
            ),
            ResponseVariant::new(
                "Warm & Playful",
                "balanced",
                "That's actually really interesting. We should talk about it more - maybe over coffee this week?",
                &[
                    ("That's actually really interesting", "Genuine Interest", "Validates their thought. Makes them feel heard."),
                    ("We should talk about it more", "Continuation Hook", "Creates reason for next interaction."),
                    ("maybe over coffee", "Low-Pressure Suggestion", "Coffee is casual. Easy yes."),
                ],
                RiskTier::VeryLow,
                ImpactTier::ModerateHigh,
            ),
            ResponseVariant::new(
                "Cool & Chill",
                "minimal",
                "Ha yeah for sure. Let me know when you're free 🙂",
                &[
                    ("Ha yeah", "Casual Agreement", "Relaxed, not over-eager."),
                    ("Let me know when you're free", "Ball in Their Court", "Shows interest without chasing."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Moderate,
            ),
        ]
    }
}

impl Casual {
    /// Quotes the counterpart's last message back at them
    fn mirror(reply: &ReplyContext<'_>) -> ResponseVariant {
        let last = reply.last_counterpart_message.trim();
        if last.is_empty() {
            return ResponseVariant::new(
                "Mirror",
                "reflective",
                format!("Picking this back up, {} - what's new on your end?", reply.counterpart_name),
                &[
                    ("Picking this back up", "Low-Pressure Restart", "Reopens the thread without guilt or pressure."),
                    ("what's new on your end?", "Open Question", "Gives them an easy way in."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Light,
            );
        }
        let quoted = format!("\"{}\"", excerpt(last, ECHO_CHARS));
        ResponseVariant::new(
            "Mirror",
            "reflective",
            format!("Ha, {quoted} - that's a good point. What got you thinking about it?"),
            &[
                (quoted.as_str(), "Active Listening", "Quoting their own words shows you actually read them."),
                ("What got you thinking about it?", "Open Question", "Invites them to keep going without pressure."),
            ],
            RiskTier::Low,
            ImpactTier::Moderate,
        )
    }
}

impl Playbook for Casual {
    fn name(&self) -> &'static str {
        "casual"
    }

    fn variants(&self, reply: &ReplyContext<'_>) -> Vec<ResponseVariant> {
        vec![
            ResponseVariant::new(
                "Engaged",
                "active",
                "Yeah that's dope. I'm down - when works for you?",
                &[
                    ("that's dope", "Affirmation", "Shows enthusiasm and agreement."),
                    ("I'm down", "Clear Commitment", "No ambiguity. You're in."),
                    ("when works for you", "Collaborative Scheduling", "Moves toward action."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Moderate,
            ),
            ResponseVariant::new(
                "Add Value",
                "contributor",
                "Nice, that reminds me of something - let me send you this thing I found. Might be relevant.",
                &[
                    ("that reminds me", "Connection Making", "Shows active listening and association."),
                    ("let me send you", "Value Offer", "You're adding to the conversation, not just taking."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Moderate,
            ),
            ResponseVariant::new(
                "Minimal",
                "chill",
                "Facts. Let's do it.",
                &[
                    ("Facts", "Agreement", "Casual strong agreement."),
                    ("Let's do it", "Action Commitment", "Short, decisive, committed."),
                ],
                RiskTier::VeryLow,
                ImpactTier::Light,
            ),
            Self::mirror(reply),
        ]
    }
}

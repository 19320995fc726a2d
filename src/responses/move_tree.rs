//! Likely counterpart reactions to a chosen reply, with a follow-up for each.

use serde::{Deserialize, Serialize};

use super::ResponseVariant;
use crate::analysis::Context;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Percent; the three branches of a tree sum to 100
    pub probability: u8,
    pub response: String,
    pub your_move: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTree {
    /// `type` of the variant the tree was built for
    pub variant: String,
    pub positive: Branch,
    pub neutral: Branch,
    pub negative: Branch,
}

impl MoveTree {
    pub fn branches(&self) -> [(&'static str, &Branch); 3] {
        [
            ("positive", &self.positive),
            ("neutral", &self.neutral),
            ("negative", &self.negative),
        ]
    }
}

fn branch(probability: u8, response: &str, your_move: &str) -> Branch {
    Branch {
        probability,
        response: response.to_string(),
        your_move: your_move.to_string(),
    }
}

pub fn build_move_tree(variant: &ResponseVariant, context: Context) -> MoveTree {
    let (positive, neutral, negative) = match context {
        Context::CreativeCollab => (
            branch(
                70,
                "They try it out and give positive feedback or more specific requests",
                "Acknowledge, then ask what they'd want to see next",
            ),
            branch(
                25,
                "Brief acknowledgment like 'cool' or 'nice'",
                "Let it sit. They'll come back when they have more to say",
            ),
            branch(
                5,
                "More feedback or issues discovered",
                "Thank them for the feedback, address it promptly",
            ),
        ),
        _ => (
            branch(
                60,
                "They respond with enthusiasm or add to the conversation",
                "Match energy, add value, suggest next step if appropriate",
            ),
            branch(
                30,
                "Simple acknowledgment without much elaboration",
                "No immediate action needed. Let conversation breathe.",
            ),
            branch(
                10,
                "Delayed response, pushback, or topic change",
                "Give space. Don't chase. Reengage with new value later.",
            ),
        ),
    };

    MoveTree {
        variant: variant.kind.clone(),
        positive,
        neutral,
        negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{ReplyContext, responses_for};

    fn first_variant(context: Context) -> ResponseVariant {
        let reply = ReplyContext {
            counterpart_name: "Sam",
            last_counterpart_message: "ok",
        };
        responses_for(context, &reply).remove(0)
    }

    #[test]
    fn test_probabilities_sum_to_100() {
        for context in [Context::CreativeCollab, Context::Business, Context::General] {
            let tree = build_move_tree(&first_variant(context), context);
            let total: u32 = tree.branches().iter().map(|(_, b)| b.probability as u32).sum();
            assert_eq!(total, 100);
        }
    }

    #[test]
    fn test_creative_split() {
        let tree = build_move_tree(&first_variant(Context::CreativeCollab), Context::CreativeCollab);
        assert_eq!(tree.variant, "Action-Oriented");
        assert_eq!(tree.positive.probability, 70);
        assert_eq!(tree.negative.probability, 5);

        let tree = build_move_tree(&first_variant(Context::Romantic), Context::Romantic);
        assert_eq!(tree.positive.probability, 60);
        assert_eq!(tree.neutral.probability, 30);
    }
}

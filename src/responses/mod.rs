//! Candidate replies: a context-keyed table of annotated templates.

pub mod move_tree;
pub mod playbooks;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analysis::{AnalysisResult, Context};
use crate::transcript::{Message, counterpart_messages};

pub use move_tree::{Branch, MoveTree, build_move_tree};
pub use playbooks::Playbook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    VeryLow,
    Low,
    Moderate,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskTier::VeryLow => "Very Low",
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactTier {
    High,
    ModerateHigh,
    Moderate,
    Light,
}

impl fmt::Display for ImpactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImpactTier::High => "High",
            ImpactTier::ModerateHigh => "Moderate-High",
            ImpactTier::Moderate => "Moderate",
            ImpactTier::Light => "Light",
        })
    }
}

/// Why a phrase in a reply works
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub phrase: String,
    pub principle: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseVariant {
    #[serde(rename = "type")]
    pub kind: String,
    pub style: String,
    pub message: String,
    pub annotations: Vec<Annotation>,
    pub risk: RiskTier,
    pub impact: ImpactTier,
}

impl ResponseVariant {
    pub(crate) fn new(
        kind: &str,
        style: &str,
        message: impl Into<String>,
        annotations: &[(&str, &str, &str)],
        risk: RiskTier,
        impact: ImpactTier,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            style: style.to_string(),
            message: message.into(),
            annotations: annotations
                .iter()
                .map(|(phrase, principle, explanation)| Annotation {
                    phrase: phrase.to_string(),
                    principle: principle.to_string(),
                    explanation: explanation.to_string(),
                })
                .collect(),
            risk,
            impact,
        }
    }
}

/// What a playbook may echo from the conversation
#[derive(Debug, Clone, Copy)]
pub struct ReplyContext<'a> {
    pub counterpart_name: &'a str,
    /// Content of the counterpart's most recent message, empty if none
    pub last_counterpart_message: &'a str,
}

/// Candidate replies for an analyzed conversation, keyed by its detected
/// (or overridden) context.
pub fn generate_responses(analysis: &AnalysisResult, messages: &[Message]) -> Vec<ResponseVariant> {
    let last = counterpart_messages(messages)
        .last()
        .map_or("", |m| m.content.as_str());
    let ctx = ReplyContext {
        counterpart_name: &analysis.counterpart_name,
        last_counterpart_message: last,
    };
    responses_for(analysis.primary_context(), &ctx)
}

pub fn responses_for(context: Context, reply: &ReplyContext<'_>) -> Vec<ResponseVariant> {
    let playbook = playbooks::playbook_for(context);
    let variants = playbook.variants(reply);
    tracing::debug!(
        "{} playbook produced {} variants for {}",
        playbook.name(),
        variants.len(),
        context
    );
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::transcript::parse_transcript;

    #[test]
    fn test_variant_counts_per_context() {
        let reply = ReplyContext {
            counterpart_name: "Sam",
            last_counterpart_message: "sounds fun",
        };
        for (context, expected) in [
            (Context::CreativeCollab, 3),
            (Context::Business, 3),
            (Context::Romantic, 3),
            (Context::Friendship, 4),
            (Context::Conflict, 4),
            (Context::General, 4),
        ] {
            assert_eq!(responses_for(context, &reply).len(), expected, "{context}");
        }
    }

    #[test]
    fn test_generate_from_analysis() {
        let text = "Sam: we should brainstorm the app design together\nYou: yes";
        let messages = parse_transcript(text);
        let analysis =
            crate::analysis::analyze_messages(&messages, &AnalysisConfig::default()).unwrap();
        let variants = generate_responses(&analysis, &messages);
        assert_eq!(analysis.primary_context(), Context::CreativeCollab);
        assert_eq!(variants[0].kind, "Action-Oriented");
        assert!(variants[0].message.contains("that feature"));
    }

    #[test]
    fn test_serialized_shape() {
        let reply = ReplyContext {
            counterpart_name: "Sam",
            last_counterpart_message: "",
        };
        let v = &responses_for(Context::Business, &reply)[0];
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["type"], "Frame Control");
        assert_eq!(json["risk"], "low");
        assert_eq!(json["impact"], "high");
        assert_eq!(v.risk.to_string(), "Low");
        assert_eq!(ImpactTier::ModerateHigh.to_string(), "Moderate-High");
    }
}

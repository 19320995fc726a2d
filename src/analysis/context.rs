//! Context classification by keyword scoring.
//!
//! Every category owns a fixed keyword list. A keyword found anywhere in the
//! lower-cased transcript adds 2 points to its category when it is longer than
//! four characters and 1 point otherwise. The highest total wins; ties go to
//! the category declared first in [`Context::SCORED`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SignalLabError;
use crate::transcript::Message;

pub const ROMANTIC_KEYWORDS: &[&str] = &[
    "date", "dinner", "drinks", "cute", "attractive", "miss you", "thinking of you", "love",
    "heart", "kiss", "hug", "baby", "babe", "hun", "sweetheart", "beautiful", "handsome",
    "tonight", "weekend plans", "netflix", "chill", "relationship", "feelings", "chemistry",
    "connection", "spark", "vibes", "❤️", "😍", "😘", "💕", "coffee sometime", "get to know",
    "single",
];

pub const BUSINESS_KEYWORDS: &[&str] = &[
    "meeting", "proposal", "client", "project", "deadline", "budget", "contract", "invoice",
    "company", "business", "professional", "office", "work", "colleague", "manager", "ceo",
    "startup", "investment", "revenue", "market", "strategy", "consulting", "service",
    "product", "pricing", "deal", "partnership", "collaboration", "firm", "enterprise", "b2b",
    "roi", "kpi",
];

pub const CREATIVE_KEYWORDS: &[&str] = &[
    "app", "feature", "build", "code", "design", "create", "make", "project", "idea", "concept",
    "prototype", "feedback", "iteration", "version", "update", "ship", "launch", "product",
    "tool", "platform", "video", "content", "music", "art", "creative", "collab", "together",
    "brainstorm", "sora", "ai", "meditation", "youtube", "views", "income",
];

pub const FRIENDSHIP_KEYWORDS: &[&str] = &[
    "hang out", "chill", "bro", "dude", "man", "lol", "haha", "funny", "game", "party",
    "weekend", "beer", "food", "movie", "show", "trip", "vacation", "gym", "workout", "sports",
    "match", "team", "cool", "awesome", "sick", "fire", "ya", "yeah", "nah", "fr", "tbh", "ngl",
    "imo",
];

pub const CONFLICT_KEYWORDS: &[&str] = &[
    "angry", "upset", "disappointed", "frustrated", "annoyed", "problem", "issue", "wrong",
    "fault", "blame", "sorry", "apologize", "hurt", "offensive", "rude", "disrespect", "unfair",
    "disagree", "argument", "fight", "misunderstand", "explain", "clarify", "resolve", "fix",
];

pub const NEGOTIATION_KEYWORDS: &[&str] = &[
    "price", "cost", "offer", "counter", "deal", "terms", "agreement", "negotiate", "discount",
    "value", "worth", "budget", "afford", "pay", "rate", "fee", "compensation", "salary",
    "raise", "promotion",
];

pub const SUPPORT_KEYWORDS: &[&str] = &[
    "help", "advice", "suggest", "recommend", "think", "opinion", "should i", "what do you",
    "confused", "unsure", "stuck", "struggling", "difficult", "hard", "stress", "anxious",
    "worried", "scared", "need", "please",
];

/// Dominant purpose of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Context {
    Romantic,
    Business,
    CreativeCollab,
    Friendship,
    Conflict,
    Negotiation,
    SupportSeeking,
    General,
}

impl Context {
    /// Scored categories in tie-break order. `General` is the zero-score fallback.
    pub const SCORED: [Context; 7] = [
        Context::Romantic,
        Context::Business,
        Context::CreativeCollab,
        Context::Friendship,
        Context::Conflict,
        Context::Negotiation,
        Context::SupportSeeking,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Context::Romantic => ROMANTIC_KEYWORDS,
            Context::Business => BUSINESS_KEYWORDS,
            Context::CreativeCollab => CREATIVE_KEYWORDS,
            Context::Friendship => FRIENDSHIP_KEYWORDS,
            Context::Conflict => CONFLICT_KEYWORDS,
            Context::Negotiation => NEGOTIATION_KEYWORDS,
            Context::SupportSeeking => SUPPORT_KEYWORDS,
            Context::General => &[],
        }
    }

    /// Human-readable label, e.g. "Creative Collab"
    pub fn label(self) -> &'static str {
        match self {
            Context::Romantic => "Romantic",
            Context::Business => "Business",
            Context::CreativeCollab => "Creative Collab",
            Context::Friendship => "Friendship",
            Context::Conflict => "Conflict",
            Context::Negotiation => "Negotiation",
            Context::SupportSeeking => "Support Seeking",
            Context::General => "General",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Context {
    type Err = SignalLabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "romantic" => Ok(Context::Romantic),
            "business" => Ok(Context::Business),
            "creative" | "creative_collab" | "creative_collaboration" => Ok(Context::CreativeCollab),
            "friendship" | "friend" => Ok(Context::Friendship),
            "conflict" => Ok(Context::Conflict),
            "negotiation" => Ok(Context::Negotiation),
            "support" | "support_seeking" => Ok(Context::SupportSeeking),
            "general" => Ok(Context::General),
            _ => Err(SignalLabError::InvalidParams {
                message: format!("unknown context '{}'", s),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub context: Context,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResult {
    pub primary: Context,
    /// 0..=98, or 50 when nothing scored
    pub confidence: u8,
    /// Per-category totals in [`Context::SCORED`] order
    pub scores: Vec<CategoryScore>,
    /// True when `primary` came from configuration rather than detection
    pub overridden: bool,
}

impl ContextResult {
    pub fn score_for(&self, context: Context) -> u32 {
        self.scores
            .iter()
            .find(|s| s.context == context)
            .map_or(0, |s| s.score)
    }

    /// Force a manually chosen context. Scores are kept for reference.
    pub fn with_override(mut self, context: Context) -> Self {
        self.primary = context;
        self.confidence = MAX_CONFIDENCE;
        self.overridden = true;
        self
    }
}

const MAX_CONFIDENCE: u8 = 98;
const EMPTY_CONFIDENCE: u8 = 50;

fn keyword_weight(keyword: &str) -> u32 {
    if keyword.chars().count() > 4 { 2 } else { 1 }
}

/// Score pre-lowercased text against every category
pub fn score_text(text: &str) -> Vec<CategoryScore> {
    Context::SCORED
        .iter()
        .map(|&context| CategoryScore {
            context,
            score: context
                .keywords()
                .iter()
                .filter(|k| text.contains(*k))
                .map(|k| keyword_weight(k))
                .sum(),
        })
        .collect()
}

/// Classify a conversation. The scored text is every `speaker: content` line, lower-cased.
pub fn classify_context(messages: &[Message]) -> ContextResult {
    let text = messages
        .iter()
        .map(|m| format!("{}: {}", m.speaker, m.content))
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase();

    let scores = score_text(&text);

    let mut primary = Context::General;
    let mut max_score = 0u32;
    for s in &scores {
        if s.score > max_score {
            max_score = s.score;
            primary = s.context;
        }
    }

    let total: u32 = scores.iter().map(|s| s.score).sum();
    let confidence = if total > 0 {
        let raw = (max_score as f64 / total as f64) * 100.0 + 30.0;
        raw.round().min(MAX_CONFIDENCE as f64) as u8
    } else {
        EMPTY_CONFIDENCE
    };

    tracing::debug!(
        "context classified: {} (confidence {}, total score {})",
        primary,
        confidence,
        total
    );

    ContextResult {
        primary,
        confidence,
        scores,
        overridden: false,
    }
}

//! Analysis pipeline: runs every analyzer over a parsed transcript and folds
//! their outputs into one [`AnalysisResult`].

pub mod context;
pub mod moments;
pub mod profile;
pub mod quick_wins;
pub mod self_profile;
pub mod signals;
pub mod timing;

use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, Objective};
use crate::error::{Result, SignalLabError};
use crate::transcript::{Message, counterpart_messages, counterpart_name, parse_transcript, self_messages};
use crate::utils::round_clamp;

pub use context::{Context, ContextResult, classify_context};
pub use moments::{CriticalMoment, extract_moments};
pub use profile::{BehavioralProfile, profile_counterpart};
pub use quick_wins::{QuickWin, quick_wins};
pub use self_profile::{CommunicatorProfile, profile_self};
pub use signals::{Signal, SignalSet, Tier, detect_signals};
pub use timing::{ResponseTimes, TimingRecommendation, recommend_timing, response_times};

/// Fewest parsed messages the pipeline will analyze
pub const MIN_MESSAGES: usize = 2;

pub const POWER_BALANCE_RANGE: (i32, i32) = (15, 85);
pub const WIN_PROBABILITY_RANGE: (i32, i32) = (20, 95);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCount {
    pub you: usize,
    pub them: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub context: ContextResult,
    pub context_label: String,
    /// 15..=85, above 50 means the analyzing party holds the advantage
    pub power_balance: u8,
    /// 20..=95
    pub win_probability: u8,
    pub message_count: MessageCount,
    pub avg_response: ResponseTimes,
    /// Speaker of the first message
    pub initiator: String,
    pub counterpart_name: String,
    pub behavioral_profile: BehavioralProfile,
    pub self_profile: CommunicatorProfile,
    pub critical_moments: Vec<CriticalMoment>,
    pub green_lights: Vec<Signal>,
    pub red_flags: Vec<Signal>,
    pub timing: TimingRecommendation,
    pub quick_wins: Vec<QuickWin>,
    pub objective: Objective,
    pub stakes: u8,
}

impl AnalysisResult {
    pub fn primary_context(&self) -> Context {
        self.context.primary
    }
}

fn question_messages(messages: &[&Message]) -> usize {
    messages.iter().filter(|m| m.content.contains('?')).count()
}

/// Leverage score. Counts of signals, initiation, volume and questions each
/// push it up or down from an even 50.
pub fn power_balance(messages: &[Message], signals: &SignalSet) -> u8 {
    let mine = self_messages(messages);
    let theirs = counterpart_messages(messages);
    let they_initiated = messages.first().is_some_and(|m| !m.is_self());
    let ratio = theirs.len() as f64 / mine.len().max(1) as f64;

    let mut score: i32 = 50;
    score += if they_initiated { 5 } else { -5 };
    if ratio > 1.2 {
        score += 10;
    } else if ratio < 0.8 {
        score -= 10;
    }
    score += if question_messages(&theirs) > question_messages(&mine) {
        8
    } else {
        -5
    };
    score += 3 * signals.green_lights.len() as i32;
    score -= 4 * signals.red_flags.len() as i32;

    let (lo, hi) = POWER_BALANCE_RANGE;
    score.clamp(lo, hi) as u8
}

pub fn win_probability(signals: &SignalSet, power_balance: u8, confidence: u8) -> u8 {
    let raw = 50.0 + 6.0 * signals.green_lights.len() as f64
        - 8.0 * signals.red_flags.len() as f64
        + 0.3 * (power_balance as f64 - 50.0)
        + 0.1 * confidence as f64;
    let (lo, hi) = WIN_PROBABILITY_RANGE;
    round_clamp(raw, lo, hi) as u8
}

/// Parse `text` and analyze it.
///
/// Returns [`SignalLabError::InsufficientData`] when fewer than two messages
/// parse, so callers can tell "nothing to analyze" from "nothing notable".
pub fn analyze(text: &str, config: &AnalysisConfig) -> Result<AnalysisResult> {
    let messages = parse_transcript(text);
    analyze_messages(&messages, config)
}

/// Analyze an already-parsed transcript.
pub fn analyze_messages(messages: &[Message], config: &AnalysisConfig) -> Result<AnalysisResult> {
    config.validate()?;
    if messages.len() < MIN_MESSAGES {
        return Err(SignalLabError::InsufficientData {
            parsed: messages.len(),
            required: MIN_MESSAGES,
        });
    }

    let avg_response = response_times(messages);
    let mut context_result = classify_context(messages);
    if let Some(forced) = config.context_override {
        context_result = context_result.with_override(forced);
    }
    let context = context_result.primary;

    let signals = detect_signals(messages, context);
    let power = power_balance(messages, &signals);
    let win = win_probability(&signals, power, context_result.confidence);

    let behavioral_profile = profile_counterpart(messages, context);
    let self_profile = profile_self(messages, context);
    let critical_moments = extract_moments(messages, context);
    let timing = recommend_timing(messages, &avg_response);
    let wins = quick_wins(messages, context, &signals);

    let result = AnalysisResult {
        context_label: context.label().to_string(),
        power_balance: power,
        win_probability: win,
        message_count: MessageCount {
            you: self_messages(messages).len(),
            them: counterpart_messages(messages).len(),
        },
        avg_response,
        initiator: messages
            .first()
            .map_or_else(|| "Unknown".to_string(), |m| m.speaker.clone()),
        counterpart_name: counterpart_name(messages).unwrap_or("Them").to_string(),
        behavioral_profile,
        self_profile,
        critical_moments,
        green_lights: signals.green_lights,
        red_flags: signals.red_flags,
        timing,
        quick_wins: wins,
        objective: config.objective_for(context),
        stakes: config.stakes,
        context: context_result,
    };

    tracing::info!(
        "analysis complete: {} messages, context={}, power_balance={}, win_probability={}",
        messages.len(),
        result.context_label,
        result.power_balance,
        result.win_probability
    );
    Ok(result)
}

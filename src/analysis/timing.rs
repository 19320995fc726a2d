//! Response latency and send-time recommendations derived from timestamps.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::transcript::Message;
use crate::transcript::timestamp::parse_timestamp;
use crate::utils::mean;

/// Average used when a direction has no measurable reply gaps
pub const DEFAULT_RESPONSE_MINUTES: u32 = 30;
const MAX_GAP_MINUTES: f64 = 24.0 * 60.0;

/// Average reply latency per direction, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTimes {
    /// Self replying to the counterpart
    pub you_minutes: u32,
    /// Counterpart replying to self
    pub them_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRecommendation {
    pub best_days: Vec<String>,
    pub best_hours: String,
    pub avoid_timing: String,
    pub response_delay: String,
    pub reasoning: String,
}

fn average_minutes(samples: &[f64]) -> u32 {
    if samples.is_empty() {
        DEFAULT_RESPONSE_MINUTES
    } else {
        mean(samples).round() as u32
    }
}

/// Measure reply gaps between consecutive messages from opposite parties.
/// Gaps that are non-positive, a day or longer, or involve an unparsable
/// timestamp are ignored.
pub fn response_times(messages: &[Message]) -> ResponseTimes {
    let parsed: Vec<Option<NaiveDateTime>> = messages
        .iter()
        .map(|m| m.timestamp.as_deref().and_then(parse_timestamp))
        .collect();

    let mut yours = Vec::new();
    let mut theirs = Vec::new();
    for i in 1..messages.len() {
        let (Some(prev_t), Some(curr_t)) = (parsed[i - 1], parsed[i]) else {
            continue;
        };
        let gap = (curr_t - prev_t).num_seconds() as f64 / 60.0;
        if gap <= 0.0 || gap >= MAX_GAP_MINUTES {
            continue;
        }
        let (prev, curr) = (&messages[i - 1], &messages[i]);
        match (prev.is_self(), curr.is_self()) {
            (false, true) => yours.push(gap),
            (true, false) => theirs.push(gap),
            _ => {}
        }
    }

    tracing::debug!(
        "reply gaps measured: {} yours, {} theirs",
        yours.len(),
        theirs.len()
    );

    ResponseTimes {
        you_minutes: average_minutes(&yours),
        them_minutes: average_minutes(&theirs),
    }
}

fn best_hours(avg_hour: Option<u32>) -> &'static str {
    match avg_hour {
        None => "10am - 6pm",
        Some(h) if h < 12 => "9am - 12pm",
        Some(h) if h < 17 => "12pm - 5pm",
        Some(_) => "5pm - 9pm",
    }
}

/// Faster counterparts get a tighter recommended delay
fn response_delay(them_minutes: u32) -> &'static str {
    match them_minutes {
        m if m > 180 => "1-3 hours",
        m if m > 60 => "30-90 minutes",
        m if m < 15 => "5-20 minutes",
        _ => "15-45 minutes",
    }
}

/// Recommend when and how quickly to reply.
pub fn recommend_timing(messages: &[Message], times: &ResponseTimes) -> TimingRecommendation {
    let hours: Vec<f64> = messages
        .iter()
        .filter(|m| !m.is_self())
        .filter_map(|m| m.timestamp.as_deref().and_then(parse_timestamp))
        .map(|t| t.hour() as f64)
        .collect();
    let avg_hour = (!hours.is_empty()).then(|| mean(&hours).round() as u32);

    TimingRecommendation {
        best_days: ["Tuesday", "Wednesday", "Thursday"]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        best_hours: best_hours(avg_hour).to_string(),
        avoid_timing: "Late night (after 10pm), Early morning (before 8am)".to_string(),
        response_delay: response_delay(times.them_minutes).to_string(),
        reasoning: "Based on their message patterns. Match their pacing without being slower."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(ts: Option<&str>, speaker: &str) -> Message {
        Message::new(ts.map(str::to_string), speaker, "text")
    }

    #[test]
    fn test_defaults_without_timestamps() {
        let m = vec![msg(None, "Bo"), msg(None, "You")];
        let t = response_times(&m);
        assert_eq!(t.you_minutes, DEFAULT_RESPONSE_MINUTES);
        assert_eq!(t.them_minutes, DEFAULT_RESPONSE_MINUTES);
        let rec = recommend_timing(&m, &t);
        assert_eq!(rec.best_hours, "10am - 6pm");
        assert_eq!(rec.response_delay, "15-45 minutes");
        assert_eq!(rec.best_days, vec!["Tuesday", "Wednesday", "Thursday"]);
    }

    #[test]
    fn test_gaps_attributed_by_direction() {
        let m = vec![
            msg(Some("1/2/24 9:00 AM"), "Bo"),
            msg(Some("1/2/24 9:10 AM"), "You"),
            msg(Some("1/2/24 9:14 AM"), "Bo"),
            msg(Some("1/2/24 9:15 AM"), "Bo"),
        ];
        let t = response_times(&m);
        assert_eq!(t.you_minutes, 10);
        assert_eq!(t.them_minutes, 4);
    }

    #[test]
    fn test_long_negative_and_unparsable_gaps_ignored() {
        let m = vec![
            msg(Some("1/2/24 9:00 AM"), "Bo"),
            msg(Some("1/4/24 9:00 AM"), "You"),
            msg(Some("1/3/24 9:00 AM"), "Bo"),
            msg(Some("garbled"), "You"),
        ];
        let t = response_times(&m);
        assert_eq!(t.you_minutes, DEFAULT_RESPONSE_MINUTES);
        assert_eq!(t.them_minutes, DEFAULT_RESPONSE_MINUTES);
    }

    #[test]
    fn test_best_hours_bands() {
        assert_eq!(best_hours(Some(9)), "9am - 12pm");
        assert_eq!(best_hours(Some(14)), "12pm - 5pm");
        assert_eq!(best_hours(Some(17)), "5pm - 9pm");
    }

    #[test]
    fn test_delay_bands() {
        assert_eq!(response_delay(5), "5-20 minutes");
        assert_eq!(response_delay(30), "15-45 minutes");
        assert_eq!(response_delay(90), "30-90 minutes");
        assert_eq!(response_delay(299), "1-3 hours");
    }
}

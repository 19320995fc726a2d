//! Conversation transcripts: the message model, the line parser and timestamp handling.

pub mod parser;
pub mod timestamp;

use serde::{Deserialize, Serialize};

pub use parser::parse_transcript;

/// Speaker label that identifies the analyzing party. Compared case-insensitively.
pub const SELF_LABEL: &str = "you";

/// Demo conversation used by the CLI `sample` command and the integration tests.
pub const SAMPLE_TRANSCRIPT: &str = "[11/15/24, 9:32 PM] Alex: Hey! Great meeting you at the conference yesterday
[11/15/24, 9:45 PM] You: Hey Alex! Yeah it was great connecting. Your talk on market dynamics was fascinating
[11/15/24, 9:47 PM] Alex: Thanks! I noticed you asking sharp questions. What's your background?
[11/15/24, 10:02 PM] You: I run a boutique consulting firm. Mostly strategic advisory for tech companies
[11/15/24, 10:03 PM] Alex: Interesting. We might actually need someone like that
[11/15/24, 10:15 PM] You: Oh yeah? What kind of challenges are you facing?
[11/16/24, 2:30 PM] Alex: Sorry for the late reply - crazy day. We're trying to figure out our positioning for the Asian market
[11/16/24, 2:45 PM] You: No worries. That's exactly what I specialize in. Happy to share some thoughts if useful
[11/16/24, 2:46 PM] Alex: That would be great actually. Are you free for coffee next week?
[11/16/24, 3:30 PM] You: Let me check my calendar and get back to you
[11/17/24, 10:00 AM] Alex: Any luck with your schedule?
[11/17/24, 4:15 PM] You: Thursday works for me. Afternoon preferred
[11/17/24, 4:16 PM] Alex: Perfect. 3pm at The Standard? I'll send a calendar invite
[11/17/24, 4:20 PM] You: Works for me. See you then
[11/17/24, 4:21 PM] Alex: Looking forward to it. I've actually been reading up on your firm - impressive client list
[11/17/24, 4:45 PM] You: Thanks. Looking forward to learning more about your expansion plans";

/// Which side of the conversation a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    /// The analyzing party (speaker label `you`)
    Me,
    /// Anyone else
    Counterpart,
}

/// One parsed line of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Raw timestamp text as it appeared in the transcript
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub speaker: String,
    pub content: String,
}

impl Message {
    pub fn new(timestamp: Option<String>, speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            speaker: speaker.into(),
            content: content.into(),
        }
    }

    pub fn is_self(&self) -> bool {
        self.speaker.eq_ignore_ascii_case(SELF_LABEL)
    }

    pub fn party(&self) -> Party {
        if self.is_self() {
            Party::Me
        } else {
            Party::Counterpart
        }
    }
}

/// Messages written by the analyzing party, in transcript order
pub fn self_messages(messages: &[Message]) -> Vec<&Message> {
    messages.iter().filter(|m| m.is_self()).collect()
}

/// Messages written by anyone other than the analyzing party, in transcript order
pub fn counterpart_messages(messages: &[Message]) -> Vec<&Message> {
    messages.iter().filter(|m| !m.is_self()).collect()
}

/// Display name of the counterpart: the first non-self speaker label
pub fn counterpart_name(messages: &[Message]) -> Option<&str> {
    messages
        .iter()
        .find(|m| !m.is_self())
        .map(|m| m.speaker.as_str())
}

/// Space-joined content of the given messages
pub(crate) fn joined_content(messages: &[&Message]) -> String {
    messages
        .iter()
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

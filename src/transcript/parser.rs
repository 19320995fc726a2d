//! Line-oriented transcript parser.
//!
//! Each non-blank line is tried against a fixed, priority-ordered list of
//! grammars and the first one that matches wins. Lines that match nothing are
//! dropped; the parser never fails.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Message;

/// `[<timestamp>] <speaker>: <content>`
static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\]\s*([^:]+):\s*(.+)$").expect("bracketed grammar"));

/// `<M/D/Y, h:mm[:ss][ AM|PM]> - <speaker>: <content>`
static LOCALE_DASH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(\d{1,2}/\d{1,2}/\d{2,4},?\s*\d{1,2}:\d{2}(?::\d{2})?\s*(?:AM|PM)?)\s*[-–]\s*([^:]+):\s*(.+)$",
    )
    .expect("locale grammar")
});

/// `<speaker>, [<timestamp>]: <content>`
static SPEAKER_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^,\[:]+),?\s*\[([^\]]+)\]:\s*(.+)$").expect("speaker-first grammar")
});

/// `<h:mm[:ss][ AM|PM]> <speaker>: <content>`
static TIME_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d{1,2}:\d{2}(?::\d{2})?(?:\s*(?:AM|PM))?)\s+([^:]+):\s*(.+)$")
        .expect("time-first grammar")
});

/// `<speaker>: <content>`
static GENERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^:]+):\s*(.+)$").expect("generic grammar"));

/// The grammar a line matched, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    Bracketed,
    LocaleDash,
    SpeakerBracket,
    TimeFirst,
    Generic,
}

impl Grammar {
    const ORDER: [Grammar; 5] = [
        Grammar::Bracketed,
        Grammar::LocaleDash,
        Grammar::SpeakerBracket,
        Grammar::TimeFirst,
        Grammar::Generic,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            Grammar::Bracketed => &*BRACKETED,
            Grammar::LocaleDash => &*LOCALE_DASH,
            Grammar::SpeakerBracket => &*SPEAKER_BRACKET,
            Grammar::TimeFirst => &*TIME_FIRST,
            Grammar::Generic => &*GENERIC,
        }
    }

    /// Pull (timestamp, speaker, content) out of a successful match
    fn fields<'h>(self, caps: &Captures<'h>) -> (Option<&'h str>, &'h str, &'h str) {
        let get = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        match self {
            Grammar::SpeakerBracket => (Some(get(2)), get(1), get(3)),
            Grammar::Generic => (None, get(1), get(2)),
            _ => (Some(get(1)), get(2), get(3)),
        }
    }
}

/// Parse a single line, returning the message and the grammar that produced it.
pub fn parse_line(line: &str) -> Option<(Message, Grammar)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    for grammar in Grammar::ORDER {
        let Some(caps) = grammar.regex().captures(line) else {
            continue;
        };
        let (timestamp, speaker, content) = grammar.fields(&caps);
        let speaker = speaker.trim();
        let content = content.trim();
        if speaker.is_empty() || content.is_empty() {
            continue;
        }
        let timestamp = timestamp
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        return Some((Message::new(timestamp, speaker, content), grammar));
    }
    None
}

/// Parse a raw transcript into messages, preserving line order.
pub fn parse_transcript(raw: &str) -> Vec<Message> {
    let mut dropped = 0usize;
    let messages: Vec<Message> = raw
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| {
            let parsed = parse_line(l).map(|(m, _)| m);
            if parsed.is_none() {
                dropped += 1;
            }
            parsed
        })
        .collect();
    tracing::debug!(
        parsed = messages.len(),
        dropped,
        "transcript parsed"
    );
    messages
}

/// Re-serialize messages in the generic `speaker: content` form.
pub fn to_generic_lines(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.speaker, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

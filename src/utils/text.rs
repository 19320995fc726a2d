//! Small text helpers shared by the analyzers

/// Truncate `content` to at most `max` characters, replacing the tail with
/// `"..."` when it does not fit.
pub fn excerpt(content: &str, max: usize) -> String {
    if content.chars().count() <= max {
        return content.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = content.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Count occurrences of a single character
pub fn count_char(text: &str, needle: char) -> usize {
    text.chars().filter(|&c| c == needle).count()
}

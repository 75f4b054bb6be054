//! `<@USER>` mention handling for challenge commands.

use crate::models::UserId;

/// First user mentioned as `<@ID>` or `<@ID|display name>`
pub fn parse_mention(text: &str) -> Option<&str> {
    let mut rest = text;
    while let Some(start) = rest.find("<@") {
        let candidate = &rest[start + 2..];
        let len = candidate
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(candidate.len());
        if len > 0 && matches!(candidate[len..].chars().next(), Some('|') | Some('>')) {
            return Some(&candidate[..len]);
        }
        rest = candidate;
    }
    None
}

/// Drop the bot's own mention when it opens the message
pub fn strip_leading_mention(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<@") {
        if let Some(end) = trimmed.find('>') {
            return trimmed[end + 1..].trim_start();
        }
    }
    trimmed
}

/// Opponent named by a challenge: the sender for a trailing `me`,
/// otherwise the first mention.
pub fn resolve_opponent(text: &str, user_id: &str) -> Option<UserId> {
    let trimmed = text.trim_end();
    if let Some(head) = trimmed.strip_suffix("me") {
        if head.ends_with(char::is_whitespace) {
            return Some(user_id.to_string());
        }
    }
    parse_mention(text).map(str::to_string)
}

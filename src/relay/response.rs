//! Fixed replies and the outbound length limit.

/// Discord's message limit is 2000 characters (standard users)
const DISCORD_MESSAGE_LIMIT: usize = 2000;
const TRUNCATED_LENGTH: usize = 1990;
const ELLIPSIS: char = '…';

pub const EMPTY_MENTION_REPLY: &str = "👋 You pinged me! Say something after the mention.";
pub const EMPTY_COMPLETION_REPLY: &str = "⚠️ I couldn’t generate a response.";

/// Cuts replies over the Discord limit to 1990 characters plus an ellipsis.
#[must_use]
pub fn truncate_for_discord(text: &str) -> String {
    if text.chars().count() <= DISCORD_MESSAGE_LIMIT {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(TRUNCATED_LENGTH).collect();
    truncated.push(ELLIPSIS);
    truncated
}

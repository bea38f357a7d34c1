//! Bot mention stripping.

use poise::serenity_prelude::UserId;

/// Removes every `<@ID>` and `<@!ID>` token that targets `bot_id`, then trims.
#[must_use]
pub fn strip_bot_mention(content: &str, bot_id: UserId) -> String {
    content
        .replace(&format!("<@{bot_id}>"), "")
        .replace(&format!("<@!{bot_id}>"), "")
        .trim()
        .to_string()
}

//! Gateway-facing inputs and outputs of the relay.

use async_trait::async_trait;
use poise::serenity_prelude::{Message as SerenityMessage, UserId};

use crate::error::Result;

/// The parts of an inbound chat message the relay looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub author_id: UserId,
    pub author_is_bot: bool,
    pub content: String,
    pub mentions_bot: bool,
}

impl InboundMessage {
    /// A direct mention of the bot or an `@everyone`/`@here` counts as addressing it.
    /// Role mentions are not resolved, since that needs the guild member cache.
    #[must_use]
    pub fn from_discord(message: &SerenityMessage, bot_user_id: UserId) -> Self {
        Self {
            author_id: message.author.id,
            author_is_bot: message.author.bot,
            content: message.content.clone(),
            mentions_bot: message.mention_everyone || message.mentions_user_id(bot_user_id),
        }
    }
}

/// Where the relay sends its answer.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Show a typing indicator in the channel.
    async fn send_typing(&self) -> Result<()>;

    /// Reply to the triggering message.
    async fn reply(&self, content: &str) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::User;

    use super::*;

    fn user(id: u64, bot: bool) -> User {
        let mut user = User::default();
        user.id = UserId::new(id);
        user.bot = bot;
        user
    }

    fn message(author: User, content: &str, mentions: Vec<User>) -> SerenityMessage {
        let mut message = SerenityMessage::default();
        message.author = author;
        message.content = content.to_string();
        message.mentions = mentions;
        message
    }

    #[test]
    fn maps_author_content_and_mention() {
        let discord = message(user(42, false), "<@123> hello", vec![user(123, true)]);

        let inbound = InboundMessage::from_discord(&discord, UserId::new(123));

        assert_eq!(
            inbound,
            InboundMessage {
                author_id: UserId::new(42),
                author_is_bot: false,
                content: "<@123> hello".to_string(),
                mentions_bot: true,
            }
        );
    }

    #[test]
    fn other_mentions_do_not_address_the_bot() {
        let discord = message(user(42, false), "<@456> hi", vec![user(456, false)]);

        let inbound = InboundMessage::from_discord(&discord, UserId::new(123));

        assert!(!inbound.mentions_bot);
    }

    #[test]
    fn everyone_mention_addresses_the_bot() {
        let mut discord = message(user(42, false), "@everyone standup", Vec::new());
        discord.mention_everyone = true;

        let inbound = InboundMessage::from_discord(&discord, UserId::new(123));

        assert!(inbound.mentions_bot);
    }

    #[test]
    fn bot_flag_is_carried() {
        let discord = message(user(7, true), "<@123> beep", vec![user(123, true)]);

        let inbound = InboundMessage::from_discord(&discord, UserId::new(123));

        assert!(inbound.author_is_bot);
        assert_eq!(inbound.author_id, UserId::new(7));
    }
}

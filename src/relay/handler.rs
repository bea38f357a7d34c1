//! Main handler for messages that mention the bot.

use log::{debug, error, info, warn};
use poise::serenity_prelude::UserId;

use crate::completion::{CompletionBackend, CompletionOutcome};
use crate::error::{FailureKind, Result};
use crate::history::HistoryStore;
use crate::types::Turn;

use super::channel::{InboundMessage, ReplyChannel};
use super::mention::strip_bot_mention;
use super::response::{EMPTY_COMPLETION_REPLY, EMPTY_MENTION_REPLY, truncate_for_discord};

/// What the relay did with one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Not addressed to the bot, or sent by a bot
    Ignored,
    /// The mention carried no text; the user was asked to say something
    PromptedForInput,
    /// A completion was relayed back to the channel
    Replied,
    /// The completion API returned no usable text
    EmptyCompletion,
    /// The round trip failed and the user was told so
    Failed(FailureKind),
}

/// Relays bot mentions to a completion backend, keeping per-user history.
pub struct Relay<S, B> {
    store: S,
    backend: B,
    bot_user_id: UserId,
}

impl<S, B> Relay<S, B>
where
    S: HistoryStore,
    B: CompletionBackend,
{
    pub fn new(store: S, backend: B, bot_user_id: UserId) -> Self {
        Self {
            store,
            backend,
            bot_user_id,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bot_user_id(&self) -> UserId {
        self.bot_user_id
    }

    /// Handle one inbound message.
    ///
    /// Completion failures are reported to the user and never returned as errors.
    ///
    /// # Errors
    ///
    /// Returns an error only if no reply at all can be delivered.
    pub async fn handle<C: ReplyChannel>(
        &self,
        message: &InboundMessage,
        channel: &C,
    ) -> Result<RelayOutcome> {
        if message.author_is_bot || !message.mentions_bot {
            return Ok(RelayOutcome::Ignored);
        }

        info!(
            "Received mention from user {}: {}",
            message.author_id, message.content
        );

        let user_text = strip_bot_mention(&message.content, self.bot_user_id);
        if user_text.is_empty() {
            channel.reply(EMPTY_MENTION_REPLY).await?;
            return Ok(RelayOutcome::PromptedForInput);
        }

        let user_id = message.author_id;
        self.store.append(user_id, Turn::user(user_text)).await;

        if let Err(e) = channel.send_typing().await {
            debug!("Failed to broadcast typing indicator: {e}");
        }

        let history = self.store.get_or_create(user_id).await;
        let prompt = self.backend.build_prompt(&history);
        debug!("Prompt for user {user_id} has {} messages", prompt.len());

        match self.backend.complete(&prompt).await {
            CompletionOutcome::Reply(text) => {
                self.store.append(user_id, Turn::assistant(text.as_str())).await;
                let reply = truncate_for_discord(&text);
                if let Err(e) = channel.reply(&reply).await {
                    error!("Failed to deliver reply to user {user_id}: {e}");
                    channel.reply(FailureKind::Other.user_message()).await?;
                    return Ok(RelayOutcome::Failed(FailureKind::Other));
                }
                info!("Replied to user {user_id}: {reply}");
                Ok(RelayOutcome::Replied)
            }
            CompletionOutcome::Empty => {
                warn!("Empty completion for user {user_id}");
                channel.reply(EMPTY_COMPLETION_REPLY).await?;
                Ok(RelayOutcome::EmptyCompletion)
            }
            CompletionOutcome::Failure { kind, detail } => {
                error!("Error processing message from user {user_id} ({kind}): {detail}");
                channel.reply(kind.user_message()).await?;
                Ok(RelayOutcome::Failed(kind))
            }
        }
    }
}

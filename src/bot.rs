//! Discord bot core logic and event handling.

use std::error::Error as StdError;

use async_trait::async_trait;
use log::{debug, error, info};
use poise::{
    Framework, FrameworkOptions,
    serenity_prelude::{
        ClientBuilder, Context, FullEvent, GatewayIntents, Message as SerenityMessage,
    },
};

use crate::completion::ChatCompletionsClient;
use crate::config::Config;
use crate::error::Result;
use crate::history::InMemoryHistoryStore;
use crate::relay::{InboundMessage, Relay, RelayOutcome, ReplyChannel};

type EventResult = std::result::Result<(), Box<dyn StdError + Send + Sync>>;

struct Data {
    relay: Relay<InMemoryHistoryStore, ChatCompletionsClient>,
}

/// Reply channel backed by the triggering Discord message.
struct DiscordReply<'a> {
    ctx: &'a Context,
    message: &'a SerenityMessage,
}

#[async_trait]
impl ReplyChannel for DiscordReply<'_> {
    async fn send_typing(&self) -> Result<()> {
        self.message
            .channel_id
            .broadcast_typing(&self.ctx.http)
            .await?;
        Ok(())
    }

    async fn reply(&self, content: &str) -> Result<()> {
        self.message.reply(&self.ctx.http, content).await?;
        Ok(())
    }
}

/// Run the Discord bot.
///
/// # Errors
///
/// Returns an error if configuration is missing or the gateway client fails.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing completion client");
    let completion_client = ChatCompletionsClient::new(
        config.api_key.clone(),
        &config.base_url,
        config.model.clone(),
        config.system_prompt.clone(),
    );
    info!("Using model {}", completion_client.model());

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.tag());
                Ok(Data {
                    relay: Relay::new(
                        InMemoryHistoryStore::new(),
                        completion_client,
                        ready.user.id,
                    ),
                })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> EventResult {
    if let FullEvent::Message { new_message } = event {
        let inbound = InboundMessage::from_discord(new_message, data.relay.bot_user_id());
        let channel = DiscordReply {
            ctx,
            message: new_message,
        };

        match data.relay.handle(&inbound, &channel).await {
            Ok(RelayOutcome::Ignored) => {}
            Ok(outcome) => {
                let tracked = data.relay.store().len().await;
                debug!(
                    "Message {} handled: {outcome:?} ({tracked} users tracked)",
                    new_message.id
                );
            }
            Err(e) => error!(
                "Failed to reply to {} in channel {}: {e}",
                new_message.author.tag(),
                new_message.channel_id
            ),
        }
    }
    Ok(())
}

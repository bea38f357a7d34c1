//! Mention relay - forwards bot mentions to the completion API and replies.

mod channel;
mod handler;
mod mention;
mod response;

pub use channel::{InboundMessage, ReplyChannel};
pub use handler::{Relay, RelayOutcome};
pub use mention::strip_bot_mention;
pub use response::{EMPTY_COMPLETION_REPLY, EMPTY_MENTION_REPLY, truncate_for_discord};

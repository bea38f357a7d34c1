use reqwest::StatusCode;
use strum::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Serenity error: {0}")]
    Serenity(Box<poise::serenity_prelude::Error>),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Completion API error ({status}): {message}")]
    CompletionApi { status: StatusCode, message: String },

    #[error("Completion response error: {0}")]
    CompletionResponse(String),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<poise::serenity_prelude::Error> for BotError {
    fn from(err: poise::serenity_prelude::Error) -> Self {
        BotError::Serenity(Box::new(err))
    }
}

/// Coarse classification of a failed completion round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// The completion API answered 429 Too Many Requests
    RateLimited,
    /// The completion API answered with any other non-success status
    Api,
    /// The request never produced a response (connect, timeout, TLS)
    Network,
    /// The response body could not be decoded
    Malformed,
    /// Anything else, e.g. a gateway failure mid round trip
    Other,
}

impl FailureKind {
    /// Returns the fixed message shown to the user for this kind of failure
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            FailureKind::RateLimited => "🚫 I'm being rate-limited. Try again in a bit.",
            _ => "⚠️ Something went wrong.",
        }
    }
}

impl BotError {
    /// Classifies this error for the user-facing reply and for logging
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            BotError::CompletionApi { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => {
                FailureKind::RateLimited
            }
            BotError::CompletionApi { .. } => FailureKind::Api,
            BotError::CompletionResponse(_) => FailureKind::Malformed,
            BotError::Reqwest(e) if e.is_decode() => FailureKind::Malformed,
            BotError::Reqwest(e) if e.status() == Some(StatusCode::TOO_MANY_REQUESTS) => {
                FailureKind::RateLimited
            }
            BotError::Reqwest(_) => FailureKind::Network,
            BotError::Serenity(_) | BotError::Config(_) | BotError::EnvVar(_) => {
                FailureKind::Other
            }
        }
    }

    /// Returns a user-friendly error message suitable for displaying in Discord
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        self.failure_kind().user_message()
    }
}

pub type Result<T> = std::result::Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_requests_is_rate_limited() {
        let err = BotError::CompletionApi {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "slow down".to_string(),
        };
        assert_eq!(err.failure_kind(), FailureKind::RateLimited);
        assert_eq!(
            err.user_message(),
            "🚫 I'm being rate-limited. Try again in a bit."
        );
    }

    #[test]
    fn other_statuses_get_generic_message() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::BAD_REQUEST,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            let err = BotError::CompletionApi {
                status,
                message: String::new(),
            };
            assert_eq!(err.failure_kind(), FailureKind::Api);
            assert_eq!(err.user_message(), "⚠️ Something went wrong.");
        }
    }

    #[test]
    fn response_errors_are_malformed() {
        let err = BotError::CompletionResponse("bad json".to_string());
        assert_eq!(err.failure_kind(), FailureKind::Malformed);
        assert_eq!(err.user_message(), "⚠️ Something went wrong.");
    }

    #[test]
    fn kind_displays_in_snake_case() {
        assert_eq!(FailureKind::RateLimited.to_string(), "rate_limited");
        assert_eq!(FailureKind::Malformed.to_string(), "malformed");
    }
}

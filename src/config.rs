use std::env;

use log::{debug, error, info};

use crate::error::{BotError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful, friendly Discord bot. Keep replies concise and natural.";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if `DISCORD_TOKEN` or `OPENAI_API_KEY` is missing or empty.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key))
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if either required secret is missing or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, env::VarError>,
    {
        let discord_token = required(&lookup, "DISCORD_TOKEN")?;
        let api_key = required(&lookup, "OPENAI_API_KEY")?;

        let base_url = optional(&lookup, "OPENAI_BASE_URL", DEFAULT_BASE_URL);
        let model = optional(&lookup, "OPENAI_MODEL", DEFAULT_MODEL);
        let system_prompt = optional(&lookup, "SYSTEM_PROMPT", DEFAULT_SYSTEM_PROMPT);

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!("Completion API key length: {} characters", api_key.len());
        debug!("Completion API base URL: {base_url}");
        debug!("Completion model: {model}");
        debug!("System prompt length: {} characters", system_prompt.len());

        Ok(Self {
            discord_token,
            api_key,
            base_url,
            model,
            system_prompt,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<String, env::VarError>,
{
    let value = lookup(key).map_err(|e| {
        error!("Failed to load {key} from environment: {e}");
        e
    })?;

    if value.trim().is_empty() {
        error!("{key} is set but empty");
        return Err(BotError::Config(format!("{key} must not be empty")));
    }

    Ok(value)
}

fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> std::result::Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            debug!("{key} not set, using default");
            default.to_string()
        }
    }
}

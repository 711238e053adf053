//! OpenAI client construction from process credentials.

use crate::config::Credentials;
use crate::error::{ConciergeError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Create an OpenAI client from the startup credentials.
///
/// Without a timeout the underlying HTTP client waits indefinitely.
pub fn create_client(
    credentials: &Credentials,
    timeout: Option<Duration>,
) -> Result<Client<OpenAIConfig>> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let http_client = builder
        .build()
        .map_err(|e| ConciergeError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(openai_config(credentials)).with_http_client(http_client))
}

fn openai_config(credentials: &Credentials) -> OpenAIConfig {
    let mut config = OpenAIConfig::new();
    if let Some(key) = &credentials.openai_api_key {
        config = config.with_api_key(key);
    }
    if let Some(base) = &credentials.openai_base_url {
        config = config.with_api_base(base);
    }
    config
}

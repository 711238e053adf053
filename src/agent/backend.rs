//! Hosted model boundary.
//!
//! The agent loop talks to the model only through [`ChatBackend`], so the
//! loop and the tools can run against a scripted backend in tests.

use crate::error::{ConciergeError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage, ChatCompletionTool,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// One assistant message returned by the model.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    /// Text content, if any.
    pub content: Option<String>,
    /// Tools the model asked to run. Empty means the reply is final.
    pub tool_calls: Vec<ChatCompletionMessageToolCall>,
}

impl ModelReply {
    /// A final text answer with no tool calls.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }
}

/// A chat-completion provider that supports tool calling.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the conversation so far plus the tool set, and return the next
    /// assistant message.
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelReply>;
}

/// OpenAI chat-completions backend.
pub struct OpenAIBackend {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIBackend {
    pub fn new(client: Client<OpenAIConfig>, model: &str, temperature: f32) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAIBackend {
    #[instrument(skip_all, fields(model = %self.model, messages = messages.len()))]
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelReply> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .temperature(self.temperature)
            .messages(messages.to_vec());
        if !tools.is_empty() {
            args.tools(tools.to_vec());
        }
        let request = args
            .build()
            .map_err(|e| ConciergeError::Agent(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ConciergeError::OpenAI(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ConciergeError::Agent("No response from model".to_string()))?;

        debug!(
            "Model replied with {} tool call(s)",
            choice.message.tool_calls.as_ref().map_or(0, Vec::len)
        );

        Ok(ModelReply {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}

//! Agent runner with tool calling loop.

use super::backend::ChatBackend;
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::error::{ConciergeError, Result};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Default cap on model calls per turn.
const DEFAULT_MAX_ITERATIONS: usize = 12;

/// Agent that routes one user message through the hosted model and tools.
///
/// Each call to [`Agent::run`] is an independent conversation; nothing is
/// carried over between turns.
pub struct Agent {
    backend: Arc<dyn ChatBackend>,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: Option<String>,
}

impl Agent {
    /// Create a new agent with the given backend and tool context.
    pub fn new(backend: Arc<dyn ChatBackend>, tools: ToolContext) -> Self {
        Self {
            backend,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: None,
        }
    }

    /// Set a system prompt sent ahead of every user message.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = Some(prompt.to_string());
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent on a single user message.
    ///
    /// Malformed tool calls and storage failures abort the turn with `Err`.
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(prompt) = &self.system_prompt {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(prompt.clone())
                    .build()
                    .map_err(|e| ConciergeError::Agent(e.to_string()))?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(task)
                .build()
                .map_err(|e| ConciergeError::Agent(e.to_string()))?
                .into(),
        );

        let tools = tool_definitions();
        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(ConciergeError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let reply = self.backend.complete(&messages, &tools).await?;

            if reply.tool_calls.is_empty() {
                return Ok(AgentResponse {
                    content: reply.content.unwrap_or_default(),
                    tool_calls: tool_calls_made,
                    iterations,
                });
            }

            // Add assistant message with tool calls to history
            let mut assistant = ChatCompletionRequestAssistantMessageArgs::default();
            assistant.tool_calls(reply.tool_calls.clone());
            if let Some(content) = &reply.content {
                assistant.content(content.clone());
            }
            messages.push(
                assistant
                    .build()
                    .map_err(|e| ConciergeError::Agent(e.to_string()))?
                    .into(),
            );

            for tool_call in &reply.tool_calls {
                let record = self.execute_tool_call(tool_call).await?;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.result.clone())
                    .build()
                    .map_err(|e| ConciergeError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    async fn execute_tool_call(
        &self,
        tool_call: &ChatCompletionMessageToolCall,
    ) -> Result<ToolCallRecord> {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let tool = parse_tool_call(name, arguments)?;
        let result = self.tools.execute(&tool).await?;

        Ok(ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        })
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

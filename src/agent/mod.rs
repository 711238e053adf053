//! Agent system for tool-calling conversations.
//!
//! A hosted model picks among four tools (weather, resume, placeholder
//! search, meeting database) based on their descriptions; the runner executes
//! the chosen tools locally and feeds their output back until the model
//! answers in plain text.

mod backend;
mod runner;
#[cfg(test)]
pub(crate) mod testing;
mod tools;

pub use backend::{ChatBackend, ModelReply, OpenAIBackend};
pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{
    parse_tool_call, tool_definitions, ToolCall, ToolContext, DATABASE_TOOL, RESUME_TOOL,
    SEARCH_TOOL, WEATHER_TOOL,
};

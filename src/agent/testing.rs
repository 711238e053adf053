//! Test doubles for the agent loop.

use super::backend::{ChatBackend, ModelReply};
use super::tools::ToolContext;
use crate::config::WeatherSettings;
use crate::document::ResumeReader;
use crate::error::{ConciergeError, Result};
use crate::meetings::MeetingStore;
use crate::weather::WeatherClient;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage, ChatCompletionTool,
    ChatCompletionToolType, FunctionCall,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Backend that replays canned replies and records how many messages
/// each request carried.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<ModelReply>>>,
    pub seen: Mutex<Vec<usize>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<ModelReply>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelReply> {
        assert_eq!(tools.len(), 4);
        self.seen.lock().unwrap().push(messages.len());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ConciergeError::OpenAI("script exhausted".to_string())))
    }
}

/// A reply asking for a single tool call.
pub fn call(id: &str, name: &str, arguments: &str) -> ModelReply {
    ModelReply {
        content: None,
        tool_calls: vec![ChatCompletionMessageToolCall {
            id: id.to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: name.to_string(),
                arguments: arguments.to_string(),
            },
        }],
    }
}

/// Tools wired to files inside `dir`, with no weather key.
pub fn tool_context(dir: &tempfile::TempDir) -> ToolContext {
    let meetings = MeetingStore::new(dir.path().join("meetings.db"));
    meetings.initialize().unwrap();
    ToolContext::new(
        WeatherClient::new(&WeatherSettings::default(), None).unwrap(),
        ResumeReader::new(dir.path().join("resume.pdf"), 3000),
        meetings,
    )
}

//! Tool definitions and dispatch for the agent.

use crate::document::ResumeReader;
use crate::error::{ConciergeError, Result};
use crate::meetings::{format_listing, MeetingStore};
use crate::search::simulated_search;
use crate::weather::WeatherClient;
use tracing::info;

pub const WEATHER_TOOL: &str = "weather_agent";
pub const RESUME_TOOL: &str = "resume_agent";
pub const SEARCH_TOOL: &str = "google_search_agent";
pub const DATABASE_TOOL: &str = "database_agent";

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Current weather for a location.
    Weather { location: String },

    /// Answer questions about the user from the resume.
    Resume { query: String },

    /// Placeholder web search.
    WebSearch { query: String },

    /// Save or list meetings. Any action other than `add` lists.
    Database {
        action: String,
        title: Option<String>,
        time: Option<String>,
    },
}

/// Everything the tools need, built once at startup.
pub struct ToolContext {
    pub weather: WeatherClient,
    pub resume: ResumeReader,
    pub meetings: MeetingStore,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(weather: WeatherClient, resume: ResumeReader, meetings: MeetingStore) -> Self {
        Self {
            weather,
            resume,
            meetings,
        }
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// Weather, resume and search failures are folded into their output
    /// text. Storage errors are returned as `Err`.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::Weather { location } => Ok(self.weather.lookup(location).await.to_string()),
            ToolCall::Resume { query } => self.execute_resume(query).await,
            ToolCall::WebSearch { query } => Ok(simulated_search(query)),
            ToolCall::Database {
                action,
                title,
                time,
            } => self.execute_database(action, title.as_deref(), time.as_deref()),
        }
    }

    async fn execute_resume(&self, query: &str) -> Result<String> {
        let reader = self.resume.clone();
        let query = query.to_string();
        let outcome = tokio::task::spawn_blocking(move || reader.read(&query))
            .await
            .map_err(|e| ConciergeError::Tool(format!("Resume reader stopped: {}", e)))?;
        Ok(outcome.to_string())
    }

    fn execute_database(
        &self,
        action: &str,
        title: Option<&str>,
        time: Option<&str>,
    ) -> Result<String> {
        if action == "add" {
            let meeting = self.meetings.add(title, time)?;
            info!("Saved meeting {}", meeting.id);
            Ok(meeting.confirmation())
        } else {
            let meetings = self.meetings.view()?;
            Ok(format_listing(&meetings))
        }
    }
}

/// Get OpenAI function/tool definitions for the agent, in registration order.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    let tool = |name: &str, description: &str, parameters: serde_json::Value| ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: name.to_string(),
            description: Some(description.to_string()),
            parameters: Some(parameters),
            strict: None,
        },
    };

    vec![
        tool(
            WEATHER_TOOL,
            "Agent 1: Checks live weather. Use this for any location/weather queries.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "location": { "type": "string" }
                },
                "required": ["location"]
            }),
        ),
        tool(
            RESUME_TOOL,
            "Agent 2: Document Intelligence. MANDATORY tool for questions about the user, \
            their name, education, or skills. Reads the local 'resume.pdf' file.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
        ),
        tool(
            SEARCH_TOOL,
            "Agent 3: Web Search. Use ONLY if the information is NOT in the resume.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
        ),
        tool(
            DATABASE_TOOL,
            "Agent 4: Database Manager. Actions: 'add' (needs title/time) or 'view'.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "action": { "type": "string" },
                    "title": { "type": "string", "default": null },
                    "time": { "type": "string", "default": null }
                },
                "required": ["action"]
            }),
        ),
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| ConciergeError::Agent(format!("Invalid tool arguments: {}", e)))?;

    let required = |key: &str| {
        args[key]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ConciergeError::Agent(format!("Missing '{}' argument", key)))
    };
    // absent and null both mean "not supplied"; any other non-string is rejected
    let optional = |key: &str| match &args[key] {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(value) => Ok(Some(value.clone())),
        _ => Err(ConciergeError::Agent(format!("Invalid '{}' argument", key))),
    };

    match name {
        WEATHER_TOOL => Ok(ToolCall::Weather {
            location: required("location")?,
        }),
        RESUME_TOOL => Ok(ToolCall::Resume {
            query: required("query")?,
        }),
        SEARCH_TOOL => Ok(ToolCall::WebSearch {
            query: required("query")?,
        }),
        DATABASE_TOOL => Ok(ToolCall::Database {
            action: required("action")?,
            title: optional("title")?,
            time: optional("time")?,
        }),
        _ => Err(ConciergeError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::tool_context as context;
    use crate::config::WeatherSettings;

    #[test]
    fn test_definitions_order_and_names() {
        let names: Vec<_> = tool_definitions()
            .into_iter()
            .map(|t| t.function.name)
            .collect();
        assert_eq!(names, vec![WEATHER_TOOL, RESUME_TOOL, SEARCH_TOOL, DATABASE_TOOL]);
    }

    #[test]
    fn test_parse_database_tool() {
        let tool = parse_tool_call(
            DATABASE_TOOL,
            r#"{"action": "add", "title": "Standup", "time": "9am"}"#,
        )
        .unwrap();
        assert_eq!(
            tool,
            ToolCall::Database {
                action: "add".to_string(),
                title: Some("Standup".to_string()),
                time: Some("9am".to_string()),
            }
        );

        let tool = parse_tool_call(DATABASE_TOOL, r#"{"action": "view"}"#).unwrap();
        match tool {
            ToolCall::Database { title, time, .. } => {
                assert!(title.is_none());
                assert!(time.is_none());
            }
            _ => panic!("Expected Database tool"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_calls() {
        assert!(parse_tool_call(WEATHER_TOOL, "{not json").is_err());
        assert!(parse_tool_call(WEATHER_TOOL, r#"{"city": "Paris"}"#).is_err());
        assert!(parse_tool_call("calendar_agent", "{}").is_err());
    }

    #[test]
    fn test_parse_database_rejects_non_string_fields() {
        let err = parse_tool_call(
            DATABASE_TOOL,
            r#"{"action":"add","title":"Standup","time":9}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Agent error: Invalid 'time' argument");

        let err = parse_tool_call(DATABASE_TOOL, r#"{"action":"add","title":["a"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "Agent error: Invalid 'title' argument");

        let tool = parse_tool_call(
            DATABASE_TOOL,
            r#"{"action":"add","title":null,"time":"noon"}"#,
        )
        .unwrap();
        assert_eq!(
            tool,
            ToolCall::Database {
                action: "add".to_string(),
                title: None,
                time: Some("noon".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_execute_database_round() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        let add = parse_tool_call(
            DATABASE_TOOL,
            r#"{"action":"add","title":"Demo","time":"Friday 3pm"}"#,
        )
        .unwrap();
        let saved = ctx.execute(&add).await.unwrap();
        assert_eq!(
            saved,
            "Meeting 'Demo' successfully saved to the database for Friday 3pm."
        );

        let listing = ctx
            .execute(&ToolCall::Database {
                action: "list everything".to_string(),
                title: None,
                time: None,
            })
            .await
            .unwrap();
        assert_eq!(listing, "Meetings in Database: [(1, 'Demo', 'Friday 3pm')]");
    }

    #[tokio::test]
    async fn test_execute_non_storage_tools_never_fail() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&dir);

        let weather = ctx
            .execute(&ToolCall::Weather {
                location: "Paris".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(weather, "Weather service is currently offline.");

        let resume = ctx
            .execute(&ToolCall::Resume {
                query: "what did I study?".to_string(),
            })
            .await
            .unwrap();
        assert!(resume.contains("resume.pdf"));

        let search = ctx
            .execute(&ToolCall::WebSearch {
                query: "weather on mars".to_string(),
            })
            .await
            .unwrap();
        assert!(search.starts_with("Simulated Web Search for 'weather on mars'"));
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let dir = tempfile::tempdir().unwrap();
        // no initialize: the table is missing
        let ctx = ToolContext::new(
            WeatherClient::new(&WeatherSettings::default(), None).unwrap(),
            ResumeReader::new(dir.path().join("resume.pdf"), 3000),
            MeetingStore::new(dir.path().join("meetings.db")),
        );

        let err = ctx
            .execute(&ToolCall::Database {
                action: "view".to_string(),
                title: None,
                time: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConciergeError::Database(_)));
    }
}

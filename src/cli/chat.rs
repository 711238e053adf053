//! Interactive chat loop.

use crate::agent::{Agent, OpenAIBackend, ToolContext};
use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::document::ResumeReader;
use crate::error::Result;
use crate::meetings::MeetingStore;
use crate::openai::create_client;
use crate::weather::WeatherClient;
use console::style;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::{debug, info};

/// Whether a line ends the session. Only the bare words `exit` and `quit`
/// count, in any letter case.
pub fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Wire the tools and hosted model together from startup configuration.
pub fn build_agent(
    settings: &Settings,
    credentials: &Credentials,
    model: Option<String>,
) -> Result<Agent> {
    let meetings = MeetingStore::new(settings.store_path());
    meetings.initialize()?;

    let weather = WeatherClient::new(&settings.weather, credentials.openweather_api_key.clone())?;
    let resume = ResumeReader::from_settings(&settings.document);
    let tools = ToolContext::new(weather, resume, meetings);

    let model = model.unwrap_or_else(|| settings.agent.model.clone());
    info!("Using model {}", model);

    let client = create_client(credentials, settings.agent.request_timeout())?;
    let backend = Arc::new(OpenAIBackend::new(client, &model, settings.agent.temperature));

    let mut agent = Agent::new(backend, tools).with_max_iterations(settings.agent.max_iterations);
    if let Some(prompt) = &settings.agent.system_prompt {
        agent = agent.with_system_prompt(prompt);
    }
    Ok(agent)
}

/// Run the interactive chat on stdin/stdout.
pub async fn run_chat(
    model: Option<String>,
    settings: Settings,
    credentials: Credentials,
) -> Result<()> {
    let agent = build_agent(&settings, &credentials, model)?;

    println!("\n{}", style("--- AI Multi-Agent System Online ---").bold().cyan());
    println!(
        "{}",
        style("Commands: 'exit' to quit. Ask about your resume, weather, or schedule.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&agent, stdin.lock(), &mut stdout).await
}

/// Read lines from `input` and answer each one until an exit command or end
/// of input. A failed turn is reported and the loop keeps going.
pub async fn run_session<R, W>(agent: &Agent, mut input: R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "\n{} ", style("You:").green().bold())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("End of input");
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        if is_exit_command(line) {
            break;
        }

        let spinner = Output::spinner("Thinking...");
        let result = agent.run(line).await;
        spinner.finish_and_clear();

        let label = style("AI:").cyan().bold();
        match result {
            Ok(response) => {
                for call in &response.tool_calls {
                    writeln!(output, "{}", style(format!("  [{}]", call.name)).dim())?;
                }
                writeln!(output, "{} {}", label, response.content)?;
            }
            Err(e) => {
                writeln!(output, "{} I encountered a logic error: {}", label, e)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{call, tool_context, ScriptedBackend};
    use crate::agent::{ModelReply, DATABASE_TOOL};
    use crate::error::ConciergeError;
    use std::io::Cursor;

    async fn session(backend: Arc<ScriptedBackend>, input: &str) -> String {
        let dir = tempfile::tempdir().unwrap();
        let agent = Agent::new(backend, tool_context(&dir));
        let mut out = Vec::new();
        run_session(&agent, Cursor::new(input.to_string()), &mut out)
            .await
            .unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string()
    }

    #[test]
    fn test_exit_commands() {
        for word in ["exit", "EXIT", "quit", "Quit"] {
            assert!(is_exit_command(word), "{} should exit", word);
        }
        for word in ["", "q", "exit now", " exit", "bye", "quitting"] {
            assert!(!is_exit_command(word), "{:?} should not exit", word);
        }
    }

    #[tokio::test]
    async fn test_session_answers_until_exit() {
        let backend = ScriptedBackend::new(vec![Ok(ModelReply::text("Hi there."))]);
        let out = session(backend.clone(), "hello\nEXIT\nnever sent\n").await;

        assert!(out.contains("AI: Hi there.\n"));
        assert_eq!(backend.seen.lock().unwrap().len(), 1);
        assert_eq!(out.matches("You:").count(), 2);
    }

    #[tokio::test]
    async fn test_session_reports_errors_and_continues() {
        let backend = ScriptedBackend::new(vec![
            Err(ConciergeError::OpenAI("rate limited".to_string())),
            Ok(ModelReply::text("Recovered.")),
        ]);
        let out = session(backend, "first\nsecond\nquit\n").await;

        let error_line = "AI: I encountered a logic error: OpenAI API error: rate limited\n";
        let error_at = out.find(error_line).unwrap();
        let recovered_at = out.find("AI: Recovered.").unwrap();
        assert!(error_at < recovered_at);
        assert_eq!(out.matches("You:").count(), 3);
    }

    #[tokio::test]
    async fn test_session_shows_tool_trace() {
        let backend = ScriptedBackend::new(vec![
            Ok(call("1", DATABASE_TOOL, r#"{"action":"view"}"#)),
            Ok(ModelReply::text("Your calendar is empty.")),
        ]);
        let out = session(backend, "what meetings do I have?\n").await;

        assert!(out.contains("  [database_agent]\nAI: Your calendar is empty.\n"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let backend = ScriptedBackend::new(Vec::new());
        let out = session(backend.clone(), "").await;

        assert_eq!(out.matches("You:").count(), 1);
        assert!(backend.seen.lock().unwrap().is_empty());
    }
}

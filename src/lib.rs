//! Concierge - a terminal assistant backed by a tool-calling model
//!
//! Each line typed at the prompt goes to a hosted chat model together with
//! four tools. The model decides which tools to call; Concierge runs them
//! locally and prints the model's final answer.
//!
//! # Tools
//!
//! - `weather_agent` - current conditions from OpenWeatherMap
//! - `resume_agent` - text extracted from a local `resume.pdf`
//! - `google_search_agent` - a placeholder that never finds anything
//! - `database_agent` - add or list meetings in a local SQLite file
//!
//! # Architecture
//!
//! - `config` - TOML settings and environment credentials
//! - `meetings` - SQLite meeting store
//! - `weather` - weather HTTP client
//! - `document` - resume text extraction
//! - `search` - placeholder search
//! - `agent` - tool registry, model backend and tool-calling loop
//! - `cli` - argument parsing and the interactive loop
//!
//! # Example
//!
//! ```rust,no_run
//! use concierge::cli::build_agent;
//! use concierge::config::{Credentials, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = build_agent(&settings, &Credentials::from_env(), None)?;
//!
//!     let response = agent.run("What's the weather in Paris?").await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod meetings;
pub mod openai;
pub mod search;
pub mod weather;

pub use error::{ConciergeError, Result};

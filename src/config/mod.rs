//! Configuration module for Concierge.
//!
//! Settings come from an optional TOML file; secrets come from the environment.
//! Both are read once at startup and passed down explicitly.

mod credentials;
mod settings;

pub use credentials::{
    Credentials, OPENAI_API_KEY_VAR, OPENAI_BASE_URL_VAR, OPENWEATHER_API_KEY_VAR,
};
pub use settings::{AgentSettings, DocumentSettings, Settings, StoreSettings, WeatherSettings};

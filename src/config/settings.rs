//! Configuration settings for Concierge.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub agent: AgentSettings,
    pub weather: WeatherSettings,
    pub document: DocumentSettings,
    pub store: StoreSettings,
}

/// Hosted model and tool-calling loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Chat model used for tool selection and replies.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum model calls per turn before the turn is abandoned.
    pub max_iterations: usize,
    /// Optional system prompt prepended to every turn.
    pub system_prompt: Option<String>,
    /// Request timeout for the hosted model in seconds. None waits forever.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            max_iterations: 12,
            system_prompt: None,
            request_timeout_secs: None,
        }
    }
}

impl AgentSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Weather service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// Current-weather endpoint.
    pub endpoint: String,
    /// Unit system passed to the provider.
    pub units: String,
    /// Request timeout in seconds. None waits forever.
    pub timeout_secs: Option<u64>,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://api.openweathermap.org/data/2.5/weather".to_string(),
            units: "metric".to_string(),
            timeout_secs: None,
        }
    }
}

impl WeatherSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Resume document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Path to the resume PDF.
    pub path: String,
    /// Maximum number of extracted characters handed to the model.
    pub max_chars: usize,
    /// Directory named in the "file not found" guidance. Defaults to the
    /// directory the resume path resolves into.
    pub expected_dir: Option<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            path: "resume.pdf".to_string(),
            max_chars: 3000,
            expected_dir: None,
        }
    }
}

/// Meeting database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Path to the SQLite database file.
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: "meetings.db".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("concierge")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded resume path.
    pub fn document_path(&self) -> PathBuf {
        Self::expand_path(&self.document.path)
    }

    /// Get the expanded meeting database path.
    pub fn store_path(&self) -> PathBuf {
        Self::expand_path(&self.store.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_local_layout() {
        let settings = Settings::default();
        assert_eq!(settings.agent.model, "gpt-4o-mini");
        assert_eq!(settings.agent.temperature, 0.0);
        assert_eq!(settings.document.max_chars, 3000);
        assert_eq!(settings.document_path(), PathBuf::from("resume.pdf"));
        assert_eq!(settings.store_path(), PathBuf::from("meetings.db"));
        assert!(settings.agent.request_timeout().is_none());
        assert!(settings.weather.timeout().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nmodel = \"gpt-4.1\"\n\n[store]\npath = \"/tmp/m.db\"").unwrap();

        let settings = Settings::load_from(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(settings.agent.model, "gpt-4.1");
        assert_eq!(settings.agent.max_iterations, 12);
        assert_eq!(settings.store_path(), PathBuf::from("/tmp/m.db"));
        assert_eq!(settings.weather.units, "metric");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.document.path, "resume.pdf");
    }
}

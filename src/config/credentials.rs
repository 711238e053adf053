//! Secrets read from the environment at process start.

/// Environment variable holding the hosted model key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the hosted model endpoint.
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Environment variable holding the weather service key.
pub const OPENWEATHER_API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// API keys and endpoints, captured once and passed to whoever needs them.
///
/// Absent keys are not rejected here; the component that needs one reports
/// the failure when it is used.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub openweather_api_key: Option<String>,
}

impl Credentials {
    /// Read all credentials from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            openai_api_key: read(OPENAI_API_KEY_VAR),
            openai_base_url: read(OPENAI_BASE_URL_VAR),
            openweather_api_key: read(OPENWEATHER_API_KEY_VAR),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Credentials")
            .field("openai_api_key", &mask(&self.openai_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("openweather_api_key", &mask(&self.openweather_api_key))
            .finish()
    }
}

use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default delay between starting a card's fade-out and reloading the list.
pub const DEFAULT_FADE_DELAY_MS: u64 = 300;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against a
/// backend on port 8000.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub api_url: String,
    /// How long a deleted card fades before the list reloads.
    pub fade_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fade_delay: Duration::from_millis(DEFAULT_FADE_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                 |
    /// |----------------------|-------------------------|
    /// | `LORE_API_URL`       | `http://localhost:8000` |
    /// | `LORE_FADE_DELAY_MS` | `300`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("LORE_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let fade_delay_ms = match lookup("LORE_FADE_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "LORE_FADE_DELAY_MS",
                expected: "u64",
                value: raw,
            })?,
            None => DEFAULT_FADE_DELAY_MS,
        };

        Ok(Self {
            api_url,
            fade_delay: Duration::from_millis(fade_delay_ms),
        })
    }
}

use crate::error::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:6500";
pub const DEFAULT_WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_SEND_API_URL: &str = "https://graph.facebook.com/v2.6/me/messages";

/// Process-wide settings, read once at startup and handed to the handlers.
#[derive(Debug, Clone)]
pub struct Config {
    /// Page access token generated from the Facebook developer dashboard.
    pub page_access_token: String,
    /// Shared secret echoed back by the platform during the webhook handshake.
    pub verify_token: String,
    /// OpenWeatherMap app id.
    pub weather_api_key: String,
    pub bind_addr: String,
    pub weather_api_url: String,
    pub send_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            page_access_token: required("PAGE_ACCESS_TOKEN")?,
            verify_token: required("VERIFY_TOKEN")?,
            weather_api_key: required("OPEN_WEATHER_MAP_APP_ID")?,
            bind_addr: optional("BIND_ADDR", DEFAULT_BIND_ADDR),
            weather_api_url: optional("WEATHER_API_URL", DEFAULT_WEATHER_API_URL),
            send_api_url: optional("SEND_API_URL", DEFAULT_SEND_API_URL),
        })
    }
}

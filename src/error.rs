use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set in .env file")]
    Missing(&'static str),
}

/// Failures on the outbound calls. Never reach the webhook caller.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} responded with status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("weather response is missing name or description")]
    MalformedWeather,
}

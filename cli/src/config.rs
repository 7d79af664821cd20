use std::time::Duration;

use clap::Parser;
use todo_client::config::API_URL_ENV;
use todo_client::ClientConfig;

use crate::components::toast::DEFAULT_SUCCESS_DURATION;

/// Interactive todo list backed by the todo HTTP API.
#[derive(Debug, Parser)]
#[command(name = "todo", version)]
pub struct Args {
    /// Base URL of the API, including the `/api/v1` prefix
    /// [default: http://localhost:8000/api/v1]
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// How long success notifications stay visible, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_SUCCESS_DURATION.as_millis() as u64)]
    pub toast_ms: u64,
}

impl Args {
    /// An unset or blank `--api-url` defers to `ClientConfig::from_env`,
    /// which applies the same blank check and the development default.
    pub fn client_config(&self) -> ClientConfig {
        match self.api_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => ClientConfig::new(url),
            _ => ClientConfig::from_env(),
        }
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

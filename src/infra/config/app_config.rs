use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::conversation::DEFAULT_WINDOW_LIMIT;
use crate::domain::viewport::DEFAULT_AT_BOTTOM_THRESHOLD_ROWS;
use crate::usecases::list_refresh::{
    DEFAULT_LIST_REFRESH_DEBOUNCE_MS, DEFAULT_LIST_REFRESH_INTERVAL_MS,
};
use crate::usecases::poll_scheduler::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_POST_SEND_PAUSE_MS};
use crate::usecases::session::SessionTunables;
use crate::usecases::shell::EngineTunables;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    pub logging: LogConfig,
    pub api: ApiConfig,
    pub messaging: MessagingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    /// Log file path; stdout belongs to the TUI. Defaults to
    /// `reeltalk.log` in the platform state directory.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api/v1".to_owned(),
            auth_token: None,
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagingConfig {
    pub poll_interval_ms: i64,
    pub post_send_pause_ms: i64,
    pub window_limit: usize,
    pub at_bottom_threshold_rows: usize,
    pub list_refresh_interval_ms: i64,
    pub list_refresh_debounce_ms: i64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            post_send_pause_ms: DEFAULT_POST_SEND_PAUSE_MS,
            window_limit: DEFAULT_WINDOW_LIMIT,
            at_bottom_threshold_rows: DEFAULT_AT_BOTTOM_THRESHOLD_ROWS,
            list_refresh_interval_ms: DEFAULT_LIST_REFRESH_INTERVAL_MS,
            list_refresh_debounce_ms: DEFAULT_LIST_REFRESH_DEBOUNCE_MS,
        }
    }
}

impl MessagingConfig {
    pub fn engine_tunables(&self) -> EngineTunables {
        EngineTunables {
            session: SessionTunables {
                window_limit: self.window_limit,
                poll_interval_ms: self.poll_interval_ms,
                post_send_pause_ms: self.post_send_pause_ms,
            },
            at_bottom_threshold_rows: self.at_bottom_threshold_rows,
            list_refresh_interval_ms: self.list_refresh_interval_ms,
            list_refresh_debounce_ms: self.list_refresh_debounce_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messaging_config_matches_engine_defaults() {
        let config = MessagingConfig::default();

        assert_eq!(config.poll_interval_ms, 5_000);
        assert_eq!(config.post_send_pause_ms, 1_500);
        assert_eq!(config.window_limit, 100);
        assert_eq!(config.engine_tunables(), EngineTunables::default());
    }
}

use std::path::PathBuf;

use serde::Deserialize;

use crate::infra::config::{ApiConfig, AppConfig, LogConfig, MessagingConfig};

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub logging: Option<FileLogConfig>,
    pub api: Option<FileApiConfig>,
    pub messaging: Option<FileMessagingConfig>,
}

impl FileConfig {
    pub fn merge_into(self, config: &mut AppConfig) {
        if let Some(logging) = self.logging {
            logging.merge_into(&mut config.logging);
        }

        if let Some(api) = self.api {
            api.merge_into(&mut config.api);
        }

        if let Some(messaging) = self.messaging {
            messaging.merge_into(&mut config.messaging);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileLogConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl FileLogConfig {
    fn merge_into(self, config: &mut LogConfig) {
        if let Some(level) = self.level {
            config.level = level;
        }

        if let Some(file) = self.file {
            config.file = Some(file);
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileApiConfig {
    pub base_url: Option<String>,
    pub auth_token: Option<String>,
    pub request_timeout_ms: Option<u64>,
}

impl FileApiConfig {
    fn merge_into(self, config: &mut ApiConfig) {
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(auth_token) = self.auth_token {
            config.auth_token = Some(auth_token);
        }

        if let Some(timeout_ms) = self.request_timeout_ms {
            config.request_timeout_ms = timeout_ms;
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileMessagingConfig {
    pub poll_interval_ms: Option<i64>,
    pub post_send_pause_ms: Option<i64>,
    pub window_limit: Option<usize>,
    pub at_bottom_threshold_rows: Option<usize>,
    pub list_refresh_interval_ms: Option<i64>,
    pub list_refresh_debounce_ms: Option<i64>,
}

impl FileMessagingConfig {
    fn merge_into(self, config: &mut MessagingConfig) {
        if let Some(poll_interval_ms) = self.poll_interval_ms {
            config.poll_interval_ms = poll_interval_ms;
        }

        if let Some(post_send_pause_ms) = self.post_send_pause_ms {
            config.post_send_pause_ms = post_send_pause_ms;
        }

        if let Some(window_limit) = self.window_limit {
            config.window_limit = window_limit;
        }

        if let Some(at_bottom_threshold_rows) = self.at_bottom_threshold_rows {
            config.at_bottom_threshold_rows = at_bottom_threshold_rows;
        }

        if let Some(list_refresh_interval_ms) = self.list_refresh_interval_ms {
            config.list_refresh_interval_ms = list_refresh_interval_ms;
        }

        if let Some(list_refresh_debounce_ms) = self.list_refresh_debounce_ms {
            config.list_refresh_debounce_ms = list_refresh_debounce_ms;
        }
    }
}

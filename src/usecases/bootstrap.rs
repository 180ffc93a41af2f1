use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;

use crate::infra::{self, error::AppError};

use super::context::AppContext;

/// Context plus the log writer guard, which must stay alive for the whole
/// run or buffered log lines are dropped.
pub struct Bootstrapped {
    pub context: AppContext,
    pub log_guard: WorkerGuard,
}

pub fn bootstrap(config_path: Option<&Path>) -> Result<Bootstrapped, AppError> {
    let context = build_context(config_path)?;
    let log_guard = infra::logging::init(&context.config.logging)?;

    Ok(Bootstrapped { context, log_guard })
}

fn build_context(config_path: Option<&Path>) -> Result<AppContext, AppError> {
    let config = infra::config::load(config_path)?;
    Ok(AppContext::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_context_with_default_config_when_file_is_missing() {
        let context = build_context(Some(Path::new("./missing-config.toml")))
            .expect("context should build from defaults");

        assert_eq!(context.config, crate::infra::config::AppConfig::default());
    }
}

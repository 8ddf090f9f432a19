//! Logging setup
//!
//! `RUST_LOG` wins over the configured level when set.

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber
///
/// With `log_dir` set (and existing), output goes to a daily-rolling
/// `grc-client.YYYY-MM-DD` file there instead of stdout. Calling this twice
/// is harmless; the second call does nothing.
pub fn init_logger(log_level: &str, log_dir: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir
        && dir.is_dir()
    {
        let file_appender = tracing_appender::rolling::daily(dir, "grc-client");
        let _ = subscriber.with_writer(file_appender).with_ansi(false).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger("debug", None);
        init_logger("not a level ((", None);
        tracing::info!("logger initialised");
    }
}

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Install the global subscriber. The terminal belongs to the UI, so logs
/// only go to a file; without one configured this does nothing.
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_is_a_no_op() {
        assert!(init(&LogConfig::default()).is_ok());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let config = LogConfig {
            file: Some("/definitely/not/here/taskbuddy.log".into()),
            filter: "debug".into(),
        };
        assert!(init(&config).is_err());
    }
}

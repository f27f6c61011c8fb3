use serde::{Deserialize, Serialize};
use std::{fs::File, sync::Arc};
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Plain,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "kebab-case")]
pub struct LogConfig {
    /// A level (`info`) or a full filter directive (`info,rpcx_client=debug`).
    pub level: String,
    pub format: LogFormat,
    pub output: LogOutput,
    pub file_path: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            output: LogOutput::default(),
            file_path: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("log output is 'file' but 'file-path' is not specified")]
    MissingFilePath,
    #[error("failed to open log file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

impl LogConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber described by `config`.
pub fn try_init(config: &LogConfig) -> Result<(), LoggerError> {
    let subscriber = Registry::default().with(config.filter());

    match config.output {
        LogOutput::File => {
            let file_path = config
                .file_path
                .as_deref()
                .ok_or(LoggerError::MissingFilePath)?;
            let log_file = File::create(file_path).map_err(|source| LoggerError::File {
                path: file_path.to_string(),
                source,
            })?;
            let file_writer = Arc::new(log_file);

            match config.format {
                LogFormat::Json => subscriber
                    .with(fmt::layer().with_writer(file_writer).with_ansi(false).json())
                    .try_init()?,
                LogFormat::Plain => subscriber
                    .with(fmt::layer().with_writer(file_writer).with_ansi(false).pretty())
                    .try_init()?,
            }
        }
        LogOutput::Stdout => match config.format {
            LogFormat::Json => subscriber
                .with(fmt::layer().with_writer(std::io::stdout).json())
                .try_init()?,
            LogFormat::Plain => subscriber
                .with(fmt::layer().with_writer(std::io::stdout).pretty())
                .try_init()?,
        },
    };

    Ok(())
}

/// Like [`try_init`], but an already-installed subscriber is not an error.
pub fn init(config: &LogConfig) -> Result<(), LoggerError> {
    match try_init(config) {
        Err(LoggerError::AlreadyInitialized(_)) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_logs_info_to_stdout() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Plain);
        assert_eq!(config.output, LogOutput::Stdout);
    }

    #[test]
    fn file_output_requires_path() {
        let config = LogConfig {
            output: LogOutput::File,
            ..Default::default()
        };
        assert!(matches!(try_init(&config), Err(LoggerError::MissingFilePath)));
    }

    #[test]
    fn bad_directive_falls_back_to_info() {
        let config = LogConfig {
            level: "rpcx_client=loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.filter().to_string(), "info");
    }

    #[test]
    #[serial]
    fn second_install_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.log");
        let config = LogConfig {
            format: LogFormat::Json,
            output: LogOutput::File,
            file_path: Some(path.display().to_string()),
            ..Default::default()
        };

        try_init(&config).unwrap();
        assert!(path.exists());
        assert!(matches!(
            try_init(&LogConfig::default()),
            Err(LoggerError::AlreadyInitialized(_))
        ));
        init(&LogConfig::default()).unwrap();
    }
}

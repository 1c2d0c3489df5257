//! Command-line flags and the optional RON settings file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chat_engine::{ChatSettings, EngineSettings};
use clap::Parser;
use serde::{Deserialize, Serialize};
use widget_logging::chat_info;

use super::logging::{LogDestination, LogLevel};

/// Terminal client for the Assurbot chat endpoint.
#[derive(Debug, Parser)]
#[command(name = "assurbot", version)]
pub struct Cli {
    /// Settings file; a missing file means defaults.
    #[arg(long, default_value = "chatbot.ron")]
    pub config: PathBuf,

    /// Origin serving `POST /chat`, overriding the settings file.
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_bytes: u64,
    pub max_document_bytes: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        let chat = ChatSettings::default();
        Self {
            base_url: chat.base_url,
            connect_timeout_secs: chat.connect_timeout.as_secs(),
            request_timeout_secs: chat.request_timeout.as_secs(),
            max_response_bytes: chat.max_response_bytes,
            max_document_bytes: None,
        }
    }
}

impl WidgetConfig {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            chat: ChatSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_response_bytes: self.max_response_bytes,
            },
            max_document_bytes: self.max_document_bytes,
        }
    }
}

/// Reads the settings file and applies command-line overrides.
pub fn resolve(cli: &Cli) -> anyhow::Result<WidgetConfig> {
    let mut config = load(&cli.config)?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    Ok(config)
}

pub fn load(path: &Path) -> anyhow::Result<WidgetConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            chat_info!("No settings file at {:?}; using defaults", path);
            return Ok(WidgetConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read settings from {path:?}"));
        }
    };

    let config = ron::from_str(&content)
        .with_context(|| format!("failed to parse settings from {path:?}"))?;
    chat_info!("Loaded settings from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("chatbot.ron");
        fs::write(
            &path,
            "(base_url: \"https://assurbot.example\", max_document_bytes: Some(1024))",
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.base_url, "https://assurbot.example");
        assert_eq!(config.max_document_bytes, Some(1024));
        assert_eq!(
            config.request_timeout_secs,
            WidgetConfig::default().request_timeout_secs
        );

        let settings = config.engine_settings();
        assert_eq!(settings.chat.base_url, "https://assurbot.example");
        assert_eq!(settings.max_document_bytes, Some(1024));
    }

    #[test]
    fn broken_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("chatbot.ron");
        fs::write(&path, "(base_url: 42").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn command_line_overrides_base_url() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::parse_from([
            "assurbot",
            "--config",
            temp.path().join("absent.ron").to_str().unwrap(),
            "--base-url",
            "http://10.0.0.2:8080",
        ]);

        let config = resolve(&cli).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(cli.log, LogDestination::File);
    }
}

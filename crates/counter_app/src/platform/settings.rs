use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use counter_engine::{
    EngineConfig, HubSettings, ModelId, DEFAULT_FALLBACK_MODEL, DEFAULT_MODEL_LIST,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;
use crate::cli::Cli;

pub const SETTINGS_FILENAME: &str = "token_counter.ron";

/// Layered configuration: defaults, then the RON settings file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model_list: PathBuf,
    pub fallback_model: String,
    pub hub_cache_dir: Option<PathBuf>,
    pub log_destination: LogDestination,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_list: PathBuf::from(DEFAULT_MODEL_LIST),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            hub_cache_dir: None,
            log_destination: LogDestination::File,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings from {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("fallback model must not be blank")]
    BlankFallback,
}

impl Settings {
    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(path) = &cli.models {
            self.model_list = path.clone();
        }
        if let Some(fallback) = &cli.fallback {
            self.fallback_model = fallback.clone();
        }
        if let Some(dir) = &cli.hub_cache {
            self.hub_cache_dir = Some(dir.clone());
        }
        if let Some(destination) = cli.log {
            self.log_destination = destination;
        }
        self
    }

    pub fn engine_config(&self) -> Result<EngineConfig, SettingsError> {
        let fallback_model =
            ModelId::new(&self.fallback_model).ok_or(SettingsError::BlankFallback)?;
        Ok(EngineConfig {
            fallback_model,
            hub: HubSettings {
                cache_dir: self.hub_cache_dir.clone(),
                progress: false,
            },
        })
    }
}

/// Reads the settings file; `Ok(None)` when it does not exist.
pub(crate) fn read_settings(path: &Path) -> Result<Option<Settings>, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content)
        .map(Some)
        .map_err(|err| SettingsError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_as_none() {
        let temp = TempDir::new().unwrap();
        let loaded = read_settings(&temp.path().join(SETTINGS_FILENAME)).unwrap();
        assert_eq!(loaded, None);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, r#"(fallback_model: "bert-base-uncased", log_destination: both)"#)
            .unwrap();

        let settings = read_settings(&path).unwrap().unwrap();
        assert_eq!(settings.fallback_model, "bert-base-uncased");
        assert_eq!(settings.log_destination, LogDestination::Both);
        assert_eq!(settings.model_list, PathBuf::from(DEFAULT_MODEL_LIST));
        assert_eq!(settings.hub_cache_dir, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(fallback_model: 42").unwrap();

        let err = read_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn cli_flags_override_file_values() {
        let cli = Cli::parse_from([
            "token_counter",
            "--models",
            "lists/custom.txt",
            "--fallback",
            "openai-community/gpt2",
            "--log",
            "terminal",
        ]);
        let settings = Settings {
            hub_cache_dir: Some(PathBuf::from("/tmp/hub")),
            ..Settings::default()
        }
        .with_overrides(&cli);

        assert_eq!(settings.model_list, PathBuf::from("lists/custom.txt"));
        assert_eq!(settings.fallback_model, "openai-community/gpt2");
        assert_eq!(settings.log_destination, LogDestination::Terminal);
        assert_eq!(settings.hub_cache_dir, Some(PathBuf::from("/tmp/hub")));
    }

    #[test]
    fn blank_fallback_is_rejected() {
        let settings = Settings {
            fallback_model: "   ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.engine_config(),
            Err(SettingsError::BlankFallback)
        ));

        let config = Settings::default().engine_config().unwrap();
        assert_eq!(config.fallback_model.as_str(), DEFAULT_FALLBACK_MODEL);
    }
}

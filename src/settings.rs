use crate::error::ConfigError;
use crate::slack::DEFAULT_API_BASE;
use serde_derive::Deserialize;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

static CONFIG_FILE_RELPATH: &str = ".config/slack_channel_members.json";

/// Optional defaults read from `~/.config/slack_channel_members.json`.
#[derive(Deserialize, Default, Debug, PartialEq, Eq)]
pub struct SettingsFile {
    pub api_token: Option<String>,
    pub api_base: Option<String>,
    #[serde(default)]
    pub include_private: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub api_token: String,
    pub api_base: String,
    pub include_private: bool,
}

pub fn get_settings_file_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE_RELPATH))
}

/// A missing file yields the defaults; a malformed one is an error.
pub fn read_settings_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let settings_error = |reason: String| ConfigError::Settings {
        path: path.display().to_string(),
        reason,
    };

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SettingsFile::default()),
        Err(e) => return Err(settings_error(e.to_string())),
    };
    serde_json::from_str(&contents).map_err(|e| settings_error(e.to_string()))
}

impl Settings {
    /// Command line values win over the settings file. The token must be
    /// non-empty after merging.
    pub fn merge(
        cli_token: Option<String>,
        cli_private: bool,
        file: SettingsFile,
    ) -> Result<Settings, ConfigError> {
        let api_token = cli_token
            .filter(|t| !t.is_empty())
            .or(file.api_token)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        Ok(Settings {
            api_token,
            api_base: file
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_owned()),
            include_private: cli_private || file.include_private,
        })
    }

    pub fn load(cli_token: Option<String>, cli_private: bool) -> Result<Settings, ConfigError> {
        let file = match get_settings_file_path() {
            Some(path) => read_settings_file(&path)?,
            None => SettingsFile::default(),
        };
        Settings::merge(cli_token, cli_private, file)
    }
}

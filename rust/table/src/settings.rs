use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV: &str = "POKERROOM_CONFIG";
pub const BIG_BLIND_ENV: &str = "POKERROOM_BIG_BLIND";
pub const SEED_ENV: &str = "POKERROOM_SEED";

const DAY_SECS: u64 = 24 * 60 * 60;

/// Limits and stakes shared by every room of a server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableSettings {
    /// Even, so the small blind is exactly half
    pub big_blind: u32,
    pub min_name_length: usize,
    pub max_name_length: usize,
    pub min_initial_chips: u32,
    pub max_initial_chips: u32,
    /// Longest chat message, in characters
    pub max_text_message_length: usize,
    /// How long a room with nobody connected survives
    pub room_ttl_secs: u64,
    /// Fixes dealer choice and shuffles in every room
    pub seed: Option<u64>,
    /// Directory receiving one `<room id>.jsonl` hand history per room
    pub hand_log_dir: Option<PathBuf>,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            big_blind: 20,
            min_name_length: 2,
            max_name_length: 30,
            min_initial_chips: 1,
            max_initial_chips: 1_000_000,
            max_text_message_length: 500,
            room_ttl_secs: 7 * DAY_SECS,
            seed: None,
            hand_log_dir: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl TableSettings {
    /// Defaults, then the TOML file named by `POKERROOM_CONFIG`, then the
    /// `POKERROOM_BIG_BLIND` and `POKERROOM_SEED` overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::read_file(path)?,
            _ => Self::default(),
        };

        if let Some(v) = non_empty_env(BIG_BLIND_ENV) {
            settings.big_blind = v
                .parse()
                .map_err(|_| SettingsError::Invalid(format!("{BIG_BLIND_ENV}: {v:?}")))?;
        }
        if let Some(v) = non_empty_env(SEED_ENV) {
            settings.seed = Some(
                v.parse()
                    .map_err(|_| SettingsError::Invalid(format!("{SEED_ENV}: {v:?}")))?,
            );
        }

        settings.validate()?;
        tracing::debug!(?settings, "table settings loaded");
        Ok(settings)
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.big_blind == 0 || self.big_blind % 2 != 0 {
            return Err(SettingsError::Invalid(
                "big_blind must be a positive even number".into(),
            ));
        }
        if self.min_name_length == 0 || self.min_name_length > self.max_name_length {
            return Err(SettingsError::Invalid(
                "name length bounds must satisfy 0 < min <= max".into(),
            ));
        }
        if self.min_initial_chips == 0 || self.min_initial_chips > self.max_initial_chips {
            return Err(SettingsError::Invalid(
                "initial chip bounds must satisfy 0 < min <= max".into(),
            ));
        }
        if self.max_text_message_length == 0 {
            return Err(SettingsError::Invalid(
                "max_text_message_length must be greater than 0".into(),
            ));
        }
        if self.room_ttl_secs == 0 {
            return Err(SettingsError::Invalid(
                "room_ttl_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn room_ttl(&self) -> Duration {
        Duration::from_secs(self.room_ttl_secs)
    }

    pub fn name_allowed(&self, name: &str) -> bool {
        let len = name.chars().count();
        (self.min_name_length..=self.max_name_length).contains(&len)
    }

    pub fn chips_allowed(&self, chips: u32) -> bool {
        (self.min_initial_chips..=self.max_initial_chips).contains(&chips)
    }

    pub fn text_message_allowed(&self, message: &str) -> bool {
        message.chars().count() <= self.max_text_message_length
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

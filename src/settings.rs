//! Game settings loaded from a JSON file.
//!
//! Every field has a default, so a settings file only needs to name the values
//! it changes.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_FORWARD_ACCELERATION, DEFAULT_PAWN_CLASS_PATH, DEFAULT_TURN_RIGHT_VELOCITY,
    SKATEBOARD_TRACE_OFFSET,
};

/// Tunables applied to a skater when it spawns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkaterSettings {
    /// Initial forward acceleration scalar.
    pub forward_acceleration: f32,
    /// Scale applied to lateral input when turning.
    pub turn_right_velocity: f32,
    /// Half-length of the ground probes cast from each board socket.
    pub skateboard_trace_offset: f32,
}

impl Default for SkaterSettings {
    fn default() -> Self {
        Self {
            forward_acceleration: DEFAULT_FORWARD_ACCELERATION,
            turn_right_velocity: DEFAULT_TURN_RIGHT_VELOCITY,
            skateboard_trace_offset: SKATEBOARD_TRACE_OFFSET,
        }
    }
}

/// Top-level settings resource.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    /// Tunables for the player's skater.
    pub skater: SkaterSettings,
    /// Class path the game mode resolves as the default pawn.
    pub default_pawn: String,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            skater: SkaterSettings::default(),
            default_pawn: DEFAULT_PAWN_CLASS_PATH.to_owned(),
        }
    }
}

/// Errors raised while loading [`GameSettings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings from {}: {source}", path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings file was not valid settings JSON.
    #[error("failed to parse settings in {}: {source}", path.display())]
    Parse {
        /// File that was requested.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },
}

impl GameSettings {
    /// Parses settings from a JSON string.
    ///
    /// # Errors
    /// Returns the JSON error when `json` is malformed or names an unknown
    /// field.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads settings from the JSON file at `path`.
    ///
    /// # Errors
    /// Returns [`SettingsError::Read`] when the file cannot be read and
    /// [`SettingsError::Parse`] when its contents are not valid settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let file = path.as_ref();
        let contents = fs::read_to_string(file).map_err(|source| SettingsError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&contents).map_err(|source| SettingsError::Parse {
            path: file.to_path_buf(),
            source,
        })?;
        log::debug!("loaded settings from {}: {settings:?}", file.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let settings = GameSettings::from_json("{}").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(settings, GameSettings::default());
    }

    #[test]
    fn partial_skater_overrides_keep_other_defaults() {
        let settings = GameSettings::from_json(r#"{ "skater": { "turn_right_velocity": 0.5 } }"#)
            .unwrap_or_else(|e| panic!("{e}"));
        assert_relative_eq!(settings.skater.turn_right_velocity, 0.5);
        assert_relative_eq!(
            settings.skater.forward_acceleration,
            DEFAULT_FORWARD_ACCELERATION
        );
        assert_eq!(settings.default_pawn, DEFAULT_PAWN_CLASS_PATH);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(GameSettings::from_json(r#"{ "gravity": 3 }"#).is_err());
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
        let missing = dir.path().join("absent.json");
        let err = GameSettings::load(&missing).err();
        assert!(
            matches!(err, Some(SettingsError::Read { ref path, .. }) if *path == missing),
            "unexpected result: {err:?}"
        );
        let message = err.map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("absent.json"), "message was {message}");
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("{e}"));
        file.write_all(b"{ not json").unwrap_or_else(|e| panic!("{e}"));
        let err = GameSettings::load(file.path()).err();
        assert!(matches!(err, Some(SettingsError::Parse { .. })));
    }

    #[test]
    fn loads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap_or_else(|e| panic!("{e}"));
        file.write_all(br#"{ "default_pawn": "/Game/Custom", "skater": { "skateboard_trace_offset": 12.0 } }"#)
            .unwrap_or_else(|e| panic!("{e}"));
        let settings = GameSettings::load(file.path()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(settings.default_pawn, "/Game/Custom");
        assert_relative_eq!(settings.skater.skateboard_trace_offset, 12.0);
    }
}

//! User preferences that shape projection and volume control.
//!
//! # Responsibility
//! - Carry visibility filters and volume-control settings.
//! - Load and validate preferences from the preference store's JSON form.
//!
//! # Invariants
//! - Missing keys take documented defaults.
//! - `max_volume` is finite and positive.
//! - `volume_step` is finite, positive and not above `max_volume`.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Preference set read by the projector and the volume cascade.
///
/// Volume values are fractions of `VOLUME_NORM` (`1.0` means 100%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub hide_disconnected_clients: bool,
    pub hide_disconnected_modules: bool,
    pub hide_disconnected_sources: bool,
    pub hide_disconnected_sinks: bool,
    pub hide_monitors: bool,
    pub hide_pulseaudio_apps: bool,
    pub hide_monitor_source_edges: bool,
    pub lock_channels_together: bool,
    pub max_volume: f64,
    pub volume_step: f64,
    /// Host rendering hint; the core only carries it.
    pub hide_volume_thumbnails: bool,
    /// Host rendering hint; the core only carries it.
    pub show_debug_info: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            hide_disconnected_clients: true,
            hide_disconnected_modules: true,
            hide_disconnected_sources: false,
            hide_disconnected_sinks: false,
            hide_monitors: false,
            hide_pulseaudio_apps: true,
            hide_monitor_source_edges: false,
            lock_channels_together: true,
            max_volume: 1.5,
            volume_step: 1.0 / 20.0,
            hide_volume_thumbnails: false,
            show_debug_info: false,
        }
    }
}

impl Preferences {
    /// Preferences with every visibility filter turned off.
    pub fn show_everything() -> Self {
        Self {
            hide_disconnected_clients: false,
            hide_disconnected_modules: false,
            hide_disconnected_sources: false,
            hide_disconnected_sinks: false,
            hide_monitors: false,
            hide_pulseaudio_apps: false,
            hide_monitor_source_edges: false,
            ..Self::default()
        }
    }

    /// Checks numeric invariants.
    pub fn validate(&self) -> Result<(), PreferencesError> {
        if !self.max_volume.is_finite() || self.max_volume <= 0.0 {
            return Err(PreferencesError::Invalid(format!(
                "maxVolume must be a positive number, got {}",
                self.max_volume
            )));
        }
        if !self.volume_step.is_finite() || self.volume_step <= 0.0 {
            return Err(PreferencesError::Invalid(format!(
                "volumeStep must be a positive number, got {}",
                self.volume_step
            )));
        }
        if self.volume_step > self.max_volume {
            return Err(PreferencesError::Invalid(format!(
                "volumeStep ({}) must not exceed maxVolume ({})",
                self.volume_step, self.max_volume
            )));
        }
        Ok(())
    }

    /// Parses and validates preferences from JSON.
    pub fn from_json_str(value: &str) -> Result<Self, PreferencesError> {
        let preferences: Self = serde_json::from_str(value).map_err(PreferencesError::Parse)?;
        preferences.validate()?;
        Ok(preferences)
    }

    /// Loads preferences from a JSON file.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    /// - `Parse` when the content is not valid preferences JSON.
    /// - `Invalid` when a numeric invariant does not hold.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PreferencesError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match Self::from_json_str(&raw) {
            Ok(preferences) => {
                info!(
                    "event=preferences_load module=model status=ok path={}",
                    path.display()
                );
                Ok(preferences)
            }
            Err(err) => {
                warn!(
                    "event=preferences_load module=model status=error path={} error={}",
                    path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}

/// Preference loading and validation errors.
#[derive(Debug)]
pub enum PreferencesError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for PreferencesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read preferences `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid preferences json: {err}"),
            Self::Invalid(message) => write!(f, "invalid preferences: {message}"),
        }
    }
}

impl Error for PreferencesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Preferences, PreferencesError};

    #[test]
    fn missing_keys_take_defaults() {
        let preferences =
            Preferences::from_json_str(r#"{ "hideMonitors": true }"#).expect("partial json");
        assert!(preferences.hide_monitors);
        assert!(preferences.hide_disconnected_clients);
        assert!(preferences.lock_channels_together);
        assert_eq!(preferences.max_volume, 1.5);
    }

    #[test]
    fn rejects_step_above_max() {
        let err = Preferences::from_json_str(r#"{ "maxVolume": 0.5, "volumeStep": 0.75 }"#)
            .expect_err("step above max must fail");
        assert!(matches!(err, PreferencesError::Invalid(_)));
        assert!(err.to_string().contains("volumeStep"));
    }

    #[test]
    fn rejects_non_positive_max_volume() {
        let err = Preferences::from_json_str(r#"{ "maxVolume": 0 }"#)
            .expect_err("zero max volume must fail");
        assert!(err.to_string().contains("maxVolume"));
    }
}

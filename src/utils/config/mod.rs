use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard},
};

use super::{
    errors::{LauncherError, LauncherErrorType},
    files::expand_path,
};
use crate::{launcher_error, CONFIG};

mod defaults;
mod flags;
mod imp;

pub use defaults::{FileDefaults, OtherDefaults};
pub use flags::LauncherFlags;

/// Configuration sections:
///
/// - **files**: Locations of the tracked apps list, icon directory and stylesheet.
/// - **appearance**: Window opacity and whether to load the built-in stylesheet.
/// - **behavior**: Daemon mode and the prefix/flags wrapped around launched commands.
///
/// Layout constants and the keyboard mnemonics are fixed and not configurable.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LauncherConfig {
    #[serde(default)]
    pub files: ConfigFiles,

    #[serde(default)]
    pub appearance: ConfigAppearance,

    #[serde(default)]
    pub behavior: ConfigBehavior,
}
impl LauncherConfig {
    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, LauncherError> {
        toml::de::from_str(raw).map_err(|e| {
            launcher_error!(
                LauncherErrorType::FileParseError(path.to_path_buf()),
                e.to_string()
            )
        })
    }

    /// Applies command line overrides and normalizes values. Returns the
    /// resulting config and any non-fatal warnings.
    pub fn apply_flags(
        flags: &LauncherFlags,
        mut config: LauncherConfig,
        home: &Path,
    ) -> (LauncherConfig, Vec<LauncherError>) {
        let mut warnings = Vec::new();

        config.files.apps = expand_path(
            flags.apps.as_deref().unwrap_or(config.files.apps.as_path()),
            home,
        );
        config.files.css = expand_path(
            flags.style.as_deref().unwrap_or(config.files.css.as_path()),
            home,
        );
        config.files.icons = expand_path(&config.files.icons, home);

        if flags.daemonize {
            config.behavior.daemonize = true;
        }

        let opacity = config.appearance.opacity;
        if !(0.1..=1.0).contains(&opacity) {
            let clamped = opacity.clamp(0.1, 1.0);
            warnings.push(launcher_error!(
                LauncherErrorType::ConfigError(Some(format!(
                    "The opacity value of {} exceeds the allowed range (0.1 - 1.0) and will be automatically set to {}.",
                    opacity, clamped
                ))),
                ""
            ));
            config.appearance.opacity = clamped;
        }

        (config, warnings)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ConfigFiles {
    #[serde(default = "FileDefaults::apps")]
    pub apps: PathBuf,
    #[serde(default = "FileDefaults::icons")]
    pub icons: PathBuf,
    #[serde(default = "FileDefaults::css")]
    pub css: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ConfigAppearance {
    #[serde(default = "OtherDefaults::one")]
    pub opacity: f64,
    #[serde(default = "OtherDefaults::bool_true")]
    pub use_base_css: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ConfigBehavior {
    #[serde(default)]
    pub daemonize: bool,
    #[serde(default)]
    pub global_prefix: Option<String>,
    #[serde(default)]
    pub global_flags: Option<String>,
}

pub struct ConfigGuard;
impl<'g> ConfigGuard {
    fn get_config() -> Result<&'g RwLock<LauncherConfig>, LauncherError> {
        CONFIG.get().ok_or_else(|| {
            launcher_error!(
                LauncherErrorType::ConfigError(None),
                "Config not initialized".to_string()
            )
        })
    }

    fn get_read() -> Result<RwLockReadGuard<'g, LauncherConfig>, LauncherError> {
        Self::get_config()?.read().map_err(|_| {
            launcher_error!(
                LauncherErrorType::ConfigError(None),
                "Failed to acquire read lock on config".to_string()
            )
        })
    }

    pub fn read() -> Result<RwLockReadGuard<'g, LauncherConfig>, LauncherError> {
        Self::get_read()
    }
}

use std::io::ErrorKind;
use std::path::PathBuf;

use clap::Parser;

use crate::{
    launcher_error,
    utils::{
        config::LauncherConfig,
        errors::{LauncherError, LauncherErrorType},
        files::{config_dir, expand_path, home_dir},
    },
};

/// Grid launcher popup. Bind it to a global shortcut (e.g. Alt+Q) in your
/// compositor; run with --daemonize to keep it resident between uses.
#[derive(Parser, Clone, Debug, Default)]
#[command(name = "quicknav", version, about)]
pub struct LauncherFlags {
    /// Specify the configuration file to load.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Specify the tracked applications file.
    #[arg(long)]
    pub apps: Option<PathBuf>,

    /// Specify the user stylesheet.
    #[arg(long)]
    pub style: Option<PathBuf>,

    /// Keep running after the window is hidden and listen for show requests.
    #[arg(long)]
    pub daemonize: bool,

    /// Replace an already running instance instead of signaling it.
    #[arg(long)]
    pub take_over: bool,

    /// Print the tracked applications with their running state as JSON and exit.
    #[arg(long)]
    pub list: bool,
}

impl LauncherFlags {
    /// Loads the config file and applies the flags on top of it.
    ///
    /// Problems with the config file are not fatal: defaults are used and the
    /// error is returned alongside so it can be reported.
    pub fn to_config(&self) -> Result<(LauncherConfig, Vec<LauncherError>), LauncherError> {
        let home = home_dir()?;
        let path = match &self.config {
            Some(path) => expand_path(path, &home),
            None => config_dir()?.join("config.toml"),
        };

        let mut non_breaking = Vec::new();
        let config = match std::fs::read_to_string(&path) {
            Ok(raw) => match LauncherConfig::from_toml(&raw, &path) {
                Ok(config) => config,
                Err(e) => {
                    non_breaking.push(e);
                    LauncherConfig::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                LauncherConfig::default()
            }
            Err(e) => {
                non_breaking.push(launcher_error!(
                    LauncherErrorType::FileReadError(path.clone()),
                    e.to_string()
                ));
                LauncherConfig::default()
            }
        };

        let (config, warnings) = LauncherConfig::apply_flags(self, config, &home);
        non_breaking.extend(warnings);
        Ok((config, non_breaking))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let flags = LauncherFlags::try_parse_from([
            "quicknav",
            "--apps",
            "/tmp/apps.txt",
            "--daemonize",
            "--take-over",
        ])
        .unwrap();
        assert_eq!(flags.apps, Some(PathBuf::from("/tmp/apps.txt")));
        assert!(flags.daemonize);
        assert!(flags.take_over);
        assert!(!flags.list);
        assert!(flags.config.is_none());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(LauncherFlags::try_parse_from(["quicknav", "--frobnicate"]).is_err());
    }
}

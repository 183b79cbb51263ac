use clap::Parser;

use super::Loader;
use crate::launcher_error;
use crate::utils::config::LauncherFlags;
use crate::utils::errors::{LauncherError, LauncherErrorType};

impl Loader {
    /// Parses the process arguments. `--help` and `--version` print and exit
    /// the process like clap always does.
    pub fn load_flags() -> Result<LauncherFlags, LauncherError> {
        Self::load_flags_from(std::env::args())
    }

    pub fn load_flags_from<I, T>(args: I) -> Result<LauncherFlags, LauncherError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        LauncherFlags::try_parse_from(args).map_err(|e| match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                e.exit()
            }
            _ => launcher_error!(
                LauncherErrorType::ConfigError(Some("Invalid command line flags".to_string())),
                e.to_string()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_flag_is_a_config_error() {
        let err = Loader::load_flags_from(["quicknav", "--frobnicate"]).unwrap_err();
        assert!(matches!(err.error, LauncherErrorType::ConfigError(Some(_))));
    }
}

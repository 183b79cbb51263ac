use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Builds a [`LauncherError`] and records where it was raised.
#[macro_export]
macro_rules! launcher_error {
    ($errtype:expr, $source:expr) => {
        $crate::utils::errors::LauncherError {
            error: $errtype,
            traceback: format!("Location: {}:{}\n{}", file!(), line!(), $source),
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct LauncherError {
    pub error: LauncherErrorType,
    pub traceback: String,
}
impl LauncherError {
    /// Reports the error on the diagnostic channel. Errors are logged at
    /// error level, everything else as a warning.
    pub fn log(&self, is_error: bool) {
        let (name, message) = self.error.get_message();
        if is_error {
            tracing::error!(error = %name, traceback = %self.traceback.trim(), "{}", message);
        } else {
            tracing::warn!(error = %name, traceback = %self.traceback.trim(), "{}", message);
        }
    }
}
impl fmt::Display for LauncherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}
impl std::error::Error for LauncherError {}
impl AsRef<LauncherError> for LauncherError {
    fn as_ref(&self) -> &LauncherError {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LauncherErrorType {
    // Host calls
    #[error("Failed to load application list")]
    FetchFailure,
    #[error("Failed to launch or focus application")]
    LaunchFailure,

    // Config
    #[error("Configuration error{}", .0.as_ref().map(|s| format!(": {}", s)).unwrap_or_default())]
    ConfigError(Option<String>),
    #[error("Environment variable \"{0}\" is not set")]
    EnvVarNotFoundError(String),

    // Files
    #[error("Failed to read file \"{}\"", .0.display())]
    FileReadError(PathBuf),
    #[error("Failed to parse file \"{}\"", .0.display())]
    FileParseError(PathBuf),
    #[error("Failed to write file \"{}\"", .0.display())]
    FileWriteError(PathBuf),
    #[error("Failed to remove file \"{}\"", .0.display())]
    FileRemoveError(PathBuf),
    #[error("Lock file already exists")]
    LockfileExistsError,
    #[error("Failed to create directory \"{}\"", .0.display())]
    DirCreateError(PathBuf),

    // Processes and IPC
    #[error("Failed to execute command \"{0}\"")]
    CommandExecutionError(String),
    #[error("Socket error: {0}")]
    SocketError(String),

    // Display
    #[error("No display available")]
    DisplayError,
}
impl LauncherErrorType {
    /// Returns a short title and a longer description for the error.
    pub fn get_message(&self) -> (String, String) {
        let name = match self {
            Self::FetchFailure => "FetchFailure",
            Self::LaunchFailure => "LaunchFailure",
            Self::ConfigError(_) => "ConfigError",
            Self::EnvVarNotFoundError(_) => "EnvVarNotFoundError",
            Self::FileReadError(_) => "FileReadError",
            Self::FileParseError(_) => "FileParseError",
            Self::FileWriteError(_) => "FileWriteError",
            Self::FileRemoveError(_) => "FileRemoveError",
            Self::LockfileExistsError => "LockfileExistsError",
            Self::DirCreateError(_) => "DirCreateError",
            Self::CommandExecutionError(_) => "CommandExecutionError",
            Self::SocketError(_) => "SocketError",
            Self::DisplayError => "DisplayError",
        };
        (name.to_string(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher_error;

    #[test]
    fn macro_records_location_and_detail() {
        let err = launcher_error!(LauncherErrorType::FetchFailure, "host went away");
        assert_eq!(err.error, LauncherErrorType::FetchFailure);
        assert!(err.traceback.contains("errors.rs"));
        assert!(err.traceback.ends_with("host went away"));
    }

    #[test]
    fn messages_name_the_variant() {
        let (name, message) =
            LauncherErrorType::FileReadError(PathBuf::from("/tmp/apps.txt")).get_message();
        assert_eq!(name, "FileReadError");
        assert_eq!(message, "Failed to read file \"/tmp/apps.txt\"");

        let (_, message) = LauncherErrorType::ConfigError(None).get_message();
        assert_eq!(message, "Configuration error");
        let (_, message) =
            LauncherErrorType::ConfigError(Some("bad opacity".into())).get_message();
        assert_eq!(message, "Configuration error: bad opacity");
    }
}

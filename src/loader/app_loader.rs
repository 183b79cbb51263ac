use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{error, warn};

use super::Loader;
use crate::launcher_error;
use crate::utils::errors::{LauncherError, LauncherErrorType};

/// One line of the tracked applications file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedApp {
    pub process_name: String,
    pub display_name: String,
    pub launch_path: String,
}
impl TrackedApp {
    /// Entry used when no tracked applications file exists yet.
    pub fn fallback() -> Self {
        Self {
            process_name: "code".to_string(),
            display_name: "VSCode".to_string(),
            launch_path: "code".to_string(),
        }
    }
}

impl Loader {
    /// Reads the tracked applications file.
    ///
    /// Format: one application per line as `process_name, display_name,
    /// launch_path`. Double quotes group a field that contains commas. Blank
    /// lines are skipped, malformed lines are skipped with a warning.
    pub fn load_tracked_apps<P: AsRef<Path>>(path: P) -> Result<Vec<TrackedApp>, LauncherError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok(parse_tracked_apps(&content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!(
                    path = %path.display(),
                    "Tracked applications file not found, using fallback entry"
                );
                Ok(vec![TrackedApp::fallback()])
            }
            Err(e) => Err(launcher_error!(
                LauncherErrorType::FileReadError(path.to_path_buf()),
                e.to_string()
            )),
        }
    }
}

pub fn parse_tracked_apps(content: &str) -> Vec<TrackedApp> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = split_fields(line).into_iter();
            match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(process_name), Some(display_name), Some(launch_path), None) => {
                    Some(TrackedApp {
                        process_name,
                        display_name,
                        launch_path,
                    })
                }
                _ => {
                    warn!(line, "Malformed line in tracked applications file");
                    None
                }
            }
        })
        .collect()
}

/// Splits a line on commas outside of double quotes. Quotes are dropped and
/// every field is trimmed.
fn split_fields(line: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    parts.push(current.trim().to_string());
    parts
}

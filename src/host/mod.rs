use std::future::Future;
use std::path::Path;

use gio::prelude::FileExt;
use serde::{Deserialize, Serialize};

use crate::utils::errors::LauncherError;

mod local;

pub use local::LocalHost;

/// One launchable application as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub display_name: String,
    pub process_name: String,
    pub launch_path: String,
    #[serde(default)]
    pub icon_path: Option<String>,
    #[serde(default)]
    pub is_running: bool,
}

/// The backend that knows which applications exist and how to start them.
///
/// Both calls may take a while (process scans, spawning), so they return
/// futures that the UI awaits on the main context.
pub trait Host {
    /// Returns the tracked applications in grid order with a fresh running state.
    fn get_app_list(&self) -> impl Future<Output = Result<Vec<AppDescriptor>, LauncherError>>;

    /// Focuses `process_name` if it is running, otherwise starts `launch_path`.
    fn launch_or_focus_app(
        &self,
        process_name: String,
        launch_path: String,
    ) -> impl Future<Output = Result<String, LauncherError>>;
}

/// Converts a local file path into a URI the UI can load an image from.
pub fn display_uri<P: AsRef<Path>>(path: P) -> String {
    gio::File::for_path(path.as_ref()).uri().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uri_is_a_file_uri() {
        let uri = display_uri("/opt/icons/Editor.png");
        assert_eq!(uri, "file:///opt/icons/Editor.png");
    }

    #[test]
    fn descriptor_defaults_optional_fields() {
        let app: AppDescriptor = serde_json::from_str(
            r#"{"display_name":"Editor","process_name":"editor.exe","launch_path":"C:\\editor.exe"}"#,
        )
        .unwrap();
        assert_eq!(app.icon_path, None);
        assert!(!app.is_running);
        assert_eq!(app.launch_path, "C:\\editor.exe");
    }
}

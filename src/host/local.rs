use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use sysinfo::{ProcessesToUpdate, System};

use super::{AppDescriptor, Host};
use crate::actions::applaunch::launch_or_focus;
use crate::launcher_error;
use crate::loader::app_loader::TrackedApp;
use crate::loader::Loader;
use crate::utils::errors::{LauncherError, LauncherErrorType};

/// Host backed by the local machine: the tracked applications file, an icon
/// directory and the process table.
#[derive(Clone)]
pub struct LocalHost {
    inner: Arc<LocalSource>,
}

struct LocalSource {
    apps_file: PathBuf,
    icons_dir: PathBuf,
    tracked: OnceCell<Vec<TrackedApp>>,
}

impl LocalHost {
    pub fn new(apps_file: PathBuf, icons_dir: PathBuf) -> Self {
        Self {
            inner: Arc::new(LocalSource {
                apps_file,
                icons_dir,
                tracked: OnceCell::new(),
            }),
        }
    }
}

impl LocalSource {
    /// The tracked file is read once per process; edits need a restart.
    fn tracked(&self) -> Result<&[TrackedApp], LauncherError> {
        self.tracked
            .get_or_try_init(|| Loader::load_tracked_apps(&self.apps_file))
            .map(Vec::as_slice)
    }

    fn app_list(&self) -> Result<Vec<AppDescriptor>, LauncherError> {
        let tracked = self.tracked().map_err(|e| {
            launcher_error!(LauncherErrorType::FetchFailure, e.traceback)
        })?;
        let running = running_process_names();

        Ok(tracked
            .iter()
            .map(|app| AppDescriptor {
                display_name: app.display_name.clone(),
                process_name: app.process_name.clone(),
                launch_path: app.launch_path.clone(),
                icon_path: Loader::find_icon(&self.icons_dir, &app.display_name),
                is_running: running.contains(&app.process_name),
            })
            .collect())
    }
}

impl Host for LocalHost {
    fn get_app_list(&self) -> impl Future<Output = Result<Vec<AppDescriptor>, LauncherError>> {
        let inner = Arc::clone(&self.inner);
        async move {
            tokio::task::spawn_blocking(move || inner.app_list())
                .await
                .map_err(|e| launcher_error!(LauncherErrorType::FetchFailure, e.to_string()))?
        }
    }

    fn launch_or_focus_app(
        &self,
        process_name: String,
        launch_path: String,
    ) -> impl Future<Output = Result<String, LauncherError>> {
        async move {
            tokio::task::spawn_blocking(move || {
                let running = running_process_names().contains(&process_name);
                launch_or_focus(&process_name, &launch_path, running)
            })
            .await
            .map_err(|e| launcher_error!(LauncherErrorType::LaunchFailure, e.to_string()))?
        }
    }
}

/// Names of every running process, both the kernel process name and the file
/// name of its executable. The former is truncated on Linux.
pub fn running_process_names() -> HashSet<String> {
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::All, true);

    let mut names = HashSet::new();
    for process in sys.processes().values() {
        names.insert(process.name().to_string_lossy().into_owned());
        if let Some(file_name) = process.exe().and_then(|exe| exe.file_name()) {
            names.insert(file_name.to_string_lossy().into_owned());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn current_exe_name() -> String {
        std::env::current_exe()
            .unwrap()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn sees_the_current_process() {
        assert!(running_process_names().contains(&current_exe_name()));
    }

    #[tokio::test]
    async fn lists_tracked_apps_with_icons_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let icons = dir.path().join("icons");
        fs::create_dir(&icons).unwrap();
        fs::write(icons.join("Self.png"), b"png").unwrap();

        let apps_file = dir.path().join("apps.txt");
        fs::write(
            &apps_file,
            format!(
                "{}, Self, /bin/true\nquicknav-absent-proc, Absent, absent\n",
                current_exe_name()
            ),
        )
        .unwrap();

        let host = LocalHost::new(apps_file, icons);
        let apps = host.get_app_list().await.unwrap();

        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].display_name, "Self");
        assert!(apps[0].is_running);
        let icon = apps[0].icon_path.as_deref().unwrap();
        assert!(icon.starts_with('/') && icon.ends_with("Self.png"));

        assert_eq!(apps[1].display_name, "Absent");
        assert!(!apps[1].is_running);
        assert_eq!(apps[1].icon_path, None);
    }

    #[tokio::test]
    async fn tracked_file_is_read_once() {
        let dir = tempfile::tempdir().unwrap();
        let apps_file = dir.path().join("apps.txt");
        fs::write(&apps_file, "a, Alpha, alpha\n").unwrap();

        let host = LocalHost::new(apps_file.clone(), dir.path().join("icons"));
        assert_eq!(host.get_app_list().await.unwrap().len(), 1);

        fs::write(&apps_file, "a, Alpha, alpha\nb, Beta, beta\n").unwrap();
        assert_eq!(host.get_app_list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unreadable_file_is_a_fetch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::new(dir.path().to_path_buf(), dir.path().join("icons"));
        let err = host.get_app_list().await.unwrap_err();
        assert_eq!(err.error, LauncherErrorType::FetchFailure);
    }

    #[tokio::test]
    async fn running_app_is_reported_not_spawned() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::new(dir.path().join("apps.txt"), dir.path().join("icons"));
        let name = current_exe_name();
        let message = host
            .launch_or_focus_app(name.clone(), "/nonexistent/binary".to_string())
            .await
            .unwrap();
        assert_eq!(message, format!("{} is already running", name));
    }

    #[tokio::test]
    async fn failed_spawn_is_a_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let host = LocalHost::new(dir.path().join("apps.txt"), dir.path().join("icons"));
        let err = host
            .launch_or_focus_app(
                "quicknav-absent-proc".to_string(),
                "/nonexistent/binary".to_string(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error, LauncherErrorType::LaunchFailure);
    }
}

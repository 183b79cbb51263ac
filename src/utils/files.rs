use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::launcher_error;
use crate::utils::errors::{LauncherError, LauncherErrorType};

pub fn home_dir() -> Result<PathBuf, LauncherError> {
    env::var("HOME").map(PathBuf::from).map_err(|e| {
        launcher_error!(
            LauncherErrorType::EnvVarNotFoundError("HOME".to_string()),
            e.to_string()
        )
    })
}

/// Replaces a leading `~` with the given home directory.
pub fn expand_path<P: AsRef<Path>>(path: P, home: &Path) -> PathBuf {
    let path = path.as_ref();
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// `$XDG_CONFIG_HOME/quicknav`, falling back to `~/.config/quicknav`.
pub fn config_dir() -> Result<PathBuf, LauncherError> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// `$XDG_STATE_HOME/quicknav`, falling back to `~/.local/state/quicknav`.
pub fn state_dir() -> Result<PathBuf, LauncherError> {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

/// `$XDG_CACHE_HOME/quicknav`, falling back to `~/.cache/quicknav`.
pub fn cache_dir() -> Result<PathBuf, LauncherError> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

/// Directory for the lock file and daemon socket. Uses `XDG_RUNTIME_DIR` when
/// set, otherwise the cache directory, otherwise the system temp dir.
pub fn runtime_dir() -> PathBuf {
    resolve_runtime_dir(env::var("XDG_RUNTIME_DIR").ok(), cache_dir().ok())
}

fn resolve_runtime_dir(runtime: Option<String>, cache: Option<PathBuf>) -> PathBuf {
    match runtime {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => cache.unwrap_or_else(env::temp_dir),
    }
}

/// Creates the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<(), LauncherError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| {
                launcher_error!(
                    LauncherErrorType::DirCreateError(parent.to_path_buf()),
                    e.to_string()
                )
            })
        }
        _ => Ok(()),
    }
}

fn xdg_dir(var: &str, fallback: &str) -> Result<PathBuf, LauncherError> {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => Ok(PathBuf::from(dir).join("quicknav")),
        _ => Ok(home_dir()?.join(fallback).join("quicknav")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix_only() {
        let home = Path::new("/home/user");
        assert_eq!(
            expand_path("~/.config/quicknav/apps.txt", home),
            PathBuf::from("/home/user/.config/quicknav/apps.txt")
        );
        assert_eq!(expand_path("/etc/apps.txt", home), PathBuf::from("/etc/apps.txt"));
        assert_eq!(expand_path("a/~/b", home), PathBuf::from("a/~/b"));
    }

    #[test]
    fn empty_runtime_dir_falls_back_to_cache() {
        let cache = PathBuf::from("/home/user/.cache/quicknav");
        assert_eq!(
            resolve_runtime_dir(Some(String::new()), Some(cache.clone())),
            cache
        );
        assert_eq!(resolve_runtime_dir(None, Some(cache.clone())), cache);
        assert_eq!(
            resolve_runtime_dir(Some("/run/user/1000".into()), Some(cache)),
            PathBuf::from("/run/user/1000")
        );
        assert_eq!(resolve_runtime_dir(None, None), env::temp_dir());
    }

    #[test]
    fn creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache/quicknav/quicknav.lock");
        ensure_parent_dir(&path).unwrap();
        assert!(dir.path().join("cache/quicknav").is_dir());
        // Existing directories are fine too.
        ensure_parent_dir(&path).unwrap();
    }

    #[test]
    fn parent_blocked_by_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cache"), b"").unwrap();
        let err = ensure_parent_dir(&dir.path().join("cache/quicknav.lock")).unwrap_err();
        assert_eq!(
            err.error,
            LauncherErrorType::DirCreateError(dir.path().join("cache"))
        );
    }
}

use std::fs::{self, remove_file, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::sys::signal::Signal::SIGKILL;
use nix::unistd::Pid;
use tracing::{debug, info};

use crate::launcher_error;
use crate::utils::errors::{LauncherError, LauncherErrorType};
use crate::utils::files::{ensure_parent_dir, runtime_dir};

pub enum Instance {
    /// This process is the only instance and holds the lock until dropped.
    Acquired(LockFile),
    /// Another live instance owns the lock.
    Running(i32),
}

pub struct LockFile {
    path: PathBuf,
}
impl LockFile {
    /// Claims the lock at `path`. A lock left behind by a dead process is
    /// replaced; a live owner is killed when `take_over` is set and reported
    /// otherwise.
    pub fn single_instance<P: AsRef<Path>>(
        path: P,
        take_over: bool,
    ) -> Result<Instance, LauncherError> {
        let path = path.as_ref();
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                launcher_error!(
                    LauncherErrorType::FileReadError(path.to_path_buf()),
                    e.to_string()
                )
            })?;
            match content.trim().parse::<i32>() {
                Ok(pid) if is_alive(pid) => {
                    if !take_over {
                        return Ok(Instance::Running(pid));
                    }
                    info!(pid, "Taking over from running instance");
                    let _ = kill(Pid::from_raw(pid), SIGKILL);
                    let _ = fs::remove_file(path);
                }
                _ => {
                    debug!(path = %path.display(), "Removing stale lock file");
                    let _ = fs::remove_file(path);
                }
            }
        }
        LockFile::new(path).map(Instance::Acquired)
    }

    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LauncherError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(launcher_error!(
                LauncherErrorType::LockfileExistsError,
                format!("{:?}", path)
            ));
        }
        ensure_parent_dir(path)?;

        match File::create(path) {
            Ok(mut f) => {
                write!(f, "{}", std::process::id()).map_err(|e| {
                    launcher_error!(
                        LauncherErrorType::FileWriteError(path.to_path_buf()),
                        e.to_string()
                    )
                })?;
                Ok(LockFile {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => Err(launcher_error!(
                LauncherErrorType::FileWriteError(path.to_path_buf()),
                e.to_string()
            )),
        }
    }

    pub fn remove(&self) -> Result<(), LauncherError> {
        remove_file(&self.path).map_err(|e| {
            launcher_error!(
                LauncherErrorType::FileRemoveError(self.path.clone()),
                e.to_string()
            )
        })
    }

    pub fn get_path(file_name: &str) -> PathBuf {
        runtime_dir().join(file_name)
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = self.remove();
    }
}

fn is_alive(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquires_and_releases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicknav.lock");

        let Instance::Acquired(lock) = LockFile::single_instance(&path, false).unwrap() else {
            panic!("expected to acquire the lock");
        };
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            std::process::id().to_string()
        );
        drop(lock);
        assert!(!path.exists());
    }

    #[test]
    fn reports_live_owner() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicknav.lock");
        let _lock = LockFile::new(&path).unwrap();

        match LockFile::single_instance(&path, false).unwrap() {
            Instance::Running(pid) => assert_eq!(pid as u32, std::process::id()),
            Instance::Acquired(_) => panic!("lock should be held"),
        }
    }

    #[test]
    fn replaces_stale_or_garbled_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicknav.lock");

        fs::write(&path, i32::MAX.to_string()).unwrap();
        assert!(matches!(
            LockFile::single_instance(&path, false).unwrap(),
            Instance::Acquired(_)
        ));

        fs::write(&path, "not a pid").unwrap();
        assert!(matches!(
            LockFile::single_instance(&path, false).unwrap(),
            Instance::Acquired(_)
        ));
    }

    #[test]
    fn new_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quicknav.lock");
        fs::write(&path, "1").unwrap();
        let err = LockFile::new(&path).err().unwrap();
        assert_eq!(err.error, LauncherErrorType::LockfileExistsError);
    }

    #[test]
    fn creates_missing_runtime_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh-cache/quicknav/quicknav.lock");

        let Instance::Acquired(lock) = LockFile::single_instance(&path, false).unwrap() else {
            panic!("expected to acquire the lock");
        };
        assert!(path.is_file());
        drop(lock);
        assert!(!path.exists());
    }
}

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream as StdUnixStream;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, error, info, warn};

use super::DaemonCommand;
use crate::launcher_error;
use crate::utils::errors::{LauncherError, LauncherErrorType};
use crate::utils::files::{ensure_parent_dir, runtime_dir};

/// Control socket of a resident instance. Removes its socket file when
/// dropped.
pub struct LauncherDaemon {
    listener: UnixListener,
    path: PathBuf,
}

impl LauncherDaemon {
    pub fn socket_path() -> PathBuf {
        runtime_dir().join("quicknav.sock")
    }

    /// Binds the socket, replacing a leftover file from a crashed instance.
    /// Must be called from within the tokio runtime.
    pub fn bind<P: AsRef<Path>>(path: P) -> Result<Self, LauncherError> {
        let path = path.as_ref();
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                launcher_error!(
                    LauncherErrorType::FileRemoveError(path.to_path_buf()),
                    e.to_string()
                )
            })?;
        }
        ensure_parent_dir(path)?;
        let listener = UnixListener::bind(path).map_err(|e| {
            launcher_error!(
                LauncherErrorType::SocketError(path.display().to_string()),
                e.to_string()
            )
        })?;
        info!(socket = %path.display(), "Daemon listening");
        Ok(Self {
            listener,
            path: path.to_path_buf(),
        })
    }

    /// Accepts connections until the receiving side of `sender` is closed.
    pub async fn run(self, sender: async_channel::Sender<DaemonCommand>) {
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let sender = sender.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_client(stream, sender).await {
                            e.log(false);
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept daemon connection");
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
            if sender.is_closed() {
                debug!("Command receiver closed, stopping daemon");
                break;
            }
        }
    }

    /// Sends one command to a running instance and waits for its reply.
    pub fn send<P: AsRef<Path>>(path: P, command: DaemonCommand) -> Result<(), LauncherError> {
        let path = path.as_ref();
        let socket_err = |e: std::io::Error| {
            launcher_error!(
                LauncherErrorType::SocketError(path.display().to_string()),
                e.to_string()
            )
        };

        let mut stream = StdUnixStream::connect(path).map_err(socket_err)?;
        writeln!(stream, "{}", command).map_err(socket_err)?;

        let mut reply = String::new();
        BufReader::new(&stream)
            .read_line(&mut reply)
            .map_err(socket_err)?;
        match reply.trim() {
            "ok" => Ok(()),
            other => Err(launcher_error!(
                LauncherErrorType::SocketError(path.display().to_string()),
                format!("Daemon rejected \"{}\": {}", command, other)
            )),
        }
    }
}

impl Drop for LauncherDaemon {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

async fn handle_client(
    stream: UnixStream,
    sender: async_channel::Sender<DaemonCommand>,
) -> Result<(), LauncherError> {
    let (read, mut write) = stream.into_split();
    let mut lines = AsyncBufReader::new(read).lines();
    let io_err =
        |e: std::io::Error| launcher_error!(LauncherErrorType::SocketError("client".into()), e);

    while let Some(line) = lines.next_line().await.map_err(io_err)? {
        if line.trim().is_empty() {
            continue;
        }
        let reply = match line.parse::<DaemonCommand>() {
            Ok(command) => {
                debug!(%command, "Daemon command received");
                match sender.send(command).await {
                    Ok(()) => "ok".to_string(),
                    Err(_) => "error: shutting down".to_string(),
                }
            }
            Err(e) => {
                warn!(line = %line, "Unknown daemon command");
                format!("error: {}", e)
            }
        };
        write
            .write_all(format!("{}\n", reply).as_bytes())
            .await
            .map_err(io_err)?;
    }
    Ok(())
}

use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::{
    launcher_error,
    utils::{
        config::ConfigGuard,
        errors::{LauncherError, LauncherErrorType},
    },
};

/// Focuses an already running application or starts it.
///
/// Raising another client's window is left to the compositor, so a running
/// application is reported as such and nothing is spawned.
pub fn launch_or_focus(
    process_name: &str,
    launch_path: &str,
    is_running: bool,
) -> Result<String, LauncherError> {
    if is_running {
        info!(process = process_name, "Application already running");
        return Ok(format!("{} is already running", process_name));
    }
    launch(process_name, launch_path)
}

pub fn launch(process_name: &str, launch_path: &str) -> Result<String, LauncherError> {
    let launch_path = launch_path.trim();
    if launch_path.is_empty() {
        return Err(launcher_error!(
            LauncherErrorType::LaunchFailure,
            format!("No launch path configured for {}", process_name)
        ));
    }

    if is_uri(launch_path) {
        open::that_detached(launch_path).map_err(|e| {
            launcher_error!(
                LauncherErrorType::LaunchFailure,
                format!("Failed to open {}: {}", launch_path, e)
            )
        })?;
        debug!(uri = launch_path, "Opened link");
        return Ok(format!("Started {}", process_name));
    }

    let (prefix, flags) = match ConfigGuard::read() {
        Ok(config) => (
            config.behavior.global_prefix.clone(),
            config.behavior.global_flags.clone(),
        ),
        Err(_) => (None, None),
    };
    let cmd = compose(launch_path, prefix.as_deref(), flags.as_deref());
    let command = build_command(&cmd)?;

    launch_detached(command).map_err(|e| {
        launcher_error!(
            LauncherErrorType::LaunchFailure,
            format!("Failed to start \"{}\": {}", cmd, e)
        )
    })?;
    debug!(command = %cmd, "Detached process started");
    Ok(format!("Started {}", process_name))
}

/// Whether a launch path is a link handed to the desktop's URI handler
/// (`steam://rungameid/1`, `mailto:me@example.com`) instead of a command.
pub fn is_uri(launch_path: &str) -> bool {
    if launch_path.starts_with('"')
        || launch_path.contains('\\')
        || launch_path.contains(char::is_whitespace)
    {
        return false;
    }
    let Some((scheme, _)) = launch_path.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn compose(exec: &str, prefix: Option<&str>, flags: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(pre) = prefix {
        parts.push(pre);
    }
    parts.push(exec);
    if let Some(flag) = flags {
        parts.push(flag);
    }
    parts.join(" ").trim().to_string()
}

fn build_command(cmd: &str) -> Result<Command, LauncherError> {
    let mut parts = split_as_command(cmd).into_iter();
    let program = parts.next().ok_or_else(|| {
        launcher_error!(
            LauncherErrorType::CommandExecutionError(cmd.to_string()),
            "Failed to get first base command"
        )
    })?;
    let mut command = Command::new(program);
    command.args(parts);
    Ok(command)
}

/// Spawns `command` in its own session with stdio detached. The child is
/// reaped on a background thread so it never lingers as a zombie.
pub fn launch_detached(mut command: Command) -> std::io::Result<()> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    unsafe {
        command.pre_exec(|| {
            nix::unistd::setsid()
                .map(|_| ())
                .map_err(std::io::Error::from)
        });
    }
    let mut child = command.spawn()?;
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}

/// Splits a command line into program and arguments with shell-like quoting.
/// Desktop-entry field codes (`%U`, `%f`, ...) are dropped.
pub fn split_as_command(cmd: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev = '\0';
    let mut double_escape = false;
    let mut double_quoting = false;
    let mut single_quoting = false;

    for c in cmd.chars() {
        if double_escape {
            double_escape = false;
            match c {
                '"' | '`' | '$' | '\\' => {
                    current.pop();
                    current.push(c);
                    prev = '\0';
                    continue;
                }
                _ => current.push('\\'),
            }
        } else if double_quoting && c == '\\' && prev == '\\' {
            double_escape = true;
        } else if c == '"' && !single_quoting {
            double_quoting = !double_quoting;
        } else if c == '\'' && !double_quoting {
            single_quoting = !single_quoting;
        } else if !double_quoting && !single_quoting && c.is_whitespace() {
            if !current.is_empty() {
                parts.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
        prev = c;
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts.retain(|s| !s.starts_with('%'));
    parts
}

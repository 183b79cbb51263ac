use std::fmt;
use std::str::FromStr;

pub mod server;

pub use server::LauncherDaemon;

/// Requests accepted on the daemon socket, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonCommand {
    Show,
    Hide,
    Toggle,
    Quit,
}

impl DaemonCommand {
    /// Sent by a second invocation to the resident instance, so the shortcut
    /// that opens the popup also closes it.
    pub const REINVOKED: DaemonCommand = DaemonCommand::Toggle;

    /// Window visibility after applying the command to a window whose current
    /// visibility is `visible`. `None` means the application should quit.
    pub fn next_visibility(&self, visible: bool) -> Option<bool> {
        match self {
            Self::Show => Some(true),
            Self::Hide => Some(false),
            Self::Toggle => Some(!visible),
            Self::Quit => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Toggle => "toggle",
            Self::Quit => "quit",
        }
    }
}

impl FromStr for DaemonCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "show" => Ok(Self::Show),
            "hide" => Ok(Self::Hide),
            "toggle" => Ok(Self::Toggle),
            "quit" => Ok(Self::Quit),
            other => Err(format!("unknown command \"{}\"", other)),
        }
    }
}

impl fmt::Display for DaemonCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

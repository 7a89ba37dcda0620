use std::fmt;
use std::str::FromStr;

/// Path convention the normalizer rewrites event paths into.
///
/// - `Posix`: `/`-separated, rooted at `/`.
/// - `Windows`: `\`-separated, rooted at a drive (`C:`).
///
/// Defaults to [`TargetOs::host`] when the config names none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Posix,
    Windows,
}

impl TargetOs {
    /// Convention of the machine we are running on.
    pub fn host() -> Self {
        if cfg!(windows) {
            TargetOs::Windows
        } else {
            TargetOs::Posix
        }
    }
}

impl FromStr for TargetOs {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "posix" | "unix" | "linux" | "macos" => Ok(TargetOs::Posix),
            "windows" => Ok(TargetOs::Windows),
            other => Err(format!(
                "invalid target OS: {other} (expected \"posix\" or \"windows\")"
            )),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetOs::Posix => f.write_str("posix"),
            TargetOs::Windows => f.write_str("windows"),
        }
    }
}

/// Kind of filesystem change reported by the watch backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
}

impl Operation {
    /// Human-readable name used in log lines and notification bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Write => "WRITE",
            Operation::Remove => "REMOVE",
            Operation::Rename => "RENAME",
            Operation::Chmod => "CHMOD",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "write" => Ok(Operation::Write),
            "remove" => Ok(Operation::Remove),
            "rename" => Ok(Operation::Rename),
            "chmod" => Ok(Operation::Chmod),
            other => Err(format!(
                "unknown event kind: {other} (expected one of create, write, remove, rename, chmod)"
            )),
        }
    }
}

/// Push-notification providers the webhook channel knows how to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookProvider {
    ServerChan,
}

impl WebhookProvider {
    /// Host serving the provider's push API.
    pub fn host(self) -> &'static str {
        match self {
            WebhookProvider::ServerChan => "sctapi.ftqq.com",
        }
    }
}

impl FromStr for WebhookProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serverchan" => Ok(WebhookProvider::ServerChan),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for WebhookProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebhookProvider::ServerChan => f.write_str("serverchan"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_names_parse_case_insensitively() {
        assert_eq!("Write".parse::<Operation>(), Ok(Operation::Write));
        assert_eq!(" chmod ".parse::<Operation>(), Ok(Operation::Chmod));
        assert!("modify".parse::<Operation>().is_err());
    }

    #[test]
    fn target_os_accepts_unix_aliases() {
        assert_eq!("linux".parse::<TargetOs>(), Ok(TargetOs::Posix));
        assert_eq!("WINDOWS".parse::<TargetOs>(), Ok(TargetOs::Windows));
        assert!("plan9".parse::<TargetOs>().is_err());
    }

    #[test]
    fn only_serverchan_is_a_known_provider() {
        assert_eq!(
            "ServerChan".parse::<WebhookProvider>(),
            Ok(WebhookProvider::ServerChan)
        );
        assert_eq!(
            "bark".parse::<WebhookProvider>(),
            Err("bark".to_string())
        );
    }
}

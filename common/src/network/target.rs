//! # Scan Target Model
//!
//! Defines what may appear in a targets file handed to the scanner.
//!
//! Each non-blank line must be one of:
//! * An IPv4 address, optionally with a port (e.g., `203.0.113.7:8443`).
//! * A hostname, optionally with a port (e.g., `example.com:8080`).
//!
//! Only the shape of a line is checked. Octet ranges are not, so
//! `999.999.999.999` is accepted as an address.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::success;

static ADDRESS_WITH_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}(:[0-9]{1,5})?$").expect("address pattern compiles")
});

static HOSTNAME_WITH_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*(:[0-9]{1,5})?$")
        .expect("hostname pattern compiles")
});

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("targets file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read targets file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid target '{line}' on line {line_number} of {}", .path.display())]
    InvalidLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error("targets file {} is empty or has no valid targets", .path.display())]
    Empty { path: PathBuf },
}

/// A single line of the targets file, kept exactly as written (minus surrounding whitespace).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// Dotted-quad address with an optional `:port`.
    Address { text: String },
    /// Dot-separated hostname with an optional `:port`.
    Hostname { text: String },
}

impl Target {
    pub fn as_str(&self) -> &str {
        match self {
            Target::Address { text } | Target::Hostname { text } => text,
        }
    }
}

impl FromStr for Target {
    type Err = String;

    /// Classifies a trimmed line, trying the address grammar before the hostname one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(target) = parse_address(s) {
            return Ok(target);
        }

        if let Some(target) = parse_hostname(s) {
            return Ok(target);
        }

        Err(format!("invalid target: {s}"))
    }
}

fn parse_address(s: &str) -> Option<Target> {
    ADDRESS_WITH_PORT
        .is_match(s)
        .then(|| Target::Address { text: s.to_string() })
}

fn parse_hostname(s: &str) -> Option<Target> {
    HOSTNAME_WITH_PORT
        .is_match(s)
        .then(|| Target::Hostname { text: s.to_string() })
}

/// Non-empty, ordered list of validated targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    /// Reads and validates the targets file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TargetError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TargetError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TargetError::NotFound {
                path: path.to_path_buf(),
            },
            _ => TargetError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let list = Self::parse(&text, path)?;

        let len: usize = list.len();
        let unit: &str = if len == 1 { "target has been" } else { "targets have been" };
        success!("{len} {unit} loaded from {}", path.display());

        Ok(list)
    }

    /// Validates `text` line by line, stopping at the first malformed line.
    ///
    /// `path` is only used to label errors.
    pub fn parse(text: &str, path: &Path) -> Result<Self, TargetError> {
        let mut targets = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let target = Target::from_str(line).map_err(|_| TargetError::InvalidLine {
                path: path.to_path_buf(),
                line_number: idx + 1,
                line: line.to_string(),
            })?;

            targets.push(target);
        }

        if targets.is_empty() {
            return Err(TargetError::Empty {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always `false` for a list that was built through [`TargetList::parse`].
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

//! # Configuration Files
//!
//! A configuration file supplies parameter values before the command line is
//! applied, so anything given on the command line wins. The format is plain text with
//! one assignment per line:
//!
//! ```text
//! # comment lines start with the configured marker
//! Pi 3.14159
//! Label hello ignored extra tokens
//! ```
//!
//! Lines are split on single spaces. The first token names the parameter and the
//! second is its value; anything after that is ignored, matching what the command
//! line does with a multi-word value. Blank lines, comment lines and lines without a
//! value are skipped.
//!
//! Which file to read is decided by a pre-scan of the arguments: an explicit
//! config file option wins, otherwise the parameter's current value is used when it
//! is not empty.

use crate::error::{Error, Result};
use crate::registry::{Assignment, Registry};
use crate::scanner::{ScanEvent, Scanner};
use crate::table::{OptionTable, OptionTag};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PARAM: &str = "ConfigFile";
pub const DEFAULT_CONFIG_DESCRIPTION: &str =
    "Configuration file containing options (will be overridden by values passed on the command line).";
pub const DEFAULT_COMMENT: &str = "#";

/// Which parameter holds the config file path and how comments are marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileSpec {
    pub param: String,
    pub comment: String,
}

impl Default for ConfigFileSpec {
    fn default() -> Self {
        Self {
            param: DEFAULT_CONFIG_PARAM.to_string(),
            comment: DEFAULT_COMMENT.to_string(),
        }
    }
}

/// One `name value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine {
    pub line: usize,
    pub name: String,
    pub value: String,
}

/// Result of walking the arguments before the real scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Prescan {
    /// Value of the first explicit config file option.
    pub explicit: Option<String>,
    /// A help or version option was seen.
    pub stop_requested: bool,
}

/// Parses configuration text. An empty `comment` disables comment handling.
pub fn parse_config(content: &str, comment: &str) -> Vec<ConfigLine> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_no = index + 1;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.is_empty() || (!comment.is_empty() && line.starts_with(comment)) {
                return None;
            }

            let mut tokens = line.split(' ');
            let name = tokens.next()?;
            match tokens.next() {
                Some(value) => Some(ConfigLine {
                    line: line_no,
                    name: name.to_string(),
                    value: value.to_string(),
                }),
                None => {
                    warn!("line {} has no value for {}, skipping", line_no, name);
                    None
                }
            }
        })
        .collect()
}

/// Reads and parses a configuration file.
pub fn read_config(path: &Path, comment: &str) -> Result<Vec<ConfigLine>> {
    let content = fs::read_to_string(path).map_err(|source| Error::ConfigFileUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    info!("filling parameters from {}", path.display());
    Ok(parse_config(&content, comment))
}

/// Staged assignments from one file plus the lines that named unknown parameters.
#[derive(Debug, Default)]
pub struct ConfigLoad {
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<Error>,
}

/// Reads `path` and converts every line into a staged assignment.
///
/// Unknown names are collected in [`ConfigLoad::skipped`]; a value that does not
/// convert fails the whole load.
pub fn stage_config(registry: &Registry, path: &Path, comment: &str) -> Result<ConfigLoad> {
    let mut load = ConfigLoad::default();

    for entry in read_config(path, comment)? {
        match registry.stage(&entry.name, &entry.value) {
            Ok(assignment) => load.assignments.push(assignment),
            Err(Error::UnknownParameter(name)) => {
                warn!("{}:{}: unknown parameter {}", path.display(), entry.line, name);
                load.skipped.push(Error::ConfigEntry {
                    path: path.to_path_buf(),
                    line: entry.line,
                    source: Box::new(Error::UnknownParameter(name)),
                });
            }
            Err(e) => {
                return Err(Error::ConfigEntry {
                    path: path.to_path_buf(),
                    line: entry.line,
                    source: Box::new(e),
                })
            }
        }
    }

    Ok(load)
}

/// Looks for an explicit config file option and for help/version requests.
///
/// Errors end the pre-scan quietly; the main scan reports them.
pub fn prescan(table: &OptionTable, args: &[String], config_param: &str) -> Prescan {
    let mut result = Prescan::default();

    for event in Scanner::new(table, args) {
        let (entry, value) = match event {
            Ok(ScanEvent::Matched { entry, value }) => (entry, value),
            Ok(ScanEvent::Operand(_)) => continue,
            Err(_) => break,
        };
        match entry.tag {
            OptionTag::Help | OptionTag::Version => result.stop_requested = true,
            OptionTag::Param(_) if entry.long == config_param && result.explicit.is_none() => {
                result.explicit = value;
            }
            OptionTag::Param(_) => {}
        }
    }

    result
}

/// Decides which file, if any, to load.
pub fn config_path(registry: &Registry, spec: &ConfigFileSpec, prescan: &Prescan) -> Option<PathBuf> {
    if prescan.stop_requested {
        return None;
    }
    if let Some(explicit) = &prescan.explicit {
        return Some(PathBuf::from(explicit));
    }
    registry
        .try_str(&spec.param)
        .ok()
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

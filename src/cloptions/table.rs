//! # Option Table
//!
//! The table is the list of options the scanner recognizes. It is derived from the
//! registry on every parse and never stored: the built-in `help` entry first, the
//! optional version entry next, then one value-taking entry per parameter in
//! category order (bool, double, int, string), each category sorted by name.
//!
//! Resolution mirrors a permissive long-option matcher: both `-Name` and `--Name`
//! work, a single-dash single character may name a short alias, and any unambiguous
//! prefix of a long name selects that option.

use crate::error::{Error, Result};
use crate::param::Category;
use crate::registry::Registry;
use log::debug;

pub const HELP_OPTION: &str = "help";
pub const HELP_SHORT: char = 'h';

/// Whether an option consumes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    NoArgument,
    RequiredArgument,
}

/// What a matched option means to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTag {
    Help,
    Version,
    Param(Category),
}

/// How many dashes introduced an option token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dashes {
    Single,
    Double,
}

impl Dashes {
    pub fn prefix(&self) -> &'static str {
        match self {
            Dashes::Single => "-",
            Dashes::Double => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub long: String,
    pub short: Option<char>,
    pub arity: Arity,
    pub tag: OptionTag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTable {
    entries: Vec<OptionEntry>,
}

impl OptionTable {
    /// Derives the table from the registry and the optional version option name.
    pub fn build(registry: &Registry, version: Option<&str>) -> Self {
        let mut entries = Vec::with_capacity(registry.len() + 2);

        entries.push(OptionEntry {
            long: HELP_OPTION.to_string(),
            short: Some(HELP_SHORT),
            arity: Arity::NoArgument,
            tag: OptionTag::Help,
        });

        if let Some(name) = version {
            entries.push(OptionEntry {
                long: name.to_string(),
                short: None,
                arity: Arity::NoArgument,
                tag: OptionTag::Version,
            });
        }

        entries.extend(registry.iter().map(|param| OptionEntry {
            long: param.name().to_string(),
            short: param.short().filter(|&c| c != HELP_SHORT),
            arity: Arity::RequiredArgument,
            tag: OptionTag::Param(param.category()),
        }));

        debug!("built option table with {} entries", entries.len());
        Self { entries }
    }

    pub fn entries(&self) -> &[OptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry owning a short alias.
    pub fn find_short(&self, short: char) -> Option<&OptionEntry> {
        self.entries.iter().find(|entry| entry.short == Some(short))
    }

    /// Resolves the name part of an option token (without dashes or `=value`).
    ///
    /// `token` is the original argument, used in error messages.
    pub fn resolve(&self, body: &str, dashes: Dashes, token: &str) -> Result<&OptionEntry> {
        if body.is_empty() {
            return Err(Error::UnrecognizedOption(token.to_string()));
        }

        if let Some(entry) = self.entries.iter().find(|entry| entry.long == body) {
            return Ok(entry);
        }

        if dashes == Dashes::Single {
            let mut chars = body.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                if let Some(entry) = self.find_short(c) {
                    return Ok(entry);
                }
            }
        }

        let candidates: Vec<&OptionEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.long.starts_with(body))
            .collect();

        match candidates.as_slice() {
            [entry] => Ok(*entry),
            [] => Err(Error::UnrecognizedOption(token.to_string())),
            many => Err(Error::AmbiguousOption {
                token: token.to_string(),
                candidates: many
                    .iter()
                    .map(|entry| format!("{}{}", dashes.prefix(), entry.long))
                    .collect(),
            }),
        }
    }
}

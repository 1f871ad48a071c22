//! # Argument Scanner
//!
//! Walks the arguments after the program name and yields one [`ScanEvent`] per
//! recognized option or operand. The scanner itself only matches tokens against an
//! [`OptionTable`]; deciding what a match means (help, version, assignment) is up to
//! the caller.
//!
//! Accepted spellings for a value-taking option: `-Name v`, `--Name v`,
//! `-Name=v`, `--Name=v`, `-n v` and `-nv` for a short alias. A value-taking option
//! always consumes the following argument, even one that starts with `-`.
//! After `--` every remaining argument is an operand. The first error ends the scan.

use crate::error::{Error, Result};
use crate::table::{Arity, Dashes, OptionEntry, OptionTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent<'t> {
    Matched {
        entry: &'t OptionEntry,
        value: Option<String>,
    },
    Operand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    OperandsOnly,
    Done,
}

pub struct Scanner<'a> {
    table: &'a OptionTable,
    args: &'a [String],
    index: usize,
    state: ScanState,
}

impl<'a> Scanner<'a> {
    /// `args` excludes the program name.
    pub fn new(table: &'a OptionTable, args: &'a [String]) -> Self {
        Self {
            table,
            args,
            index: 0,
            state: ScanState::Scanning,
        }
    }

    fn next_arg(&mut self) -> Option<&'a str> {
        let arg = self.args.get(self.index)?;
        self.index += 1;
        Some(arg.as_str())
    }

    fn fail(&mut self, error: Error) -> Option<Result<ScanEvent<'a>>> {
        self.state = ScanState::Done;
        Some(Err(error))
    }

    fn scan_option(&mut self, token: &'a str) -> Option<Result<ScanEvent<'a>>> {
        let (dashes, rest) = match token.strip_prefix("--") {
            Some(rest) => (Dashes::Double, rest),
            None => (Dashes::Single, &token[1..]),
        };
        let (body, inline) = match rest.split_once('=') {
            Some((body, value)) => (body, Some(value)),
            None => (rest, None),
        };

        let (entry, inline) = match self.table.resolve(body, dashes, token) {
            Ok(entry) => (entry, inline),
            Err(Error::UnrecognizedOption(_)) if dashes == Dashes::Single => {
                // `-nVALUE` for a value-taking short alias
                match self.attached_short(rest) {
                    Some((entry, value)) => (entry, Some(value)),
                    None => return self.fail(Error::UnrecognizedOption(token.to_string())),
                }
            }
            Err(e) => return self.fail(e),
        };

        let value = match (entry.arity, inline) {
            (Arity::NoArgument, None) => None,
            (Arity::NoArgument, Some(_)) => {
                let option = format!("{}{}", dashes.prefix(), entry.long);
                return self.fail(Error::UnexpectedValue(option));
            }
            (Arity::RequiredArgument, Some(value)) => Some(value.to_string()),
            (Arity::RequiredArgument, None) => match self.next_arg() {
                Some(value) => Some(value.to_string()),
                None => {
                    let option = format!("{}{}", dashes.prefix(), entry.long);
                    return self.fail(Error::MissingValue(option));
                }
            },
        };

        Some(Ok(ScanEvent::Matched { entry, value }))
    }

    fn attached_short(&self, rest: &'a str) -> Option<(&'a OptionEntry, &'a str)> {
        let short = rest.chars().next()?;
        let entry = self.table.find_short(short)?;
        let value = &rest[short.len_utf8()..];
        (entry.arity == Arity::RequiredArgument && !value.is_empty()).then_some((entry, value))
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<ScanEvent<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == ScanState::Done {
                return None;
            }

            let Some(token) = self.next_arg() else {
                self.state = ScanState::Done;
                return None;
            };

            if self.state == ScanState::OperandsOnly {
                return Some(Ok(ScanEvent::Operand(token.to_string())));
            }

            if token == "--" {
                self.state = ScanState::OperandsOnly;
                continue;
            }

            if token == "-" || !token.starts_with('-') {
                return Some(Ok(ScanEvent::Operand(token.to_string())));
            }

            return self.scan_option(token);
        }
    }
}

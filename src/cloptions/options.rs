//! # Options
//!
//! [`Options`] is the type a program talks to. It owns the [`Registry`], remembers
//! which parameter names a configuration file and which option prints the version,
//! and runs the parse:
//!
//! 1. derive the [`OptionTable`] from the registry;
//! 2. pre-scan the arguments for an explicit config file option (or help/version);
//! 3. stage the config file assignments, if a file applies;
//! 4. scan the arguments, staging each value and handling help, version and operands;
//! 5. commit config assignments, then command line assignments.
//!
//! Nothing is committed unless the parse reaches the end, so an [`Outcome`] other
//! than [`Outcome::Proceed`] means every parameter still holds its previous value.
//! Command line values are committed after config values and therefore always win,
//! wherever the config file option appears on the command line.

use crate::config_file::{
    self, ConfigFileSpec, DEFAULT_COMMENT, DEFAULT_CONFIG_DESCRIPTION, DEFAULT_CONFIG_PARAM,
};
use crate::diagnostics;
use crate::error::{Error, Result};
use crate::help::{self, HelpLayout, VersionInfo};
use crate::param::{Category, Param, ParamName, ParamValue};
use crate::registry::{ParamSnapshot, Registry};
use crate::scanner::{ScanEvent, Scanner};
use crate::table::{OptionTable, OptionTag};
use console::Term;
use log::debug;
use std::io::{self, Write};
use std::path::Path;

pub const DEFAULT_VERSION_PARAM: &str = "version";
pub const DEFAULT_VERSION_DESCRIPTION: &str = "Print version information and exit.";
pub const DEFAULT_VERSION_TEXT: &str = "version text not set";

/// How a parse ended.
#[derive(Debug)]
pub enum Outcome {
    /// All options were applied; the program should continue.
    Proceed,
    /// Help was printed.
    HelpShown,
    /// Version text was printed.
    VersionShown,
    /// The parse failed. The error has already been reported.
    Aborted(Error),
}

impl Outcome {
    /// `true` for every outcome that should stop the program.
    pub fn is_stop(&self) -> bool {
        !self.is_proceed()
    }

    pub fn is_proceed(&self) -> bool {
        matches!(self, Outcome::Proceed)
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Aborted(e) => Some(e),
            _ => None,
        }
    }
}

struct Sinks<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    out_color: bool,
    err_color: bool,
}

impl Sinks<'_> {
    fn abort(&mut self, error: Error) -> Outcome {
        diagnostics::report(self.err, &error, self.err_color);
        Outcome::Aborted(error)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Options {
    registry: Registry,
    config: Option<ConfigFileSpec>,
    version: Option<VersionInfo>,
    layout: HelpLayout,
    operands: Vec<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: HelpLayout) -> Self {
        self.layout = layout;
        self
    }

    // --- registration ---

    /// Registers a parameter of the default value's category.
    ///
    /// `name` is `"Name"` or `"x,Name"`. Registering a name again replaces the
    /// previous parameter, whatever its category.
    pub fn add_param(
        &mut self,
        name: &str,
        description: &str,
        default_value: impl Into<ParamValue>,
    ) -> Result<()> {
        if let Some(old) = self
            .registry
            .register(name, description, default_value.into())?
        {
            debug!("replaced {} parameter {}", old.category(), old.name());
        }
        Ok(())
    }

    pub fn add_bool_param(&mut self, name: &str, description: &str, default_value: bool) -> Result<()> {
        self.add_param(name, description, default_value)
    }

    pub fn add_int_param(&mut self, name: &str, description: &str, default_value: i32) -> Result<()> {
        self.add_param(name, description, default_value)
    }

    pub fn add_double_param(&mut self, name: &str, description: &str, default_value: f64) -> Result<()> {
        self.add_param(name, description, default_value)
    }

    pub fn add_string_param(&mut self, name: &str, description: &str, default_value: &str) -> Result<()> {
        self.add_param(name, description, default_value)
    }

    /// Registers the string parameter naming a configuration file.
    ///
    /// Empty arguments fall back to `ConfigFile`, the stock description and `#`.
    /// A non-empty `default_value` is loaded on every parse unless the option is
    /// given explicitly.
    pub fn add_config_file_param(
        &mut self,
        name: &str,
        description: &str,
        default_value: &str,
        comment: &str,
    ) -> Result<()> {
        let name = or_default(name, DEFAULT_CONFIG_PARAM);
        let description = or_default(description, DEFAULT_CONFIG_DESCRIPTION);
        self.add_string_param(name, description, default_value)?;

        self.config = Some(ConfigFileSpec {
            param: ParamName::parse(name)?.long,
            comment: or_default(comment, DEFAULT_COMMENT).to_string(),
        });
        Ok(())
    }

    /// Points the config file lookup at another string parameter.
    pub fn set_config_file_option(&mut self, name: &str) {
        self.config.get_or_insert_with(ConfigFileSpec::default).param = name.to_string();
    }

    /// Adds a no-value option that prints `text` and stops the parse.
    pub fn add_version_param(&mut self, name: &str, description: &str, text: &str) {
        self.version = Some(VersionInfo {
            name: or_default(name, DEFAULT_VERSION_PARAM).to_string(),
            description: or_default(description, DEFAULT_VERSION_DESCRIPTION).to_string(),
            text: or_default(text, DEFAULT_VERSION_TEXT).to_string(),
        });
    }

    // --- parsing ---

    /// Parses process-style arguments (program name first) against stdout/stderr.
    pub fn parse<I, S>(&mut self, args: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = io::stdout().lock();
        let mut err = io::stderr().lock();
        let mut sinks = Sinks {
            out: &mut out,
            err: &mut err,
            out_color: Term::stdout().features().colors_supported(),
            err_color: Term::stderr().features().colors_supported(),
        };
        self.run(collect_args(args), &mut sinks)
    }

    /// Parses with explicit output and diagnostic sinks. Output is never styled.
    pub fn parse_with<I, S>(&mut self, args: I, out: &mut dyn Write, err: &mut dyn Write) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sinks = Sinks {
            out,
            err,
            out_color: false,
            err_color: false,
        };
        self.run(collect_args(args), &mut sinks)
    }

    fn run(&mut self, args: Vec<String>, sinks: &mut Sinks<'_>) -> Outcome {
        let (program, rest) = match args.split_first() {
            Some((program, rest)) => (program_name(program), rest),
            None => (String::new(), &[][..]),
        };

        let table = OptionTable::build(
            &self.registry,
            self.version.as_ref().map(|v| v.name.as_str()),
        );
        let mut staged = Vec::new();

        if let Some(spec) = &self.config {
            let prescan = config_file::prescan(&table, rest, &spec.param);
            if let Some(path) = config_file::config_path(&self.registry, spec, &prescan) {
                match config_file::stage_config(&self.registry, &path, &spec.comment) {
                    Ok(load) => {
                        for skipped in &load.skipped {
                            diagnostics::report(sinks.err, skipped, sinks.err_color);
                        }
                        staged.extend(load.assignments);
                    }
                    Err(e) => return sinks.abort(e),
                }
            }
        }

        let mut operands = Vec::new();
        for event in Scanner::new(&table, rest) {
            let (entry, value) = match event {
                Ok(ScanEvent::Matched { entry, value }) => (entry, value),
                Ok(ScanEvent::Operand(operand)) => {
                    operands.push(operand);
                    continue;
                }
                Err(e) => return sinks.abort(e),
            };

            match entry.tag {
                OptionTag::Help => {
                    let text = help::render_help(
                        &program,
                        &table,
                        &self.registry,
                        self.version.as_ref(),
                        self.layout,
                        sinks.out_color,
                    );
                    if let Err(e) = sinks.out.write_all(text.as_bytes()) {
                        return sinks.abort(e.into());
                    }
                    return Outcome::HelpShown;
                }
                OptionTag::Version => {
                    let text = self
                        .version
                        .as_ref()
                        .map(|v| v.text.as_str())
                        .unwrap_or(DEFAULT_VERSION_TEXT);
                    if let Err(e) = writeln!(sinks.out, "{}", text) {
                        return sinks.abort(e.into());
                    }
                    return Outcome::VersionShown;
                }
                OptionTag::Param(_) => {
                    let raw = value.unwrap_or_default();
                    // only the first space separated token is used
                    let first = raw.split(' ').next().unwrap_or_default();
                    match self.registry.stage(&entry.long, first) {
                        Ok(assignment) => staged.push(assignment),
                        Err(e) => return sinks.abort(e),
                    }
                }
            }
        }

        debug!("committing {} assignments", staged.len());
        if let Err(e) = self.registry.commit(staged) {
            return sinks.abort(e);
        }
        self.operands = operands;
        Outcome::Proceed
    }

    // --- values ---

    /// Arguments that were not options, in order, from the last successful parse.
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.registry.get(name)
    }

    pub fn get(&self, category: Category, name: &str) -> Result<&ParamValue> {
        self.registry.get_value(category, name)
    }

    /// Converts and stores `raw` for `name` outside of a parse.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        self.registry.set(name, raw)
    }

    pub fn as_bool(&self, name: &str) -> bool {
        recover(self.registry.try_bool(name))
    }

    pub fn as_int(&self, name: &str) -> i32 {
        recover(self.registry.try_int(name))
    }

    pub fn as_double(&self, name: &str) -> f64 {
        recover(self.registry.try_double(name))
    }

    /// Textual form of any parameter, so `as_string` on an int `42` gives `"42"`.
    pub fn as_string(&self, name: &str) -> String {
        recover(self.registry.to_text(name))
    }

    pub fn try_bool(&self, name: &str) -> Result<bool> {
        self.registry.try_bool(name)
    }

    pub fn try_int(&self, name: &str) -> Result<i32> {
        self.registry.try_int(name)
    }

    pub fn try_double(&self, name: &str) -> Result<f64> {
        self.registry.try_double(name)
    }

    pub fn try_str(&self, name: &str) -> Result<&str> {
        self.registry.try_str(name)
    }

    // --- output ---

    pub fn render_help(&self, program: &str) -> String {
        let table = OptionTable::build(
            &self.registry,
            self.version.as_ref().map(|v| v.name.as_str()),
        );
        help::render_help(
            program,
            &table,
            &self.registry,
            self.version.as_ref(),
            self.layout,
            false,
        )
    }

    pub fn print_help(&self, program: &str) -> Result<()> {
        io::stdout().write_all(self.render_help(program).as_bytes())?;
        Ok(())
    }

    pub fn render_values(&self, detailed: bool) -> String {
        help::render_values(&self.registry, detailed)
    }

    pub fn render_category(&self, category: Category, detailed: bool) -> String {
        help::render_category(&self.registry, category, detailed)
    }

    pub fn print_simple(&self) -> Result<()> {
        io::stdout().write_all(self.render_values(false).as_bytes())?;
        Ok(())
    }

    pub fn print_detailed(&self) -> Result<()> {
        io::stdout().write_all(self.render_values(true).as_bytes())?;
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<ParamSnapshot> {
        self.registry.snapshot()
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

fn collect_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|a| a.as_ref().to_string()).collect()
}

fn program_name(arg: &str) -> String {
    Path::new(arg)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg.to_string())
}

/// Reports a failed lookup and falls back to the zero value.
fn recover<T: Default>(result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        diagnostics::report_stderr(&e);
        T::default()
    })
}

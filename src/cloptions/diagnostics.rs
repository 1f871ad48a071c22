//! `[ERROR]` lines for problems the caller recovers from or reacts to.

use crate::error::Error;
use console::Style;
use once_cell::sync::Lazy;
use std::io::Write;

pub const ERROR_PREFIX: &str = "[ERROR]";

static ERROR_STYLE: Lazy<Style> = Lazy::new(|| Style::new().red().bold());

/// Writes one diagnostic line. Failures to write are ignored.
pub fn report(sink: &mut dyn Write, error: &Error, use_color: bool) {
    let prefix = if use_color {
        ERROR_STYLE.apply_to(ERROR_PREFIX).to_string()
    } else {
        ERROR_PREFIX.to_string()
    };
    let _ = writeln!(sink, "{} {}", prefix, error);
}

/// Writes to the process stderr, styled when it is a color terminal.
pub fn report_stderr(error: &Error) {
    let use_color = console::Term::stderr().features().colors_supported();
    report(&mut std::io::stderr(), error, use_color);
}

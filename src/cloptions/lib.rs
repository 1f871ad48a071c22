//! # CLOptions Architecture
//!
//! `cloptions` lets a program declare typed, named parameters with defaults and
//! descriptions, then fill them from the command line and an optional configuration
//! file. Help text is generated from the declarations.
//!
//! ```no_run
//! use cloptions::{Options, Outcome};
//!
//! let mut options = Options::new();
//! options.add_string_param("n,Name", "Who to greet.", "World").unwrap();
//! options.add_int_param("Times", "How many greetings.", 1).unwrap();
//! options.add_config_file_param("", "", "", "#").unwrap();
//!
//! match options.parse(std::env::args()) {
//!     Outcome::Proceed => {}
//!     Outcome::Aborted(_) => std::process::exit(2),
//!     _ => return,
//! }
//! for _ in 0..options.as_int("Times") {
//!     println!("Hello, {}!", options.as_string("Name"));
//! }
//! ```
//!
//! ## The Parse Pipeline
//!
//! ```text
//! ┌──────────────┐   build    ┌──────────────┐   scan    ┌──────────────┐
//! │   Registry   │ ─────────▶ │ Option Table │ ────────▶ │   Scanner    │
//! │ (registry.rs)│            │  (table.rs)  │           │ (scanner.rs) │
//! └──────────────┘            └──────────────┘           └──────────────┘
//!        ▲                                                      │
//!        │ commit                                               │ stage
//!        │                    ┌──────────────┐                  ▼
//!        └─────────────────── │   Staging    │ ◀─────── config_file.rs
//!                             │ (options.rs) │
//!                             └──────────────┘
//! ```
//!
//! The option table is rebuilt from the registry on every parse. Values from a
//! configuration file and from the command line are converted first and stored only
//! when the whole parse succeeds, config values before command line values.
//!
//! ## Option Syntax
//!
//! - `-Name v`, `--Name v`, `-Name=v`, `--Name=v`
//! - `-n v` and `-nv` for a parameter registered as `"n,Name"`
//! - any unambiguous prefix: `-Na v`
//! - `-h`, `-help`, `--help`: print help and stop
//! - `--`: everything after it is an operand
//!
//! ## Module Overview
//!
//! - [`param`]: categories, values and the parameter type
//! - [`coerce`]: text to typed value conversion
//! - [`registry`]: parameter storage, staging and lookups
//! - [`table`]: option table and option name resolution
//! - [`scanner`]: argument walking
//! - [`config_file`]: configuration file reading and the pre-scan
//! - [`help`]: help text and value dumps
//! - [`diagnostics`]: `[ERROR]` reporting
//! - [`options`]: the [`Options`] facade and [`Outcome`]

pub mod coerce;
pub mod config_file;
pub mod diagnostics;
pub mod error;
pub mod help;
pub mod options;
pub mod param;
pub mod registry;
pub mod scanner;
pub mod table;

pub use error::{Error, Result};
pub use help::{HelpLayout, VersionInfo};
pub use options::{Options, Outcome};
pub use param::{Category, Param, ParamName, ParamValue};
pub use registry::{ParamSnapshot, Registry};

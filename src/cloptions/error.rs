use crate::param::Category;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown command line parameter: {0}")]
    UnknownParameter(String),

    #[error("Parameter \"{name}\" is not a {expected} (it is a {actual})")]
    TypeMismatch {
        name: String,
        expected: Category,
        actual: Category,
    },

    #[error("Cannot read \"{value}\" as a {expected} value for parameter \"{name}\"")]
    MalformedValue {
        name: String,
        value: String,
        expected: Category,
    },

    #[error("Invalid parameter name: \"{0}\"")]
    InvalidName(String),

    #[error("Cannot read file ({source}):\n   \"{}\"", path.display())]
    ConfigFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {source}", path.display())]
    ConfigEntry {
        path: PathBuf,
        line: usize,
        source: Box<Error>,
    },

    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),

    #[error("option '{token}' is ambiguous; possibilities: {}", candidates.join(" "))]
    AmbiguousOption {
        token: String,
        candidates: Vec<String>,
    },

    #[error("option '{0}' requires an argument")]
    MissingValue(String),

    #[error("option '{0}' doesn't allow an argument")]
    UnexpectedValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

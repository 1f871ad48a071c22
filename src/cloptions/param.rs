//! # Typed Parameters
//!
//! A parameter is a named value with a description and a default. Its type is one of
//! four [`Category`] values and the stored value is a [`ParamValue`], a sum type over
//! the four concrete Rust types. The value can only change through the parsing
//! pipeline or through [`crate::Registry::set`]; the default never changes.
//!
//! Names may declare a single character short alias with the `"x,Name"` syntax.
//! [`ParamName`] splits that into the primary (long) name and the alias.

use crate::error::{Error, Result};
use crate::table::HELP_SHORT;
use serde::Serialize;
use std::fmt;

/// The kind of value a parameter holds.
///
/// Declaration order is the display order used by help output and value dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bool,
    Double,
    Int,
    String,
}

impl Category {
    /// Returns all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Bool,
            Category::Double,
            Category::Int,
            Category::String,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Bool => "bool",
            Category::Double => "double",
            Category::Int => "int",
            Category::String => "string",
        }
    }

    /// Banner used by the detailed value dump.
    pub fn heading(&self) -> &'static str {
        match self {
            Category::Bool => "BOOLEANS",
            Category::Double => "DOUBLES",
            Category::Int => "INTEGERS",
            Category::String => "STRINGS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parameter value tagged with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
}

impl ParamValue {
    pub fn category(&self) -> Category {
        match self {
            ParamValue::Bool(_) => Category::Bool,
            ParamValue::Int(_) => Category::Int,
            ParamValue::Double(_) => Category::Double,
            ParamValue::String(_) => Category::String,
        }
    }

    /// The value returned by accessors when a lookup fails.
    pub fn zero(category: Category) -> Self {
        match category {
            Category::Bool => ParamValue::Bool(false),
            Category::Int => ParamValue::Int(0),
            Category::Double => ParamValue::Double(0.0),
            Category::String => ParamValue::String(String::new()),
        }
    }
}

/// Booleans print as `1`/`0`, numbers in their shortest round-trip form.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", u8::from(*b)),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Double(d) => write!(f, "{}", d),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

/// A registered name: the primary long name plus an optional short alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamName {
    pub long: String,
    pub short: Option<char>,
}

impl ParamName {
    /// Parses `"Name"` or `"x,Name"`.
    ///
    /// The long name must be non-empty and may not start with `-` or contain
    /// whitespace, `=` or `,`. The alias, when present, must be one alphanumeric
    /// character other than `h`, which belongs to help.
    pub fn parse(spec: &str) -> Result<Self> {
        let (short, long) = match spec.split_once(',') {
            Some((alias, long)) => {
                let mut chars = alias.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_alphanumeric() && c != HELP_SHORT => (Some(c), long),
                    _ => return Err(Error::InvalidName(spec.to_string())),
                }
            }
            None => (None, spec),
        };

        let valid = !long.is_empty()
            && !long.starts_with('-')
            && !long
                .chars()
                .any(|c| c.is_whitespace() || c == '=' || c == ',');
        if !valid {
            return Err(Error::InvalidName(spec.to_string()));
        }

        Ok(Self {
            long: long.to_string(),
            short,
        })
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.short {
            Some(c) => write!(f, "{},{}", c, self.long),
            None => f.write_str(&self.long),
        }
    }
}

/// A single named value holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: ParamName,
    description: String,
    default_value: ParamValue,
    value: ParamValue,
}

impl Param {
    /// Creates a parameter whose current value starts at `default_value`.
    ///
    /// An empty description is replaced by a generated placeholder.
    pub fn new(name: ParamName, description: &str, default_value: ParamValue) -> Self {
        let description = if description.is_empty() {
            format!("No description for {}.", name.long)
        } else {
            description.to_string()
        };

        Self {
            name,
            description,
            value: default_value.clone(),
            default_value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name.long
    }

    pub fn short(&self) -> Option<char> {
        self.name.short
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> Category {
        self.default_value.category()
    }

    pub fn default_value(&self) -> &ParamValue {
        &self.default_value
    }

    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    pub(crate) fn clear_short(&mut self) {
        self.name.short = None;
    }

    /// Stores an already coerced value. The category never changes.
    pub(crate) fn store(&mut self, value: ParamValue) {
        debug_assert_eq!(value.category(), self.category());
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let name = ParamName::parse("Weight").unwrap();
        assert_eq!(name.long, "Weight");
        assert_eq!(name.short, None);
    }

    #[test]
    fn test_parse_name_with_short_alias() {
        let name = ParamName::parse("w,Weight").unwrap();
        assert_eq!(name.long, "Weight");
        assert_eq!(name.short, Some('w'));
        assert_eq!(name.to_string(), "w,Weight");
    }

    #[test]
    fn test_parse_rejects_bad_names() {
        for spec in ["", "-Name", "ab,Name", ",Name", "n,", "Two Words", "a=b", "a,b,c", "h,Height"] {
            assert!(
                matches!(ParamName::parse(spec), Err(Error::InvalidName(_))),
                "accepted {:?}",
                spec
            );
        }
    }

    #[test]
    fn test_empty_description_gets_placeholder() {
        let param = Param::new(ParamName::parse("n,Name").unwrap(), "", "".into());
        assert_eq!(param.description(), "No description for Name.");
    }

    #[test]
    fn test_new_param_starts_at_default() {
        let param = Param::new(ParamName::parse("Ratio").unwrap(), "ratio", 2.5.into());
        assert_eq!(param.value(), &ParamValue::Double(2.5));
        assert_eq!(param.default_value(), param.value());
        assert_eq!(param.category(), Category::Double);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ParamValue::Bool(true).to_string(), "1");
        assert_eq!(ParamValue::Bool(false).to_string(), "0");
        assert_eq!(ParamValue::Int(-42).to_string(), "-42");
        assert_eq!(ParamValue::Double(0.125).to_string(), "0.125");
        assert_eq!(ParamValue::Double(2.0).to_string(), "2");
        assert_eq!(ParamValue::from("x y").to_string(), "x y");
    }

    #[test]
    fn test_categories_in_display_order() {
        let mut sorted = Category::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::all());
        assert_eq!(Category::Int.to_string(), "int");
        assert_eq!(Category::Bool.heading(), "BOOLEANS");
    }
}

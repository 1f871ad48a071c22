//! # Parameter Registry
//!
//! The registry owns every [`Param`]. All parameters live in one ordered map keyed by
//! primary name, so a name identifies exactly one parameter regardless of its
//! category; registering a name again replaces the earlier parameter (last
//! registration wins, even across categories). A second index maps short aliases to
//! primary names.
//!
//! Writes happen in two steps. [`Registry::stage`] resolves a name and coerces raw
//! text into an [`Assignment`] without touching the stored value, and
//! [`Registry::commit`] applies a batch of assignments in order. The parser relies on
//! this to leave the registry untouched unless a parse completes.

use crate::coerce::coerce;
use crate::error::{Error, Result};
use crate::param::{Category, Param, ParamName, ParamValue};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// A coerced value waiting to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: ParamValue,
}

/// Serializable view of one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    pub category: Category,
    pub value: ParamValue,
    pub default: ParamValue,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    params: BTreeMap<String, Param>,
    shorts: BTreeMap<char, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parameter from a `"Name"` or `"x,Name"` spec.
    ///
    /// Returns the parameter it replaced, if any.
    pub fn register(
        &mut self,
        spec: &str,
        description: &str,
        default_value: ParamValue,
    ) -> Result<Option<Param>> {
        let name = ParamName::parse(spec)?;
        Ok(self.insert(Param::new(name, description, default_value)))
    }

    /// Inserts an already built parameter, replacing any parameter of the same name.
    ///
    /// A short alias already bound to another parameter moves to the new one.
    pub fn insert(&mut self, param: Param) -> Option<Param> {
        let long = param.name().to_string();

        let replaced = self.params.remove(&long);
        if let Some(old_short) = replaced.as_ref().and_then(Param::short) {
            self.shorts.remove(&old_short);
        }

        if let Some(short) = param.short() {
            if let Some(previous) = self.shorts.insert(short, long.clone()) {
                if let Some(owner) = self.params.get_mut(&previous) {
                    owner.clear_short();
                }
            }
        }

        debug!(
            "registered {} parameter {} (default {})",
            param.category(),
            long,
            param.default_value()
        );
        self.params.insert(long, param);
        replaced
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Looks up a name in a specific category.
    pub fn get_value(&self, category: Category, name: &str) -> Result<&ParamValue> {
        let param = self.lookup(name)?;
        if param.category() != category {
            return Err(Error::TypeMismatch {
                name: name.to_string(),
                expected: category,
                actual: param.category(),
            });
        }
        Ok(param.value())
    }

    /// Returns the primary name bound to a short alias.
    pub fn resolve_short(&self, short: char) -> Option<&str> {
        self.shorts.get(&short).map(String::as_str)
    }

    /// Resolves `name` and converts `raw` for it without storing anything.
    pub fn stage(&self, name: &str, raw: &str) -> Result<Assignment> {
        let param = self.lookup(name)?;
        let value = coerce(param.name(), param.category(), raw)?;
        Ok(Assignment {
            name: param.name().to_string(),
            value,
        })
    }

    /// Stores staged assignments in order, so later assignments win.
    ///
    /// The batch is checked first: an unknown name or a value of the wrong category
    /// fails the commit and nothing is stored.
    pub fn commit(&mut self, assignments: Vec<Assignment>) -> Result<()> {
        for assignment in &assignments {
            let param = self.lookup(&assignment.name)?;
            if param.category() != assignment.value.category() {
                return Err(self.mismatch(&assignment.name, param.category(), &assignment.value));
            }
        }

        for assignment in assignments {
            if let Some(param) = self.params.get_mut(&assignment.name) {
                debug!("{} = {}", assignment.name, assignment.value);
                param.store(assignment.value);
            }
        }
        Ok(())
    }

    /// Converts and stores `raw` for the parameter `name`.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<()> {
        let assignment = self.stage(name, raw)?;
        self.commit(vec![assignment])
    }

    /// Textual form of any parameter's current value.
    pub fn to_text(&self, name: &str) -> Result<String> {
        Ok(self.lookup(name)?.value().to_string())
    }

    pub fn try_bool(&self, name: &str) -> Result<bool> {
        match self.get_value(Category::Bool, name)? {
            ParamValue::Bool(b) => Ok(*b),
            other => Err(self.mismatch(name, Category::Bool, other)),
        }
    }

    pub fn try_int(&self, name: &str) -> Result<i32> {
        match self.get_value(Category::Int, name)? {
            ParamValue::Int(i) => Ok(*i),
            other => Err(self.mismatch(name, Category::Int, other)),
        }
    }

    pub fn try_double(&self, name: &str) -> Result<f64> {
        match self.get_value(Category::Double, name)? {
            ParamValue::Double(d) => Ok(*d),
            other => Err(self.mismatch(name, Category::Double, other)),
        }
    }

    pub fn try_str(&self, name: &str) -> Result<&str> {
        match self.get_value(Category::String, name)? {
            ParamValue::String(s) => Ok(s),
            other => Err(self.mismatch(name, Category::String, other)),
        }
    }

    /// Parameters of one category, sorted by name.
    pub fn iter_category(&self, category: Category) -> impl Iterator<Item = &Param> {
        self.params
            .values()
            .filter(move |param| param.category() == category)
    }

    /// All parameters, grouped by category in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        Category::all()
            .iter()
            .flat_map(move |category| self.iter_category(*category))
    }

    pub fn snapshot(&self) -> Vec<ParamSnapshot> {
        self.iter()
            .map(|param| ParamSnapshot {
                name: param.name().to_string(),
                short: param.short(),
                category: param.category(),
                value: param.value().clone(),
                default: param.default_value().clone(),
                description: param.description().to_string(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&Param> {
        self.params
            .get(name)
            .ok_or_else(|| Error::UnknownParameter(name.to_string()))
    }

    fn mismatch(&self, name: &str, expected: Category, found: &ParamValue) -> Error {
        Error::TypeMismatch {
            name: name.to_string(),
            expected,
            actual: found.category(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        let mut registry = Registry::new();
        registry.register("Flag", "a flag", false.into()).unwrap();
        registry.register("N", "a number", 5.into()).unwrap();
        registry.register("Ratio", "a ratio", 2.5.into()).unwrap();
        registry.register("l,Label", "a label", "x".into()).unwrap();
        registry
    }

    #[test]
    fn test_defaults_are_visible() {
        let registry = sample();
        assert!(!registry.try_bool("Flag").unwrap());
        assert_eq!(registry.try_int("N").unwrap(), 5);
        assert_eq!(registry.try_double("Ratio").unwrap(), 2.5);
        assert_eq!(registry.try_str("Label").unwrap(), "x");
    }

    #[test]
    fn test_set_converts_and_stores() {
        let mut registry = sample();
        registry.set("N", "42").unwrap();
        registry.set("Flag", "1").unwrap();
        assert_eq!(registry.try_int("N").unwrap(), 42);
        assert_eq!(registry.to_text("N").unwrap(), "42");
        assert!(registry.try_bool("Flag").unwrap());
    }

    #[test]
    fn test_set_unknown_name() {
        let mut registry = sample();
        assert!(matches!(
            registry.set("Bogus", "1"),
            Err(Error::UnknownParameter(name)) if name == "Bogus"
        ));
    }

    #[test]
    fn test_set_malformed_leaves_value() {
        let mut registry = sample();
        assert!(matches!(
            registry.set("N", "many"),
            Err(Error::MalformedValue { .. })
        ));
        assert_eq!(registry.try_int("N").unwrap(), 5);
    }

    #[test]
    fn test_wrong_category_is_mismatch() {
        let registry = sample();
        match registry.try_bool("Ratio") {
            Err(Error::TypeMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, Category::Bool);
                assert_eq!(actual, Category::Double);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_to_text_for_every_category() {
        let registry = sample();
        assert_eq!(registry.to_text("Flag").unwrap(), "0");
        assert_eq!(registry.to_text("Ratio").unwrap(), "2.5");
        assert_eq!(registry.to_text("Label").unwrap(), "x");
        assert!(registry.to_text("Missing").is_err());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = sample();
        let replaced = registry.register("N", "now a string", "s".into()).unwrap();
        assert_eq!(replaced.unwrap().category(), Category::Int);
        assert_eq!(registry.get("N").unwrap().category(), Category::String);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_short_alias_moves_to_latest_owner() {
        let mut registry = sample();
        assert_eq!(registry.resolve_short('l'), Some("Label"));

        registry.register("l,Length", "", 3.into()).unwrap();
        assert_eq!(registry.resolve_short('l'), Some("Length"));
        assert_eq!(registry.get("Label").unwrap().short(), None);
    }

    #[test]
    fn test_reregistering_drops_old_alias() {
        let mut registry = sample();
        registry.register("Label", "no alias now", "y".into()).unwrap();
        assert_eq!(registry.resolve_short('l'), None);
    }

    #[test]
    fn test_iter_orders_by_category_then_name() {
        let mut registry = sample();
        registry.register("Alpha", "", 1.into()).unwrap();
        let names: Vec<&str> = registry.iter().map(Param::name).collect();
        assert_eq!(names, vec!["Flag", "Ratio", "Alpha", "N", "Label"]);
    }

    #[test]
    fn test_commit_applies_in_order() {
        let mut registry = sample();
        let first = registry.stage("N", "1").unwrap();
        let second = registry.stage("N", "2").unwrap();
        assert_eq!(registry.try_int("N").unwrap(), 5);

        registry.commit(vec![first, second]).unwrap();
        assert_eq!(registry.try_int("N").unwrap(), 2);
    }

    #[test]
    fn test_commit_rejects_wrong_category() {
        let mut registry = sample();
        let good = registry.stage("Label", "kept out").unwrap();
        let bad = Assignment {
            name: "N".into(),
            value: "x".into(),
        };
        match registry.commit(vec![good, bad]) {
            Err(Error::TypeMismatch {
                name,
                expected,
                actual,
            }) => {
                assert_eq!(name, "N");
                assert_eq!(expected, Category::Int);
                assert_eq!(actual, Category::String);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(registry.try_int("N").unwrap(), 5);
        assert_eq!(registry.try_str("Label").unwrap(), "x");
    }

    #[test]
    fn test_commit_rejects_unknown_name() {
        let mut registry = sample();
        let stray = Assignment {
            name: "Bogus".into(),
            value: 1.into(),
        };
        assert!(matches!(
            registry.commit(vec![stray]),
            Err(Error::UnknownParameter(name)) if name == "Bogus"
        ));
    }

    #[test]
    fn test_snapshot_serializes() {
        let registry = sample();
        let json = serde_json::to_value(registry.snapshot()).unwrap();
        assert_eq!(json[0]["name"], "Flag");
        assert_eq!(json[0]["value"], false);
        assert_eq!(json[3]["short"], "l");
        assert_eq!(json[3]["category"], "string");
        assert!(json[0].get("short").is_none());
    }
}

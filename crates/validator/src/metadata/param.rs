//! Constraint parameters as declared on a member annotation.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::ParameterError;

// ============================================================================
// PARAM VALUE
// ============================================================================

/// A literal or reference passed to a constraint factory.
///
/// In JSON, booleans, integers, strings and arrays map to the matching
/// variant; any other number (a float, or an integer beyond `i64`) is kept
/// as written in [`ParamValue::Num`]; `{"ref": "Path::CONST"}` is a
/// reference to a named constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// `true` / `false`.
    Bool(bool),
    /// Integer literal.
    Int(i64),
    /// Number that is not an `i64`, preserved as-is.
    Num(Number),
    /// String literal, kept as a string.
    Str(String),
    /// List of values.
    List(Vec<ParamValue>),
    /// Reference to a named constant or type, preserved as written.
    Ref {
        /// The referenced path.
        #[serde(rename = "ref")]
        path: String,
    },
}

impl ParamValue {
    /// Creates a reference value.
    pub fn reference(path: impl Into<String>) -> Self {
        Self::Ref { path: path.into() }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Num(_) => "a number",
            Self::Str(_) => "a string",
            Self::List(_) => "a list",
            Self::Ref { .. } => "a reference",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Ref { path } => f.write_str(path),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<Number> for ParamValue {
    fn from(value: Number) -> Self {
        value.as_i64().map_or(Self::Num(value), Self::Int)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

// ============================================================================
// PARAMETERS
// ============================================================================

/// Named parameters in declaration order.
///
/// Factories read them by name with the typed accessors, which produce a
/// [`ParameterError`] naming the offending parameter.
///
/// # Examples
///
/// ```
/// use cascade_validator::metadata::Parameters;
///
/// let params = Parameters::new().with("from", 1).with("to", 5);
/// assert_eq!(params.int("from").unwrap(), 1);
/// assert_eq!(params.int_or("step", 1).unwrap(), 1);
/// assert!(params.str("to").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Parameters(IndexMap<String, ParamValue>);

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, keeping declaration order.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Looks up a parameter.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Iterates parameters in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters sorted by name: the order-insensitive form used for
    /// deduplication.
    pub fn canonical(&self) -> Vec<(String, ParamValue)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        entries
    }

    /// A required integer parameter.
    pub fn int(&self, name: &str) -> Result<i64, ParameterError> {
        match self.require(name)? {
            ParamValue::Int(n) => Ok(*n),
            other => Err(mismatch(name, "an integer", other)),
        }
    }

    /// An optional integer parameter.
    pub fn int_or(&self, name: &str, default: i64) -> Result<i64, ParameterError> {
        match self.get(name) {
            None => Ok(default),
            Some(ParamValue::Int(n)) => Ok(*n),
            Some(other) => Err(mismatch(name, "an integer", other)),
        }
    }

    /// A required numeric parameter, integer or not.
    pub fn number(&self, name: &str) -> Result<Number, ParameterError> {
        match self.require(name)? {
            ParamValue::Int(n) => Ok(Number::from(*n)),
            ParamValue::Num(n) => Ok(n.clone()),
            other => Err(mismatch(name, "a number", other)),
        }
    }

    /// A required string parameter.
    pub fn str(&self, name: &str) -> Result<&str, ParameterError> {
        match self.require(name)? {
            ParamValue::Str(s) => Ok(s),
            other => Err(mismatch(name, "a string", other)),
        }
    }

    /// An optional string parameter.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, ParameterError> {
        match self.get(name) {
            None => Ok(None),
            Some(ParamValue::Str(s)) => Ok(Some(s)),
            Some(other) => Err(mismatch(name, "a string", other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ParamValue, ParameterError> {
        self.get(name).ok_or_else(|| ParameterError::Missing {
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

fn mismatch(name: &str, expected: &'static str, found: &ParamValue) -> ParameterError {
    ParameterError::TypeMismatch {
        name: name.to_owned(),
        expected,
        found: format!("{} `{found}`", found.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn untagged_json_forms() {
        let params: Parameters = serde_json::from_str(
            r#"{"regexp": "[a-z]+", "from": 1, "strict": true, "flags": ["i"], "mode": {"ref": "Mode::STRICT"}}"#,
        )
        .unwrap();

        assert_eq!(params.get("regexp"), Some(&ParamValue::Str("[a-z]+".into())));
        assert_eq!(params.get("from"), Some(&ParamValue::Int(1)));
        assert_eq!(params.get("strict"), Some(&ParamValue::Bool(true)));
        assert_eq!(
            params.get("flags"),
            Some(&ParamValue::List(vec![ParamValue::Str("i".into())]))
        );
        assert_eq!(params.get("mode"), Some(&ParamValue::reference("Mode::STRICT")));
    }

    #[test]
    fn non_i64_numbers_pass_through() {
        let params: Parameters =
            serde_json::from_value(json!({"max": 1.5, "big": u64::MAX, "min": -3})).unwrap();

        assert_eq!(params.get("max"), Some(&ParamValue::Num(Number::from_f64(1.5).unwrap())));
        assert_eq!(params.get("big"), Some(&ParamValue::Num(Number::from(u64::MAX))));
        assert_eq!(params.get("min"), Some(&ParamValue::Int(-3)));
        assert_eq!(params.to_string(), "max = 1.5, big = 18446744073709551615, min = -3");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({"max": 1.5, "big": u64::MAX, "min": -3})
        );

        assert_eq!(params.number("max").unwrap().as_f64(), Some(1.5));
        assert_eq!(params.number("min").unwrap().as_i64(), Some(-3));
        assert!(matches!(
            params.int("max"),
            Err(ParameterError::TypeMismatch { ref found, .. }) if found == "a number `1.5`"
        ));
    }

    #[test]
    fn float_parameters_take_part_in_deduplication() {
        let a = Parameters::new().with("max", Number::from_f64(0.5).unwrap()).with("min", 0);
        let b = Parameters::new().with("min", 0).with("max", Number::from_f64(0.5).unwrap());
        let c = Parameters::new().with("min", 0).with("max", Number::from_f64(0.25).unwrap());

        assert_eq!(a.canonical(), b.canonical());
        assert_ne!(a.canonical(), c.canonical());
    }

    #[test]
    fn integral_numbers_normalize_to_int() {
        assert_eq!(ParamValue::from(Number::from(7)), ParamValue::Int(7));
    }

    #[test]
    fn declaration_order_is_kept() {
        let params = Parameters::new().with("to", 5).with("from", 1);
        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["to", "from"]);
        assert_eq!(params.to_string(), "to = 5, from = 1");
    }

    #[test]
    fn canonical_form_ignores_order() {
        let a = Parameters::new().with("to", 5).with("from", 1);
        let b = Parameters::new().with("from", 1).with("to", 5);
        assert_eq!(a.canonical(), b.canonical());
    }

    #[test]
    fn typed_accessors_report_problems() {
        let params = Parameters::new().with("from", "one");

        assert_eq!(
            params.int("from"),
            Err(ParameterError::TypeMismatch {
                name: "from".into(),
                expected: "an integer",
                found: "a string `\"one\"`".into(),
            })
        );
        assert_eq!(
            params.int("to"),
            Err(ParameterError::Missing { name: "to".into() })
        );
        assert_eq!(params.opt_str("message"), Ok(None));
    }

    #[test]
    fn strings_display_quoted_references_bare() {
        assert_eq!(ParamValue::from("x").to_string(), "\"x\"");
        assert_eq!(ParamValue::reference("Mode::LAX").to_string(), "Mode::LAX");
        assert_eq!(
            ParamValue::List(vec![1.into(), 2.into()]).to_string(),
            "[1, 2]"
        );
    }
}

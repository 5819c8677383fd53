//! `Size`: bounds the length of a string, array or object.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ParameterError;
use crate::foundation::{ConstraintFactory, Validator};
use crate::metadata::Parameters;

constraint! {
    /// Requires the length to lie in `[from, to]`.
    ///
    /// Strings are measured in characters, arrays in elements, objects in
    /// entries.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Size { from: i64, to: i64 };
    check(self, value) {
        let detail = match value.map(|v| (v, length(v))) {
            None => Some("but value was null".to_owned()),
            Some((v, None)) => Some(format!("but {} has no size", kind(v))),
            Some((_, Some(n))) if n < self.from => Some(format!("but was smaller: {n}")),
            Some((_, Some(n))) if n > self.to => Some(format!("but was greater: {n}")),
            Some((_, Some(_))) => None,
        };
        detail.map(|detail| {
            format!("size must be in range from '{}' to '{}', {detail}", self.from, self.to).into()
        })
    }
}

fn length(value: &Value) -> Option<i64> {
    let len = match value {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => return None,
    };
    Some(i64::try_from(len).unwrap_or(i64::MAX))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        _ => "the value",
    }
}

/// Builds [`Size`] from `from` (default 0) and `to` (default `i64::MAX`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeFactory;

impl ConstraintFactory for SizeFactory {
    fn create(&self, parameters: &Parameters) -> Result<Arc<dyn Validator>, ParameterError> {
        let from = parameters.int_or("from", 0)?;
        let to = parameters.int_or("to", i64::MAX)?;
        if from < 0 {
            return Err(ParameterError::Invalid {
                name: "from".into(),
                reason: format!("can't be less than 0, but was {from}"),
            });
        }
        if to < from {
            return Err(ParameterError::Invalid {
                name: "to".into(),
                reason: format!("can't be less than `from` ({from}), but was {to}"),
            });
        }
        Ok(Arc::new(Size { from, to }))
    }
}

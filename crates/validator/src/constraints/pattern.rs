//! `Pattern`: requires a string to fully match a regular expression.

use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::error::ParameterError;
use crate::foundation::{ConstraintFactory, Validator};
use crate::metadata::Parameters;

constraint! {
    /// Requires a string that matches `regex` as a whole.
    ///
    /// A declared `message` replaces the default wording.
    pub Pattern { regex: Regex, message: String };
    check(self, value) {
        match value {
            None => Some(format!("{}, but value was null", self.message).into()),
            Some(Value::String(s)) if self.regex.is_match(s) => None,
            Some(Value::String(_)) => Some(self.message.clone().into()),
            Some(other) => Some(format!("{}, but was not a string: {other}", self.message).into()),
        }
    }
}

/// Builds [`Pattern`] from `regexp` and an optional `message`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternFactory;

impl ConstraintFactory for PatternFactory {
    fn create(&self, parameters: &Parameters) -> Result<Arc<dyn Validator>, ParameterError> {
        let source = parameters.str("regexp")?;
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| ParameterError::Invalid {
            name: "regexp".into(),
            reason: e.to_string(),
        })?;
        let message = parameters
            .opt_str("message")?
            .map_or_else(|| format!("must match `{source}`"), str::to_owned);
        Ok(Arc::new(Pattern { regex, message }))
    }
}

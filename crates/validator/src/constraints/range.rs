//! `Range`: bounds a numeric value.

use std::sync::Arc;

use serde_json::{Number, Value};

use crate::error::ParameterError;
use crate::foundation::{ConstraintFactory, Validator};
use crate::metadata::Parameters;

constraint! {
    /// Requires a number in `[from, to]`.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Range { from: i64, to: i64 };
    check(self, value) {
        let detail = match value {
            None => Some("but value was null".to_owned()),
            Some(Value::Number(n)) if !self.contains(n) => Some(format!("but was {n}")),
            Some(Value::Number(_)) => None,
            Some(other) => Some(format!("but was not a number: {other}")),
        };
        detail.map(|detail| {
            format!("must be in range from '{}' to '{}', {detail}", self.from, self.to).into()
        })
    }
}

impl Range {
    fn contains(&self, n: &Number) -> bool {
        if let Some(i) = n.as_i64() {
            (self.from..=self.to).contains(&i)
        } else if n.as_u64().is_some() {
            false
        } else {
            n.as_f64()
                .is_some_and(|f| f >= self.from as f64 && f <= self.to as f64)
        }
    }
}

/// Builds [`Range`] from the required `from` and `to` bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeFactory;

impl ConstraintFactory for RangeFactory {
    fn create(&self, parameters: &Parameters) -> Result<Arc<dyn Validator>, ParameterError> {
        let from = parameters.int("from")?;
        let to = parameters.int("to")?;
        if to < from {
            return Err(ParameterError::Invalid {
                name: "to".into(),
                reason: format!("can't be less than `from` ({from}), but was {to}"),
            });
        }
        Ok(Arc::new(Range { from, to }))
    }
}

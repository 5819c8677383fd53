//! The defect reported by a validator.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single constraint violation: where it happened and what is wrong.
///
/// Uses `Cow<'static, str>` for the message so the common case of a static
/// message does not allocate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path of the offending value, e.g. `"address.city"`.
    ///
    /// Empty when the top-level value itself is invalid.
    pub path: String,

    /// Human-readable description of the defect.
    pub message: Cow<'static, str>,
}

impl Violation {
    /// Creates a violation at `path`.
    pub fn new(path: impl Into<String>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_path() {
        let v = Violation::new("address.city", "must not be blank");
        assert_eq!(v.to_string(), "address.city: must not be blank");
    }

    #[test]
    fn display_at_root() {
        let v = Violation::new("", "Input value is null");
        assert_eq!(v.to_string(), "Input value is null");
    }

    #[test]
    fn serializes_as_plain_object() {
        let v = Violation::new("name", "must not be blank");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"path": "name", "message": "must not be blank"})
        );
    }
}

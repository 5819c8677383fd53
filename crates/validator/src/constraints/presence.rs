//! Presence constraints: `NotNull`, `NotBlank`, `NotEmpty`.

use serde_json::Value;

use crate::foundation::NOT_NULL_MESSAGE;

constraint! {
    /// Rejects an absent value.
    pub NotNull;
    check(value) {
        value.is_none().then(|| NOT_NULL_MESSAGE.into())
    }
}

constraint! {
    /// Requires a string with at least one non-whitespace character.
    ///
    /// Absent and non-string values are blank.
    pub NotBlank;
    check(value) {
        let blank = value
            .and_then(Value::as_str)
            .is_none_or(|s| s.trim().is_empty());
        blank.then(|| "must not be blank".into())
    }
}

constraint! {
    /// Rejects an absent value and an empty string, array or object.
    pub NotEmpty;
    check(value) {
        match value {
            None => Some("must not be empty, but was null".into()),
            Some(Value::String(s)) if s.is_empty() => Some("must not be empty".into()),
            Some(Value::Array(items)) if items.is_empty() => Some("must not be empty".into()),
            Some(Value::Object(map)) if map.is_empty() => Some("must not be empty".into()),
            Some(_) => None,
        }
    }
}

//! Validation context threaded through a single `validate` call.
//!
//! A context carries the dotted path of the value currently being validated
//! and the fail-fast switch. Contexts are never mutated: [`add_path`] and
//! [`add_index`] return a child context, so a nested validator can report a
//! fully qualified path (`address.city`) without knowing how deep it sits.
//!
//! [`add_path`]: ValidationContext::add_path
//! [`add_index`]: ValidationContext::add_index

use std::borrow::Cow;

use super::Violation;

// ============================================================================
// VALIDATION CONTEXT
// ============================================================================

/// Path prefix and fail-fast switch for one validation run.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::ValidationContext;
///
/// let root = ValidationContext::new();
/// let city = root.add_path("address").add_path("city");
///
/// assert_eq!(city.path(), "address.city");
/// assert_eq!(root.path(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    path: String,
    fail_fast: bool,
}

impl ValidationContext {
    /// Creates a root context that accumulates every violation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a root context that stops at the first violation.
    #[must_use]
    pub fn fail_fast() -> Self {
        Self {
            path: String::new(),
            fail_fast: true,
        }
    }

    /// Starts building a context with a custom path prefix.
    #[must_use]
    pub fn builder() -> ValidationContextBuilder {
        ValidationContextBuilder::new()
    }

    /// Returns a child context with `segment` appended to the path.
    #[must_use]
    pub fn add_path(&self, segment: &str) -> Self {
        let path = if self.path.is_empty() {
            segment.to_owned()
        } else {
            let mut path = String::with_capacity(self.path.len() + 1 + segment.len());
            path.push_str(&self.path);
            path.push('.');
            path.push_str(segment);
            path
        };

        Self {
            path,
            fail_fast: self.fail_fast,
        }
    }

    /// Returns a child context addressing element `index` of the current value.
    #[must_use]
    pub fn add_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{index}]", self.path),
            fail_fast: self.fail_fast,
        }
    }

    /// The dotted path accumulated so far. Empty at the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether validation stops at the first violation.
    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Builds a violation located at this context's path.
    pub fn violates(&self, message: impl Into<Cow<'static, str>>) -> Violation {
        Violation::new(self.path.clone(), message)
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`ValidationContext`].
#[derive(Debug, Default)]
pub struct ValidationContextBuilder {
    path: String,
    fail_fast: bool,
}

impl ValidationContextBuilder {
    /// Creates a builder for a root, accumulating context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path prefix reported for the top-level value.
    #[must_use = "builder methods must be chained or built"]
    pub fn path(mut self, prefix: impl Into<String>) -> Self {
        self.path = prefix.into();
        self
    }

    /// Enables or disables fail-fast mode.
    #[must_use = "builder methods must be chained or built"]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Builds the context.
    #[must_use]
    pub fn build(self) -> ValidationContext {
        ValidationContext {
            path: self.path,
            fail_fast: self.fail_fast,
        }
    }
}

//! Core traits for the validation system
//!
//! [`Validator`] is implemented by everything that can check a value:
//! constraint instances, hand-written nested validators and the composite
//! validators produced by [`assembly`](crate::assembly).
//! [`ConstraintFactory`] builds constraint instances from declared parameters.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{ValidationContext, Violation};
use crate::error::ParameterError;
use crate::metadata::Parameters;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// Checks a value and reports every defect found.
///
/// `value` is `None` when the value is absent (a missing member or JSON
/// `null`). Implementations never fail: defects are returned as violations,
/// located with [`ValidationContext::violates`].
///
/// Validators are shared between fields and across threads, so they must be
/// `Send + Sync` and keep no per-call state.
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::{ValidationContext, Validator, Violation};
/// use serde_json::{Value, json};
///
/// struct Positive;
///
/// impl Validator for Positive {
///     fn validate(&self, value: Option<&Value>, context: &ValidationContext) -> Vec<Violation> {
///         match value.and_then(Value::as_i64) {
///             Some(n) if n > 0 => Vec::new(),
///             _ => vec![context.violates("must be positive")],
///         }
///     }
/// }
///
/// let ctx = ValidationContext::new();
/// assert!(Positive.validate(Some(&json!(3)), &ctx).is_empty());
/// assert_eq!(Positive.validate(Some(&json!(-1)), &ctx).len(), 1);
/// ```
pub trait Validator: Send + Sync {
    /// Validates `value`, returning violations in the order they were found.
    fn validate(&self, value: Option<&Value>, context: &ValidationContext) -> Vec<Violation>;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, value: Option<&Value>, context: &ValidationContext) -> Vec<Violation> {
        (**self).validate(value, context)
    }
}

// ============================================================================
// FUNCTION VALIDATOR
// ============================================================================

/// A [`Validator`] backed by a closure. Created with [`from_fn`].
pub struct FnValidator<F> {
    validate_fn: F,
}

impl<F> std::fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValidator")
            .field("validate_fn", &"<function>")
            .finish()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(Option<&Value>, &ValidationContext) -> Vec<Violation> + Send + Sync,
{
    fn validate(&self, value: Option<&Value>, context: &ValidationContext) -> Vec<Violation> {
        (self.validate_fn)(value, context)
    }
}

/// Wraps a closure as a [`Validator`].
///
/// # Examples
///
/// ```
/// use cascade_validator::foundation::{ValidationContext, Validator, from_fn};
/// use serde_json::json;
///
/// let even = from_fn(|value, ctx| match value.and_then(|v| v.as_i64()) {
///     Some(n) if n % 2 == 0 => Vec::new(),
///     _ => vec![ctx.violates("must be even")],
/// });
///
/// assert!(even.validate(Some(&json!(4)), &ValidationContext::new()).is_empty());
/// ```
pub fn from_fn<F>(validate_fn: F) -> FnValidator<F>
where
    F: Fn(Option<&Value>, &ValidationContext) -> Vec<Violation> + Send + Sync,
{
    FnValidator { validate_fn }
}

// ============================================================================
// CONSTRAINT FACTORY
// ============================================================================

/// Builds constraint instances from the parameters declared on a member.
///
/// A factory is invoked once per distinct parameter set within a composed
/// validator; the resulting instance is shared by every field that declares
/// the same constraint configuration.
pub trait ConstraintFactory: Send + Sync {
    /// Creates a constraint configured by `parameters`.
    fn create(&self, parameters: &Parameters) -> Result<Arc<dyn Validator>, ParameterError>;
}

/// A parameterless [`ConstraintFactory`] producing `V::default()`.
pub struct DefaultFactory<V> {
    _phantom: PhantomData<fn() -> V>,
}

impl<V> DefaultFactory<V> {
    /// Creates the factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<V> Default for DefaultFactory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ConstraintFactory for DefaultFactory<V>
where
    V: Validator + Default + 'static,
{
    fn create(&self, _parameters: &Parameters) -> Result<Arc<dyn Validator>, ParameterError> {
        Ok(Arc::new(V::default()))
    }
}

// ============================================================================
// TYPED ENTRY POINT
// ============================================================================

/// Validates any serializable value by converting it to JSON first.
///
/// `None` is reported like an absent top-level value.
///
/// # Errors
///
/// Returns the serializer's error when `value` cannot be represented as JSON;
/// validation itself never fails.
pub fn validate_serialized<T, V>(
    validator: &V,
    value: Option<&T>,
    context: &ValidationContext,
) -> Result<Vec<Violation>, serde_json::Error>
where
    T: Serialize + ?Sized,
    V: Validator + ?Sized,
{
    let json = value.map(serde_json::to_value).transpose()?;
    Ok(validator.validate(json.as_ref(), context))
}

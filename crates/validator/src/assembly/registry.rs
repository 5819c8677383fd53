//! Registry of constraint factories and validators for assembly.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::foundation::{ConstraintFactory, Validator};
use crate::metadata::TypeRef;

/// Where [`CompositeValidator::assemble`](super::CompositeValidator::assemble)
/// finds rule instances.
///
/// Constraint factories are keyed by the factory type's name (without generic
/// arguments); validators by the type they validate. Hand-written validators
/// and assembled composites live side by side.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use cascade_validator::assembly::RuleRegistry;
/// use cascade_validator::foundation::from_fn;
/// use cascade_validator::metadata::TypeRef;
///
/// let mut registry = RuleRegistry::new();
/// registry.register_validator("Email", Arc::new(from_fn(|_, _| Vec::new())));
///
/// assert!(registry.contains_validator(&TypeRef::new("Email")));
/// ```
#[derive(Default, Clone)]
pub struct RuleRegistry {
    factories: HashMap<String, Arc<dyn ConstraintFactory>>,
    validators: HashMap<TypeRef, Arc<dyn Validator>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in constraint factories.
    #[cfg(feature = "builtin")]
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        crate::constraints::register(&mut registry);
        registry
    }

    /// Registers a constraint factory under `name`, replacing any previous one.
    pub fn register_factory(&mut self, name: impl Into<String>, factory: Arc<dyn ConstraintFactory>) {
        let name = name.into();
        tracing::trace!(factory = %name, "registered constraint factory");
        self.factories.insert(name, factory);
    }

    /// Registers the validator of `ty`, replacing any previous one.
    pub fn register_validator(&mut self, ty: impl Into<TypeRef>, validator: Arc<dyn Validator>) {
        let ty = ty.into();
        tracing::trace!(ty = %ty, "registered validator");
        self.validators.insert(ty, validator);
    }

    /// Looks up a factory by name.
    pub fn factory(&self, name: &str) -> Option<Arc<dyn ConstraintFactory>> {
        self.factories.get(name).cloned()
    }

    /// Looks up the validator of `ty`.
    pub fn validator(&self, ty: &TypeRef) -> Option<Arc<dyn Validator>> {
        self.validators.get(ty).cloned()
    }

    /// Whether a validator is registered for `ty`.
    #[must_use]
    pub fn contains_validator(&self, ty: &TypeRef) -> bool {
        self.validators.contains_key(ty)
    }

    /// Removes the validator of `ty`, returning it.
    pub fn remove_validator(&mut self, ty: &TypeRef) -> Option<Arc<dyn Validator>> {
        self.validators.remove(ty)
    }

    /// Registered factory names, sorted.
    #[must_use]
    pub fn factory_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut validators: Vec<_> = self.validators.keys().map(ToString::to_string).collect();
        validators.sort_unstable();
        f.debug_struct("RuleRegistry")
            .field("factories", &self.factory_names())
            .field("validators", &validators)
            .finish()
    }
}

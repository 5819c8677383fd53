//! Validator assembly
//!
//! Binds a [`ValidatorPlan`](crate::compose::ValidatorPlan) to live rule
//! instances taken from a [`RuleRegistry`], producing a
//! [`CompositeValidator`].

mod composite;
mod registry;

pub use composite::CompositeValidator;
pub use registry::RuleRegistry;

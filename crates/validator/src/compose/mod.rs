//! Validator composition
//!
//! Turns a [`ValidatorMeta`](crate::metadata::ValidatorMeta) into a
//! [`ValidatorPlan`]: every rule declaration is interned in a
//! [`DeduplicationIndex`], so each distinct configuration is bound to one
//! shared [`Handle`], and every field gets an ordered chain of [`RuleStep`]s.

mod composer;
mod index;
mod plan;

pub use composer::compose;
pub use index::{DeduplicationIndex, Handle, HandleId, RuleRef};
pub use plan::{FieldPlan, RuleStep, ValidatorPlan};

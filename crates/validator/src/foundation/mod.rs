//! Runtime building blocks shared by every validator
//!
//! - **Context**: [`ValidationContext`], an immutable path accumulator with a
//!   fail-fast switch
//! - **Violation**: [`Violation`], the reported defect
//! - **Traits**: [`Validator`], [`ConstraintFactory`]
//!
//! Everything here is call-scoped or stateless, so validators built on top of
//! it can be shared across threads.

pub mod context;
pub mod traits;
pub mod violation;

pub use context::{ValidationContext, ValidationContextBuilder};
pub use traits::{
    ConstraintFactory, DefaultFactory, FnValidator, Validator, from_fn, validate_serialized,
};
pub use violation::Violation;

/// Message reported when the top-level value handed to a composed validator is absent.
pub const NULL_INPUT_MESSAGE: &str = "Input value is null";

/// Message reported by presence checks on non-nullable members.
pub const NOT_NULL_MESSAGE: &str = "must not be null";

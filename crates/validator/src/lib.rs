//! # cascade-validator
//!
//! Synthesizes composite validators from a declarative description of a
//! record type's fields.
//!
//! A [`TypeDescription`](metadata::TypeDescription) lists members with their
//! nullability and attached annotations. The pipeline turns it into an
//! executable validator in four steps:
//!
//! 1. [`MetadataExtractor`](metadata::MetadataExtractor) resolves annotations
//!    through the [`RuleCatalog`](catalog::RuleCatalog) into a
//!    [`ValidatorMeta`](metadata::ValidatorMeta).
//! 2. [`compose`](compose::compose) interns every rule in a
//!    [`DeduplicationIndex`](compose::DeduplicationIndex) and produces a
//!    [`ValidatorPlan`](compose::ValidatorPlan).
//! 3. [`CompositeValidator::assemble`](assembly::CompositeValidator::assemble)
//!    binds each handle of the plan to one shared rule instance.
//! 4. [`Validator::validate`](foundation::Validator::validate) walks an
//!    instance and reports [`Violation`](foundation::Violation)s.
//!
//! [`Synthesizer`](synth::Synthesizer) drives the whole pipeline over a batch
//! of types.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cascade_validator::prelude::*;
//! use serde_json::json;
//!
//! let person = TypeDescription::record("Person")
//!     .member(MemberDescription::new("name", "String").annotated(Annotation::new("NotBlank")));
//!
//! let synth = Synthesizer::new(RuleCatalog::with_builtin());
//! let plan = synth.compile(&person)?;
//! let validator = CompositeValidator::assemble(plan, &RuleRegistry::with_builtin())?;
//!
//! let violations = validator.validate(Some(&json!({"name": ""})), &ValidationContext::new());
//! assert_eq!(violations[0].path, "name");
//! ```

#[cfg(feature = "builtin")]
#[macro_use]
mod macros;

pub mod assembly;
pub mod catalog;
pub mod compose;
#[cfg(feature = "builtin")]
pub mod constraints;
pub mod error;
pub mod foundation;
pub mod metadata;
pub mod prelude;
pub mod synth;

//! Prelude module for convenient imports.
//!
//! Provides a single `use cascade_validator::prelude::*;` import that brings
//! in the declarative model, the pipeline stages and the runtime types.

// ============================================================================
// FOUNDATION: Runtime traits and values
// ============================================================================

pub use crate::foundation::{
    ConstraintFactory, DefaultFactory, ValidationContext, Validator, Violation, from_fn,
    validate_serialized,
};

// ============================================================================
// METADATA: Declarative input and resolved model
// ============================================================================

pub use crate::metadata::{
    Annotation, AnnotationType, DeclarationKind, MemberDescription, ParamValue, Parameters,
    Schema, SynthOptions, TypeDescription, TypeRef,
};

// ============================================================================
// PIPELINE: Catalog, composition, assembly, synthesis
// ============================================================================

pub use crate::assembly::{CompositeValidator, RuleRegistry};
pub use crate::catalog::{Markers, RuleCatalog};
pub use crate::compose::ValidatorPlan;
pub use crate::error::{AssemblyError, ParameterError, SynthError};
pub use crate::synth::{SynthReport, Synthesizer, emit_plan};

//! Build-time error types.
//!
//! Validation itself never fails; these errors come from extracting,
//! composing, assembling and emitting validators. Each one names the
//! declaration or handle it concerns so a caller can produce an actionable
//! diagnostic.

use std::io;
use std::path::PathBuf;

use crate::metadata::{Annotation, DeclarationKind, TypeRef};

/// Errors raised while synthesizing the validator of one type.
///
/// A failure is scoped to its type: the [`Synthesizer`](crate::synth::Synthesizer)
/// reports it and carries on with the rest of the batch.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// The type cannot hold instance state, so there is nothing to walk.
    #[error("validator can't be synthesized for {kind} `{ty}`")]
    UnsupportedDeclaration {
        /// The offending type.
        ty: TypeRef,
        /// Its declaration kind.
        kind: DeclarationKind,
    },

    /// A constraint annotation does not resolve to a rule factory.
    #[error("malformed rule declaration {annotation} on `{owner}.{member}`: {reason}")]
    MalformedRuleDeclaration {
        /// Type declaring the member.
        owner: TypeRef,
        /// Member carrying the annotation.
        member: String,
        /// The annotation as written on the member.
        annotation: Annotation,
        /// What is wrong with it.
        reason: String,
    },

    /// The composed plan could not be bound to rule instances.
    #[error("failed to assemble validator for `{ty}`")]
    Assembly {
        /// The type whose validator failed to assemble.
        ty: TypeRef,
        /// The underlying assembly failure.
        #[source]
        source: AssemblyError,
    },

    /// Writing a rendered plan failed. Not retried: re-run the build.
    #[error("failed to write `{}`", path.display())]
    Emission {
        /// Destination that could not be written.
        path: PathBuf,
        /// The I/O failure.
        #[source]
        source: io::Error,
    },
}

impl SynthError {
    /// The type this error is reported against, when it names one.
    pub fn type_ref(&self) -> Option<&TypeRef> {
        match self {
            Self::UnsupportedDeclaration { ty, .. } | Self::Assembly { ty, .. } => Some(ty),
            Self::MalformedRuleDeclaration { owner, .. } => Some(owner),
            Self::Emission { .. } => None,
        }
    }
}

/// Errors raised while binding plan handles to rule instances.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// No factory is registered under the rule type's name.
    #[error("no constraint factory registered for `{factory}` (handle `{handle}`)")]
    MissingFactory {
        /// Handle that needed the factory.
        handle: String,
        /// The rule type that was looked up.
        factory: TypeRef,
    },

    /// No validator is registered for a cascaded type.
    #[error("no validator registered for `{ty}` (handle `{handle}`)")]
    MissingValidator {
        /// Handle that needed the validator.
        handle: String,
        /// The validated type.
        ty: TypeRef,
    },

    /// A factory rejected the declared parameters.
    #[error("factory `{factory}` rejected parameters of handle `{handle}`")]
    Parameter {
        /// Handle being constructed.
        handle: String,
        /// The rule type whose factory failed.
        factory: TypeRef,
        /// Why the parameters were rejected.
        #[source]
        source: ParameterError,
    },

    /// The number of supplied rule instances does not match the plan.
    #[error("validator takes {expected} rule instances, got {actual}")]
    Arity {
        /// Handles in the plan.
        expected: usize,
        /// Instances supplied.
        actual: usize,
    },
}

/// Errors raised by a [`ConstraintFactory`](crate::foundation::ConstraintFactory)
/// for unusable parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// A required parameter was not declared.
    #[error("missing parameter `{name}`")]
    Missing {
        /// Parameter name.
        name: String,
    },

    /// A parameter has the wrong kind of value.
    #[error("parameter `{name}` must be {expected}, got {found}")]
    TypeMismatch {
        /// Parameter name.
        name: String,
        /// Expected kind, e.g. `"an integer"`.
        expected: &'static str,
        /// The declared value.
        found: String,
    },

    /// A parameter is well-typed but unusable.
    #[error("parameter `{name}` is invalid: {reason}")]
    Invalid {
        /// Parameter name.
        name: String,
        /// Why the value is rejected.
        reason: String,
    },
}
